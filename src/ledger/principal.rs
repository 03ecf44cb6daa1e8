use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Longest identity accepted, contract principals included.
pub const PRINCIPAL_MAX_LEN: usize = 128;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("principal cannot be empty")]
    Empty,

    #[error("principal is {len} characters, limit is {}", PRINCIPAL_MAX_LEN)]
    TooLong { len: usize },

    #[error("principal '{0}' contains invalid characters")]
    InvalidFormat(String),
}

fn principal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("principal pattern is valid")
    })
}

/// Identity able to hold a balance or own the token.
///
/// Accepts standard principals (`ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM`) and
/// contract principals (`ST1PQ...GZGM.orangecoin`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    pub fn new(value: impl Into<String>) -> Result<Self, PrincipalError> {
        let value = value.into();
        if value.is_empty() {
            return Err(PrincipalError::Empty);
        }
        if value.len() > PRINCIPAL_MAX_LEN {
            return Err(PrincipalError::TooLong { len: value.len() });
        }
        if !principal_pattern().is_match(&value) {
            return Err(PrincipalError::InvalidFormat(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Principal {
    type Error = PrincipalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Principal> for String {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
