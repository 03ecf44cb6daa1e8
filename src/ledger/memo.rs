use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest memo a transfer may carry, in bytes.
pub const MEMO_MAX_LEN: usize = 34;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MemoError {
    #[error("memo is {len} bytes, limit is {}", MEMO_MAX_LEN)]
    TooLong { len: usize },

    #[error("memo is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Opaque annotation attached to a transfer. Travels as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Memo(Vec<u8>);

impl Memo {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, MemoError> {
        let bytes = bytes.into();
        if bytes.len() > MEMO_MAX_LEN {
            return Err(MemoError::TooLong { len: bytes.len() });
        }
        Ok(Self(bytes))
    }

    pub fn from_hex(encoded: &str) -> Result<Self, MemoError> {
        let trimmed = encoded.strip_prefix("0x").unwrap_or(encoded);
        Self::new(hex::decode(trimmed)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<String> for Memo {
    type Error = MemoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Memo> for String {
    fn from(memo: Memo) -> Self {
        memo.to_hex()
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_accepts_prefixed_hex() {
        let memo = Memo::from_hex("0x696e766f6963652d3432").unwrap();
        assert_eq!(memo.as_bytes(), b"invoice-42");
        assert_eq!(memo.to_string(), "0x696e766f6963652d3432");
    }

    #[test]
    fn test_memo_length_limit() {
        assert!(Memo::new(vec![0u8; MEMO_MAX_LEN]).is_ok());
        assert_eq!(
            Memo::new(vec![0u8; MEMO_MAX_LEN + 1]),
            Err(MemoError::TooLong { len: 35 })
        );
    }

    #[test]
    fn test_memo_rejects_bad_hex() {
        assert!(matches!(Memo::from_hex("zz"), Err(MemoError::InvalidHex(_))));
    }
}
