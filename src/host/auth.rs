use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use thiserror::Error;

use crate::ledger::{Principal, PrincipalError};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("caller credentials are missing")]
    MissingCredentials,

    #[error("caller is not a valid principal: {0}")]
    InvalidPrincipal(#[from] PrincipalError),

    #[error("caller token does not match the principal")]
    InvalidToken,
}

/// Issues and verifies caller tokens.
///
/// A token is the hex HMAC-SHA256 of the principal under the host secret, so only
/// holders of a token issued by the host can act as that principal.
#[derive(Clone)]
pub struct CallerAuthenticator {
    secret: Vec<u8>,
}

impl CallerAuthenticator {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac_for(&self, principal: &Principal) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(principal.as_str().as_bytes());
        mac
    }

    pub fn issue(&self, principal: &Principal) -> String {
        hex::encode(self.mac_for(principal).finalize().into_bytes())
    }

    /// Resolve the caller of an invocation from its claimed principal and token.
    pub fn authenticate(&self, caller: &str, token: &str) -> Result<Principal, AuthError> {
        let principal = Principal::new(caller.trim())?;
        let provided = hex::decode(token.trim()).map_err(|_| AuthError::InvalidToken)?;

        // verify_slice compares in constant time
        self.mac_for(&principal)
            .verify_slice(&provided)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(principal)
    }
}

impl fmt::Debug for CallerAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallerAuthenticator")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-to-use";

    #[test]
    fn test_issued_token_authenticates() {
        let auth = CallerAuthenticator::new(SECRET);
        let wallet = Principal::new("ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5").unwrap();

        let token = auth.issue(&wallet);
        assert_eq!(token.len(), 64);
        assert_eq!(auth.authenticate(wallet.as_str(), &token), Ok(wallet));
    }

    #[test]
    fn test_token_is_bound_to_principal() {
        let auth = CallerAuthenticator::new(SECRET);
        let wallet1 = Principal::new("wallet_1").unwrap();

        let token = auth.issue(&wallet1);
        assert_eq!(
            auth.authenticate("wallet_2", &token),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let wallet = Principal::new("wallet_1").unwrap();
        let token = CallerAuthenticator::new("another-secret").issue(&wallet);

        let auth = CallerAuthenticator::new(SECRET);
        assert_eq!(
            auth.authenticate("wallet_1", &token),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            auth.authenticate("wallet_1", "not-hex"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_malformed_principal_is_rejected() {
        let auth = CallerAuthenticator::new(SECRET);
        assert!(matches!(
            auth.authenticate("bad principal", "00"),
            Err(AuthError::InvalidPrincipal(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = CallerAuthenticator::new(SECRET);
        assert!(!format!("{:?}", auth).contains(SECRET));
    }
}
