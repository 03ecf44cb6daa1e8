use thiserror::Error;

use super::{Amount, Principal};

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Rejection of a ledger operation.
///
/// Every variant carries a stable numeric code (see [`LedgerError::code`]) that is
/// shared with the on-chain contract and surfaced verbatim to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("only the token owner may perform this operation")]
    OwnerOnly,

    #[error("caller may not move funds held by another principal")]
    NotTokenOwner,

    #[error("insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: Amount, required: Amount },

    #[error("ledger has already been initialized")]
    AlreadyInitialized,

    #[error("amount would overflow the token supply")]
    SupplyOverflow,
}

impl LedgerError {
    pub const OWNER_ONLY: u32 = 100;
    pub const NOT_TOKEN_OWNER: u32 = 101;
    pub const INSUFFICIENT_BALANCE: u32 = 102;
    pub const ALREADY_INITIALIZED: u32 = 104;
    pub const SUPPLY_OVERFLOW: u32 = 105;

    pub fn insufficient_balance(available: Amount, required: Amount) -> Self {
        Self::InsufficientBalance {
            available,
            required,
        }
    }

    /// Numeric error code returned to callers.
    pub fn code(&self) -> u32 {
        match self {
            LedgerError::OwnerOnly => Self::OWNER_ONLY,
            LedgerError::NotTokenOwner => Self::NOT_TOKEN_OWNER,
            LedgerError::InsufficientBalance { .. } => Self::INSUFFICIENT_BALANCE,
            LedgerError::AlreadyInitialized => Self::ALREADY_INITIALIZED,
            LedgerError::SupplyOverflow => Self::SUPPLY_OVERFLOW,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LedgerError::OwnerOnly => "OWNER-ONLY",
            LedgerError::NotTokenOwner => "NOT-TOKEN-OWNER",
            LedgerError::InsufficientBalance { .. } => "INSUFFICIENT-BALANCE",
            LedgerError::AlreadyInitialized => "ALREADY-INITIALIZED",
            LedgerError::SupplyOverflow => "SUPPLY-OVERFLOW",
        }
    }

    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, LedgerError::OwnerOnly | LedgerError::NotTokenOwner)
    }
}

/// A ledger image that breaks the supply invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("balances sum to {balances} but total supply is {supply}")]
    SupplyMismatch { supply: Amount, balances: Amount },

    #[error("balances overflow the amount type")]
    BalanceOverflow,

    #[error("holder {0} appears more than once")]
    DuplicateHolder(Principal),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(LedgerError::OwnerOnly.code(), 100);
        assert_eq!(LedgerError::NotTokenOwner.code(), 101);
        assert_eq!(LedgerError::insufficient_balance(1, 2).code(), 102);
        assert_eq!(LedgerError::AlreadyInitialized.code(), 104);
        assert_eq!(LedgerError::SupplyOverflow.code(), 105);
    }

    #[test]
    fn test_error_names() {
        assert_eq!(LedgerError::OwnerOnly.name(), "OWNER-ONLY");
        assert_eq!(LedgerError::AlreadyInitialized.name(), "ALREADY-INITIALIZED");
        assert!(LedgerError::NotTokenOwner.is_authorization_failure());
        assert!(!LedgerError::insufficient_balance(0, 1).is_authorization_failure());
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = LedgerError::insufficient_balance(1_000, 2_000);
        assert_eq!(
            err.to_string(),
            "insufficient balance: available 1000, required 2000"
        );
    }
}
