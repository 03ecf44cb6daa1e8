use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Amount, Principal};

/// A single non-zero balance in a [`LedgerSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderBalance {
    pub holder: Principal,
    pub amount: Amount,
}

/// Serializable image of every mutable ledger field.
///
/// Produced by [`Ledger::snapshot`](super::Ledger::snapshot) and turned back into
/// a ledger by [`Ledger::restore`](super::Ledger::restore), which re-checks the
/// supply invariant before accepting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub owner: Principal,
    pub initialized: bool,
    pub total_supply: Amount,
    pub balances: Vec<HolderBalance>,
    pub token_uri: Option<String>,
    pub taken_at: DateTime<Utc>,
}

impl LedgerSnapshot {
    pub fn balance_of(&self, holder: &Principal) -> Amount {
        self.balances
            .iter()
            .find(|entry| &entry.holder == holder)
            .map(|entry| entry.amount)
            .unwrap_or(0)
    }
}
