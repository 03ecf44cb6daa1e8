//! OrangeCoin ledger
//!
//! The token's state machine: per-holder balances, total supply, the owner and the
//! metadata URI. Every mutating operation takes the authenticated caller
//! explicitly and is applied entirely or not at all: all checks run before the
//! first write.

pub mod error;
pub mod events;
pub mod memo;
pub mod principal;
pub mod snapshot;

pub use error::{InvariantViolation, LedgerError, LedgerResult};
pub use memo::{Memo, MemoError, MEMO_MAX_LEN};
pub use principal::{Principal, PrincipalError};
pub use snapshot::{HolderBalance, LedgerSnapshot};

use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

pub const TOKEN_NAME: &str = "OrangeCoin";
pub const TOKEN_SYMBOL: &str = "ORANGE";
pub const TOKEN_DECIMALS: u32 = 6;

/// Token quantity in base units (`10^TOKEN_DECIMALS` per whole token).
pub type Amount = u128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    owner: Principal,
    initialized: bool,
    total_supply: Amount,
    /// Only strictly positive balances are stored.
    balances: BTreeMap<Principal, Amount>,
    token_uri: Option<String>,
}

impl Ledger {
    /// Deploy a fresh ledger owned by `deployer`.
    pub fn new(deployer: Principal) -> Self {
        Self {
            owner: deployer,
            initialized: false,
            total_supply: 0,
            balances: BTreeMap::new(),
            token_uri: None,
        }
    }

    /// Credit the initial supply to `caller`. Succeeds once per ledger lifetime.
    pub fn initialize(&mut self, caller: &Principal, amount: Amount) -> LedgerResult<bool> {
        if self.initialized {
            debug!(caller = %caller, "rejecting repeated initialize");
            return Err(LedgerError::AlreadyInitialized);
        }

        let balance = self.credit(caller, amount)?;
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;

        self.write_balance(caller, balance);
        self.total_supply = supply;
        self.initialized = true;

        events::initialize(caller, amount);
        Ok(true)
    }

    pub fn transfer(
        &mut self,
        caller: &Principal,
        amount: Amount,
        sender: &Principal,
        recipient: &Principal,
        memo: Option<&Memo>,
    ) -> LedgerResult<bool> {
        if caller != sender {
            debug!(caller = %caller, sender = %sender, "rejecting transfer of foreign funds");
            return Err(LedgerError::NotTokenOwner);
        }

        let sender_balance = self.debit(sender, amount)?;
        if sender != recipient {
            let recipient_balance = self.credit(recipient, amount)?;
            self.write_balance(sender, sender_balance);
            self.write_balance(recipient, recipient_balance);
        }

        events::transfer(sender, recipient, amount, memo);
        Ok(true)
    }

    pub fn mint(
        &mut self,
        caller: &Principal,
        amount: Amount,
        recipient: &Principal,
    ) -> LedgerResult<bool> {
        self.ensure_owner(caller)?;

        let balance = self.credit(recipient, amount)?;
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;

        self.write_balance(recipient, balance);
        self.total_supply = supply;

        events::mint(recipient, amount);
        Ok(true)
    }

    pub fn burn(&mut self, caller: &Principal, amount: Amount, holder: &Principal) -> LedgerResult<bool> {
        if caller != holder {
            debug!(caller = %caller, holder = %holder, "rejecting burn of foreign funds");
            return Err(LedgerError::NotTokenOwner);
        }

        let balance = self.debit(holder, amount)?;
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::insufficient_balance(self.total_supply, amount))?;

        self.write_balance(holder, balance);
        self.total_supply = supply;

        events::burn(holder, amount);
        Ok(true)
    }

    pub fn set_token_uri(&mut self, caller: &Principal, uri: impl Into<String>) -> LedgerResult<bool> {
        self.ensure_owner(caller)?;

        let uri = uri.into();
        events::set_token_uri(&uri);
        self.token_uri = Some(uri);
        Ok(true)
    }

    /// Hand the owner role to `new_owner`. Takes effect immediately; the new owner
    /// does not have to accept.
    pub fn transfer_ownership(&mut self, caller: &Principal, new_owner: &Principal) -> LedgerResult<bool> {
        self.ensure_owner(caller)?;

        events::transfer_ownership(&self.owner, new_owner);
        self.owner = new_owner.clone();
        Ok(true)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn name(&self) -> &'static str {
        TOKEN_NAME
    }

    pub fn symbol(&self) -> &'static str {
        TOKEN_SYMBOL
    }

    pub fn decimals(&self) -> u32 {
        TOKEN_DECIMALS
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    pub fn balance_of(&self, holder: &Principal) -> Amount {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn token_uri(&self) -> Option<&str> {
        self.token_uri.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn holders(&self) -> impl Iterator<Item = (&Principal, Amount)> {
        self.balances.iter().map(|(holder, amount)| (holder, *amount))
    }

    /// Verify that the stored balances add up to the total supply.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let balances = self
            .balances
            .values()
            .try_fold(0, |acc: Amount, amount| acc.checked_add(*amount))
            .ok_or(InvariantViolation::BalanceOverflow)?;

        if balances != self.total_supply {
            return Err(InvariantViolation::SupplyMismatch {
                supply: self.total_supply,
                balances,
            });
        }
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            owner: self.owner.clone(),
            initialized: self.initialized,
            total_supply: self.total_supply,
            balances: self
                .balances
                .iter()
                .map(|(holder, amount)| HolderBalance {
                    holder: holder.clone(),
                    amount: *amount,
                })
                .collect(),
            token_uri: self.token_uri.clone(),
            taken_at: Utc::now(),
        }
    }

    /// Rebuild a ledger from a snapshot, refusing images that break the supply
    /// invariant or list a holder twice. Zero balances are dropped.
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self, InvariantViolation> {
        let mut balances = BTreeMap::new();
        for entry in snapshot.balances {
            if balances.contains_key(&entry.holder) {
                return Err(InvariantViolation::DuplicateHolder(entry.holder));
            }
            if entry.amount > 0 {
                balances.insert(entry.holder, entry.amount);
            }
        }

        let ledger = Self {
            owner: snapshot.owner,
            initialized: snapshot.initialized,
            total_supply: snapshot.total_supply,
            balances,
            token_uri: snapshot.token_uri,
        };
        ledger.check_invariants()?;
        Ok(ledger)
    }

    fn ensure_owner(&self, caller: &Principal) -> LedgerResult<()> {
        if caller != &self.owner {
            debug!(caller = %caller, owner = %self.owner, "rejecting owner-only operation");
            return Err(LedgerError::OwnerOnly);
        }
        Ok(())
    }

    /// Balance of `holder` after adding `amount`, without writing it.
    fn credit(&self, holder: &Principal, amount: Amount) -> LedgerResult<Amount> {
        self.balance_of(holder)
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)
    }

    /// Balance of `holder` after removing `amount`, without writing it.
    fn debit(&self, holder: &Principal, amount: Amount) -> LedgerResult<Amount> {
        let available = self.balance_of(holder);
        available.checked_sub(amount).ok_or_else(|| {
            debug!(holder = %holder, available = %available, required = %amount, "insufficient balance");
            LedgerError::insufficient_balance(available, amount)
        })
    }

    fn write_balance(&mut self, holder: &Principal, amount: Amount) {
        if amount == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(holder.clone(), amount);
        }
    }
}
