//! Host execution environment for the ledger
//!
//! Everything the ledger itself leaves to its surroundings lives here: callers
//! are authenticated before they reach it, invocations are applied one at a time,
//! and each successful invocation is committed to durable storage before it
//! becomes visible.

#![cfg(feature = "server")]

pub mod auth;
pub mod store;

pub use auth::{AuthError, CallerAuthenticator};
pub use store::{FileStore, MemoryStore, StateStore, StoreError, StoreResult};

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::ledger::{Amount, InvariantViolation, Ledger, LedgerError, Memo, Principal};

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("ledger state could not be committed: {0}")]
    Storage(#[from] StoreError),

    #[error("stored ledger state is inconsistent: {0}")]
    CorruptState(#[from] InvariantViolation),
}

/// A state-changing ledger function and its arguments.
///
/// Serialized as `{"function": "<name>", "args": {...}}` with kebab-case names.
/// The two keys may arrive in either order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "function",
    content = "args",
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case"
)]
pub enum PublicCall {
    Initialize {
        amount: Amount,
    },
    Transfer {
        amount: Amount,
        sender: Principal,
        recipient: Principal,
        memo: Option<Memo>,
    },
    Mint {
        amount: Amount,
        recipient: Principal,
    },
    Burn {
        amount: Amount,
        owner: Principal,
    },
    SetTokenUri {
        value: String,
    },
    TransferOwnership {
        new_owner: Principal,
    },
}

/// Wire envelope of a [`PublicCall`]. `args` stays raw JSON until `function` is
/// known, so amounts are parsed straight into `u128` whatever the key order.
#[derive(Deserialize)]
struct CallEnvelope {
    function: String,
    args: Box<RawValue>,
}

#[derive(Deserialize)]
struct InitializeArgs {
    amount: Amount,
}

#[derive(Deserialize)]
struct TransferArgs {
    amount: Amount,
    sender: Principal,
    recipient: Principal,
    #[serde(default)]
    memo: Option<Memo>,
}

#[derive(Deserialize)]
struct MintArgs {
    amount: Amount,
    recipient: Principal,
}

#[derive(Deserialize)]
struct BurnArgs {
    amount: Amount,
    owner: Principal,
}

#[derive(Deserialize)]
struct SetTokenUriArgs {
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TransferOwnershipArgs {
    new_owner: Principal,
}

fn parse_args<T: DeserializeOwned>(args: &RawValue) -> serde_json::Result<T> {
    serde_json::from_str(args.get())
}

impl CallEnvelope {
    fn into_call(self) -> Result<PublicCall, String> {
        let args = &self.args;
        let call = match self.function.as_str() {
            "initialize" => parse_args::<InitializeArgs>(args).map(|a| PublicCall::Initialize {
                amount: a.amount,
            }),
            "transfer" => parse_args::<TransferArgs>(args).map(|a| PublicCall::Transfer {
                amount: a.amount,
                sender: a.sender,
                recipient: a.recipient,
                memo: a.memo,
            }),
            "mint" => parse_args::<MintArgs>(args).map(|a| PublicCall::Mint {
                amount: a.amount,
                recipient: a.recipient,
            }),
            "burn" => parse_args::<BurnArgs>(args).map(|a| PublicCall::Burn {
                amount: a.amount,
                owner: a.owner,
            }),
            "set-token-uri" => {
                parse_args::<SetTokenUriArgs>(args).map(|a| PublicCall::SetTokenUri { value: a.value })
            }
            "transfer-ownership" => {
                parse_args::<TransferOwnershipArgs>(args).map(|a| PublicCall::TransferOwnership {
                    new_owner: a.new_owner,
                })
            }
            other => return Err(format!("unknown function `{}`", other)),
        };

        call.map_err(|e| format!("invalid args for `{}`: {}", self.function, e))
    }
}

impl<'de> Deserialize<'de> for PublicCall {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        CallEnvelope::deserialize(deserializer)?
            .into_call()
            .map_err(de::Error::custom)
    }
}

impl PublicCall {
    pub fn function_name(&self) -> &'static str {
        match self {
            PublicCall::Initialize { .. } => "initialize",
            PublicCall::Transfer { .. } => "transfer",
            PublicCall::Mint { .. } => "mint",
            PublicCall::Burn { .. } => "burn",
            PublicCall::SetTokenUri { .. } => "set-token-uri",
            PublicCall::TransferOwnership { .. } => "transfer-ownership",
        }
    }

    fn apply(&self, ledger: &mut Ledger, caller: &Principal) -> Result<bool, LedgerError> {
        match self {
            PublicCall::Initialize { amount } => ledger.initialize(caller, *amount),
            PublicCall::Transfer {
                amount,
                sender,
                recipient,
                memo,
            } => ledger.transfer(caller, *amount, sender, recipient, memo.as_ref()),
            PublicCall::Mint { amount, recipient } => ledger.mint(caller, *amount, recipient),
            PublicCall::Burn { amount, owner } => ledger.burn(caller, *amount, owner),
            PublicCall::SetTokenUri { value } => ledger.set_token_uri(caller, value.clone()),
            PublicCall::TransferOwnership { new_owner } => {
                ledger.transfer_ownership(caller, new_owner)
            }
        }
    }
}

/// A read-only ledger query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOnlyCall {
    GetTotalSupply,
    GetName,
    GetSymbol,
    GetDecimals,
    GetOwner,
    GetBalance(Principal),
    GetTokenUri,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReadOnlyValue {
    Uint(Amount),
    Text(String),
    Principal(Principal),
    OptionalText(Option<String>),
}

/// Runs ledger invocations against a single ledger instance.
pub struct LedgerHost {
    ledger: Mutex<Ledger>,
    store: Arc<dyn StateStore>,
}

impl LedgerHost {
    /// Resume from the store's last commit, or deploy a fresh ledger owned by
    /// `deployer` when nothing was committed yet.
    pub async fn open(store: Arc<dyn StateStore>, deployer: Principal) -> Result<Self, HostError> {
        let ledger = match store.load().await? {
            Some(snapshot) => {
                let ledger = Ledger::restore(snapshot)?;
                info!(
                    "Resumed ledger state: owner={}, total_supply={}, holders={}",
                    ledger.owner(),
                    ledger.total_supply(),
                    ledger.holders().count()
                );
                ledger
            }
            None => {
                info!("Deploying new ledger owned by {}", deployer);
                Ledger::new(deployer)
            }
        };

        Ok(Self {
            ledger: Mutex::new(ledger),
            store,
        })
    }

    /// Apply `call` on behalf of an authenticated `caller`.
    ///
    /// The call runs against a working copy. The copy is committed to the store and
    /// only then replaces the live ledger, so a rejected call or a failed commit
    /// leaves both untouched.
    pub async fn call(&self, caller: &Principal, call: PublicCall) -> Result<bool, HostError> {
        let mut live = self.ledger.lock().await;
        let mut working = live.clone();

        let result = call.apply(&mut working, caller).map_err(|e| {
            debug!(
                "{} by {} rejected with {} ({})",
                call.function_name(),
                caller,
                e.code(),
                e
            );
            e
        })?;

        self.store.commit(&working.snapshot()).await.map_err(|e| {
            error!("Failed to commit {} by {}: {}", call.function_name(), caller, e);
            e
        })?;

        *live = working;
        Ok(result)
    }

    pub async fn read(&self, query: ReadOnlyCall) -> ReadOnlyValue {
        let ledger = self.ledger.lock().await;
        match query {
            ReadOnlyCall::GetTotalSupply => ReadOnlyValue::Uint(ledger.total_supply()),
            ReadOnlyCall::GetName => ReadOnlyValue::Text(ledger.name().to_string()),
            ReadOnlyCall::GetSymbol => ReadOnlyValue::Text(ledger.symbol().to_string()),
            ReadOnlyCall::GetDecimals => ReadOnlyValue::Uint(Amount::from(ledger.decimals())),
            ReadOnlyCall::GetOwner => ReadOnlyValue::Principal(ledger.owner().clone()),
            ReadOnlyCall::GetBalance(holder) => ReadOnlyValue::Uint(ledger.balance_of(&holder)),
            ReadOnlyCall::GetTokenUri => {
                ReadOnlyValue::OptionalText(ledger.token_uri().map(str::to_string))
            }
        }
    }

    pub async fn is_initialized(&self) -> bool {
        self.ledger.lock().await.is_initialized()
    }
}
