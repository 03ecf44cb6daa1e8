//! OrangeCoin (ORANGE) token ledger
//!
//! [`ledger`] holds the token's state machine. With the default `server` feature,
//! [`host`] runs it behind caller authentication and durable storage and [`api`]
//! exposes it over HTTP.

pub mod config;
pub mod ledger;

pub mod api;
pub mod host;

pub use ledger::{Amount, Ledger, LedgerError, LedgerResult, Memo, Principal};
