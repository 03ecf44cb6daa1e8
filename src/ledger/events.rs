use tracing::info;

use super::{Amount, Memo, Principal};

/// Target under which every ledger event is logged.
pub const EVENT_TARGET: &str = "orangecoin::events";

pub fn initialize(holder: &Principal, amount: Amount) {
    info!(
        target: EVENT_TARGET,
        event = "initialize",
        holder = %holder,
        amount = %amount
    );
}

pub fn transfer(sender: &Principal, recipient: &Principal, amount: Amount, memo: Option<&Memo>) {
    let memo = memo.map(Memo::to_string);
    info!(
        target: EVENT_TARGET,
        event = "transfer",
        sender = %sender,
        recipient = %recipient,
        amount = %amount,
        memo = memo.as_deref()
    );
}

pub fn mint(recipient: &Principal, amount: Amount) {
    info!(
        target: EVENT_TARGET,
        event = "mint",
        recipient = %recipient,
        amount = %amount
    );
}

pub fn burn(holder: &Principal, amount: Amount) {
    info!(
        target: EVENT_TARGET,
        event = "burn",
        holder = %holder,
        amount = %amount
    );
}

pub fn set_token_uri(uri: &str) {
    info!(target: EVENT_TARGET, event = "set-token-uri", uri);
}

pub fn transfer_ownership(previous: &Principal, new_owner: &Principal) {
    info!(
        target: EVENT_TARGET,
        event = "transfer-ownership",
        previous = %previous,
        new_owner = %new_owner
    );
}
