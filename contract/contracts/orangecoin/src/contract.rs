use soroban_sdk::{Address, Bytes, Env, String};

use crate::error::TokenError;
use crate::{events, storage};

fn ensure_owner(env: &Env, caller: &Address) -> Result<(), TokenError> {
    if *caller != storage::get_owner(env) {
        return Err(TokenError::OwnerOnly);
    }
    Ok(())
}

fn debit(env: &Env, holder: &Address, amount: u128) -> Result<u128, TokenError> {
    storage::get_balance(env, holder)
        .checked_sub(amount)
        .ok_or(TokenError::InsufficientBalance)
}

fn credit(env: &Env, holder: &Address, amount: u128) -> Result<u128, TokenError> {
    storage::get_balance(env, holder)
        .checked_add(amount)
        .ok_or(TokenError::SupplyOverflow)
}

pub fn initialize(env: &Env, caller: Address, amount: u128) -> Result<bool, TokenError> {
    caller.require_auth();

    if storage::is_initialized(env) {
        return Err(TokenError::AlreadyInitialized);
    }

    let balance = credit(env, &caller, amount)?;
    let supply = storage::get_total_supply(env)
        .checked_add(amount)
        .ok_or(TokenError::SupplyOverflow)?;

    storage::set_balance(env, &caller, balance);
    storage::set_total_supply(env, supply);
    storage::set_initialized(env);

    events::initialize(env, &caller, amount);
    Ok(true)
}

pub fn transfer(
    env: &Env,
    caller: Address,
    amount: u128,
    sender: Address,
    recipient: Address,
    memo: Option<Bytes>,
) -> Result<bool, TokenError> {
    caller.require_auth();

    if caller != sender {
        return Err(TokenError::NotTokenOwner);
    }

    let sender_balance = debit(env, &sender, amount)?;
    if sender != recipient {
        let recipient_balance = credit(env, &recipient, amount)?;
        storage::set_balance(env, &sender, sender_balance);
        storage::set_balance(env, &recipient, recipient_balance);
    }

    events::transfer(env, &sender, &recipient, amount, memo);
    Ok(true)
}

pub fn mint(env: &Env, caller: Address, amount: u128, recipient: Address) -> Result<bool, TokenError> {
    caller.require_auth();
    ensure_owner(env, &caller)?;

    let balance = credit(env, &recipient, amount)?;
    let supply = storage::get_total_supply(env)
        .checked_add(amount)
        .ok_or(TokenError::SupplyOverflow)?;

    storage::set_balance(env, &recipient, balance);
    storage::set_total_supply(env, supply);

    events::mint(env, &recipient, amount);
    Ok(true)
}

pub fn burn(env: &Env, caller: Address, amount: u128, holder: Address) -> Result<bool, TokenError> {
    caller.require_auth();

    if caller != holder {
        return Err(TokenError::NotTokenOwner);
    }

    let balance = debit(env, &holder, amount)?;
    let supply = storage::get_total_supply(env)
        .checked_sub(amount)
        .ok_or(TokenError::InsufficientBalance)?;

    storage::set_balance(env, &holder, balance);
    storage::set_total_supply(env, supply);

    events::burn(env, &holder, amount);
    Ok(true)
}

pub fn set_token_uri(env: &Env, caller: Address, uri: String) -> Result<bool, TokenError> {
    caller.require_auth();
    ensure_owner(env, &caller)?;

    storage::set_token_uri(env, &uri);

    events::set_token_uri(env, &uri);
    Ok(true)
}

pub fn transfer_ownership(env: &Env, caller: Address, new_owner: Address) -> Result<bool, TokenError> {
    caller.require_auth();
    ensure_owner(env, &caller)?;

    storage::set_owner(env, &new_owner);

    events::transfer_ownership(env, &caller, &new_owner);
    Ok(true)
}
