#![allow(deprecated)]

use soroban_sdk::{symbol_short, Address, Bytes, Env, String};

pub fn initialize(env: &Env, holder: &Address, amount: u128) {
    env.events()
        .publish((symbol_short!("init"), holder.clone()), amount);
}

pub fn transfer(env: &Env, sender: &Address, recipient: &Address, amount: u128, memo: Option<Bytes>) {
    env.events().publish(
        (
            symbol_short!("transfer"),
            sender.clone(),
            recipient.clone(),
        ),
        (amount, memo),
    );
}

pub fn mint(env: &Env, recipient: &Address, amount: u128) {
    env.events().publish(
        (
            symbol_short!("mint"),
            recipient.clone(),
        ),
        amount,
    );
}

pub fn burn(env: &Env, holder: &Address, amount: u128) {
    env.events().publish(
        (
            symbol_short!("burn"),
            holder.clone(),
        ),
        amount,
    );
}

pub fn set_token_uri(env: &Env, uri: &String) {
    env.events()
        .publish((symbol_short!("set_uri"),), uri.clone());
}

pub fn transfer_ownership(env: &Env, previous: &Address, new_owner: &Address) {
    env.events().publish(
        (
            symbol_short!("owner"),
            previous.clone(),
        ),
        new_owner.clone(),
    );
}
