#![no_std]

mod contract;
mod error;
mod events;
mod storage;

pub use error::TokenError;

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String};

pub const TOKEN_NAME: &str = "OrangeCoin";
pub const TOKEN_SYMBOL: &str = "ORANGE";
pub const TOKEN_DECIMALS: u32 = 6;

#[contract]
pub struct OrangeCoin;

#[contractimpl]
impl OrangeCoin {
    /// Record the deployer as the token owner.
    pub fn __constructor(env: Env, owner: Address) {
        storage::set_owner(&env, &owner);
        storage::extend_instance(&env);
    }

    /// Credit the initial supply to `caller`. Succeeds once.
    pub fn initialize(env: Env, caller: Address, amount: u128) -> Result<bool, TokenError> {
        storage::extend_instance(&env);
        contract::initialize(&env, caller, amount)
    }

    /// Move `amount` from `sender` to `recipient`; `caller` must be `sender`.
    pub fn transfer(
        env: Env,
        caller: Address,
        amount: u128,
        sender: Address,
        recipient: Address,
        memo: Option<Bytes>,
    ) -> Result<bool, TokenError> {
        storage::extend_instance(&env);
        contract::transfer(&env, caller, amount, sender, recipient, memo)
    }

    pub fn mint(env: Env, caller: Address, amount: u128, recipient: Address) -> Result<bool, TokenError> {
        storage::extend_instance(&env);
        contract::mint(&env, caller, amount, recipient)
    }

    pub fn burn(env: Env, caller: Address, amount: u128, owner: Address) -> Result<bool, TokenError> {
        storage::extend_instance(&env);
        contract::burn(&env, caller, amount, owner)
    }

    pub fn set_token_uri(env: Env, caller: Address, value: String) -> Result<bool, TokenError> {
        storage::extend_instance(&env);
        contract::set_token_uri(&env, caller, value)
    }

    /// Hand the owner role to `new_owner` immediately.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<bool, TokenError> {
        storage::extend_instance(&env);
        contract::transfer_ownership(&env, caller, new_owner)
    }

    pub fn get_total_supply(env: Env) -> u128 {
        storage::extend_instance(&env);
        storage::get_total_supply(&env)
    }

    pub fn get_name(env: Env) -> String {
        String::from_str(&env, TOKEN_NAME)
    }

    pub fn get_symbol(env: Env) -> String {
        String::from_str(&env, TOKEN_SYMBOL)
    }

    pub fn get_decimals(_env: Env) -> u32 {
        TOKEN_DECIMALS
    }

    pub fn get_owner(env: Env) -> Address {
        storage::extend_instance(&env);
        storage::get_owner(&env)
    }

    pub fn get_balance(env: Env, who: Address) -> u128 {
        storage::extend_instance(&env);
        storage::get_balance(&env, &who)
    }

    pub fn get_token_uri(env: Env) -> Option<String> {
        storage::extend_instance(&env);
        storage::get_token_uri(&env)
    }
}

mod test;
