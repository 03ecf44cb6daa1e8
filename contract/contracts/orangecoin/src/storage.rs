use soroban_sdk::{contracttype, Address, Env, String};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Initialized,
    TotalSupply,
    TokenUri,
    Balance(Address),
}

/// Keep owner, supply and metadata alive. Called on every entry point.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_owner(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .expect("owner is set by the constructor")
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn get_total_supply(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: u128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn get_token_uri(env: &Env) -> Option<String> {
    env.storage().instance().get(&DataKey::TokenUri)
}

pub fn set_token_uri(env: &Env, uri: &String) {
    env.storage().instance().set(&DataKey::TokenUri, uri);
}

pub fn get_balance(env: &Env, holder: &Address) -> u128 {
    let key = DataKey::Balance(holder.clone());
    match env.storage().persistent().get::<_, u128>(&key) {
        Some(balance) => {
            extend_balance(env, &key);
            balance
        }
        None => 0,
    }
}

/// Balances live in persistent storage, one entry per holder. Zero balances are
/// removed rather than stored.
pub fn set_balance(env: &Env, holder: &Address, amount: u128) {
    let key = DataKey::Balance(holder.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_balance(env, &key);
    }
}

fn extend_balance(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}
