use range_types::{PoolConfig, PoolState, Position};
use soroban_sdk::{contracttype, Address, Env};

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool identity and range (Instance storage)
    Config,
    /// Current pool state (Instance storage)
    State,
    /// Position data: owner -> Position (Persistent storage)
    Position(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> PoolConfig {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic!("Not created"))
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn has_state(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::State)
}

pub fn get_state(env: &Env) -> PoolState {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_else(|| panic!("Not initialized"))
}

pub fn set_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Positions ===

pub fn get_position(env: &Env, owner: &Address) -> Position {
    let key = DataKey::Position(owner.clone());
    env.storage().persistent().get(&key).unwrap_or_default()
}

pub fn set_position(env: &Env, owner: &Address, position: &Position) {
    let key = DataKey::Position(owner.clone());
    if position.is_empty() {
        // a zeroed position is the same as no position
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, position);
        extend_persistent_ttl(env, &key);
    }
}
