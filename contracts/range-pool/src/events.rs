use soroban_sdk::{Address, Env, Symbol};

pub fn initialize(env: &Env, sqrt_price_x96: u128, tick: i32) {
    env.events().publish(
        (Symbol::new(env, "initialize"),),
        (sqrt_price_x96, tick),
    );
}

pub fn mint(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "mint"), sender.clone(), recipient.clone()),
        (amount, amount0, amount1),
    );
}

pub fn burn(env: &Env, owner: &Address, amount: u128, amount0: i128, amount1: i128) {
    env.events().publish(
        (Symbol::new(env, "burn"), owner.clone()),
        (amount, amount0, amount1),
    );
}

pub fn collect(env: &Env, owner: &Address, recipient: &Address, amount0: i128, amount1: i128) {
    env.events().publish(
        (Symbol::new(env, "collect"), owner.clone(), recipient.clone()),
        (amount0, amount1),
    );
}

#[allow(clippy::too_many_arguments)]
pub fn swap(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: i128,
    amount1: i128,
    sqrt_price_x96: u128,
    liquidity: u128,
    tick: i32,
) {
    env.events().publish(
        (Symbol::new(env, "swap"), sender.clone(), recipient.clone()),
        (amount0, amount1, sqrt_price_x96, liquidity, tick),
    );
}
