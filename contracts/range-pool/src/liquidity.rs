use range_math::{add_delta, amounts_for_liquidity_delta, sqrt_price_at_tick};
use range_types::PoolConfig;
use soroban_sdk::{token, Address, Bytes, Env, IntoVal, Symbol};

use crate::events;
use crate::position;
use crate::storage::{get_config, get_position, get_state, set_position, set_state};

/// Whether a price sits inside the pool's range, lower bound inclusive
pub fn is_price_in_range(sqrt_price_x96: u128, sqrt_lower_x96: u128, sqrt_upper_x96: u128) -> bool {
    sqrt_price_x96 >= sqrt_lower_x96 && sqrt_price_x96 < sqrt_upper_x96
}

fn range_prices(env: &Env, config: &PoolConfig) -> (u128, u128) {
    (
        sqrt_price_at_tick(env, config.tick_lower),
        sqrt_price_at_tick(env, config.tick_upper),
    )
}

/// Add liquidity to the sender's position.
///
/// Token amounts are computed from the current price, the position ledger and
/// pool state are updated, and only then is payment pulled by invoking
/// `mint_callback` on the sender. Payment is verified by the pool's own
/// balance deltas, never by anything the callback reports.
pub fn mint(
    env: &Env,
    sender: Address,
    recipient: Address,
    amount: u128,
    data: Bytes,
) -> (i128, i128) {
    if amount == 0 {
        panic!("Amount must be non-zero");
    }
    let config = get_config(env);
    let mut state = get_state(env);
    let (sqrt_lower, sqrt_upper) = range_prices(env, &config);

    let (amount0, amount1) = amounts_for_liquidity_delta(
        env,
        state.sqrt_price_x96,
        sqrt_lower,
        sqrt_upper,
        amount as i128,
    );

    let mut pos = get_position(env, &recipient);
    position::update(
        env,
        &mut pos,
        amount as i128,
        state.fee_growth_global_0_x128,
        state.fee_growth_global_1_x128,
    );
    set_position(env, &recipient, &pos);

    state.liquidity_gross = add_delta(state.liquidity_gross, amount as i128);
    if is_price_in_range(state.sqrt_price_x96, sqrt_lower, sqrt_upper) {
        state.liquidity = add_delta(state.liquidity, amount as i128);
    }
    set_state(env, &state);

    let pool = env.current_contract_address();
    let token0 = token::Client::new(env, &config.token0);
    let token1 = token::Client::new(env, &config.token1);
    let balance0_before = token0.balance(&pool);
    let balance1_before = token1.balance(&pool);

    env.invoke_contract::<()>(
        &sender,
        &Symbol::new(env, "mint_callback"),
        (amount0, amount1, data).into_val(env),
    );

    if amount0 > 0 && token0.balance(&pool) < balance0_before + amount0 {
        panic!("Insufficient payment");
    }
    if amount1 > 0 && token1.balance(&pool) < balance1_before + amount1 {
        panic!("Insufficient payment");
    }

    events::mint(env, &sender, &recipient, amount, amount0, amount1);
    (amount0, amount1)
}

/// Remove liquidity from the owner's position.
///
/// The freed token amounts are credited to `tokens_owed`, not transferred;
/// they are paid out by `collect`. Returns the credited amounts.
pub fn burn(env: &Env, owner: Address, amount: u128) -> (i128, i128) {
    if amount == 0 {
        panic!("Amount must be non-zero");
    }
    let config = get_config(env);
    let mut state = get_state(env);
    let (sqrt_lower, sqrt_upper) = range_prices(env, &config);

    let mut pos = get_position(env, &owner);
    position::update(
        env,
        &mut pos,
        -(amount as i128),
        state.fee_growth_global_0_x128,
        state.fee_growth_global_1_x128,
    );

    let (delta0, delta1) = amounts_for_liquidity_delta(
        env,
        state.sqrt_price_x96,
        sqrt_lower,
        sqrt_upper,
        -(amount as i128),
    );
    // deltas are <= 0 for a burn; credit the magnitudes
    let amount0 = -delta0;
    let amount1 = -delta1;
    pos.tokens_owed_0 += amount0 as u128;
    pos.tokens_owed_1 += amount1 as u128;
    set_position(env, &owner, &pos);

    state.liquidity_gross = add_delta(state.liquidity_gross, -(amount as i128));
    if is_price_in_range(state.sqrt_price_x96, sqrt_lower, sqrt_upper) {
        state.liquidity = add_delta(state.liquidity, -(amount as i128));
    }
    set_state(env, &state);

    events::burn(env, &owner, amount, amount0, amount1);
    (amount0, amount1)
}

/// Transfer everything the position is owed to `recipient` and zero the
/// owed balances. A second collect pays nothing.
pub fn collect(env: &Env, owner: Address, recipient: Address) -> (i128, i128) {
    let config = get_config(env);

    let mut pos = get_position(env, &owner);
    let amount0 = pos.tokens_owed_0 as i128;
    let amount1 = pos.tokens_owed_1 as i128;
    pos.tokens_owed_0 = 0;
    pos.tokens_owed_1 = 0;
    set_position(env, &owner, &pos);

    let pool = env.current_contract_address();
    if amount0 > 0 {
        token::Client::new(env, &config.token0).transfer(&pool, &recipient, &amount0);
    }
    if amount1 > 0 {
        token::Client::new(env, &config.token1).transfer(&pool, &recipient, &amount1);
    }

    events::collect(env, &owner, &recipient, amount0, amount1);
    (amount0, amount1)
}
