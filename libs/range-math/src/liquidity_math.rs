use crate::sqrt_price_math::{amount0_delta_signed, amount1_delta_signed};
use soroban_sdk::Env;

/// Apply a signed delta to a liquidity value, aborting on under/overflow
pub fn add_delta(liquidity: u128, delta: i128) -> u128 {
    if delta < 0 {
        let abs_delta = delta.unsigned_abs();
        if liquidity < abs_delta {
            panic!("Insufficient liquidity");
        }
        liquidity - abs_delta
    } else {
        liquidity
            .checked_add(delta as u128)
            .unwrap_or_else(|| panic!("Overflow"))
    }
}

/// Token amounts corresponding to a signed liquidity change over the pool's
/// price range, given the current price.
///
/// Positive results are owed to the pool (mint), negative are owed by the
/// pool (burn); rounding always favors the pool via the signed deltas.
pub fn amounts_for_liquidity_delta(
    env: &Env,
    sqrt_price_x96: u128,
    sqrt_price_lower_x96: u128,
    sqrt_price_upper_x96: u128,
    liquidity_delta: i128,
) -> (i128, i128) {
    if sqrt_price_x96 <= sqrt_price_lower_x96 {
        // Price below the range: the position is entirely token0
        let amount0 = amount0_delta_signed(
            env,
            sqrt_price_lower_x96,
            sqrt_price_upper_x96,
            liquidity_delta,
        );
        (amount0, 0)
    } else if sqrt_price_x96 < sqrt_price_upper_x96 {
        // Price inside the range: both tokens, split at the current price
        let amount0 =
            amount0_delta_signed(env, sqrt_price_x96, sqrt_price_upper_x96, liquidity_delta);
        let amount1 =
            amount1_delta_signed(env, sqrt_price_lower_x96, sqrt_price_x96, liquidity_delta);
        (amount0, amount1)
    } else {
        // Price above the range: entirely token1
        let amount1 = amount1_delta_signed(
            env,
            sqrt_price_lower_x96,
            sqrt_price_upper_x96,
            liquidity_delta,
        );
        (0, amount1)
    }
}
