use crate::full_math::{mul_div, mul_div_rounding_up, to_u128};
use range_types::Q96;
use soroban_sdk::{Env, U256};

fn sort_prices(a: u128, b: u128) -> (u128, u128) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

fn ceil_div_u256(env: &Env, a: &U256, b: &U256) -> U256 {
    let quotient = a.div(b);
    if a.rem_euclid(b).gt(&U256::from_u32(env, 0)) {
        quotient.add(&U256::from_u32(env, 1))
    } else {
        quotient
    }
}

/// Amount of token0 corresponding to a liquidity of `liquidity` between two
/// sqrt prices: delta_x = L * (sqrt_pb - sqrt_pa) / (sqrt_pa * sqrt_pb).
/// Order of the two prices does not matter.
pub fn amount0_delta(
    env: &Env,
    sqrt_price_a_x96: u128,
    sqrt_price_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_price_lower, sqrt_price_upper) = sort_prices(sqrt_price_a_x96, sqrt_price_b_x96);

    if sqrt_price_lower == 0 {
        panic!("Sqrt price cannot be zero");
    }

    // L * 2^96 exceeds u128 for any liquidity >= 2^32, so stay in U256
    let numerator1 = U256::from_u128(env, liquidity).mul(&U256::from_u128(env, Q96));
    let numerator2 = U256::from_u128(env, sqrt_price_upper - sqrt_price_lower);
    let upper = U256::from_u128(env, sqrt_price_upper);
    let lower = U256::from_u128(env, sqrt_price_lower);

    let result = if round_up {
        let intermediate = ceil_div_u256(env, &numerator1.mul(&numerator2), &upper);
        ceil_div_u256(env, &intermediate, &lower)
    } else {
        numerator1.mul(&numerator2).div(&upper).div(&lower)
    };

    to_u128(env, &result)
}

/// Amount of token1 for a liquidity between two sqrt prices:
/// delta_y = L * (sqrt_pb - sqrt_pa)
pub fn amount1_delta(
    env: &Env,
    sqrt_price_a_x96: u128,
    sqrt_price_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_price_lower, sqrt_price_upper) = sort_prices(sqrt_price_a_x96, sqrt_price_b_x96);

    if round_up {
        mul_div_rounding_up(env, liquidity, sqrt_price_upper - sqrt_price_lower, Q96)
    } else {
        mul_div(env, liquidity, sqrt_price_upper - sqrt_price_lower, Q96)
    }
}

/// Signed token0 amount for a signed liquidity change. Positive liquidity
/// (added to the pool) rounds the magnitude up, negative (paid out by the
/// pool) rounds it down, so rounding error always favors the pool.
pub fn amount0_delta_signed(
    env: &Env,
    sqrt_price_a_x96: u128,
    sqrt_price_b_x96: u128,
    liquidity_delta: i128,
) -> i128 {
    if liquidity_delta < 0 {
        -(amount0_delta(
            env,
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta.unsigned_abs(),
            false,
        ) as i128)
    } else {
        amount0_delta(
            env,
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta as u128,
            true,
        ) as i128
    }
}

/// Signed token1 amount for a signed liquidity change, same rounding contract
/// as `amount0_delta_signed`.
pub fn amount1_delta_signed(
    env: &Env,
    sqrt_price_a_x96: u128,
    sqrt_price_b_x96: u128,
    liquidity_delta: i128,
) -> i128 {
    if liquidity_delta < 0 {
        -(amount1_delta(
            env,
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta.unsigned_abs(),
            false,
        ) as i128)
    } else {
        amount1_delta(
            env,
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta as u128,
            true,
        ) as i128
    }
}

/// Next sqrt price after consuming `amount_in` of the input token
pub fn next_sqrt_price_from_input(
    env: &Env,
    sqrt_price_x96: u128,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> u128 {
    if sqrt_price_x96 == 0 || liquidity == 0 {
        panic!("Invalid inputs");
    }

    if zero_for_one {
        next_sqrt_price_from_amount0_rounding_up(env, sqrt_price_x96, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount1_rounding_down(env, sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Next sqrt price after producing `amount_out` of the output token
pub fn next_sqrt_price_from_output(
    env: &Env,
    sqrt_price_x96: u128,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> u128 {
    if sqrt_price_x96 == 0 || liquidity == 0 {
        panic!("Invalid inputs");
    }

    if zero_for_one {
        next_sqrt_price_from_amount1_rounding_down(env, sqrt_price_x96, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount0_rounding_up(env, sqrt_price_x96, liquidity, amount_out, false)
    }
}

/// sqrt_price_next = L * sqrt_price / (L +/- amount * sqrt_price)
/// Rounds up so the pool keeps at least the invariant's worth of token0.
fn next_sqrt_price_from_amount0_rounding_up(
    env: &Env,
    sqrt_price_x96: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> u128 {
    if amount == 0 {
        return sqrt_price_x96;
    }

    let numerator1 = U256::from_u128(env, liquidity).mul(&U256::from_u128(env, Q96));
    let product = U256::from_u128(env, amount).mul(&U256::from_u128(env, sqrt_price_x96));

    let denominator = if add {
        numerator1.add(&product)
    } else {
        if !product.lt(&numerator1) {
            panic!("Insufficient liquidity");
        }
        numerator1.sub(&product)
    };

    let result = ceil_div_u256(
        env,
        &numerator1.mul(&U256::from_u128(env, sqrt_price_x96)),
        &denominator,
    );
    to_u128(env, &result)
}

/// sqrt_price_next = sqrt_price +/- amount / L
/// Rounds down so the pool keeps at least the invariant's worth of token1.
fn next_sqrt_price_from_amount1_rounding_down(
    env: &Env,
    sqrt_price_x96: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> u128 {
    if add {
        let quotient = if amount <= u128::MAX >> 96 {
            (amount << 96) / liquidity
        } else {
            mul_div(env, amount, Q96, liquidity)
        };
        sqrt_price_x96.checked_add(quotient).unwrap_or_else(|| panic!("Overflow"))
    } else {
        let quotient = if amount <= u128::MAX >> 96 {
            crate::full_math::div_rounding_up(amount << 96, liquidity)
        } else {
            mul_div_rounding_up(env, amount, Q96, liquidity)
        };
        if sqrt_price_x96 <= quotient {
            panic!("Insufficient liquidity");
        }
        sqrt_price_x96 - quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    // === amount deltas ===

    #[test]
    fn test_amount0_delta_basic() {
        let env = Env::default();
        let amount0 = amount0_delta(&env, Q96, Q96 * 2, 1_000_000_000_000u128, false);
        assert!(amount0 > 0);
    }

    #[test]
    fn test_amount_deltas_order_independent() {
        let env = Env::default();
        let liquidity = 1_000_000_000_000u128;
        let (a, b) = (Q96, Q96 * 11 / 10);

        assert_eq!(
            amount0_delta(&env, a, b, liquidity, false),
            amount0_delta(&env, b, a, liquidity, false)
        );
        assert_eq!(
            amount1_delta(&env, a, b, liquidity, false),
            amount1_delta(&env, b, a, liquidity, false)
        );
    }

    #[test]
    fn test_amount_deltas_zero_range() {
        let env = Env::default();
        assert_eq!(amount0_delta(&env, Q96, Q96, 1_000_000u128, false), 0);
        assert_eq!(amount1_delta(&env, Q96, Q96, 1_000_000u128, false), 0);
    }

    #[test]
    fn test_amount_deltas_rounding_gap_at_most_one() {
        let env = Env::default();
        let (a, b) = (Q96, Q96 + Q96 / 100);
        let liquidity = 1_000_000_007u128;

        let down0 = amount0_delta(&env, a, b, liquidity, false);
        let up0 = amount0_delta(&env, a, b, liquidity, true);
        assert!(up0 >= down0);
        assert!(up0 - down0 <= 1);

        let down1 = amount1_delta(&env, a, b, liquidity, false);
        let up1 = amount1_delta(&env, a, b, liquidity, true);
        assert!(up1 >= down1);
        assert!(up1 - down1 <= 1);
    }

    #[test]
    fn test_amount0_delta_large_liquidity_no_truncation() {
        let env = Env::default();
        // liquidity far above 2^32: L * 2^96 does not fit u128, the U256
        // path must still give a proportional answer
        let small = amount0_delta(&env, Q96, Q96 * 11 / 10, 1_000_000u128, false);
        let large = amount0_delta(&env, Q96, Q96 * 11 / 10, 1_000_000_000_000_000_000u128, false);
        assert!(large > small);
        // proportional to liquidity up to rounding of the small case
        let ratio = large / small;
        assert!((999_990_000_000..=1_000_010_000_000).contains(&ratio));
    }

    #[test]
    #[should_panic(expected = "Sqrt price cannot be zero")]
    fn test_amount0_delta_zero_price() {
        let env = Env::default();
        amount0_delta(&env, 0, Q96, 1000, false);
    }

    // === signed deltas ===

    #[test]
    fn test_signed_deltas_sign_symmetry() {
        let env = Env::default();
        let (a, b) = (Q96, Q96 * 12 / 10);
        for delta in [1i128, 1000, 1_000_000_000_000] {
            let pos0 = amount0_delta_signed(&env, a, b, delta);
            let neg0 = amount0_delta_signed(&env, a, b, -delta);
            assert!(pos0 >= -neg0, "added amount0 must cover removed amount0");
            assert!(pos0 + neg0 <= 1, "rounding gap is at most one unit");

            let pos1 = amount1_delta_signed(&env, a, b, delta);
            let neg1 = amount1_delta_signed(&env, a, b, -delta);
            assert!(pos1 >= -neg1);
            assert!(pos1 + neg1 <= 1);
        }
    }

    #[test]
    fn test_signed_deltas_zero() {
        let env = Env::default();
        assert_eq!(amount0_delta_signed(&env, Q96, Q96 * 2, 0), 0);
        assert_eq!(amount1_delta_signed(&env, Q96, Q96 * 2, 0), 0);
    }

    // === next sqrt price from input ===

    #[test]
    fn test_next_sqrt_price_from_input_direction() {
        let env = Env::default();
        let liquidity = 1_000_000_000_000_000_000u128;
        let amount_in = 1_000_000_000u128;

        // selling token0 pushes the price down, selling token1 pushes it up
        assert!(next_sqrt_price_from_input(&env, Q96, liquidity, amount_in, true) < Q96);
        assert!(next_sqrt_price_from_input(&env, Q96, liquidity, amount_in, false) > Q96);
    }

    #[test]
    fn test_next_sqrt_price_from_input_zero_amount() {
        let env = Env::default();
        assert_eq!(
            next_sqrt_price_from_input(&env, Q96, 1_000_000_000_000u128, 0, true),
            Q96
        );
    }

    #[test]
    fn test_next_sqrt_price_larger_input_moves_more() {
        let env = Env::default();
        let liquidity = 1_000_000_000_000_000_000u128;
        let small = next_sqrt_price_from_input(&env, Q96, liquidity, 1_000_000, true);
        let large = next_sqrt_price_from_input(&env, Q96, liquidity, 1_000_000_000_000, true);
        assert!(large < small);
    }

    #[test]
    #[should_panic(expected = "Invalid inputs")]
    fn test_next_sqrt_price_from_input_zero_liquidity() {
        let env = Env::default();
        next_sqrt_price_from_input(&env, Q96, 0, 1000, true);
    }

    // === next sqrt price from output ===

    #[test]
    fn test_next_sqrt_price_from_output_direction() {
        let env = Env::default();
        let liquidity = 1_000_000_000_000_000_000u128;
        let amount_out = 1_000_000_000u128;

        assert!(next_sqrt_price_from_output(&env, Q96, liquidity, amount_out, true) < Q96);
        assert!(next_sqrt_price_from_output(&env, Q96, liquidity, amount_out, false) > Q96);
    }

    #[test]
    #[should_panic(expected = "Insufficient liquidity")]
    fn test_next_sqrt_price_output_exceeds_reserves() {
        let env = Env::default();
        // asking for more token1 out than the curve can produce
        next_sqrt_price_from_output(&env, Q96, 1_000u128, 1_000_000_000_000u128, true);
    }

    // === consistency between price moves and amount formulas ===

    #[test]
    fn test_price_move_matches_amount0_delta() {
        let env = Env::default();
        let liquidity = 1_000_000_000_000_000_000u128;
        let amount_in = 1_000_000_000u128;

        let after = next_sqrt_price_from_input(&env, Q96, liquidity, amount_in, true);
        let implied = amount0_delta(&env, after, Q96, liquidity, false);

        let diff = implied.abs_diff(amount_in);
        assert!(diff < amount_in / 100, "amount must match the price move");
    }
}
