use soroban_sdk::{Env, U256};

/// 2^128 as U256 (u128 cannot hold it)
pub(crate) fn q128(env: &Env) -> U256 {
    U256::from_u128(env, 1u128 << 64).mul(&U256::from_u128(env, 1u128 << 64))
}

/// Convert U256 back to u128; any value that does not fit aborts instead of wrapping
pub(crate) fn to_u128(env: &Env, value: &U256) -> u128 {
    if value.gt(&U256::from_u128(env, u128::MAX)) {
        panic!("Overflow");
    }
    value.to_u128().unwrap()
}

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("Division by zero");
    }

    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let result = product.div(&U256::from_u128(env, denominator));
    to_u128(env, &result)
}

/// Multiply and divide with 256-bit intermediate precision (rounds up)
/// Returns ceil((a * b) / denominator)
pub fn mul_div_rounding_up(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("Division by zero");
    }

    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let denom = U256::from_u128(env, denominator);
    let result = product.div(&denom);
    let remainder = product.rem_euclid(&denom);

    if remainder.gt(&U256::from_u32(env, 0)) {
        to_u128(env, &result) + 1
    } else {
        to_u128(env, &result)
    }
}

/// Unsigned division with rounding up
pub fn div_rounding_up(a: u128, b: u128) -> u128 {
    if b == 0 {
        panic!("Division by zero");
    }
    if a == 0 {
        return 0;
    }
    (a - 1) / b + 1
}

/// (a * b) >> 128, the Q128 de-scaling used when turning fee growth into
/// owed token amounts
pub fn mul_shr_128(env: &Env, a: u128, b: u128) -> u128 {
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let result = product.div(&q128(env));
    to_u128(env, &result)
}

/// (a << 128) / b, the Q128 scaling used when accruing a fee amount into a
/// per-unit-liquidity growth accumulator
pub fn shl_128_div(env: &Env, a: u128, b: u128) -> u128 {
    if b == 0 {
        panic!("Division by zero");
    }
    let scaled = U256::from_u128(env, a).mul(&q128(env));
    let result = scaled.div(&U256::from_u128(env, b));
    to_u128(env, &result)
}
