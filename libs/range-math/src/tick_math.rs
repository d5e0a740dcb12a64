use crate::full_math::q128;
use range_types::{MAX_SQRT_PRICE, MAX_TICK, MIN_SQRT_PRICE, MIN_TICK};
use soroban_sdk::{Env, U256};

/// Precomputed sqrt(1.0001^(2^i)) for negative ticks, Q128 fixed point.
/// Entry i covers the tick bit 2^i.
const SQRT_RATIOS_X128: [u128; 19] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
];

/// Calculate sqrt(1.0001^tick) * 2^96
///
/// Deterministic and strictly increasing in tick over the supported range.
pub fn sqrt_price_at_tick(env: &Env, tick: i32) -> u128 {
    if tick < MIN_TICK || tick > MAX_TICK {
        panic!("Tick out of bounds");
    }

    let abs_tick = tick.unsigned_abs();

    // Multiply together the precomputed ratios for each set bit of the tick.
    // The product is built for a negative tick and inverted at the end.
    let mut ratio = q128(env);
    for (i, sqrt_ratio) in SQRT_RATIOS_X128.iter().enumerate() {
        if abs_tick & (1u32 << i) != 0 {
            ratio = mul_shift_128(env, &ratio, *sqrt_ratio);
        }
    }

    if tick > 0 {
        ratio = u256_max(env).div(&ratio);
    }

    // Q128 -> Q96
    let result = ratio.div(&U256::from_u128(env, 1u128 << 32));

    let result_u128 = result.to_u128().unwrap_or(u128::MAX);
    result_u128.clamp(MIN_SQRT_PRICE, MAX_SQRT_PRICE)
}

/// Get the greatest tick whose sqrt price does not exceed the input.
///
/// Binary search over `sqrt_price_at_tick`, so the round trip
/// `tick_at_sqrt_price(sqrt_price_at_tick(t)) == t` holds exactly.
pub fn tick_at_sqrt_price(env: &Env, sqrt_price_x96: u128) -> i32 {
    if sqrt_price_x96 < MIN_SQRT_PRICE || sqrt_price_x96 >= MAX_SQRT_PRICE {
        panic!("Sqrt price out of bounds");
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    while low < high {
        let mid = (low + high + 1) / 2;
        if sqrt_price_at_tick(env, mid) <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    low
}

/// Multiply a Q128 value by a Q128 constant, keeping Q128 scale
fn mul_shift_128(env: &Env, x: &U256, y: u128) -> U256 {
    x.mul(&U256::from_u128(env, y)).div(&q128(env))
}

fn u256_max(env: &Env) -> U256 {
    // (2^128 - 1) * 2^128 + (2^128 - 1) = 2^256 - 1
    U256::from_u128(env, u128::MAX)
        .mul(&q128(env))
        .add(&U256::from_u128(env, u128::MAX))
}
