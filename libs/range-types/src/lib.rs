#![no_std]

mod pool;
mod position;

pub use pool::*;
pub use position::*;

/// Q96 constant (2^96) for fixed-point sqrt prices
pub const Q96: u128 = 1 << 96;

/// Minimum tick index
/// Limited by u128 sqrt-price representation (originally -887272 for uint160)
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
pub const MAX_TICK: i32 = 443636;

/// Minimum sqrt price (at MIN_TICK)
/// sqrt(1.0001^-443636) * 2^96
pub const MIN_SQRT_PRICE: u128 = 18446743374134;

/// Maximum sqrt price (at MAX_TICK)
/// sqrt(1.0001^443636) * 2^96, bounded by u128::MAX
pub const MAX_SQRT_PRICE: u128 = 340275971719517849884101479065584693834;
