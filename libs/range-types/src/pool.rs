use soroban_sdk::{contracttype, Address};

/// Pool identity and the single allowed price range - immutable after creation
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Factory contract that deployed this pool
    pub factory: Address,
    /// Token0 address (lower address)
    pub token0: Address,
    /// Token1 address (higher address)
    pub token1: Address,
    /// Fee tier in hundredths of bps
    pub fee: u32,
    /// Lower bound of the pool's only price range
    pub tick_lower: i32,
    /// Upper bound of the pool's only price range
    pub tick_upper: i32,
}

/// Current pool state - stored in Instance storage for frequent access
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolState {
    /// Current sqrt(price) as Q64.96
    pub sqrt_price_x96: u128,
    /// Current tick index, floor of the price
    pub tick: i32,
    /// Active liquidity: equals `liquidity_gross` while the price is inside
    /// the range, zero otherwise
    pub liquidity: u128,
    /// Sum of all positions' liquidity, regardless of where the price sits
    pub liquidity_gross: u128,
    /// Fee growth global for token0 (Q128 fractional bits, per unit liquidity)
    pub fee_growth_global_0_x128: u128,
    /// Fee growth global for token1
    pub fee_growth_global_1_x128: u128,
}

impl PoolState {
    pub fn new(sqrt_price_x96: u128, tick: i32) -> Self {
        Self {
            sqrt_price_x96,
            tick,
            liquidity: 0,
            liquidity_gross: 0,
            fee_growth_global_0_x128: 0,
            fee_growth_global_1_x128: 0,
        }
    }
}
