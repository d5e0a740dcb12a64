//! Single-range concentrated liquidity pool.
//!
//! The pool holds exactly one price range, fixed at creation. Liquidity
//! providers mint into that shared range and earn fees pro rata; traders
//! swap against it with Q64.96 sqrt-price math. Payment flows through
//! callbacks on the caller, verified by the pool's own balance deltas.
#![no_std]

mod events;
mod liquidity;
mod position;
mod storage;
mod swap;

use range_math::tick_at_sqrt_price;
use range_types::{
    PoolConfig, PoolState, Position, MAX_SQRT_PRICE, MAX_TICK, MIN_SQRT_PRICE, MIN_TICK,
};
use soroban_sdk::{contract, contractimpl, Address, Bytes, Env};

use storage::{get_config, get_position, get_state, has_config, has_state, set_config, set_state};

#[contract]
pub struct RangePool;

#[contractimpl]
impl RangePool {
    /// Record the pool's identity: token pair, fee tier, and the one price
    /// range this pool will ever serve. Called once by the deployer.
    pub fn create(
        env: Env,
        factory: Address,
        token0: Address,
        token1: Address,
        fee: u32,
        tick_lower: i32,
        tick_upper: i32,
    ) {
        if has_config(&env) {
            panic!("Already created");
        }
        if token0 >= token1 {
            panic!("Tokens must be sorted");
        }
        if tick_lower >= tick_upper || tick_lower < MIN_TICK || tick_upper > MAX_TICK {
            panic!("Tick out of bounds");
        }
        if fee >= 1_000_000 {
            panic!("Invalid fee");
        }
        set_config(
            &env,
            &PoolConfig {
                factory,
                token0,
                token1,
                fee,
                tick_lower,
                tick_upper,
            },
        );
    }

    /// Set the starting price. Called once, after `create`.
    pub fn initialize(env: Env, sqrt_price_x96: u128) {
        if !has_config(&env) {
            panic!("Not created");
        }
        if has_state(&env) {
            panic!("Already initialized");
        }
        if sqrt_price_x96 < MIN_SQRT_PRICE || sqrt_price_x96 >= MAX_SQRT_PRICE {
            panic!("Sqrt price out of bounds");
        }
        let tick = tick_at_sqrt_price(&env, sqrt_price_x96);
        set_state(&env, &PoolState::new(sqrt_price_x96, tick));
        events::initialize(&env, sqrt_price_x96, tick);
    }

    /// Add `amount` liquidity to `recipient`'s position. Pulls payment by
    /// invoking `mint_callback(amount0, amount1, data)` on `sender`.
    /// Returns the token amounts owed to the pool.
    pub fn mint(
        env: Env,
        sender: Address,
        recipient: Address,
        amount: u128,
        data: Bytes,
    ) -> (i128, i128) {
        sender.require_auth();
        liquidity::mint(&env, sender, recipient, amount, data)
    }

    /// Remove `amount` liquidity from `owner`'s position. The freed tokens
    /// are credited as owed, to be withdrawn with `collect`.
    pub fn burn(env: Env, owner: Address, amount: u128) -> (i128, i128) {
        owner.require_auth();
        liquidity::burn(&env, owner, amount)
    }

    /// Pay out everything `owner`'s position is owed to `recipient`.
    pub fn collect(env: Env, owner: Address, recipient: Address) -> (i128, i128) {
        owner.require_auth();
        liquidity::collect(&env, owner, recipient)
    }

    /// Swap against the pool. `amount_specified` > 0 is exact input, < 0 is
    /// exact output. Pulls the input token by invoking
    /// `swap_callback(amount0, amount1, data)` on `sender`.
    /// Returns (amount0, amount1): positive owed to the pool, negative paid
    /// to `recipient`.
    pub fn swap(
        env: Env,
        sender: Address,
        recipient: Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: u128,
        data: Bytes,
    ) -> (i128, i128) {
        sender.require_auth();
        swap::execute_swap(
            &env,
            sender,
            recipient,
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96,
            data,
        )
    }

    // === views ===

    pub fn get_config(env: Env) -> PoolConfig {
        get_config(&env)
    }

    pub fn get_state(env: Env) -> PoolState {
        get_state(&env)
    }

    pub fn get_position(env: Env, owner: Address) -> Position {
        get_position(&env, &owner)
    }

    /// Get current sqrt price
    pub fn sqrt_price_x96(env: Env) -> u128 {
        get_state(&env).sqrt_price_x96
    }

    /// Get current tick
    pub fn tick(env: Env) -> i32 {
        get_state(&env).tick
    }

    /// Get active liquidity
    pub fn liquidity(env: Env) -> u128 {
        get_state(&env).liquidity
    }

    /// Get the fee growth accumulator for token0
    pub fn fee_growth_global_0_x128(env: Env) -> u128 {
        get_state(&env).fee_growth_global_0_x128
    }

    /// Get the fee growth accumulator for token1
    pub fn fee_growth_global_1_x128(env: Env) -> u128 {
        get_state(&env).fee_growth_global_1_x128
    }

    /// Get token0 address
    pub fn token0(env: Env) -> Address {
        get_config(&env).token0
    }

    /// Get token1 address
    pub fn token1(env: Env) -> Address {
        get_config(&env).token1
    }

    /// Get fee
    pub fn fee(env: Env) -> u32 {
        get_config(&env).fee
    }
}
