use crate::full_math::{mul_div, mul_div_rounding_up};
use crate::sqrt_price_math::{
    amount0_delta, amount1_delta, next_sqrt_price_from_input, next_sqrt_price_from_output,
};
use soroban_sdk::Env;

/// Fee denominator: fees are expressed in hundredths of a basis point
const FEE_DENOMINATOR: u128 = 1_000_000;

/// Result of swapping over a single price sub-interval
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapStep {
    /// Price after this step, never past the target
    pub sqrt_price_next_x96: u128,
    /// Input token consumed by this step (fee excluded)
    pub amount_in: u128,
    /// Output token produced by this step
    pub amount_out: u128,
    /// Fee charged on the input for this step
    pub fee_amount: u128,
}

/// Compute one step of a swap between the current price and a target price.
///
/// `sqrt_price_target_x96` is the boundary of validity for this step: the
/// nearer of the user's price limit and the price-range boundary in the
/// direction of the trade. `amount_remaining` is positive for exact input
/// (fee comes out of it) and negative for exact output.
pub fn compute_swap_step(
    env: &Env,
    sqrt_price_current_x96: u128,
    sqrt_price_target_x96: u128,
    liquidity: u128,
    amount_remaining: i128,
    fee: u32,
) -> SwapStep {
    let zero_for_one = sqrt_price_current_x96 >= sqrt_price_target_x96;
    let exact_in = amount_remaining >= 0;

    let sqrt_price_next_x96: u128;
    let mut amount_in: u128 = 0;
    let mut amount_out: u128 = 0;

    if exact_in {
        // The fee is carved out of the input before it moves the price
        let amount_remaining_less_fee = mul_div(
            env,
            amount_remaining as u128,
            FEE_DENOMINATOR - fee as u128,
            FEE_DENOMINATOR,
        );

        // Input needed to push the price all the way to the target
        amount_in = if zero_for_one {
            amount0_delta(
                env,
                sqrt_price_target_x96,
                sqrt_price_current_x96,
                liquidity,
                true,
            )
        } else {
            amount1_delta(
                env,
                sqrt_price_current_x96,
                sqrt_price_target_x96,
                liquidity,
                true,
            )
        };

        sqrt_price_next_x96 = if amount_remaining_less_fee >= amount_in {
            sqrt_price_target_x96
        } else {
            next_sqrt_price_from_input(
                env,
                sqrt_price_current_x96,
                liquidity,
                amount_remaining_less_fee,
                zero_for_one,
            )
        };
    } else {
        // Output obtainable by moving the price all the way to the target
        amount_out = if zero_for_one {
            amount1_delta(
                env,
                sqrt_price_target_x96,
                sqrt_price_current_x96,
                liquidity,
                false,
            )
        } else {
            amount0_delta(
                env,
                sqrt_price_current_x96,
                sqrt_price_target_x96,
                liquidity,
                false,
            )
        };

        let amount_out_requested = amount_remaining.unsigned_abs();
        sqrt_price_next_x96 = if amount_out_requested >= amount_out {
            sqrt_price_target_x96
        } else {
            next_sqrt_price_from_output(
                env,
                sqrt_price_current_x96,
                liquidity,
                amount_out_requested,
                zero_for_one,
            )
        };
    }

    let reached_target = sqrt_price_target_x96 == sqrt_price_next_x96;

    // Recompute whichever side was not fixed above from the clamped price
    if zero_for_one {
        if !(reached_target && exact_in) {
            amount_in = amount0_delta(
                env,
                sqrt_price_next_x96,
                sqrt_price_current_x96,
                liquidity,
                true,
            );
        }
        if !(reached_target && !exact_in) {
            amount_out = amount1_delta(
                env,
                sqrt_price_next_x96,
                sqrt_price_current_x96,
                liquidity,
                false,
            );
        }
    } else {
        if !(reached_target && exact_in) {
            amount_in = amount1_delta(
                env,
                sqrt_price_current_x96,
                sqrt_price_next_x96,
                liquidity,
                true,
            );
        }
        if !(reached_target && !exact_in) {
            amount_out = amount0_delta(
                env,
                sqrt_price_current_x96,
                sqrt_price_next_x96,
                liquidity,
                false,
            );
        }
    }

    // Exact output never hands out more than was asked for
    if !exact_in && amount_out > amount_remaining.unsigned_abs() {
        amount_out = amount_remaining.unsigned_abs();
    }

    let fee_amount = if exact_in && !reached_target {
        // Stopped short of the target: the whole leftover input is the fee
        (amount_remaining as u128) - amount_in
    } else {
        // fee = amount_in * fee_rate / (1 - fee_rate), rounded up so the
        // pool is never short-paid
        mul_div_rounding_up(env, amount_in, fee as u128, FEE_DENOMINATOR - fee as u128)
    };

    SwapStep {
        sqrt_price_next_x96,
        amount_in,
        amount_out,
        fee_amount,
    }
}
