use range_math::{add_delta, mul_shr_128};
use range_types::Position;
use soroban_sdk::Env;

/// Settle fees accrued since the last touch into `tokens_owed`, then apply a
/// liquidity change and refresh the growth snapshots.
///
/// Growth deltas use wrapping subtraction: the global accumulators are
/// allowed to wrap around u128 and the difference stays correct as long as
/// less than one full wrap happens between touches.
pub fn update(
    env: &Env,
    position: &mut Position,
    liquidity_delta: i128,
    fee_growth_global_0_x128: u128,
    fee_growth_global_1_x128: u128,
) {
    if position.liquidity > 0 {
        let growth_0 =
            fee_growth_global_0_x128.wrapping_sub(position.fee_growth_inside_0_last_x128);
        let growth_1 =
            fee_growth_global_1_x128.wrapping_sub(position.fee_growth_inside_1_last_x128);

        position.tokens_owed_0 += mul_shr_128(env, growth_0, position.liquidity);
        position.tokens_owed_1 += mul_shr_128(env, growth_1, position.liquidity);
    }

    position.liquidity = add_delta(position.liquidity, liquidity_delta);
    position.fee_growth_inside_0_last_x128 = fee_growth_global_0_x128;
    position.fee_growth_inside_1_last_x128 = fee_growth_global_1_x128;
}
