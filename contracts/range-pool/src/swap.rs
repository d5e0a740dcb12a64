use range_math::{compute_swap_step, shl_128_div, sqrt_price_at_tick, tick_at_sqrt_price};
use range_types::{MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use soroban_sdk::{token, Address, Bytes, Env, IntoVal, Symbol};

use crate::events;
use crate::liquidity::is_price_in_range;
use crate::storage::{get_config, get_state, set_state};

/// Execute a swap against the pool's single price range.
///
/// `amount_specified` > 0 is exact input, < 0 is exact output. The price walks
/// toward `sqrt_price_limit_x96` (0 means no limit). Outside the range the
/// price jumps across the empty stretch without filling anything; inside it
/// the full position liquidity is active. The output token is paid to
/// `recipient` optimistically, then `swap_callback` on `sender` must deliver
/// the input token, verified by the pool's balance delta.
pub fn execute_swap(
    env: &Env,
    sender: Address,
    recipient: Address,
    zero_for_one: bool,
    amount_specified: i128,
    sqrt_price_limit_x96: u128,
    data: Bytes,
) -> (i128, i128) {
    if amount_specified == 0 {
        panic!("Amount must be non-zero");
    }
    let config = get_config(env);
    let mut state = get_state(env);

    let sqrt_price_limit = if sqrt_price_limit_x96 == 0 {
        if zero_for_one {
            MIN_SQRT_PRICE + 1
        } else {
            MAX_SQRT_PRICE - 1
        }
    } else {
        sqrt_price_limit_x96
    };

    if zero_for_one {
        if sqrt_price_limit >= state.sqrt_price_x96 || sqrt_price_limit <= MIN_SQRT_PRICE {
            panic!("Invalid price limit");
        }
    } else if sqrt_price_limit <= state.sqrt_price_x96 || sqrt_price_limit >= MAX_SQRT_PRICE {
        panic!("Invalid price limit");
    }

    let exact_input = amount_specified > 0;
    let sqrt_lower = sqrt_price_at_tick(env, config.tick_lower);
    let sqrt_upper = sqrt_price_at_tick(env, config.tick_upper);

    let mut amount_remaining = amount_specified;
    let mut amount_calculated: i128 = 0;
    let mut sqrt_price_x96 = state.sqrt_price_x96;
    let mut fee_growth_global_x128 = if zero_for_one {
        state.fee_growth_global_0_x128
    } else {
        state.fee_growth_global_1_x128
    };

    while amount_remaining != 0 && sqrt_price_x96 != sqrt_price_limit {
        // The current segment is one of three: the empty approach stretch
        // outside the range ending at the nearer boundary, the range itself
        // ending at the far boundary, or the empty departure stretch when the
        // price already sits at or past the far boundary — there is nothing
        // to fill in that direction, so the segment runs empty to the limit.
        let (segment_end, segment_liquidity) = if zero_for_one {
            if sqrt_price_x96 <= sqrt_lower {
                (sqrt_price_limit, 0)
            } else if sqrt_price_x96 > sqrt_upper {
                (sqrt_upper, 0)
            } else {
                (sqrt_lower, state.liquidity_gross)
            }
        } else if sqrt_price_x96 >= sqrt_upper {
            (sqrt_price_limit, 0)
        } else if sqrt_price_x96 < sqrt_lower {
            (sqrt_lower, 0)
        } else {
            (sqrt_upper, state.liquidity_gross)
        };

        let sqrt_price_target = if zero_for_one {
            segment_end.max(sqrt_price_limit)
        } else {
            segment_end.min(sqrt_price_limit)
        };

        if sqrt_price_target == sqrt_price_x96 {
            // already at the far boundary (or the pool is empty there):
            // nothing left to trade against
            break;
        }

        if segment_liquidity == 0 {
            // empty stretch: the price moves, nothing fills, no fee
            sqrt_price_x96 = sqrt_price_target;
            continue;
        }

        let step = compute_swap_step(
            env,
            sqrt_price_x96,
            sqrt_price_target,
            segment_liquidity,
            amount_remaining,
            config.fee,
        );

        if exact_input {
            amount_remaining -= (step.amount_in + step.fee_amount) as i128;
            amount_calculated -= step.amount_out as i128;
        } else {
            amount_remaining += step.amount_out as i128;
            amount_calculated += (step.amount_in + step.fee_amount) as i128;
        }

        if step.fee_amount > 0 {
            let growth = shl_128_div(env, step.fee_amount, segment_liquidity);
            fee_growth_global_x128 = fee_growth_global_x128
                .checked_add(growth)
                .unwrap_or_else(|| panic!("Overflow"));
        }

        sqrt_price_x96 = step.sqrt_price_next_x96;

        if sqrt_price_x96 == segment_end {
            // crossed out of the range: whatever remains cannot be filled
            break;
        }
    }

    state.sqrt_price_x96 = sqrt_price_x96;
    state.tick = tick_at_sqrt_price(env, sqrt_price_x96);
    state.liquidity = if is_price_in_range(sqrt_price_x96, sqrt_lower, sqrt_upper) {
        state.liquidity_gross
    } else {
        0
    };
    if zero_for_one {
        state.fee_growth_global_0_x128 = fee_growth_global_x128;
    } else {
        state.fee_growth_global_1_x128 = fee_growth_global_x128;
    }
    set_state(env, &state);

    // positive: owed to the pool; negative: owed to the recipient
    let (amount0, amount1) = if zero_for_one == exact_input {
        (amount_specified - amount_remaining, amount_calculated)
    } else {
        (amount_calculated, amount_specified - amount_remaining)
    };

    let pool = env.current_contract_address();
    let token0 = token::Client::new(env, &config.token0);
    let token1 = token::Client::new(env, &config.token1);

    if zero_for_one {
        if amount1 < 0 {
            token1.transfer(&pool, &recipient, &(-amount1));
        }
        let balance0_before = token0.balance(&pool);
        env.invoke_contract::<()>(
            &sender,
            &Symbol::new(env, "swap_callback"),
            (amount0, amount1, data).into_val(env),
        );
        if token0.balance(&pool) < balance0_before + amount0 {
            panic!("Insufficient input");
        }
    } else {
        if amount0 < 0 {
            token0.transfer(&pool, &recipient, &(-amount0));
        }
        let balance1_before = token1.balance(&pool);
        env.invoke_contract::<()>(
            &sender,
            &Symbol::new(env, "swap_callback"),
            (amount0, amount1, data).into_val(env),
        );
        if token1.balance(&pool) < balance1_before + amount1 {
            panic!("Insufficient input");
        }
    }

    events::swap(
        env,
        &sender,
        &recipient,
        amount0,
        amount1,
        state.sqrt_price_x96,
        state.liquidity,
        state.tick,
    );
    (amount0, amount1)
}
