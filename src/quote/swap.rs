//! Swap loop and quote entry points.
//!
//! `swap_compute` walks constant-liquidity segments across tick arrays
//! until the specified amount is exhausted, a price limit is hit, or the
//! global tick range runs out. Along the way it records, in probing
//! order, every tick-array account the on-chain swap will touch —
//! transaction builders pass that list as the instruction's remaining
//! accounts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, trace};

use crate::constants::MAX_SWAP_STEPS;
use crate::error::ClmmError;
use crate::libraries::big_num::U1024;
use crate::libraries::swap_math::compute_swap_step;
use crate::libraries::tick_array_bit_map::check_current_tick_array_is_initialized;
use crate::libraries::tick_math::{
    get_sqrt_price_at_tick, get_tick_at_sqrt_price, MAX_SQRT_PRICE_X64, MAX_TICK,
    MIN_SQRT_PRICE_X64, MIN_TICK,
};
use crate::quote::amount_with_slippage;
use crate::state::pool::PoolSnapshot;
use crate::state::tick_array::TickArrayState;
use crate::state::tickarray_bitmap_extension::TickArrayBitmapExtension;
use crate::utils::pda::get_tick_array_pda;
use crate::utils::price::{price_to_sqrt_price_x64, sqrt_price_x64_to_price};

/// The fixed side of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapAmount {
    /// The amount paid in is fixed; the output is quoted.
    ExactIn(u64),
    /// The amount received out is fixed; the input is quoted.
    ExactOut(u64),
}

impl SwapAmount {
    pub fn magnitude(&self) -> u64 {
        match self {
            SwapAmount::ExactIn(a) | SwapAmount::ExactOut(a) => *a,
        }
    }

    pub fn is_base_input(&self) -> bool {
        matches!(self, SwapAmount::ExactIn(_))
    }
}

/// Raw result of one swap-loop run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapComputeResult {
    /// Output produced (exact-in) or input required incl. fee (exact-out).
    pub amount_calculated: u64,
    /// Unfilled part of the specified amount; nonzero means the pool ran
    /// out of liquidity (or the price limit cut the swap short).
    pub amount_specified_remaining: u64,
    pub fee_amount: u64,
    pub sqrt_price_x64: u128,
    pub liquidity: u128,
    pub tick_current: i32,
    /// Tick-array accounts crossed during the loop, probing order.
    pub accounts: Vec<Pubkey>,
}

/// Next initialized tick in the travel direction, with the array that
/// holds it.
struct NextInitializedTick {
    tick: i32,
    liquidity_net: i128,
    liquidity_gross: u128,
    tick_array_start_index: i32,
}

fn next_initialized_tick(
    pool: &PoolSnapshot,
    bitmap_extension: Option<&TickArrayBitmapExtension>,
    tick_array_cache: &HashMap<i32, TickArrayState>,
    current_tick: i32,
    zero_for_one: bool,
) -> Result<Option<NextInitializedTick>, ClmmError> {
    let current_start = TickArrayState::get_array_start_index(current_tick, pool.tick_spacing);

    match tick_array_cache.get(&current_start) {
        Some(array) => {
            if let Some(tick_state) =
                array.next_initialized_tick(current_tick, pool.tick_spacing, zero_for_one)
            {
                return Ok(Some(NextInitializedTick {
                    tick: tick_state.tick,
                    liquidity_net: tick_state.liquidity_net,
                    liquidity_gross: tick_state.liquidity_gross,
                    tick_array_start_index: current_start,
                }));
            }
        }
        None => {
            // an initialized current array missing from the cache is a
            // fetch gap, not "no more ticks"
            let flagged = if pool.is_overflow_default_tickarray_bitmap(current_tick) {
                match bitmap_extension {
                    Some(ext) => ext
                        .check_tick_array_is_initialized(current_start, pool.tick_spacing)
                        .map(|(initialized, _)| initialized)
                        .unwrap_or(false),
                    None => false,
                }
            } else {
                check_current_tick_array_is_initialized(
                    U1024(pool.tick_array_bitmap),
                    current_tick,
                    pool.tick_spacing,
                )
                .0
            };
            if flagged {
                return Err(ClmmError::MissingTickArrayAccount(current_start));
            }
        }
    }

    match pool.next_initialized_tick_array_start_index(
        bitmap_extension,
        current_start,
        zero_for_one,
    )? {
        None => Ok(None),
        Some(start_index) => {
            let array = tick_array_cache
                .get(&start_index)
                .ok_or(ClmmError::MissingTickArrayAccount(start_index))?;
            let tick_state = array
                .first_initialized_tick(zero_for_one)
                .ok_or(ClmmError::InvalidTickArray(start_index))?;
            Ok(Some(NextInitializedTick {
                tick: tick_state.tick,
                liquidity_net: tick_state.liquidity_net,
                liquidity_gross: tick_state.liquidity_gross,
                tick_array_start_index: start_index,
            }))
        }
    }
}

/// Runs the tick-crossing swap loop against an immutable snapshot.
///
/// `first_tick_array_start_index` seeds the account bookkeeping — the
/// caller has already listed that array, so only arrays beyond it get
/// recorded here (deduplicated by adjacency, matching the program's
/// probing order).
pub fn swap_compute(
    pool: &PoolSnapshot,
    bitmap_extension: Option<&TickArrayBitmapExtension>,
    tick_array_cache: &HashMap<i32, TickArrayState>,
    zero_for_one: bool,
    amount: SwapAmount,
    first_tick_array_start_index: i32,
    sqrt_price_limit_x64: Option<u128>,
) -> Result<SwapComputeResult, ClmmError> {
    if amount.magnitude() == 0 {
        return Err(ClmmError::ZeroAmountSpecified);
    }
    if pool.tick_spacing == 0 {
        return Err(ClmmError::ZeroTickSpacing);
    }

    let sqrt_price_limit_x64 = sqrt_price_limit_x64.unwrap_or(if zero_for_one {
        MIN_SQRT_PRICE_X64 + 1
    } else {
        MAX_SQRT_PRICE_X64 - 1
    });
    if zero_for_one {
        if sqrt_price_limit_x64 < MIN_SQRT_PRICE_X64 {
            return Err(ClmmError::SqrtPriceLimitOutOfBounds);
        }
        if sqrt_price_limit_x64 >= pool.sqrt_price_x64 {
            return Err(ClmmError::SqrtPriceLimitWrongDirection);
        }
    } else {
        if sqrt_price_limit_x64 > MAX_SQRT_PRICE_X64 {
            return Err(ClmmError::SqrtPriceLimitOutOfBounds);
        }
        if sqrt_price_limit_x64 <= pool.sqrt_price_x64 {
            return Err(ClmmError::SqrtPriceLimitWrongDirection);
        }
    }

    let is_base_input = amount.is_base_input();

    // working state; never aliased back to the caller's snapshot
    let mut amount_specified_remaining = amount.magnitude();
    let mut amount_calculated: u64 = 0;
    let mut sqrt_price_x64 = pool.sqrt_price_x64;
    let mut tick = pool.tick_current;
    let mut liquidity = pool.liquidity;
    let mut fee_amount: u64 = 0;
    let mut accounts: Vec<Pubkey> = Vec::new();

    let mut last_saved_start_index = first_tick_array_start_index;
    let mut loop_count: u32 = 0;

    while amount_specified_remaining != 0
        && sqrt_price_x64 != sqrt_price_limit_x64
        && tick < MAX_TICK
        && tick > MIN_TICK
    {
        if loop_count >= MAX_SWAP_STEPS {
            return Err(ClmmError::TooManySwapSteps);
        }

        let sqrt_price_start_x64 = sqrt_price_x64;

        let Some(next_tick) =
            next_initialized_tick(pool, bitmap_extension, tick_array_cache, tick, zero_for_one)?
        else {
            // no initialized tick left inside the global range: stop and
            // let the remaining amount report the shortfall
            break;
        };

        if next_tick.tick_array_start_index != last_saved_start_index {
            accounts.push(
                get_tick_array_pda(&pool.program_id, &pool.pool_id, next_tick.tick_array_start_index)
                    .0,
            );
            last_saved_start_index = next_tick.tick_array_start_index;
        }

        let tick_next = next_tick.tick.clamp(MIN_TICK, MAX_TICK);
        let initialized = next_tick.liquidity_gross > 0;
        let sqrt_price_next_x64 = get_sqrt_price_at_tick(tick_next)?;

        let target_price = if (zero_for_one && sqrt_price_next_x64 < sqrt_price_limit_x64)
            || (!zero_for_one && sqrt_price_next_x64 > sqrt_price_limit_x64)
        {
            sqrt_price_limit_x64
        } else {
            sqrt_price_next_x64
        };

        let step = compute_swap_step(
            sqrt_price_x64,
            target_price,
            liquidity,
            amount_specified_remaining,
            pool.trade_fee_rate,
            is_base_input,
            zero_for_one,
        )?;

        trace!(
            tick,
            tick_next,
            amount_in = step.amount_in,
            amount_out = step.amount_out,
            fee = step.fee_amount,
            "swap step"
        );

        sqrt_price_x64 = step.sqrt_price_next_x64;
        fee_amount = fee_amount.checked_add(step.fee_amount).ok_or(ClmmError::MathOverflow)?;

        if is_base_input {
            amount_specified_remaining = amount_specified_remaining
                .checked_sub(
                    step.amount_in.checked_add(step.fee_amount).ok_or(ClmmError::MathOverflow)?,
                )
                .ok_or(ClmmError::MathOverflow)?;
            amount_calculated =
                amount_calculated.checked_add(step.amount_out).ok_or(ClmmError::MathOverflow)?;
        } else {
            amount_specified_remaining = amount_specified_remaining
                .checked_sub(step.amount_out)
                .ok_or(ClmmError::MathOverflow)?;
            amount_calculated = amount_calculated
                .checked_add(
                    step.amount_in.checked_add(step.fee_amount).ok_or(ClmmError::MathOverflow)?,
                )
                .ok_or(ClmmError::MathOverflow)?;
        }

        if sqrt_price_x64 == sqrt_price_next_x64 {
            // the boundary was reached exactly: cross the tick
            if initialized {
                let liquidity_net = if zero_for_one {
                    -next_tick.liquidity_net
                } else {
                    next_tick.liquidity_net
                };
                liquidity = crate::libraries::liquidity_math::add_delta(liquidity, liquidity_net)?;
            }
            tick = if zero_for_one { tick_next - 1 } else { tick_next };
        } else if sqrt_price_x64 != sqrt_price_start_x64 {
            // partial segment: the price stopped between boundaries
            tick = get_tick_at_sqrt_price(sqrt_price_x64)?;
        }

        loop_count += 1;
    }

    // the program probes one array past the final tick; list it too
    // (best-effort, a missing extension account is fine here)
    if let Ok(Some(next_start)) = pool.next_initialized_tick_array_start_index(
        bitmap_extension,
        TickArrayState::get_array_start_index(tick, pool.tick_spacing),
        zero_for_one,
    ) {
        if next_start != last_saved_start_index {
            accounts.push(get_tick_array_pda(&pool.program_id, &pool.pool_id, next_start).0);
        }
    }

    Ok(SwapComputeResult {
        amount_calculated,
        amount_specified_remaining,
        fee_amount,
        sqrt_price_x64,
        liquidity,
        tick_current: tick,
        accounts,
    })
}

/// Quote for an exact-in swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountOutQuote {
    pub amount_out: u64,
    /// `amount_out` scaled down by the slippage fraction.
    pub min_amount_out: u64,
    /// Unfilled input; nonzero means not enough liquidity in range.
    pub amount_in_remaining: u64,
    /// Pool price before the swap, in input-token terms.
    pub current_price: f64,
    /// Pool price after the swap, in input-token terms.
    pub execution_price: f64,
    /// Relative deviation of execution price from current price.
    pub price_impact: f64,
    pub fee: u64,
    /// Tick-array accounts the transaction must reference, in order.
    pub remaining_accounts: Vec<Pubkey>,
}

/// Quote for an exact-out swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountInQuote {
    pub amount_in: u64,
    /// `amount_in` scaled up by the slippage fraction.
    pub max_amount_in: u64,
    /// Unproduced output; nonzero means not enough liquidity in range.
    pub amount_out_remaining: u64,
    pub current_price: f64,
    pub execution_price: f64,
    pub price_impact: f64,
    pub fee: u64,
    pub remaining_accounts: Vec<Pubkey>,
}

struct QuoteAccounts {
    accounts: Vec<Pubkey>,
    first_start_index: Option<i32>,
}

/// Account-list preamble shared by both quote directions: the first
/// initialized array in the opposite direction (best-effort, the program
/// may probe backwards for fee growth), then the array the swap starts
/// against.
fn resolve_quote_accounts(
    pool: &PoolSnapshot,
    bitmap_extension: Option<&TickArrayBitmapExtension>,
    zero_for_one: bool,
) -> Result<QuoteAccounts, ClmmError> {
    let mut accounts = Vec::new();

    let Some((_, first_start_index)) =
        pool.get_first_initialized_tick_array(bitmap_extension, zero_for_one)?
    else {
        return Ok(QuoteAccounts { accounts, first_start_index: None });
    };

    let current_start = TickArrayState::get_array_start_index(pool.tick_current, pool.tick_spacing);
    if let Ok(Some(pre_start)) =
        pool.next_initialized_tick_array_start_index(bitmap_extension, current_start, !zero_for_one)
    {
        accounts.push(get_tick_array_pda(&pool.program_id, &pool.pool_id, pre_start).0);
    }

    accounts.push(get_tick_array_pda(&pool.program_id, &pool.pool_id, first_start_index).0);
    Ok(QuoteAccounts { accounts, first_start_index: Some(first_start_index) })
}

/// Orientation helper: prices are stored as token_1 per token_0; quotes
/// report them in terms of the swapped-in token.
fn oriented_price(sqrt_price_x64: u128, pool: &PoolSnapshot, zero_for_one: bool) -> f64 {
    let price = sqrt_price_x64_to_price(sqrt_price_x64, pool.mint_decimals_0, pool.mint_decimals_1);
    if zero_for_one { price } else { 1.0 / price }
}

/// Quotes an exact-input swap without touching the chain.
///
/// `zero_for_one` is true when the input token is token_0. `slippage` is
/// a fraction (0.01 = 1%); `price_limit` is a decimal price in
/// input-token terms, `None` (or 0) for no limit.
pub fn compute_amount_out(
    pool: &PoolSnapshot,
    bitmap_extension: Option<&TickArrayBitmapExtension>,
    tick_array_cache: &HashMap<i32, TickArrayState>,
    zero_for_one: bool,
    amount_in: u64,
    slippage: f64,
    price_limit: Option<f64>,
) -> Result<AmountOutQuote, ClmmError> {
    let sqrt_price_limit_x64 = resolve_price_limit(pool, zero_for_one, price_limit);
    let current_price = oriented_price(pool.sqrt_price_x64, pool, zero_for_one);

    let resolved = resolve_quote_accounts(pool, bitmap_extension, zero_for_one)?;
    let Some(first_start_index) = resolved.first_start_index else {
        debug!(pool = %pool.pool_id, "no initialized tick array in direction; empty quote");
        return Ok(AmountOutQuote {
            amount_out: 0,
            min_amount_out: 0,
            amount_in_remaining: amount_in,
            current_price,
            execution_price: current_price,
            price_impact: 0.0,
            fee: 0,
            remaining_accounts: Vec::new(),
        });
    };

    let mut remaining_accounts = resolved.accounts;
    let result = swap_compute(
        pool,
        bitmap_extension,
        tick_array_cache,
        zero_for_one,
        SwapAmount::ExactIn(amount_in),
        first_start_index,
        sqrt_price_limit_x64,
    )?;
    remaining_accounts.extend(result.accounts.iter());

    let execution_price = oriented_price(result.sqrt_price_x64, pool, zero_for_one);
    let price_impact = (execution_price - current_price).abs() / current_price;
    let min_amount_out = amount_with_slippage(result.amount_calculated, slippage, false);

    debug!(
        pool = %pool.pool_id,
        amount_in,
        amount_out = result.amount_calculated,
        fee = result.fee_amount,
        accounts = remaining_accounts.len(),
        "exact-in quote"
    );

    Ok(AmountOutQuote {
        amount_out: result.amount_calculated,
        min_amount_out,
        amount_in_remaining: result.amount_specified_remaining,
        current_price,
        execution_price,
        price_impact,
        fee: result.fee_amount,
        remaining_accounts,
    })
}

/// Quotes an exact-output swap without touching the chain.
///
/// `zero_for_one` is true when the *input* token is token_0 (the desired
/// output is token_1).
pub fn compute_amount_in(
    pool: &PoolSnapshot,
    bitmap_extension: Option<&TickArrayBitmapExtension>,
    tick_array_cache: &HashMap<i32, TickArrayState>,
    zero_for_one: bool,
    amount_out: u64,
    slippage: f64,
    price_limit: Option<f64>,
) -> Result<AmountInQuote, ClmmError> {
    let sqrt_price_limit_x64 = resolve_price_limit(pool, zero_for_one, price_limit);
    let current_price = oriented_price(pool.sqrt_price_x64, pool, zero_for_one);

    let resolved = resolve_quote_accounts(pool, bitmap_extension, zero_for_one)?;
    let Some(first_start_index) = resolved.first_start_index else {
        debug!(pool = %pool.pool_id, "no initialized tick array in direction; empty quote");
        return Ok(AmountInQuote {
            amount_in: 0,
            max_amount_in: 0,
            amount_out_remaining: amount_out,
            current_price,
            execution_price: current_price,
            price_impact: 0.0,
            fee: 0,
            remaining_accounts: Vec::new(),
        });
    };

    let mut remaining_accounts = resolved.accounts;
    let result = swap_compute(
        pool,
        bitmap_extension,
        tick_array_cache,
        zero_for_one,
        SwapAmount::ExactOut(amount_out),
        first_start_index,
        sqrt_price_limit_x64,
    )?;
    remaining_accounts.extend(result.accounts.iter());

    let execution_price = oriented_price(result.sqrt_price_x64, pool, zero_for_one);
    let price_impact = (execution_price - current_price).abs() / current_price;
    let max_amount_in = amount_with_slippage(result.amount_calculated, slippage, true);

    debug!(
        pool = %pool.pool_id,
        amount_out,
        amount_in = result.amount_calculated,
        fee = result.fee_amount,
        accounts = remaining_accounts.len(),
        "exact-out quote"
    );

    Ok(AmountInQuote {
        amount_in: result.amount_calculated,
        max_amount_in,
        amount_out_remaining: result.amount_specified_remaining,
        current_price,
        execution_price,
        price_impact,
        fee: result.fee_amount,
        remaining_accounts,
    })
}

fn resolve_price_limit(
    pool: &PoolSnapshot,
    zero_for_one: bool,
    price_limit: Option<f64>,
) -> Option<u128> {
    match price_limit {
        None => None,
        Some(p) if p == 0.0 => None,
        Some(p) => {
            // the caller speaks input-token prices; flip back to the
            // stored token_1-per-token_0 orientation first
            let raw = if zero_for_one { p } else { 1.0 / p };
            Some(price_to_sqrt_price_x64(raw, pool.mint_decimals_0, pool.mint_decimals_1))
        }
    }
}
