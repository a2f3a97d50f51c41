//! Swap quoting integration tests.
//!
//! Scenarios:
//! - single-segment exact-in swap against a quiet pool (fee and account
//!   list checked against the constant-liquidity formula)
//! - multi-array crossing with the ordered remaining-accounts list
//! - exact-out then exact-in round trip on an unchanged snapshot
//! - insufficient liquidity reported through the remaining amount
//! - the recoverable step-cap and missing-account conditions
//!
//! Run: cargo test --test swap_quote_tests

use clmm_quote_sdk::error::ErrorKind;
use clmm_quote_sdk::quote::{compute_amount_in, compute_amount_out, swap_compute, SwapAmount};
use clmm_quote_sdk::utils::pda::get_tick_array_pda;
use clmm_quote_sdk::ClmmError;

use test_helpers::{cache_of, pool_with_arrays, tick_array, Q64};

/// Pool at price 1.0 with tick spacing 60, fee 0.25%, liquidity 10^7 and a
/// single initialized tick array spanning the current tick. An exact-in
/// swap of 1000 stays inside one segment: the fee-adjusted input is
/// floor(1000 * 0.9975) = 997, the fee the 3-unit remainder, and the
/// output a hair under the fee-adjusted input.
#[test]
fn single_segment_exact_in_matches_constant_liquidity_formula() {
    let pool = pool_with_arrays(0, 60, Q64, 10_000_000, 2500, &[0]);
    // the far tick keeps the array non-empty without being reachable
    let cache = cache_of(vec![tick_array(0, 60, &[(3540, 0, 1)])]);

    let quote = compute_amount_out(&pool, None, &cache, false, 1000, 0.005, None).unwrap();

    assert_eq!(quote.fee, 3);
    assert_eq!(quote.amount_in_remaining, 0);
    assert!(
        (995..=997).contains(&quote.amount_out),
        "amount_out {} outside the formula band",
        quote.amount_out
    );
    assert!(quote.min_amount_out <= quote.amount_out);

    // exactly one tick array touched, listed exactly once
    let expected = get_tick_array_pda(&pool.program_id, &pool.pool_id, 0).0;
    assert_eq!(quote.remaining_accounts, vec![expected]);

    // token_1 in: the trader's price (token_0 per token_1) worsens
    assert!(quote.execution_price < quote.current_price);
    assert!(quote.price_impact > 0.0 && quote.price_impact < 0.001);
}

#[test]
fn multi_array_swap_lists_accounts_in_probing_order() {
    // spacing 10 => 600 ticks per array; liquidity steps up at 300 and
    // back down at 600
    let pool = pool_with_arrays(0, 10, Q64, 1_000_000_000, 2500, &[0, 600, 1200]);
    let cache = cache_of(vec![
        tick_array(0, 10, &[(300, 500_000_000, 500_000_000)]),
        tick_array(600, 10, &[(600, -500_000_000, 500_000_000)]),
        tick_array(1200, 10, &[(1790, 0, 1)]),
    ]);

    let quote = compute_amount_out(&pool, None, &cache, false, 80_000_000, 0.01, None).unwrap();

    assert_eq!(quote.amount_in_remaining, 0);
    assert!(quote.amount_out > 0);

    let pda = |start: i32| get_tick_array_pda(&pool.program_id, &pool.pool_id, start).0;
    assert_eq!(quote.remaining_accounts, vec![pda(0), pda(600), pda(1200)]);
}

#[test]
fn crossing_applies_the_signed_liquidity_delta() {
    let pool = pool_with_arrays(0, 10, Q64, 1_000_000_000, 2500, &[0, 600, 1200]);
    let cache = cache_of(vec![
        tick_array(0, 10, &[(300, 500_000_000, 500_000_000)]),
        tick_array(600, 10, &[(600, -500_000_000, 500_000_000)]),
        tick_array(1200, 10, &[(1790, 0, 1)]),
    ]);

    let result = swap_compute(
        &pool,
        None,
        &cache,
        false,
        SwapAmount::ExactIn(80_000_000),
        0,
        None,
    )
    .unwrap();

    // both deltas crossed: +5e8 at 300, -5e8 at 600
    assert_eq!(result.liquidity, 1_000_000_000);
    assert!(result.tick_current > 600 && result.tick_current < 1790);
    assert_eq!(result.amount_specified_remaining, 0);
}

#[test]
fn exact_out_then_exact_in_round_trips_within_one_unit() {
    let pool = pool_with_arrays(0, 60, Q64, 1_000_000_000, 2500, &[0, -3600]);
    let arrays = vec![
        tick_array(0, 60, &[(3540, 0, 1)]),
        tick_array(-3600, 60, &[(-3600, 0, 1)]),
    ];
    let cache = cache_of(arrays);

    let wanted_out: u64 = 500_000;
    let in_quote =
        compute_amount_in(&pool, None, &cache, true, wanted_out, 0.0, None).unwrap();
    assert_eq!(in_quote.amount_out_remaining, 0);
    assert!(in_quote.amount_in > wanted_out, "fee and price movement cost something");

    let out_quote =
        compute_amount_out(&pool, None, &cache, true, in_quote.amount_in, 0.0, None).unwrap();
    let diff = out_quote.amount_out.abs_diff(wanted_out);
    assert!(diff <= 1, "round trip drifted by {diff} units");
}

#[test]
fn insufficient_liquidity_reports_remaining_not_error() {
    let pool = pool_with_arrays(0, 60, Q64, 10_000_000, 2500, &[0]);
    let cache = cache_of(vec![tick_array(0, 60, &[(3540, 0, 1)])]);

    // far beyond what 10^7 liquidity can fill before the range runs out
    let quote =
        compute_amount_out(&pool, None, &cache, false, 1_000_000_000_000, 0.01, None).unwrap();

    assert!(quote.amount_in_remaining > 0, "shortfall must be visible");
    assert!(quote.amount_out > 0, "the covered part still fills");
}

#[test]
fn price_limit_cuts_the_fill_short() {
    let pool = pool_with_arrays(0, 60, Q64, 1_000_000_000, 2500, &[0]);
    let cache = cache_of(vec![tick_array(0, 60, &[(3540, 0, 1)])]);

    // token_1 in: the trader's price falls as the raw price rises, so the
    // worst acceptable price sits below current
    let limited =
        compute_amount_out(&pool, None, &cache, false, u64::MAX / 4, 0.0, Some(0.99)).unwrap();
    assert!(limited.amount_in_remaining > 0, "the limit must leave input unfilled");
    assert!(limited.execution_price >= 0.9899 && limited.execution_price <= 0.9902);
}

#[test]
fn zero_amount_is_an_input_error() {
    let pool = pool_with_arrays(0, 60, Q64, 10_000_000, 2500, &[0]);
    let cache = cache_of(vec![tick_array(0, 60, &[(3540, 0, 1)])]);
    let err = swap_compute(&pool, None, &cache, false, SwapAmount::ExactIn(0), 0, None).unwrap_err();
    assert_eq!(err, ClmmError::ZeroAmountSpecified);
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn wrong_side_price_limit_is_rejected() {
    let pool = pool_with_arrays(0, 60, Q64, 10_000_000, 2500, &[0]);
    let cache = cache_of(vec![tick_array(0, 60, &[(3540, 0, 1)])]);
    // price falls for zero_for_one, so a limit above current is wrong
    let err = swap_compute(
        &pool,
        None,
        &cache,
        true,
        SwapAmount::ExactIn(1000),
        0,
        Some(pool.sqrt_price_x64 + 1),
    )
    .unwrap_err();
    assert_eq!(err, ClmmError::SqrtPriceLimitWrongDirection);
}

#[test]
fn missing_tick_array_is_recoverable() {
    // bitmap flags array 3600 but the cache never got it
    let pool = pool_with_arrays(0, 60, Q64, 10_000_000, 2500, &[0, 3600]);
    let cache = cache_of(vec![tick_array(0, 60, &[(60, 0, 1)])]);

    let err = compute_amount_out(&pool, None, &cache, false, 1_000_000_000, 0.0, None).unwrap_err();
    assert_eq!(err, ClmmError::MissingTickArrayAccount(3600));
    assert!(err.is_recoverable());
}

#[test]
fn step_cap_is_reported_as_insufficient_cache() {
    // spacing 1: two fully-initialized arrays give 120 one-tick segments,
    // far past the step cap
    let mut ticks_a = Vec::new();
    let mut ticks_b = Vec::new();
    for i in 0..60 {
        ticks_a.push((i, 0i128, 1u128));
        ticks_b.push((60 + i, 0i128, 1u128));
    }
    let pool = pool_with_arrays(0, 1, Q64, 1_000_000_000, 2500, &[0, 60]);
    let cache = cache_of(vec![tick_array(0, 1, &ticks_a), tick_array(60, 1, &ticks_b)]);

    let err = compute_amount_out(&pool, None, &cache, false, u64::MAX / 4, 0.0, None).unwrap_err();
    assert_eq!(err, ClmmError::TooManySwapSteps);
    assert_eq!(err.kind(), ErrorKind::InsufficientCache);
}

#[test]
fn empty_direction_quotes_zero_instead_of_failing() {
    // nothing initialized anywhere
    let pool = pool_with_arrays(0, 60, Q64, 0, 2500, &[]);
    let cache = cache_of(vec![]);
    let quote = compute_amount_out(&pool, None, &cache, true, 1000, 0.01, None).unwrap();
    assert_eq!(quote.amount_out, 0);
    assert_eq!(quote.amount_in_remaining, 1000);
    assert!(quote.remaining_accounts.is_empty());
}
