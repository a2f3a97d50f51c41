//! Position sizing integration tests: liquidity from a one-sided amount,
//! the paired amount, rounding discipline and slippage bounds across the
//! three range/price relationships (below, inside, above).
//!
//! Run: cargo test --test position_sizing_tests

use clmm_quote_sdk::libraries::liquidity_math::{
    get_liquidity_from_single_amount_0, get_liquidity_from_single_amount_1,
};
use clmm_quote_sdk::libraries::tick_math::get_sqrt_price_at_tick;
use clmm_quote_sdk::quote::position::{amounts_from_liquidity, compute_pair_amount, BaseSide};
use clmm_quote_sdk::ClmmError;

use test_helpers::{pool_with_arrays, Q64};

const SPACING: u16 = 60;

#[test]
fn inside_range_splits_both_sides() {
    let pool = pool_with_arrays(0, SPACING, Q64, 0, 2500, &[]);
    let quote =
        compute_pair_amount(&pool, -1200, 1200, BaseSide::Token0, 1_000_000_000, 0.01, true)
            .unwrap();

    assert!(quote.liquidity > 0);
    assert!(quote.amount_0 > 0 && quote.amount_1 > 0);
    // symmetric range at price 1.0: the paired side is nearly equal
    let ratio = quote.amount_1 as f64 / quote.amount_0 as f64;
    assert!((ratio - 1.0).abs() < 0.01, "ratio {ratio}");
    // adding: bounds are maximums
    assert!(quote.amount_0_bound >= quote.amount_0);
    assert!(quote.amount_1_bound >= quote.amount_1);
}

#[test]
fn below_range_is_all_token_0() {
    // price below the range: only token_0 funds the position
    let pool = pool_with_arrays(-2400, SPACING, get_sqrt_price_at_tick(-2400).unwrap(), 0, 2500, &[]);
    let quote =
        compute_pair_amount(&pool, -1200, 1200, BaseSide::Token0, 1_000_000_000, 0.01, true)
            .unwrap();
    assert!(quote.liquidity > 0);
    assert!(quote.amount_0 > 0);
    assert_eq!(quote.amount_1, 0);

    // the other base side buys nothing here
    let quote =
        compute_pair_amount(&pool, -1200, 1200, BaseSide::Token1, 1_000_000_000, 0.01, true)
            .unwrap();
    assert_eq!(quote.liquidity, 0);
}

#[test]
fn above_range_is_all_token_1() {
    let pool = pool_with_arrays(2400, SPACING, get_sqrt_price_at_tick(2400).unwrap(), 0, 2500, &[]);
    let quote =
        compute_pair_amount(&pool, -1200, 1200, BaseSide::Token1, 1_000_000_000, 0.01, true)
            .unwrap();
    assert!(quote.liquidity > 0);
    assert_eq!(quote.amount_0, 0);
    assert!(quote.amount_1 > 0);

    let quote =
        compute_pair_amount(&pool, -1200, 1200, BaseSide::Token0, 1_000_000_000, 0.01, true)
            .unwrap();
    assert_eq!(quote.liquidity, 0);
}

#[test]
fn sizing_round_trips_within_one_unit() {
    let amount: u64 = 1_000_000_000;
    let cases = [
        (-2400, BaseSide::Token0), // below the range
        (0, BaseSide::Token0),     // inside, token_0 base
        (0, BaseSide::Token1),     // inside, token_1 base
        (2400, BaseSide::Token1),  // above the range
    ];
    for (tick_current, base) in cases {
        let sqrt_price = get_sqrt_price_at_tick(tick_current).unwrap();
        let (lower, upper) = (-1200, 1200);
        let sqrt_lower = get_sqrt_price_at_tick(lower).unwrap();
        let sqrt_upper = get_sqrt_price_at_tick(upper).unwrap();

        let liquidity = match base {
            BaseSide::Token0 => {
                get_liquidity_from_single_amount_0(sqrt_price, sqrt_lower, sqrt_upper, amount)
            }
            BaseSide::Token1 => {
                get_liquidity_from_single_amount_1(sqrt_price, sqrt_lower, sqrt_upper, amount)
            }
        }
        .unwrap();

        let (amount_0, amount_1) =
            amounts_from_liquidity(tick_current, sqrt_price, lower, upper, liquidity, true)
                .unwrap();
        let recovered = match base {
            BaseSide::Token0 => amount_0,
            BaseSide::Token1 => amount_1,
        };
        let diff = recovered.abs_diff(amount);
        assert!(diff <= 1, "{base:?} at tick {tick_current}: drifted {diff} units");
    }
}

#[test]
fn removing_rounds_down_and_bounds_down() {
    let pool = pool_with_arrays(0, SPACING, Q64, 0, 2500, &[]);
    let added =
        compute_pair_amount(&pool, -1200, 1200, BaseSide::Token0, 1_000_000_000, 0.01, true)
            .unwrap();
    let removed =
        compute_pair_amount(&pool, -1200, 1200, BaseSide::Token0, 1_000_000_000, 0.01, false)
            .unwrap();

    // same liquidity either way; what changes is rounding and bounds
    assert_eq!(added.liquidity, removed.liquidity);
    assert!(removed.amount_0 <= added.amount_0);
    assert!(removed.amount_1 <= added.amount_1);
    assert!(removed.amount_0_bound <= removed.amount_0);
    assert!(removed.amount_1_bound <= removed.amount_1);
}

#[test]
fn degenerate_ranges_are_rejected() {
    let pool = pool_with_arrays(0, SPACING, Q64, 0, 2500, &[]);
    assert_eq!(
        compute_pair_amount(&pool, 1200, -1200, BaseSide::Token0, 1, 0.0, true).unwrap_err(),
        ClmmError::InvalidTickRange { lower: 1200, upper: -1200 }
    );
    assert!(matches!(
        compute_pair_amount(&pool, -500_000, 1200, BaseSide::Token0, 1, 0.0, true).unwrap_err(),
        ClmmError::TickOutOfRange(_)
    ));
}
