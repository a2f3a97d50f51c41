pub mod position;
pub mod swap;

pub use position::{amounts_from_liquidity, compute_pair_amount, BaseSide, PairAmountQuote};
pub use swap::{
    compute_amount_in, compute_amount_out, swap_compute, AmountInQuote, AmountOutQuote,
    SwapAmount, SwapComputeResult,
};

use crate::constants::SLIPPAGE_DENOMINATOR;

/// Scales an amount by `(1 + slippage)` rounding up (a required maximum)
/// or by `(1 - slippage)` rounding down (a guaranteed minimum).
pub(crate) fn amount_with_slippage(amount: u64, slippage: f64, round_up: bool) -> u64 {
    let factor = if round_up { 1.0 + slippage } else { 1.0 - slippage };
    let numerator = (factor * SLIPPAGE_DENOMINATOR as f64).floor() as u128;
    let denominator = SLIPPAGE_DENOMINATOR as u128;
    let scaled = if round_up {
        (u128::from(amount) * numerator + denominator - 1) / denominator
    } else {
        u128::from(amount) * numerator / denominator
    };
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
