pub mod fee_tiers;

pub use fee_tiers::*;

/// Fee rate denominator (100%).
pub const FEE_RATE_DENOMINATOR_VALUE: u32 = 1_000_000;

/// Denominator used when applying a slippage fraction to an amount.
pub const SLIPPAGE_DENOMINATOR: u64 = 10_000_000_000;

/// Upper bound on swap-loop iterations per quote.
///
/// Safety bound, not a protocol constant: hitting it means the fetched
/// tick-array window was too narrow for the requested amount, reported as
/// the recoverable `ClmmError::TooManySwapSteps`.
pub const MAX_SWAP_STEPS: u32 = 64;
