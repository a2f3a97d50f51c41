// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/
// Math kept bit-for-bit with the on-chain program; anchor dependencies removed,
// checked arithmetic surfaced as typed errors

pub mod big_num;
pub mod fixed_point_64;
pub mod full_math;
pub mod liquidity_math;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_array_bit_map;
pub mod tick_math;
pub mod unsafe_math;

// Re-exports for convenience
pub use big_num::{U1024, U128, U256, U512};
pub use full_math::MulDiv;
pub use swap_math::{compute_swap_step, SwapStep};
pub use tick_math::{MAX_SQRT_PRICE_X64, MAX_TICK, MIN_SQRT_PRICE_X64, MIN_TICK};
pub use unsafe_math::UnsafeMathTrait;
