//! Off-chain quoting and position-sizing engine for Raydium-style
//! concentrated-liquidity pools.
//!
//! The crate answers two questions without sending a transaction:
//!
//! - "if I swap amount X, what do I receive, at what price, crossing
//!   which tick arrays?" — [`quote::compute_amount_out`] /
//!   [`quote::compute_amount_in`]
//! - "for a price range and a one-sided amount, how much liquidity is
//!   that, and what is the paired amount?" — [`quote::compute_pair_amount`]
//!
//! All fixed-point math in [`libraries`] is bit-for-bit compatible with
//! the on-chain program, so a quote's amounts, slippage bounds and
//! tick-array account list match what the program will execute. Account
//! fetching, instruction building and signing live in the layers above;
//! every call here works on an immutable [`state::PoolSnapshot`] plus the
//! tick arrays the caller fetched for it.

pub mod constants;
pub mod error;
pub mod libraries;
pub mod quote;
pub mod state;
pub mod utils;

pub use error::{ClmmError, ErrorKind};
pub use quote::{
    compute_amount_in, compute_amount_out, compute_pair_amount, AmountInQuote, AmountOutQuote,
    BaseSide, PairAmountQuote, SwapAmount, SwapComputeResult,
};
pub use state::{PoolSnapshot, TickArrayBitmapExtension, TickArrayState, TickState};
