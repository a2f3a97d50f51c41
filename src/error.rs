//! Typed errors for the quoting engine.
//!
//! Every failure a quote can produce falls into one of three classes:
//! invalid caller input, insufficient cached account data (the caller
//! should fetch a wider tick-array window and retry with a fresh
//! snapshot), or arithmetic overflow. Running out of liquidity inside the
//! global tick range is *not* an error — the swap loop reports it through
//! the nonzero `amount_specified_remaining` field of its result.

/// Coarse classification of [`ClmmError`], for callers that only need to
/// decide between "reject the input", "refetch and retry" and "abort".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller error; retrying with the same arguments cannot succeed.
    InvalidInput,
    /// The supplied tick-array cache did not cover the swap's reach.
    /// Recoverable: fetch a wider window and retry with a fresh snapshot.
    InsufficientCache,
    /// An intermediate value left its fixed-width integer domain.
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClmmError {
    #[error("amount specified must not be zero")]
    ZeroAmountSpecified,

    #[error("tick spacing must be greater than zero")]
    ZeroTickSpacing,

    #[error("invalid tick range [{lower}, {upper}]")]
    InvalidTickRange { lower: i32, upper: i32 },

    #[error("tick {0} out of range")]
    TickOutOfRange(i32),

    #[error("sqrt price {0} out of range")]
    SqrtPriceOutOfRange(u128),

    #[error("sqrt price limit outside the global price bounds")]
    SqrtPriceLimitOutOfBounds,

    #[error("sqrt price limit is on the wrong side of the current price")]
    SqrtPriceLimitWrongDirection,

    #[error("tick array starting at {0} is not in the supplied cache")]
    MissingTickArrayAccount(i32),

    #[error("tick array bitmap extension account is required but missing")]
    MissingTickArrayBitmapExtension,

    #[error("swap exceeded the step cap; fetch a wider tick array window and retry")]
    TooManySwapSteps,

    #[error("tick array starting at {0} is marked initialized but holds no initialized tick")]
    InvalidTickArray(i32),

    #[error("math overflow")]
    MathOverflow,

    #[error("token amount exceeds the 64-bit domain")]
    MaxTokenOverflow,

    #[error("liquidity delta over/underflow")]
    LiquidityOverflow,
}

impl ClmmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClmmError::ZeroAmountSpecified
            | ClmmError::ZeroTickSpacing
            | ClmmError::InvalidTickRange { .. }
            | ClmmError::TickOutOfRange(_)
            | ClmmError::SqrtPriceOutOfRange(_)
            | ClmmError::SqrtPriceLimitOutOfBounds
            | ClmmError::SqrtPriceLimitWrongDirection => ErrorKind::InvalidInput,
            ClmmError::MissingTickArrayAccount(_)
            | ClmmError::MissingTickArrayBitmapExtension
            | ClmmError::TooManySwapSteps
            | ClmmError::InvalidTickArray(_) => ErrorKind::InsufficientCache,
            ClmmError::MathOverflow
            | ClmmError::MaxTokenOverflow
            | ClmmError::LiquidityOverflow => ErrorKind::Overflow,
        }
    }

    /// True when the right reaction is to fetch more tick arrays and retry.
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::InsufficientCache
    }
}
