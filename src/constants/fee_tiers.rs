//! Standard CLMM fee tiers.
//!
//! Mirrors the fee configs the program's deployed AMM configs use. The
//! engine itself only needs `trade_fee_rate`; the rest is carried so
//! selection layers can pick a tier without another account fetch.

/// One AMM config entry (fee rates are fractions of 1_000_000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClmmFeeTier {
    pub index: u16,
    pub trade_fee_rate: u32,
    pub protocol_fee_rate: u32,
    pub fund_fee_rate: u32,
    pub tick_spacing: u16,
    pub description: &'static str,
}

pub const CLMM_FEE_TIERS: [ClmmFeeTier; 4] = [
    ClmmFeeTier {
        index: 4,
        trade_fee_rate: 100,
        protocol_fee_rate: 120_000,
        fund_fee_rate: 40_000,
        tick_spacing: 1,
        description: "Best for very stable pairs",
    },
    ClmmFeeTier {
        index: 2,
        trade_fee_rate: 500,
        protocol_fee_rate: 120_000,
        fund_fee_rate: 40_000,
        tick_spacing: 10,
        description: "Best for stable pairs",
    },
    ClmmFeeTier {
        index: 1,
        trade_fee_rate: 2500,
        protocol_fee_rate: 120_000,
        fund_fee_rate: 40_000,
        tick_spacing: 60,
        description: "Best for most pairs",
    },
    ClmmFeeTier {
        index: 3,
        trade_fee_rate: 10_000,
        protocol_fee_rate: 120_000,
        fund_fee_rate: 40_000,
        tick_spacing: 120,
        description: "Best for exotic pairs",
    },
];

/// Look up the standard tier for a tick spacing, if one exists.
pub fn fee_tier_by_tick_spacing(tick_spacing: u16) -> Option<&'static ClmmFeeTier> {
    CLMM_FEE_TIERS.iter().find(|t| t.tick_spacing == tick_spacing)
}
