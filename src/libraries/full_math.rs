// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/full_math.rs
// Adapted for client-side use

//! Checked multiply-then-divide with a double-width intermediate, so the
//! product never wraps before the divide. Returns `None` on overflow of
//! the output width or on a zero denominator.

use super::big_num::{U128, U256, U512};

pub trait MulDiv<RHS = Self> {
    /// Output type of the computed values.
    type Output;

    /// Computes `floor(self * num / denom)`.
    fn mul_div_floor(self, num: RHS, denom: RHS) -> Option<Self::Output>;

    /// Computes `ceil(self * num / denom)`.
    fn mul_div_ceil(self, num: RHS, denom: RHS) -> Option<Self::Output>;
}

pub trait Upcast256 {
    fn as_u256(self) -> U256;
}
pub trait Downcast256 {
    /// Truncates, self must fit in 128 bits.
    fn as_u128(self) -> U128;
}
pub trait Upcast512 {
    fn as_u512(self) -> U512;
}
pub trait Downcast512 {
    /// Truncates, self must fit in 256 bits.
    fn as_u256(self) -> U256;
}

impl Upcast256 for U128 {
    fn as_u256(self) -> U256 {
        U256([self.0[0], self.0[1], 0, 0])
    }
}

impl Downcast256 for U256 {
    fn as_u128(self) -> U128 {
        U128([self.0[0], self.0[1]])
    }
}

impl Upcast512 for U256 {
    fn as_u512(self) -> U512 {
        U512([self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0])
    }
}

impl Downcast512 for U512 {
    fn as_u256(self) -> U256 {
        U256([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl MulDiv for u64 {
    type Output = u64;

    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let r = (self as u128) * (num as u128) / (denom as u128);
        u64::try_from(r).ok()
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let r = ((self as u128) * (num as u128) + (denom as u128 - 1)) / (denom as u128);
        u64::try_from(r).ok()
    }
}

impl MulDiv for U128 {
    type Output = U128;

    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let r = (self.as_u256() * num.as_u256()) / denom.as_u256();
        if r > U128::MAX.as_u256() { None } else { Some(r.as_u128()) }
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let r = (self.as_u256() * num.as_u256() + (denom - U128::one()).as_u256())
            / denom.as_u256();
        if r > U128::MAX.as_u256() { None } else { Some(r.as_u128()) }
    }
}

impl MulDiv for U256 {
    type Output = U256;

    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let r = (self.as_u512() * num.as_u512()) / denom.as_u512();
        if r > U256::MAX.as_u512() { None } else { Some(r.as_u256()) }
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let r = (self.as_u512() * num.as_u512() + (denom - U256::one()).as_u512())
            / denom.as_u512();
        if r > U256::MAX.as_u512() { None } else { Some(r.as_u256()) }
    }
}
