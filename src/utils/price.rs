//! Human-facing price conversions.
//!
//! Quotes and limits cross the API as decimal prices scaled by the mints'
//! decimals; everything consensus-relevant stays in Q64.64 fixed point.

use crate::libraries::fixed_point_64::Q64;

/// Decimal price of token_0 in token_1 for a Q64.64 sqrt price.
pub fn sqrt_price_x64_to_price(sqrt_price_x64: u128, decimals_0: u8, decimals_1: u8) -> f64 {
    let sqrt = sqrt_price_x64 as f64 / Q64 as f64;
    sqrt * sqrt * 10f64.powi(i32::from(decimals_0) - i32::from(decimals_1))
}

/// Q64.64 sqrt price for a decimal price of token_0 in token_1.
pub fn price_to_sqrt_price_x64(price: f64, decimals_0: u8, decimals_1: u8) -> u128 {
    let raw = price * 10f64.powi(i32::from(decimals_1) - i32::from(decimals_0));
    (raw.sqrt() * Q64 as f64) as u128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_round_trips() {
        let sqrt = price_to_sqrt_price_x64(1.0, 6, 6);
        assert_eq!(sqrt, Q64);
        let price = sqrt_price_x64_to_price(sqrt, 6, 6);
        assert!((price - 1.0).abs() < 1e-12);
    }

    #[test]
    fn decimal_scaling_moves_the_price() {
        // same raw sqrt price, 9/6-decimal pair: token_0 units are 1000x smaller
        let p_same = sqrt_price_x64_to_price(Q64, 6, 6);
        let p_scaled = sqrt_price_x64_to_price(Q64, 9, 6);
        assert!((p_scaled / p_same - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn round_trip_within_float_precision() {
        for price in [0.0001f64, 0.5, 1.0, 25.0, 100_000.0] {
            let sqrt = price_to_sqrt_price_x64(price, 9, 6);
            let back = sqrt_price_x64_to_price(sqrt, 9, 6);
            assert!((back / price - 1.0).abs() < 1e-9, "price {}", price);
        }
    }
}
