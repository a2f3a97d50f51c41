// Copyright (c) Raydium Foundation
// Licensed under Apache 2.0
// Source: https://github.com/raydium-io/raydium-clmm/programs/amm/src/libraries/tick_array_bit_map.rs
// Adapted for client-side use

//! The pool account carries a 1024-bit bitmap covering the 512 tick
//! arrays on each side of tick zero; one set bit means that array holds
//! at least one initialized tick. Arrays further out live in the
//! separate bitmap extension account (see `state::tickarray_bitmap_extension`),
//! which is only ever consulted after this window is exhausted.

use super::big_num::U1024;
use crate::state::tick_array::TickArrayState;

/// Tick arrays covered by the pool bitmap on each side of tick zero.
pub const TICK_ARRAY_BITMAP_SIZE: i32 = 512;

/// One word-group of the extension bitmap (512 bits).
pub type TickArryBitmap = [u64; 8];

/// Highest tick coverable by the default bitmap window.
pub fn max_tick_in_tickarray_bitmap(tick_spacing: u16) -> i32 {
    i32::from(tick_spacing) * TickArrayState::TICK_ARRAY_SIZE * TICK_ARRAY_BITMAP_SIZE
}

/// Index of the highest set bit, counted from the top (leading zeros), or
/// `None` when the bitmap is empty.
pub fn most_significant_bit(x: U1024) -> Option<u16> {
    if x.is_zero() { None } else { Some(x.leading_zeros() as u16) }
}

/// Index of the lowest set bit (trailing zeros), or `None` when empty.
pub fn least_significant_bit(x: U1024) -> Option<u16> {
    if x.is_zero() { None } else { Some(x.trailing_zeros() as u16) }
}

/// Whether the tick array holding `tick_current` is flagged initialized.
/// Also returns that array's start index so the caller can fetch it.
pub fn check_current_tick_array_is_initialized(
    bit_map: U1024,
    tick_current: i32,
    tick_spacing: u16,
) -> (bool, i32) {
    let multiplier = TickArrayState::tick_count(tick_spacing);
    let mut compressed = tick_current / multiplier + 512;
    if tick_current < 0 && tick_current % multiplier != 0 {
        // round towards negative infinity
        compressed -= 1;
    }
    let bit_pos = compressed.unsigned_abs();
    let mask = U1024::one() << bit_pos;
    let masked = bit_map & mask;
    let initialized = masked != U1024::default();
    (initialized, (compressed - 512) * multiplier)
}

/// First initialized tick-array start index strictly beyond
/// `last_tick_array_start_index` in the travel direction, within the
/// default window.
///
/// When the window is exhausted the `false` arm carries the start index
/// the extension search must continue from, so the caller preserves the
/// exact probing order the on-chain program uses.
pub fn next_initialized_tick_array_start_index(
    bit_map: U1024,
    last_tick_array_start_index: i32,
    tick_spacing: u16,
    zero_for_one: bool,
) -> (bool, i32) {
    let tick_boundary = max_tick_in_tickarray_bitmap(tick_spacing);
    let multiplier = TickArrayState::tick_count(tick_spacing);

    let next_tick_array_start_index = if zero_for_one {
        last_tick_array_start_index - multiplier
    } else {
        last_tick_array_start_index + multiplier
    };
    if next_tick_array_start_index < -tick_boundary || next_tick_array_start_index >= tick_boundary {
        return (false, last_tick_array_start_index);
    }

    let mut compressed = next_tick_array_start_index / multiplier + 512;
    if next_tick_array_start_index < 0 && next_tick_array_start_index % multiplier != 0 {
        compressed -= 1;
    }
    let bit_pos = compressed.unsigned_abs();

    if zero_for_one {
        // tick from upper to lower: find from the highest bit at or below bit_pos
        let offset_bit_map = bit_map << (1024 - bit_pos - 1);
        match most_significant_bit(offset_bit_map) {
            Some(next_bit) => {
                let next_array_start_index = (bit_pos as i32 - i32::from(next_bit) - 512) * multiplier;
                (true, next_array_start_index)
            }
            // not found in the window; hand the lower boundary to the extension
            None => (false, -tick_boundary),
        }
    } else {
        // tick from lower to upper: find from the lowest bit at or above bit_pos
        let offset_bit_map = bit_map >> bit_pos;
        match least_significant_bit(offset_bit_map) {
            Some(next_bit) => {
                let next_array_start_index = (bit_pos as i32 + i32::from(next_bit) - 512) * multiplier;
                (true, next_array_start_index)
            }
            // not found in the window; hand the upper boundary to the extension
            None => (false, tick_boundary - multiplier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap_with_arrays(starts: &[i32], tick_spacing: u16) -> U1024 {
        let mut bit_map = U1024::default();
        let multiplier = TickArrayState::tick_count(tick_spacing);
        for s in starts {
            assert_eq!(s % multiplier, 0);
            let bit_pos = (s / multiplier + 512) as u32;
            bit_map = bit_map | (U1024::one() << bit_pos);
        }
        bit_map
    }

    #[test]
    fn current_array_lookup_rounds_toward_negative_infinity() {
        let bit_map = bitmap_with_arrays(&[-3600], 60);
        let (initialized, start) = check_current_tick_array_is_initialized(bit_map, -1, 60);
        assert!(initialized);
        assert_eq!(start, -3600);
        let (initialized, start) = check_current_tick_array_is_initialized(bit_map, 0, 60);
        assert!(!initialized);
        assert_eq!(start, 0);
    }

    #[test]
    fn search_is_exclusive_of_the_starting_array() {
        let bit_map = bitmap_with_arrays(&[0, 3600, 7200], 60);
        let (found, start) = next_initialized_tick_array_start_index(bit_map, 0, 60, false);
        assert!(found);
        assert_eq!(start, 3600);
        let (found, start) = next_initialized_tick_array_start_index(bit_map, 3600, 60, true);
        assert!(found);
        assert_eq!(start, 0);
    }

    #[test]
    fn repeated_walk_returns_a_deterministic_sequence() {
        let starts = [-7200, -3600, 3600, 10800];
        let bit_map = bitmap_with_arrays(&starts, 60);
        let mut walked = Vec::new();
        let mut cursor = 14400;
        loop {
            let (found, start) = next_initialized_tick_array_start_index(bit_map, cursor, 60, true);
            if !found {
                break;
            }
            walked.push(start);
            cursor = start;
        }
        assert_eq!(walked, vec![10800, 3600, -3600, -7200]);

        // same walk again, same answer
        let mut cursor = 14400;
        for expected in &walked {
            let (found, start) = next_initialized_tick_array_start_index(bit_map, cursor, 60, true);
            assert!(found);
            assert_eq!(start, *expected);
            cursor = start;
        }
    }

    #[test]
    fn exhausted_window_reports_the_boundary_to_continue_from() {
        let bit_map = U1024::default();
        let boundary = max_tick_in_tickarray_bitmap(1);
        let (found, start) = next_initialized_tick_array_start_index(bit_map, 0, 1, false);
        assert!(!found);
        assert_eq!(start, boundary - TickArrayState::tick_count(1));
        let (found, start) = next_initialized_tick_array_start_index(bit_map, 0, 1, true);
        assert!(!found);
        assert_eq!(start, -boundary);
    }
}
