//! Immutable pool snapshot.
//!
//! One quote call operates on one snapshot plus the tick arrays the
//! caller fetched for it. Nothing here is written back; the swap loop's
//! mutable bookkeeping lives in its own state value.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::ClmmError;
use crate::libraries::big_num::U1024;
use crate::libraries::tick_array_bit_map::{
    check_current_tick_array_is_initialized, max_tick_in_tickarray_bitmap,
    next_initialized_tick_array_start_index,
};
use crate::libraries::tick_math;
use crate::state::tick_array::TickArrayState;
use crate::state::tickarray_bitmap_extension::TickArrayBitmapExtension;

/// Read-only view of a CLMM pool at one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub program_id: Pubkey,
    pub pool_id: Pubkey,
    pub mint_decimals_0: u8,
    pub mint_decimals_1: u8,
    /// Trade fee, fraction of 1_000_000.
    pub trade_fee_rate: u32,
    pub tick_spacing: u16,
    pub tick_current: i32,
    pub sqrt_price_x64: u128,
    pub liquidity: u128,
    /// Default bitmap window: 512 tick arrays on each side of tick zero.
    pub tick_array_bitmap: [u64; 16],
}

impl PoolSnapshot {
    /// `[min, max)` tick range the default bitmap covers at this spacing.
    pub fn default_tickarray_bitmap_range(&self) -> (i32, i32) {
        let max = max_tick_in_tickarray_bitmap(self.tick_spacing);
        (-max, max)
    }

    /// Whether the array holding `tick_index` falls outside the default
    /// bitmap window (and so lives in the extension account).
    pub fn is_overflow_default_tickarray_bitmap(&self, tick_index: i32) -> bool {
        let (min_boundary, max_boundary) = self.default_tickarray_bitmap_range();
        let start = TickArrayState::get_array_start_index(tick_index, self.tick_spacing);
        start < min_boundary || start >= max_boundary
    }

    /// The tick array the swap starts against: the current tick's array
    /// when it is flagged initialized, otherwise the first initialized
    /// array in the travel direction. `None` means no initialized array
    /// exists in that direction at all.
    pub fn get_first_initialized_tick_array(
        &self,
        bitmap_extension: Option<&TickArrayBitmapExtension>,
        zero_for_one: bool,
    ) -> Result<Option<(bool, i32)>, ClmmError> {
        let (is_initialized, start_index) =
            if self.is_overflow_default_tickarray_bitmap(self.tick_current) {
                bitmap_extension
                    .ok_or(ClmmError::MissingTickArrayBitmapExtension)?
                    .check_tick_array_is_initialized(
                        TickArrayState::get_array_start_index(self.tick_current, self.tick_spacing),
                        self.tick_spacing,
                    )?
            } else {
                check_current_tick_array_is_initialized(
                    U1024(self.tick_array_bitmap),
                    self.tick_current,
                    self.tick_spacing,
                )
            };
        if is_initialized {
            return Ok(Some((true, start_index)));
        }
        Ok(self
            .next_initialized_tick_array_start_index(
                bitmap_extension,
                TickArrayState::get_array_start_index(self.tick_current, self.tick_spacing),
                zero_for_one,
            )?
            .map(|start| (false, start)))
    }

    /// First initialized array strictly beyond `last_tick_array_start_index`
    /// in the travel direction. The default window is always exhausted
    /// before the extension is consulted; `None` means the global tick
    /// range ran out.
    pub fn next_initialized_tick_array_start_index(
        &self,
        bitmap_extension: Option<&TickArrayBitmapExtension>,
        mut last_tick_array_start_index: i32,
        zero_for_one: bool,
    ) -> Result<Option<i32>, ClmmError> {
        last_tick_array_start_index =
            TickArrayState::get_array_start_index(last_tick_array_start_index, self.tick_spacing);

        loop {
            let (is_found, start_index) = next_initialized_tick_array_start_index(
                U1024(self.tick_array_bitmap),
                last_tick_array_start_index,
                self.tick_spacing,
                zero_for_one,
            );
            if is_found {
                return Ok(Some(start_index));
            }
            last_tick_array_start_index = start_index;
            if last_tick_array_start_index < tick_math::MIN_TICK
                || last_tick_array_start_index > tick_math::MAX_TICK
            {
                return Ok(None);
            }

            let extension =
                bitmap_extension.ok_or(ClmmError::MissingTickArrayBitmapExtension)?;
            let (is_found, start_index) = extension.next_initialized_tick_array_start_index(
                last_tick_array_start_index,
                self.tick_spacing,
                zero_for_one,
            )?;
            if is_found {
                return Ok(Some(start_index));
            }
            last_tick_array_start_index = start_index;
            if last_tick_array_start_index < tick_math::MIN_TICK
                || last_tick_array_start_index > tick_math::MAX_TICK
            {
                return Ok(None);
            }
        }
    }

    /// Initialized tick-array start indexes a quote in this direction may
    /// touch, nearest first, up to `count`. Drives the caller's account
    /// prefetch; stops early when the range (or the supplied extension)
    /// runs out.
    pub fn initialized_tick_array_start_indexes(
        &self,
        bitmap_extension: Option<&TickArrayBitmapExtension>,
        zero_for_one: bool,
        count: usize,
    ) -> Vec<i32> {
        let mut out = Vec::with_capacity(count);
        let Ok(Some((_, first))) = self.get_first_initialized_tick_array(bitmap_extension, zero_for_one)
        else {
            return out;
        };
        out.push(first);
        let mut cursor = first;
        while out.len() < count {
            match self.next_initialized_tick_array_start_index(bitmap_extension, cursor, zero_for_one)
            {
                Ok(Some(next)) => {
                    out.push(next);
                    cursor = next;
                }
                _ => break,
            }
        }
        out
    }
}
