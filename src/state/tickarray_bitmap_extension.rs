//! Tick array bitmap extension account.
//!
//! Covers tick arrays outside the pool's default 1024-array window, in
//! pages of 512 arrays per side. The swap path consults it only after
//! the default window is exhausted — the probing order is part of the
//! on-chain account-list contract and must not change.

use serde::{Deserialize, Serialize};

use crate::error::ClmmError;
use crate::libraries::big_num::U512;
use crate::libraries::tick_array_bit_map::{max_tick_in_tickarray_bitmap, TickArryBitmap};
use crate::libraries::tick_math;
use crate::state::tick_array::TickArrayState;

pub const EXTENSION_TICKARRAY_BITMAP_SIZE: usize = 14;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickArrayBitmapExtension {
    pub positive_tick_array_bitmap: [TickArryBitmap; EXTENSION_TICKARRAY_BITMAP_SIZE],
    pub negative_tick_array_bitmap: [TickArryBitmap; EXTENSION_TICKARRAY_BITMAP_SIZE],
}

impl Default for TickArrayBitmapExtension {
    fn default() -> Self {
        TickArrayBitmapExtension {
            positive_tick_array_bitmap: [[0; 8]; EXTENSION_TICKARRAY_BITMAP_SIZE],
            negative_tick_array_bitmap: [[0; 8]; EXTENSION_TICKARRAY_BITMAP_SIZE],
        }
    }
}

impl TickArrayBitmapExtension {
    /// Rejects tick indexes the default pool bitmap already covers.
    fn check_extension_boundary(tick_index: i32, tick_spacing: u16) -> Result<(), ClmmError> {
        let positive_tick_boundary = max_tick_in_tickarray_bitmap(tick_spacing);
        let negative_tick_boundary = -positive_tick_boundary;
        if tick_index >= negative_tick_boundary && tick_index < positive_tick_boundary {
            return Err(ClmmError::TickOutOfRange(tick_index));
        }
        Ok(())
    }

    /// Page number holding `tick_index` on its side of zero.
    fn get_bitmap_offset(tick_index: i32, tick_spacing: u16) -> Result<usize, ClmmError> {
        if !TickArrayState::check_is_valid_start_index(tick_index, tick_spacing) {
            return Err(ClmmError::TickOutOfRange(tick_index));
        }
        Self::check_extension_boundary(tick_index, tick_spacing)?;
        let ticks_in_one_bitmap = max_tick_in_tickarray_bitmap(tick_spacing);
        let mut offset = tick_index.abs() / ticks_in_one_bitmap - 1;
        if tick_index < 0 && tick_index.abs() % ticks_in_one_bitmap == 0 {
            offset -= 1;
        }
        if offset as usize >= EXTENSION_TICKARRAY_BITMAP_SIZE {
            return Err(ClmmError::TickOutOfRange(tick_index));
        }
        Ok(offset as usize)
    }

    fn get_bitmap(&self, tick_index: i32, tick_spacing: u16) -> Result<(usize, TickArryBitmap), ClmmError> {
        let offset = Self::get_bitmap_offset(tick_index, tick_spacing)?;
        if tick_index < 0 {
            Ok((offset, self.negative_tick_array_bitmap[offset]))
        } else {
            Ok((offset, self.positive_tick_array_bitmap[offset]))
        }
    }

    /// Tick range `[min, max)` covered by the page containing the array.
    fn get_bitmap_tick_boundary(tick_array_start_index: i32, tick_spacing: u16) -> (i32, i32) {
        let ticks_in_one_bitmap = max_tick_in_tickarray_bitmap(tick_spacing);
        let mut m = tick_array_start_index.abs() / ticks_in_one_bitmap;
        if tick_array_start_index < 0 && tick_array_start_index.abs() % ticks_in_one_bitmap != 0 {
            m += 1;
        }
        let min_value = ticks_in_one_bitmap * m;
        if tick_array_start_index < 0 {
            (-min_value, -min_value + ticks_in_one_bitmap)
        } else {
            (min_value, min_value + ticks_in_one_bitmap)
        }
    }

    /// Bit position of the array inside its page; bits ascend with the
    /// start index on both sides of zero.
    fn tick_array_offset_in_bitmap(tick_array_start_index: i32, tick_spacing: u16) -> i32 {
        let m = tick_array_start_index.abs() % max_tick_in_tickarray_bitmap(tick_spacing);
        let mut offset = m / TickArrayState::tick_count(tick_spacing);
        if tick_array_start_index < 0 && m != 0 {
            offset = 512 - offset;
        }
        offset
    }

    /// Whether the extension flags `tick_array_start_index` initialized.
    pub fn check_tick_array_is_initialized(
        &self,
        tick_array_start_index: i32,
        tick_spacing: u16,
    ) -> Result<(bool, i32), ClmmError> {
        let (_, bitmap) = self.get_bitmap(tick_array_start_index, tick_spacing)?;
        let offset = Self::tick_array_offset_in_bitmap(tick_array_start_index, tick_spacing);
        Ok((U512(bitmap).bit(offset as usize), tick_array_start_index))
    }

    /// Searches the single page holding the array one step beyond
    /// `last_tick_array_start_index`. The `false` arm carries where the
    /// walk must continue (next page or out of range).
    fn next_initialized_tick_array_from_one_bitmap(
        &self,
        last_tick_array_start_index: i32,
        tick_spacing: u16,
        zero_for_one: bool,
    ) -> Result<(bool, i32), ClmmError> {
        let multiplier = TickArrayState::tick_count(tick_spacing);
        let next_tick_array_start_index = if zero_for_one {
            last_tick_array_start_index - multiplier
        } else {
            last_tick_array_start_index + multiplier
        };
        let min_tick_array_start_index =
            TickArrayState::get_array_start_index(tick_math::MIN_TICK, tick_spacing);
        let max_tick_array_start_index =
            TickArrayState::get_array_start_index(tick_math::MAX_TICK, tick_spacing);

        if next_tick_array_start_index < min_tick_array_start_index
            || next_tick_array_start_index > max_tick_array_start_index
        {
            return Ok((false, next_tick_array_start_index));
        }

        let (_, bitmap) = self.get_bitmap(next_tick_array_start_index, tick_spacing)?;

        Ok(Self::next_initialized_tick_array_in_bitmap(
            bitmap,
            next_tick_array_start_index,
            tick_spacing,
            zero_for_one,
        ))
    }

    fn next_initialized_tick_array_in_bitmap(
        tickarray_bitmap: TickArryBitmap,
        next_tick_array_start_index: i32,
        tick_spacing: u16,
        zero_for_one: bool,
    ) -> (bool, i32) {
        let (bitmap_min_tick_boundary, bitmap_max_tick_boundary) =
            Self::get_bitmap_tick_boundary(next_tick_array_start_index, tick_spacing);
        let tick_array_offset_in_bitmap =
            Self::tick_array_offset_in_bitmap(next_tick_array_start_index, tick_spacing);

        if zero_for_one {
            // tick from upper to lower
            let offset_bit_map =
                U512(tickarray_bitmap) << ((512 - tick_array_offset_in_bitmap - 1) as u32);
            if offset_bit_map.is_zero() {
                // not found until the page's lower edge
                (false, bitmap_min_tick_boundary)
            } else {
                let next_bit = offset_bit_map.leading_zeros() as i32;
                let next_array_start_index = next_tick_array_start_index
                    - next_bit * TickArrayState::tick_count(tick_spacing);
                (true, next_array_start_index)
            }
        } else {
            // tick from lower to upper
            let offset_bit_map = U512(tickarray_bitmap) >> (tick_array_offset_in_bitmap as u32);
            if offset_bit_map.is_zero() {
                // not found until the page's upper edge
                (false, bitmap_max_tick_boundary - TickArrayState::tick_count(tick_spacing))
            } else {
                let next_bit = offset_bit_map.trailing_zeros() as i32;
                let next_array_start_index = next_tick_array_start_index
                    + next_bit * TickArrayState::tick_count(tick_spacing);
                (true, next_array_start_index)
            }
        }
    }

    /// First initialized array strictly beyond `last_tick_array_start_index`
    /// in the extension, walking page by page. The `false` arm means the
    /// global tick range is exhausted.
    pub fn next_initialized_tick_array_start_index(
        &self,
        mut last_tick_array_start_index: i32,
        tick_spacing: u16,
        zero_for_one: bool,
    ) -> Result<(bool, i32), ClmmError> {
        loop {
            let (is_found, start_index) = self.next_initialized_tick_array_from_one_bitmap(
                last_tick_array_start_index,
                tick_spacing,
                zero_for_one,
            )?;
            if is_found {
                return Ok((true, start_index));
            }
            last_tick_array_start_index = start_index;
            if last_tick_array_start_index < tick_math::MIN_TICK
                || last_tick_array_start_index > tick_math::MAX_TICK
            {
                return Ok((false, last_tick_array_start_index));
            }
        }
    }

    /// Flags an array initialized; test/fixture helper.
    pub fn flip_tick_array_bit(
        &mut self,
        tick_array_start_index: i32,
        tick_spacing: u16,
    ) -> Result<(), ClmmError> {
        let (offset, _) = self.get_bitmap(tick_array_start_index, tick_spacing)?;
        let bit = Self::tick_array_offset_in_bitmap(tick_array_start_index, tick_spacing);
        let bitmap = if tick_array_start_index < 0 {
            &mut self.negative_tick_array_bitmap[offset]
        } else {
            &mut self.positive_tick_array_bitmap[offset]
        };
        bitmap[(bit / 64) as usize] ^= 1u64 << (bit % 64);
        Ok(())
    }
}
