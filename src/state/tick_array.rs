//! Tick array snapshot types.
//!
//! A tick array groups 60 consecutive usable ticks and is fetched as one
//! account. The engine only ever reads these; crossing bookkeeping during
//! a swap happens in the loop's own working state.

use serde::{Deserialize, Serialize};

use crate::error::ClmmError;

/// A single tick's liquidity bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickState {
    pub tick: i32,
    /// Liquidity delta applied when the price crosses this tick moving up.
    pub liquidity_net: i128,
    /// Total position liquidity referencing this tick.
    pub liquidity_gross: u128,
}

impl TickState {
    /// Legacy initialization predicate, kept verbatim: a slot counts as
    /// initialized unless every field is zero. Tick index 0 with no
    /// liquidity is therefore indistinguishable from an empty slot.
    pub fn is_initialized(&self) -> bool {
        !(self.liquidity_net == 0 && self.liquidity_gross == 0 && self.tick == 0)
    }
}

/// One fetched tick array account, keyed by its start tick index.
#[derive(Debug, Clone)]
pub struct TickArrayState {
    pub start_tick_index: i32,
    pub ticks: [TickState; TickArrayState::TICK_ARRAY_SIZE_USIZE],
}

impl TickArrayState {
    pub const TICK_ARRAY_SIZE: i32 = 60;
    pub const TICK_ARRAY_SIZE_USIZE: usize = 60;

    /// Ticks covered by one array at this spacing.
    pub fn tick_count(tick_spacing: u16) -> i32 {
        TickArrayState::TICK_ARRAY_SIZE * i32::from(tick_spacing)
    }

    /// Start index of the array containing `tick_index` (floor division,
    /// rounding towards negative infinity).
    pub fn get_array_start_index(tick_index: i32, tick_spacing: u16) -> i32 {
        let ticks_in_array = TickArrayState::tick_count(tick_spacing);
        let mut start = tick_index / ticks_in_array;
        if tick_index < 0 && tick_index % ticks_in_array != 0 {
            start -= 1;
        }
        start * ticks_in_array
    }

    pub fn check_is_valid_start_index(tick_index: i32, tick_spacing: u16) -> bool {
        tick_index % TickArrayState::tick_count(tick_spacing) == 0
    }

    /// Empty array for a start index, all slots zeroed.
    pub fn new(start_tick_index: i32) -> Self {
        TickArrayState {
            start_tick_index,
            ticks: [TickState::default(); TickArrayState::TICK_ARRAY_SIZE_USIZE],
        }
    }

    /// Slot offset of `tick_index` within this array.
    pub fn get_tick_offset_in_array(
        &self,
        tick_index: i32,
        tick_spacing: u16,
    ) -> Result<usize, ClmmError> {
        if tick_spacing == 0 {
            return Err(ClmmError::ZeroTickSpacing);
        }
        let start = TickArrayState::get_array_start_index(tick_index, tick_spacing);
        if start != self.start_tick_index {
            return Err(ClmmError::InvalidTickArray(self.start_tick_index));
        }
        Ok(((tick_index - self.start_tick_index) / i32::from(tick_spacing)) as usize)
    }

    /// Nearest initialized tick entering the array from the travel
    /// direction: highest slot first when moving down, lowest first when
    /// moving up.
    pub fn first_initialized_tick(&self, zero_for_one: bool) -> Option<&TickState> {
        if zero_for_one {
            self.ticks.iter().rev().find(|t| t.is_initialized())
        } else {
            self.ticks.iter().find(|t| t.is_initialized())
        }
    }

    /// Next initialized tick from `current_tick_index` within this array.
    ///
    /// Downward search includes the slot holding the current tick (the
    /// loop has already stepped below any crossed tick); upward search is
    /// strictly exclusive. Returns `None` when the current tick lives in
    /// a different array or no slot qualifies.
    pub fn next_initialized_tick(
        &self,
        current_tick_index: i32,
        tick_spacing: u16,
        zero_for_one: bool,
    ) -> Option<&TickState> {
        if TickArrayState::get_array_start_index(current_tick_index, tick_spacing)
            != self.start_tick_index
        {
            return None;
        }
        let offset_in_array =
            ((current_tick_index - self.start_tick_index) / i32::from(tick_spacing)) as usize;

        if zero_for_one {
            self.ticks[..=offset_in_array].iter().rev().find(|t| t.is_initialized())
        } else {
            self.ticks[offset_in_array + 1..].iter().find(|t| t.is_initialized())
        }
    }

    /// Writes a tick into its slot; test/fixture helper.
    pub fn set_tick(
        &mut self,
        tick_index: i32,
        liquidity_net: i128,
        liquidity_gross: u128,
        tick_spacing: u16,
    ) -> Result<(), ClmmError> {
        let offset = self.get_tick_offset_in_array(tick_index, tick_spacing)?;
        self.ticks[offset] = TickState { tick: tick_index, liquidity_net, liquidity_gross };
        Ok(())
    }
}
