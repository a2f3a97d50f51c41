//! PDA derivation for the accounts a quote references.

use solana_sdk::pubkey::Pubkey;

/// Seeds for PDA derivation
pub mod seeds {
    pub const TICK_ARRAY_SEED: &[u8] = b"tick_array";
    pub const POOL_TICK_ARRAY_BITMAP_SEED: &[u8] = b"pool_tick_array_bitmap_extension";
}

/// Constants related to program accounts
pub mod accounts {
    use solana_sdk::{pubkey, pubkey::Pubkey};
    pub const RAYDIUM_CLMM: Pubkey = pubkey!("CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK");
}

/// Calculate tick array PDA
///
/// Note: the tick index is serialized big-endian, matching the program.
pub fn get_tick_array_pda(
    program_id: &Pubkey,
    pool_id: &Pubkey,
    start_tick_index: i32,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            seeds::TICK_ARRAY_SEED,
            pool_id.as_ref(),
            &start_tick_index.to_be_bytes(),
        ],
        program_id,
    )
}

/// Calculate tick array bitmap extension PDA
pub fn get_tick_array_bitmap_extension_pda(program_id: &Pubkey, pool_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seeds::POOL_TICK_ARRAY_BITMAP_SEED, pool_id.as_ref()],
        program_id,
    )
}

/// Tick array addresses for a list of start indexes, in the given order.
pub fn get_tick_array_pdas(
    program_id: &Pubkey,
    pool_id: &Pubkey,
    start_tick_indexes: &[i32],
) -> Vec<Pubkey> {
    start_tick_indexes
        .iter()
        .map(|start| get_tick_array_pda(program_id, pool_id, *start).0)
        .collect()
}
