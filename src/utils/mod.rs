pub mod pda;
pub mod price;

pub use pda::{get_tick_array_bitmap_extension_pda, get_tick_array_pda, get_tick_array_pdas};
pub use price::{price_to_sqrt_price_x64, sqrt_price_x64_to_price};
