pub mod pool;
pub mod tick_array;
pub mod tickarray_bitmap_extension;

pub use pool::PoolSnapshot;
pub use tick_array::{TickArrayState, TickState};
pub use tickarray_bitmap_extension::{TickArrayBitmapExtension, EXTENSION_TICKARRAY_BITMAP_SIZE};
