#[cfg(feature = "array")]
pub mod array_map;
pub mod cursor;
pub mod dense_map;
pub mod entry;
#[cfg(feature = "linked")]
pub mod link_order;
#[cfg(feature = "linked")]
pub mod linked;
pub mod order;
pub mod slot_store;
