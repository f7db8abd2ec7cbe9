//! # Dense Collections
//!
//! Maps specialised for keys drawn from a closed, densely indexed domain (enum
//! variants, small integers, interned ids), where every possible key is known up
//! front and owns a fixed slot. No hashing, no per-entry allocation.
//!
//! This crate provides `DenseMap`, `LinkedDenseMap` and `ArrayMap`, all sharing
//! the `AnyMap` contract and the sentinel-based compute/merge family.
//!
//! ## Key Features
//!
//! * **Slot storage:** keys, values and a presence bitmap live in three flat
//!   arrays indexed by the key's dense index.
//! * **O(1) ordering:** `LinkedDenseMap` keeps insertion order in one packed
//!   64-bit link word per slot and supports move-to-front/back in constant time.
//! * **One mutation core:** ordered and unordered dense maps run the same
//!   put/remove code; only the `OrderPolicy` type parameter differs.
//! * **Cursors:** bidirectional cursors that can remove the visited entry
//!   without disturbing traversal.
//! * **Sentinels:** every map carries a configurable "default return value" that
//!   stands in for absence in `compute`, `merge`, `add_to` and friends.
//!
//! ## Cargo features
//!
//! * `linked` (default): `LinkOrder` and `LinkedDenseMap`.
//! * `array` (default): `ArrayMap`.
//!
//! ## Examples
//!
//! ### DenseMap
//!
//! ```rust
//! use dense_collections::DenseMap;
//!
//! let mut map: DenseMap<u8, u32> = DenseMap::new();
//! map.put(200, 2);
//! map.put(7, 1);
//!
//! // Unordered dense maps iterate in dense-index order.
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![7, 200]);
//! assert_eq!(map.get(&7), Some(&1));
//! ```
//!
//! ### LinkedDenseMap
//!
//! ```rust
//! # #[cfg(feature = "linked")] {
//! use dense_collections::LinkedDenseMap;
//!
//! let mut map: LinkedDenseMap<u8, &str> = LinkedDenseMap::new();
//! map.put(3, "c");
//! map.put(1, "a");
//! map.put(2, "b");
//!
//! map.move_to_first(&2);
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 3, 1]);
//! assert_eq!(map.poll_last_key(), Some(1));
//! # }
//! ```
//!
//! ### Cursor removal
//!
//! ```rust
//! use dense_collections::DenseMap;
//!
//! let mut map: DenseMap<u8, i32> = (0..6).map(|i| (i, i as i32)).collect();
//! let mut cursor = map.cursor();
//! while cursor.has_next() {
//!     let odd = cursor.next_entry()?.value() % 2 != 0;
//!     if odd {
//!         cursor.remove()?;
//!     }
//! }
//! assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
//! # Ok::<(), dense_collections::MapError>(())
//! ```
//!
//! ### Sentinel-based updates
//!
//! ```rust
//! use dense_collections::prelude::*;
//! use dense_collections::DenseMap;
//!
//! let mut counts: DenseMap<bool, i64> = DenseMap::new();
//! counts.add_to(true, 3);
//! counts.add_to(true, 2);
//! assert_eq!(counts.get_or_default(&true), 5);
//!
//! // A sentinel result removes the entry.
//! counts.merge(true, -5, |a, b| a + b);
//! assert!(!counts.contains_key(&true));
//! ```

// --- Module Declarations ---

pub mod compute;
pub mod error;
pub mod map;
pub mod maps;
pub mod utils;

#[cfg(test)]
mod proptests;

// --- Re-exports ---

pub use compute::{ComputeMap, Numeric, NumericMap};
pub use error::{MapError, Result};
pub use map::{AnyMap, OrderedMap};
#[cfg(feature = "array")]
pub use maps::array_map::{ArrayMap, SubView};
pub use maps::cursor::Cursor;
pub use maps::dense_map::DenseMap;
pub use maps::entry::{FastEntry, SnapshotEntry};
#[cfg(feature = "linked")]
pub use maps::link_order::LinkOrder;
#[cfg(feature = "linked")]
pub use maps::linked::LinkedDenseMap;
pub use maps::order::{IndexOrder, OrderPolicy};
pub use maps::slot_store::Presence;
pub use utils::dense_key::{ClosedDomain, DenseKey};

/// The traits needed to call the shared map operations as methods.
pub mod prelude {
    pub use crate::compute::{ComputeMap, NumericMap};
    pub use crate::map::{AnyMap, OrderedMap};
}
