//! Error type shared by every map in the crate.
//!
//! Absence is never an error here: lookups return `Option` (or the configured
//! sentinel). `MapError` only covers construction contract violations, cursor
//! misuse, and strict accessors handed a key the map cannot hold.

use thiserror::Error;

/// Errors raised by constructors, cursors and strict accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("key and value arrays differ in length: {keys} keys, {values} values")]
    LengthMismatch { keys: usize, values: usize },

    #[error("a key universe must contain at least one key")]
    EmptyUniverse,

    #[error("key universe of {0} slots exceeds the addressable link range")]
    UniverseTooLarge(usize),

    #[error("universe key at position {position} reports dense index {index}")]
    UniverseOutOfOrder { position: usize, index: usize },

    #[error("key with dense index {index} is outside this map's universe of {size} keys")]
    KeyOutsideUniverse { index: usize, size: usize },

    #[error("key is not present in the map")]
    KeyNotPresent,

    #[error("no such element")]
    NoSuchElement,

    #[error("illegal iterator state: no current element")]
    IllegalIteratorState,

    #[error("requested capacity of {0} entries cannot be allocated")]
    CapacityOverflow(usize),
}

pub type Result<T> = std::result::Result<T, MapError>;
