//! Packed doubly-linked-list node: both neighbours in one `u64`.
//!
//! The high 32 bits hold the previous slot, the low 32 bits the next slot.
//! Both halves use [`NONE`] (`0xFFFF_FFFF`) for "no neighbour", so a fully
//! detached node is `u64::MAX`.

/// Sentinel half-word meaning "no neighbour".
pub const NONE: u32 = u32::MAX;

/// Largest universe a link table can address; `NONE` itself is reserved.
pub const MAX_SLOTS: usize = NONE as usize;

const LOW_MASK: u64 = 0x0000_0000_FFFF_FFFF;
const HIGH_MASK: u64 = 0xFFFF_FFFF_0000_0000;

/// One node of an index-linked list, packed as `prev << 32 | next`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkWord(u64);

impl LinkWord {
    /// A node with neither neighbour.
    pub const DETACHED: Self = LinkWord(u64::MAX);

    #[inline(always)]
    pub const fn new(prev: u32, next: u32) -> Self {
        LinkWord(((prev as u64) << 32) | next as u64)
    }

    #[inline(always)]
    pub const fn prev(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline(always)]
    pub const fn next(self) -> u32 {
        self.0 as u32
    }

    /// Replaces the low half, leaving `prev` untouched.
    ///
    /// `w ^ ((w ^ new) & mask)` keeps every bit outside `mask` and takes every
    /// bit inside it from `new`, without reading either half first.
    #[inline(always)]
    pub const fn with_next(self, next: u32) -> Self {
        LinkWord(self.0 ^ ((self.0 ^ next as u64) & LOW_MASK))
    }

    /// Replaces the high half, leaving `next` untouched.
    #[inline(always)]
    pub const fn with_prev(self, prev: u32) -> Self {
        LinkWord(self.0 ^ ((self.0 ^ ((prev as u64) << 32)) & HIGH_MASK))
    }

    #[inline(always)]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for LinkWord {
    fn default() -> Self {
        Self::DETACHED
    }
}

impl std::fmt::Debug for LinkWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let half = |v: u32| if v == NONE { None } else { Some(v) };
        f.debug_struct("LinkWord")
            .field("prev", &half(self.prev()))
            .field("next", &half(self.next()))
            .finish()
    }
}

/// Converts a stored half-word back into a slot, mapping `NONE` to `None`.
#[inline(always)]
pub const fn slot(half: u32) -> Option<usize> {
    if half == NONE { None } else { Some(half as usize) }
}

/// Converts an optional slot into a half-word.
#[inline(always)]
pub const fn half(slot: Option<usize>) -> u32 {
    match slot {
        Some(i) => i as u32,
        None => NONE,
    }
}
