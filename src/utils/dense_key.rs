//! Key types that map bijectively onto a dense index range `[0, N)`.

use std::fmt::Debug;

/// A key that knows its own position in a closed, densely indexed domain.
///
/// The dense maps in this crate never hash: they use `dense_index` directly as
/// the slot number. Two keys that compare equal must report the same index.
pub trait DenseKey: Clone + Eq + Debug {
    /// Returns the slot this key occupies.
    fn dense_index(&self) -> usize;
}

/// A [`DenseKey`] whose entire domain is known from the type alone.
///
/// This is the analogue of an enum's value list: `universe()[i].dense_index() == i`
/// must hold for every position `i`.
pub trait ClosedDomain: DenseKey {
    /// Every key of the domain, in dense-index order.
    fn universe() -> Vec<Self>;
}

impl DenseKey for u8 {
    #[inline(always)]
    fn dense_index(&self) -> usize {
        *self as usize
    }
}

impl DenseKey for u16 {
    #[inline(always)]
    fn dense_index(&self) -> usize {
        *self as usize
    }
}

impl DenseKey for u32 {
    #[inline(always)]
    fn dense_index(&self) -> usize {
        *self as usize
    }
}

impl DenseKey for usize {
    #[inline(always)]
    fn dense_index(&self) -> usize {
        *self
    }
}

impl DenseKey for bool {
    #[inline(always)]
    fn dense_index(&self) -> usize {
        *self as usize
    }
}

impl ClosedDomain for bool {
    fn universe() -> Vec<Self> {
        vec![false, true]
    }
}

impl ClosedDomain for u8 {
    fn universe() -> Vec<Self> {
        (0..=u8::MAX).collect()
    }
}
