//! Order policies: the hook layer between slot mutation and iteration order.
//!
//! Every dense map runs the same put/remove/compute code. The only thing that
//! differs between the unordered and the link-ordered map is what happens when a
//! slot becomes live or dead, and how traversal finds the next slot. That is the
//! whole of [`OrderPolicy`].

use std::fmt::Debug;

use crate::maps::slot_store::Presence;

/// Hooks invoked by slot mutation plus the traversal primitives built on them.
///
/// # Hook protocol
/// ```text
/// put(new key at i):    on_add(i)     then set presence bit
/// remove(i):            clear bit     then on_remove(i)
/// clear():              clear bitmap  then on_clear()
/// cursor remove(i):     splice_out(i, prev, next) then clear bit
/// ```
pub trait OrderPolicy: Clone + Debug {
    /// Creates empty order state for a universe of `size` slots.
    fn for_universe(size: usize) -> Self;

    /// Slot `index` is about to become live.
    fn on_add(&mut self, index: usize);

    /// Slot `index` was just vacated.
    fn on_remove(&mut self, index: usize);

    /// Every slot was just vacated.
    fn on_clear(&mut self);

    /// First live slot in iteration order.
    fn head(&self, present: &Presence) -> Option<usize>;

    /// Last live slot in iteration order.
    fn tail(&self, present: &Presence) -> Option<usize>;

    /// Live slot after `index` in iteration order.
    fn successor(&self, index: usize, present: &Presence) -> Option<usize>;

    /// Live slot before `index` in iteration order.
    fn predecessor(&self, index: usize, present: &Presence) -> Option<usize>;

    /// Removes `index` from the order when the caller already knows both
    /// neighbours. Defaults to [`OrderPolicy::on_remove`].
    fn splice_out(&mut self, index: usize, previous: Option<usize>, next: Option<usize>) {
        let _ = (previous, next);
        self.on_remove(index);
    }
}

/// Iteration in ascending dense-index order, read straight off the presence
/// bitmap. Holds no state; every hook is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexOrder;

impl OrderPolicy for IndexOrder {
    #[inline(always)]
    fn for_universe(_size: usize) -> Self {
        IndexOrder
    }

    #[inline(always)]
    fn on_add(&mut self, _index: usize) {}

    #[inline(always)]
    fn on_remove(&mut self, _index: usize) {}

    #[inline(always)]
    fn on_clear(&mut self) {}

    #[inline]
    fn head(&self, present: &Presence) -> Option<usize> {
        present.first_one()
    }

    #[inline]
    fn tail(&self, present: &Presence) -> Option<usize> {
        present.last_one()
    }

    #[inline]
    fn successor(&self, index: usize, present: &Presence) -> Option<usize> {
        let from = index + 1;
        if from >= present.len() {
            return None;
        }
        present[from..].first_one().map(|offset| from + offset)
    }

    #[inline]
    fn predecessor(&self, index: usize, present: &Presence) -> Option<usize> {
        present[..index].last_one()
    }
}
