//! Entry views handed out during traversal.
//!
//! - [`FastEntry`]: borrows the slot arrays and carries only a slot index. One
//!   instance is re-pointed at every step of [`DenseMap::for_each_fast`], and the
//!   borrow checker keeps callers from holding on to it past that step.
//! - [`SnapshotEntry`]: owns a copy of the key and value, taken when the entry is
//!   created; it stays valid whatever happens to the map afterwards. Writes
//!   reach the map through [`DenseMap::set_entry`].

use crate::error::{MapError, Result};
use crate::maps::dense_map::DenseMap;
use crate::maps::order::OrderPolicy;
use crate::utils::dense_key::DenseKey;

/// A reusable view of one slot; accessors re-read the slot arrays on every call.
pub struct FastEntry<'a, K, V> {
    keys: &'a [K],
    values: &'a mut [V],
    index: usize,
}

impl<'a, K, V> FastEntry<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a mut [V], index: usize) -> Self {
        Self {
            keys,
            values,
            index,
        }
    }

    #[inline(always)]
    pub(crate) fn seek(&mut self, index: usize) {
        self.index = index;
    }

    /// Slot index this view currently points at.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.keys[self.index]
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.values[self.index]
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.values[self.index]
    }

    /// Key and mutable value at once.
    pub fn pair_mut(&mut self) -> (&K, &mut V) {
        (&self.keys[self.index], &mut self.values[self.index])
    }

    /// Writes `value` through to the slot and returns the previous value.
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.values[self.index], value)
    }

    /// Copies the current slot out into an owned entry.
    pub fn snapshot(&self) -> SnapshotEntry<K, V>
    where
        K: Clone,
        V: Clone,
    {
        SnapshotEntry::new(self.key().clone(), self.value().clone())
    }
}

/// An owned copy of an entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotEntry<K, V> {
    key: K,
    value: V,
}

impl<K, V> SnapshotEntry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    pub(crate) fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }
}

impl<K: Clone, V: Clone> From<(&K, &V)> for SnapshotEntry<K, V> {
    fn from((key, value): (&K, &V)) -> Self {
        Self::new(key.clone(), value.clone())
    }
}

impl<K, V, P> DenseMap<K, V, P>
where
    K: DenseKey,
    P: OrderPolicy,
{
    /// Writes `value` through to the live slot named by `entry`, and into the
    /// snapshot itself. Returns the slot's previous value.
    ///
    /// Fails with [`MapError::KeyNotPresent`] once the entry's key has been
    /// removed; the snapshot is left untouched then.
    pub fn set_entry(&mut self, entry: &mut SnapshotEntry<K, V>, value: V) -> Result<V>
    where
        V: Clone,
    {
        let slot = self.get_mut(entry.key()).ok_or(MapError::KeyNotPresent)?;
        let previous = std::mem::replace(slot, value.clone());
        entry.replace_value(value);
        Ok(previous)
    }

    /// Visits every entry through a single reused [`FastEntry`], in the map's order.
    ///
    /// No per-step allocation; values may be rewritten through the entry but the
    /// map's structure cannot change during the walk.
    pub fn for_each_fast<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut FastEntry<'_, K, V>),
    {
        let order = &self.order;
        let (keys, values, present) = self.store.split_mut();
        let Some(head) = order.head(present) else {
            return;
        };
        let mut entry = FastEntry::new(keys, values, head);
        let mut at = Some(head);
        while let Some(index) = at {
            entry.seek(index);
            f(&mut entry);
            at = order.successor(index, present);
        }
    }
}
