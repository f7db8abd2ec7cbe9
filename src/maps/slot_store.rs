//! Struct-of-arrays slot storage with an out-of-line presence bitmap.
//!
//! # Layout
//! - `keys`: the key universe, one key per dense index. Never mutated.
//! - `values`: one value per dense index; vacant slots hold `V::default()`.
//! - `present`: one bit per slot, packed into `u64` words (`i >> 6`, `i & 63`).
//! - `len`: number of set presence bits, maintained by `occupy`/`vacate`.

use std::mem;

use bitvec::prelude::{BitSlice, BitVec, Lsb0};

use crate::utils::dense_key::DenseKey;

/// Presence bitmap view handed to order policies.
pub type Presence = BitSlice<u64, Lsb0>;

#[derive(Clone, Debug)]
pub(crate) struct SlotStore<K, V> {
    keys: Box<[K]>,
    values: Box<[V]>,
    present: BitVec<u64, Lsb0>,
    len: usize,
}

impl<K, V: Default> SlotStore<K, V> {
    /// Allocates vacant slots for every key in `keys`.
    pub(crate) fn new(keys: Box<[K]>) -> Self {
        let size = keys.len();
        let values = (0..size).map(|_| V::default()).collect();
        Self {
            keys,
            values,
            present: BitVec::repeat(false, size),
            len: 0,
        }
    }

    /// Marks `index` live and stores `value` there.
    #[inline]
    pub(crate) fn occupy(&mut self, index: usize, value: V) {
        debug_assert!(!self.present[index], "slot {index} already occupied");
        self.values[index] = value;
        self.present.set(index, true);
        self.len += 1;
    }

    /// Marks `index` vacant and hands back its value, leaving the zero value behind.
    #[inline]
    pub(crate) fn vacate(&mut self, index: usize) -> V {
        debug_assert!(self.present[index], "slot {index} already vacant");
        self.present.set(index, false);
        self.len -= 1;
        mem::take(&mut self.values[index])
    }

    /// Resets every slot. A no-op when already empty.
    pub(crate) fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.present.fill(false);
        self.values.iter_mut().for_each(|v| *v = V::default());
        self.len = 0;
    }
}

impl<K, V> SlotStore<K, V> {
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn universe_size(&self) -> usize {
        self.keys.len()
    }

    #[inline(always)]
    pub(crate) fn universe(&self) -> &[K] {
        &self.keys
    }

    #[inline(always)]
    pub(crate) fn presence(&self) -> &Presence {
        &self.present
    }

    #[inline(always)]
    pub(crate) fn is_present(&self, index: usize) -> bool {
        self.present.get(index).is_some_and(|bit| *bit)
    }

    #[inline(always)]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    /// Every slot's value, live or not.
    #[inline(always)]
    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    /// Value at `index` regardless of presence.
    #[inline(always)]
    pub(crate) fn value(&self, index: usize) -> &V {
        &self.values[index]
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&V> {
        if self.is_present(index) {
            Some(&self.values[index])
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        if self.is_present(index) {
            Some(&mut self.values[index])
        } else {
            None
        }
    }

    /// Overwrites a live slot's value, returning the previous one.
    #[inline]
    pub(crate) fn replace(&mut self, index: usize, value: V) -> V {
        mem::replace(&mut self.values[index], value)
    }

    /// Borrows keys, values and presence separately so values can be mutated
    /// while the order is walked.
    #[inline]
    pub(crate) fn split_mut(&mut self) -> (&[K], &mut [V], &Presence) {
        (&self.keys, &mut self.values, &self.present)
    }
}

impl<K: DenseKey, V> SlotStore<K, V> {
    /// Resolves `key` to its slot, or `None` when the key is not part of this
    /// store's universe.
    #[inline]
    pub(crate) fn slot_of(&self, key: &K) -> Option<usize> {
        let index = key.dense_index();
        match self.keys.get(index) {
            Some(k) if k == key => Some(index),
            _ => None,
        }
    }
}
