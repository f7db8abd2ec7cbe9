#![cfg(feature = "array")]
//! Insertion-ordered map over two parallel, gap-free arrays.
//!
//! No hashing, no links: position in the arrays *is* the order. Lookups scan
//! from the back, so the most recently appended or moved-to-last keys are found
//! first. Every structural change is a shift of the tail of both arrays.
//!
//! # Architecture
//! ```text
//! keys:   [ k0 | k1 | k2 | ... | k(len-1) ]    slots [0, len) always filled
//! values: [ v0 | v1 | v2 | ... | v(len-1) ]
//!
//! put(new k):              push to the end of both arrays
//! put_and_move_to_first:   insert at 0, shifting everything right
//! remove(i):               shift [i+1, len) left by one
//! move_to_first(i):        rotate [0, i] right by one
//! move_to_last(i):         rotate [i, len) left by one
//! ```
//!
//! # Sub-views
//! [`ArrayMap::sub_view`] borrows a positional range. Positions shift whenever
//! the parent changes, so a view is only meaningful for the parent state it was
//! taken from; the shared borrow keeps the parent frozen while the view lives.

use std::fmt::{self, Debug};
use std::iter::Zip;
use std::ops::{Bound, Index, RangeBounds};
use std::slice;

use crate::error::{MapError, Result};
use crate::map::{AnyMap, OrderedMap};
use crate::maps::entry::{FastEntry, SnapshotEntry};

pub type Iter<'a, K, V> = Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>;
pub type IterMut<'a, K, V> = Zip<slice::Iter<'a, K>, slice::IterMut<'a, V>>;
pub type IntoIter<K, V> = Zip<std::vec::IntoIter<K>, std::vec::IntoIter<V>>;

/// An insertion-ordered map backed by parallel arrays.
///
/// Suited to small maps: every keyed operation is a linear scan. Grows on
/// demand and never shrinks.
#[derive(Clone)]
pub struct ArrayMap<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
    default_return: V,
}

impl<K: Eq, V: Default> ArrayMap<K, V> {
    /// Creates an empty map. No allocation occurs.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            default_return: V::default(),
        }
    }

    /// Like [`ArrayMap::with_capacity`], but reports allocation failure.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        keys.try_reserve_exact(capacity)
            .map_err(|_| MapError::CapacityOverflow(capacity))?;
        values
            .try_reserve_exact(capacity)
            .map_err(|_| MapError::CapacityOverflow(capacity))?;
        Ok(Self {
            keys,
            values,
            default_return: V::default(),
        })
    }

    /// Builds a map from parallel key and value arrays. Later duplicates
    /// overwrite earlier ones in place.
    pub fn from_parallel(keys: Vec<K>, values: Vec<V>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(MapError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut map = Self::with_capacity(keys.len());
        map.extend(keys.into_iter().zip(values));
        Ok(map)
    }

    /// Builds a map from any [`AnyMap`], keeping the source's iteration order and sentinel.
    pub fn from_map<M>(other: &M) -> Self
    where
        M: AnyMap<K, V> + ?Sized,
        K: Clone,
        V: Clone,
    {
        log::trace!("copying {} entries from a generic map", other.len());
        let mut map =
            Self::with_capacity(other.len()).with_default_return_value(other.default_return_value());
        other.for_each_entry(&mut |k, v| {
            map.put(k.clone(), v.clone());
        });
        map
    }
}

impl<K: Eq, V> ArrayMap<K, V> {
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of entries the backing arrays hold before growing.
    pub fn capacity(&self) -> usize {
        self.keys.capacity().min(self.values.capacity())
    }

    /// The sentinel reported for missing entries.
    pub fn default_return_value(&self) -> &V {
        &self.default_return
    }

    pub fn set_default_return_value(&mut self, value: V) {
        self.default_return = value;
    }

    pub fn with_default_return_value(mut self, value: V) -> Self {
        self.default_return = value;
        self
    }

    /// Position of `key`, scanning from the most recent end.
    #[inline]
    fn find_index(&self, key: &K) -> Option<usize> {
        self.keys.iter().rposition(|k| k == key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_index(key).map(|i| &mut self.values[i])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Inserts or overwrites. New keys are appended at the end.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(i) = self.find_index(&key) {
            return Some(std::mem::replace(&mut self.values[i], value));
        }
        self.insert_at(self.keys.len(), key, value);
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.find_index(key)?;
        Some(self.remove_at(i).1)
    }

    pub fn clear(&mut self) {
        if !self.keys.is_empty() {
            log::trace!("clearing {} entries", self.keys.len());
        }
        self.keys.clear();
        self.values.clear();
    }

    fn insert_at(&mut self, index: usize, key: K, value: V) {
        if self.keys.len() == self.keys.capacity() {
            log::trace!("array map growing past {} entries", self.keys.len());
        }
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    fn remove_at(&mut self, index: usize) -> (K, V) {
        (self.keys.remove(index), self.values.remove(index))
    }

    // --- Ordered operations ---

    pub fn first_key(&self) -> Option<&K> {
        self.keys.first()
    }

    pub fn last_key(&self) -> Option<&K> {
        self.keys.last()
    }

    pub fn first_value(&self) -> Option<&V> {
        self.values.first()
    }

    pub fn last_value(&self) -> Option<&V> {
        self.values.last()
    }

    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        if self.keys.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        Some((self.keys.pop()?, self.values.pop()?))
    }

    pub fn poll_first_key(&mut self) -> Option<K> {
        self.poll_first_entry().map(|(k, _)| k)
    }

    pub fn poll_last_key(&mut self) -> Option<K> {
        self.poll_last_entry().map(|(k, _)| k)
    }

    /// Inserts or overwrites `key` and places it first.
    pub fn put_and_move_to_first(&mut self, key: K, value: V) -> Option<V> {
        match self.find_index(&key) {
            Some(i) => {
                let old = std::mem::replace(&mut self.values[i], value);
                self.shift_to_first(i);
                Some(old)
            }
            None => {
                self.insert_at(0, key, value);
                None
            }
        }
    }

    /// Inserts or overwrites `key` and places it last.
    pub fn put_and_move_to_last(&mut self, key: K, value: V) -> Option<V> {
        match self.find_index(&key) {
            Some(i) => {
                let old = std::mem::replace(&mut self.values[i], value);
                self.shift_to_last(i);
                Some(old)
            }
            None => {
                self.insert_at(self.keys.len(), key, value);
                None
            }
        }
    }

    pub fn get_and_move_to_first(&mut self, key: &K) -> Option<&V> {
        let i = self.find_index(key)?;
        self.shift_to_first(i);
        self.values.first()
    }

    pub fn get_and_move_to_last(&mut self, key: &K) -> Option<&V> {
        let i = self.find_index(key)?;
        self.shift_to_last(i);
        self.values.last()
    }

    /// Returns `true` if `key` was present and not already first.
    pub fn move_to_first(&mut self, key: &K) -> bool {
        match self.find_index(key) {
            Some(i) => self.shift_to_first(i),
            None => false,
        }
    }

    /// Returns `true` if `key` was present and not already last.
    pub fn move_to_last(&mut self, key: &K) -> bool {
        match self.find_index(key) {
            Some(i) => self.shift_to_last(i),
            None => false,
        }
    }

    fn shift_to_first(&mut self, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        self.keys[..=index].rotate_right(1);
        self.values[..=index].rotate_right(1);
        true
    }

    fn shift_to_last(&mut self, index: usize) -> bool {
        if index + 1 == self.keys.len() {
            return false;
        }
        self.keys[index..].rotate_left(1);
        self.values[index..].rotate_left(1);
        true
    }

    // --- Views ---

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.keys.iter().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.keys.iter().zip(self.values.iter_mut())
    }

    pub fn keys(&self) -> slice::Iter<'_, K> {
        self.keys.iter()
    }

    pub fn values(&self) -> slice::Iter<'_, V> {
        self.values.iter()
    }

    pub fn values_mut(&mut self) -> slice::IterMut<'_, V> {
        self.values.iter_mut()
    }

    /// Owned copies of every entry.
    pub fn snapshots(&self) -> impl DoubleEndedIterator<Item = SnapshotEntry<K, V>> + '_
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(SnapshotEntry::from)
    }

    /// Writes `value` through to the entry's key and into the snapshot.
    /// Returns the previous value, or [`MapError::KeyNotPresent`] once the key
    /// has been removed.
    pub fn set_entry(&mut self, entry: &mut SnapshotEntry<K, V>, value: V) -> Result<V>
    where
        V: Clone,
    {
        let slot = self.get_mut(entry.key()).ok_or(MapError::KeyNotPresent)?;
        let previous = std::mem::replace(slot, value.clone());
        entry.replace_value(value);
        Ok(previous)
    }

    /// Visits every entry through a single reused [`FastEntry`], first to last.
    pub fn for_each_fast<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut FastEntry<'_, K, V>),
    {
        if self.keys.is_empty() {
            return;
        }
        let len = self.keys.len();
        let mut entry = FastEntry::new(&self.keys, &mut self.values, 0);
        for index in 0..len {
            entry.seek(index);
            f(&mut entry);
        }
    }

    /// Keeps only the entries for which `f` returns `true`, preserving order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut i = 0;
        while i < self.keys.len() {
            if f(&self.keys[i], &mut self.values[i]) {
                i += 1;
            } else {
                self.remove_at(i);
            }
        }
    }

    /// A read-only view of the entries at positions `range`, or `None` if the
    /// range falls outside `0..len`.
    pub fn sub_view<R>(&self, range: R) -> Option<SubView<'_, K, V>>
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.checked_add(1)?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1)?,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.keys.len(),
        };
        Some(SubView {
            keys: self.keys.get(start..end)?,
            values: self.values.get(start..end)?,
            default_return: &self.default_return,
        })
    }
}

/// A positional slice of an [`ArrayMap`].
#[derive(Clone, Copy)]
pub struct SubView<'a, K, V> {
    keys: &'a [K],
    values: &'a [V],
    default_return: &'a V,
}

impl<'a, K: Eq, V> SubView<'a, K, V> {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&'a V> {
        let i = self.keys.iter().rposition(|k| k == key)?;
        Some(&self.values[i])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn first_key(&self) -> Option<&'a K> {
        self.keys.first()
    }

    pub fn last_key(&self) -> Option<&'a K> {
        self.keys.last()
    }

    pub fn iter(&self) -> Iter<'a, K, V> {
        self.keys.iter().zip(self.values.iter())
    }

    /// The parent map's sentinel.
    pub fn default_return_value(&self) -> &'a V {
        self.default_return
    }

    /// Copies the view out into an independent map that keeps the parent's sentinel.
    pub fn to_map(&self) -> ArrayMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        ArrayMap {
            keys: self.keys.to_vec(),
            values: self.values.to_vec(),
            default_return: self.default_return.clone(),
        }
    }
}

impl<K: Debug, V: Debug> Debug for SubView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.keys.iter().zip(self.values.iter()))
            .finish()
    }
}

// --- Traits ---

impl<K: Eq, V: Default + Clone> AnyMap<K, V> for ArrayMap<K, V> {
    fn len(&self) -> usize {
        self.len()
    }
    fn get(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.get_mut(key)
    }
    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }
    fn remove(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }
    fn contains_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn default_return_value(&self) -> V {
        self.default_return.clone()
    }
    fn for_each_entry(&self, f: &mut dyn FnMut(&K, &V)) {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }
}

impl<K: Eq, V: Default + Clone> OrderedMap<K, V> for ArrayMap<K, V> {
    fn first_key(&self) -> Option<&K> {
        self.first_key()
    }
    fn last_key(&self) -> Option<&K> {
        self.last_key()
    }
    fn poll_first_key(&mut self) -> Option<K> {
        self.poll_first_key()
    }
    fn poll_last_key(&mut self) -> Option<K> {
        self.poll_last_key()
    }
    fn first_value(&self) -> Option<&V> {
        self.first_value()
    }
    fn last_value(&self) -> Option<&V> {
        self.last_value()
    }
    fn put_and_move_to_first(&mut self, key: K, value: V) -> Option<V> {
        self.put_and_move_to_first(key, value)
    }
    fn put_and_move_to_last(&mut self, key: K, value: V) -> Option<V> {
        self.put_and_move_to_last(key, value)
    }
    fn get_and_move_to_first(&mut self, key: &K) -> Option<&V> {
        self.get_and_move_to_first(key)
    }
    fn get_and_move_to_last(&mut self, key: &K) -> Option<&V> {
        self.get_and_move_to_last(key)
    }
    fn move_to_first(&mut self, key: &K) -> bool {
        self.move_to_first(key)
    }
    fn move_to_last(&mut self, key: &K) -> bool {
        self.move_to_last(key)
    }
}

impl<K: Eq, V> Index<&K> for ArrayMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Eq + Debug, V: Debug> Debug for ArrayMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq> PartialEq for ArrayMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq, V: Eq> Eq for ArrayMap<K, V> {}

impl<K: Eq, V: Default> Default for ArrayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq, V: Default> FromIterator<(K, V)> for ArrayMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Eq, V> Extend<(K, V)> for ArrayMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Eq, V> IntoIterator for ArrayMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.values)
    }
}

impl<'a, K: Eq, V> IntoIterator for &'a ArrayMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: Eq, V> IntoIterator for &'a mut ArrayMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
