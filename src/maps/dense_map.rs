//! Maps over a closed key domain, one slot per key, no hashing.
//!
//! [`DenseMap`] is the mutation core shared by the unordered map (ascending
//! dense-index iteration, [`IndexOrder`]) and the linked map (insertion order
//! with move-to-front/back, `LinkOrder`). The order policy `P` is a type
//! parameter, so the hooks are resolved at compile time and the put/remove code
//! below is written exactly once.
//!
//! # Architecture
//! ```text
//! put(k, v):
//!     i = k.dense_index()            // domain check: universe[i] == k
//!     if present[i]: swap values[i]  // order untouched
//!     else:          order.on_add(i); values[i] = v; present[i] = 1; len += 1
//!
//! remove(k):
//!     i = k.dense_index()
//!     if !present[i]: return None
//!     present[i] = 0; len -= 1; v = take(values[i]); order.on_remove(i)
//! ```

use core::marker::PhantomData;
use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::ops::Index;

use crate::error::{MapError, Result};
use crate::map::AnyMap;
use crate::maps::entry::SnapshotEntry;
use crate::maps::order::{IndexOrder, OrderPolicy};
use crate::maps::slot_store::{Presence, SlotStore};
use crate::utils::dense_key::{ClosedDomain, DenseKey};
use crate::utils::link_word::MAX_SLOTS;

/// A map keyed by a closed, densely indexed domain.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `K` | Key type; its [`DenseKey::dense_index`] is the slot number |
/// | `V` | Value type; `V::default()` fills vacant slots |
/// | `P` | Order policy; [`IndexOrder`] (default) or `LinkOrder` |
///
/// # Sentinel
/// Every map carries a configurable "default return value" reported in place of
/// a missing entry by the sentinel-based operations
/// ([`AnyMap::get_or_default`], the compute family, `add_to`/`sub_from`).
/// It defaults to `V::default()`.
///
/// # Domain
/// A key belongs to the map iff `universe[key.dense_index()] == key`. Queries
/// treat foreign keys as absent. [`DenseMap::put`] panics on them;
/// [`DenseMap::try_put`] reports them as [`MapError::KeyOutsideUniverse`].
#[derive(Clone)]
pub struct DenseMap<K, V, P = IndexOrder> {
    pub(crate) store: SlotStore<K, V>,
    pub(crate) order: P,
    pub(crate) default_return: V,
}

impl<K, V, P> DenseMap<K, V, P>
where
    K: DenseKey,
    V: Default,
    P: OrderPolicy,
{
    /// Creates an empty map over an explicit key universe.
    ///
    /// The universe must be non-empty, addressable by 32-bit links, and listed in
    /// dense-index order (`universe[i].dense_index() == i`).
    pub fn with_universe<I>(universe: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let keys: Vec<K> = universe.into_iter().collect();
        validate_universe(&keys)?;
        log::debug!("dense map allocated for a universe of {} keys", keys.len());
        Ok(Self::from_keys(keys.into_boxed_slice()))
    }

    /// Builds a map over `universe` from parallel key and value arrays.
    pub fn from_parallel_in<I>(universe: I, keys: Vec<K>, values: Vec<V>) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
    {
        if keys.len() != values.len() {
            return Err(MapError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut map = Self::with_universe(universe)?;
        for (key, value) in keys.into_iter().zip(values) {
            map.try_put(key, value)?;
        }
        Ok(map)
    }

    /// Builds a map over `universe` from any [`AnyMap`] by iterating and inserting.
    ///
    /// The source's sentinel is carried over. Fails on the first key that is not
    /// part of `universe`.
    pub fn from_map_in<I, M>(universe: I, other: &M) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        M: AnyMap<K, V> + ?Sized,
        V: Clone,
    {
        log::trace!("copying {} entries from a generic map", other.len());
        let mut map = Self::with_universe(universe)?
            .with_default_return_value(other.default_return_value());
        let mut failure = None;
        other.for_each_entry(&mut |k, v| {
            if failure.is_none() {
                if let Err(err) = map.try_put(k.clone(), v.clone()) {
                    failure = Some(err);
                }
            }
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(map),
        }
    }

    pub(crate) fn from_keys(keys: Box<[K]>) -> Self {
        let size = keys.len();
        Self {
            store: SlotStore::new(keys),
            order: P::for_universe(size),
            default_return: V::default(),
        }
    }

    /// Builds a map from another dense map over the same universe.
    ///
    /// The slot arrays and bitmap are cloned wholesale; only the order is
    /// replayed, so the copy iterates in `other`'s order whatever its policy.
    pub fn from_dense<Q>(other: &DenseMap<K, V, Q>) -> Self
    where
        V: Clone,
        Q: OrderPolicy,
    {
        log::trace!(
            "structural copy of {} entries from a dense map",
            other.store.len()
        );
        let mut order = P::for_universe(other.store.universe_size());
        for index in other.indices() {
            order.on_add(index);
        }
        Self {
            store: other.store.clone(),
            order,
            default_return: other.default_return.clone(),
        }
    }

    /// Inserts `value` under `key`, returning the previous value.
    ///
    /// # Panics
    /// Panics if `key` is not part of this map's universe.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.slot_or_panic(&key);
        self.put_at(index, value)
    }

    /// Like [`DenseMap::put`], but reports a foreign key as an error.
    pub fn try_put(&mut self, key: K, value: V) -> Result<Option<V>> {
        let index = self.store.slot_of(&key).ok_or_else(|| self.outside(&key))?;
        Ok(self.put_at(index, value))
    }

    /// Removes `key`, returning its value. The vacated slot is reset to `V::default()`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.live_slot(key)?;
        Some(self.remove_at(index))
    }

    /// Removes every entry. A no-op when already empty.
    pub fn clear(&mut self) {
        if self.store.len() > 0 {
            log::trace!("clearing {} entries", self.store.len());
        }
        self.store.clear();
        self.order.on_clear();
    }

    pub(crate) fn put_at(&mut self, index: usize, value: V) -> Option<V> {
        if self.store.is_present(index) {
            return Some(self.store.replace(index, value));
        }
        self.order.on_add(index);
        self.store.occupy(index, value);
        None
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> V {
        let value = self.store.vacate(index);
        self.order.on_remove(index);
        value
    }
}

impl<K, V, P> DenseMap<K, V, P>
where
    K: ClosedDomain,
    V: Default,
    P: OrderPolicy,
{
    /// Creates an empty map over the whole domain of `K`.
    ///
    /// # Panics
    /// Panics if `K::universe()` is empty, too large for 32-bit links, or not
    /// listed in dense-index order. [`DenseMap::try_new`] reports these instead.
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(map) => map,
            Err(err) => panic!("invalid ClosedDomain universe: {err}"),
        }
    }

    /// Like [`DenseMap::new`], but reports an invalid domain as an error.
    pub fn try_new() -> Result<Self> {
        Self::with_universe(K::universe())
    }

    /// Builds a map from parallel key and value arrays.
    pub fn from_parallel(keys: Vec<K>, values: Vec<V>) -> Result<Self> {
        Self::from_parallel_in(K::universe(), keys, values)
    }

    /// Builds a map from any [`AnyMap`] by iterating and inserting.
    ///
    /// The source's sentinel is carried over. Fails on the first key that is not
    /// part of `K`'s universe.
    pub fn from_map<M>(other: &M) -> Result<Self>
    where
        M: AnyMap<K, V> + ?Sized,
        V: Clone,
    {
        Self::from_map_in(K::universe(), other)
    }
}

/// Checks that `keys` is non-empty, addressable by 32-bit links, and listed in
/// dense-index order.
fn validate_universe<K: DenseKey>(keys: &[K]) -> Result<()> {
    if keys.is_empty() {
        return Err(MapError::EmptyUniverse);
    }
    if keys.len() > MAX_SLOTS {
        return Err(MapError::UniverseTooLarge(keys.len()));
    }
    match keys
        .iter()
        .enumerate()
        .find(|(position, key)| key.dense_index() != *position)
    {
        Some((position, key)) => Err(MapError::UniverseOutOfOrder {
            position,
            index: key.dense_index(),
        }),
        None => Ok(()),
    }
}

impl<K, V, P> DenseMap<K, V, P>
where
    K: DenseKey,
    P: OrderPolicy,
{
    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Number of keys in the universe, i.e. the maximum number of entries.
    #[inline]
    pub fn universe_size(&self) -> usize {
        self.store.universe_size()
    }

    /// Every key this map can hold, in dense-index order.
    pub fn universe(&self) -> &[K] {
        self.store.universe()
    }

    /// Returns `true` if `key` belongs to this map's universe.
    pub fn in_universe(&self, key: &K) -> bool {
        self.store.slot_of(key).is_some()
    }

    /// The sentinel reported for missing entries.
    pub fn default_return_value(&self) -> &V {
        &self.default_return
    }

    pub fn set_default_return_value(&mut self, value: V) {
        self.default_return = value;
    }

    /// Builder form of [`DenseMap::set_default_return_value`].
    pub fn with_default_return_value(mut self, value: V) -> Self {
        self.default_return = value;
        self
    }

    /// Returns `true` if `key` is in the universe and live.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.live_slot(key).is_some()
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.get(self.store.slot_of(key)?)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.store.slot_of(key)?;
        self.store.get_mut(index)
    }

    /// Returns the entry stored for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let index = self.live_slot(key)?;
        Some((self.store.key(index), self.store.value(index)))
    }

    /// Iterates `(&K, &V)` in the map's order.
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        let present = self.store.presence();
        Iter {
            keys: self.store.universe(),
            values: self.store.values(),
            order: &self.order,
            present,
            front: self.order.head(present),
            back: self.order.tail(present),
            remaining: self.store.len(),
        }
    }

    /// Iterates `(&K, &mut V)` in the map's order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, P> {
        let remaining = self.store.len();
        let order = &self.order;
        let (keys, values, present) = self.store.split_mut();
        IterMut {
            keys,
            values: values.as_mut_ptr(),
            order,
            present,
            front: order.head(present),
            back: order.tail(present),
            remaining,
            _marker: PhantomData,
        }
    }

    /// Live keys in the map's order.
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        Keys { inner: self.iter() }
    }

    /// Live values in the map's order.
    pub fn values(&self) -> Values<'_, K, V, P> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V, P> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Owned copies of every entry, each safe to keep after the map changes.
    pub fn snapshots(&self) -> impl DoubleEndedIterator<Item = SnapshotEntry<K, V>> + '_
    where
        V: Clone,
    {
        self.iter().map(SnapshotEntry::from)
    }

    /// Keeps only the entries for which `f` returns `true`, walking in the map's order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
        V: Default,
    {
        let mut at = self.order.head(self.store.presence());
        while let Some(index) = at {
            at = self.order.successor(index, self.store.presence());
            let (keys, values, _) = self.store.split_mut();
            if !f(&keys[index], &mut values[index]) {
                self.remove_at(index);
            }
        }
    }

    /// Live slots in the map's order.
    pub(crate) fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        let present = self.store.presence();
        std::iter::successors(self.order.head(present), move |&i| {
            self.order.successor(i, present)
        })
    }

    /// Slot of `key` if it is in the universe and live.
    #[inline]
    pub(crate) fn live_slot(&self, key: &K) -> Option<usize> {
        self.store
            .slot_of(key)
            .filter(|&index| self.store.is_present(index))
    }

    /// Slot of `key`, panicking with [`MapError::KeyOutsideUniverse`] for foreign keys.
    pub(crate) fn slot_or_panic(&self, key: &K) -> usize {
        match self.store.slot_of(key) {
            Some(index) => index,
            None => panic!("{}", self.outside(key)),
        }
    }

    pub(crate) fn outside(&self, key: &K) -> MapError {
        MapError::KeyOutsideUniverse {
            index: key.dense_index(),
            size: self.store.universe_size(),
        }
    }
}

// --- Iterators ---

/// Borrowing iterator over a [`DenseMap`], front to back in the map's order.
pub struct Iter<'a, K, V, P> {
    keys: &'a [K],
    values: &'a [V],
    order: &'a P,
    present: &'a Presence,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K, V, P: OrderPolicy> Iterator for Iter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        self.remaining -= 1;
        self.front = self.order.successor(index, self.present);
        Some((&self.keys[index], &self.values[index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, P: OrderPolicy> DoubleEndedIterator for Iter<'_, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        self.remaining -= 1;
        self.back = self.order.predecessor(index, self.present);
        Some((&self.keys[index], &self.values[index]))
    }
}

impl<K, V, P: OrderPolicy> ExactSizeIterator for Iter<'_, K, V, P> {}
impl<K, V, P: OrderPolicy> FusedIterator for Iter<'_, K, V, P> {}

impl<K, V, P> Clone for Iter<'_, K, V, P> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Mutable iterator over a [`DenseMap`].
pub struct IterMut<'a, K, V, P> {
    keys: &'a [K],
    values: *mut V,
    order: &'a P,
    present: &'a Presence,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
    _marker: PhantomData<&'a mut V>,
}

impl<'a, K, V, P: OrderPolicy> Iterator for IterMut<'a, K, V, P> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        self.remaining -= 1;
        self.front = self.order.successor(index, self.present);
        // SAFETY: the order visits each live slot once, and `remaining` stops the
        // two ends before they cross, so no slot is handed out twice.
        Some((&self.keys[index], unsafe { &mut *self.values.add(index) }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, P: OrderPolicy> DoubleEndedIterator for IterMut<'_, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        self.remaining -= 1;
        self.back = self.order.predecessor(index, self.present);
        // SAFETY: see `next`.
        Some((&self.keys[index], unsafe { &mut *self.values.add(index) }))
    }
}

impl<K, V, P: OrderPolicy> ExactSizeIterator for IterMut<'_, K, V, P> {}
impl<K, V, P: OrderPolicy> FusedIterator for IterMut<'_, K, V, P> {}

/// Keys of a [`DenseMap`] in the map's order.
pub struct Keys<'a, K, V, P> {
    inner: Iter<'a, K, V, P>,
}

impl<'a, K, V, P: OrderPolicy> Iterator for Keys<'a, K, V, P> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, P: OrderPolicy> DoubleEndedIterator for Keys<'_, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, P: OrderPolicy> ExactSizeIterator for Keys<'_, K, V, P> {}

/// Values of a [`DenseMap`] in the map's order.
pub struct Values<'a, K, V, P> {
    inner: Iter<'a, K, V, P>,
}

impl<'a, K, V, P: OrderPolicy> Iterator for Values<'a, K, V, P> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, P: OrderPolicy> DoubleEndedIterator for Values<'_, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, P: OrderPolicy> ExactSizeIterator for Values<'_, K, V, P> {}

pub struct ValuesMut<'a, K, V, P> {
    inner: IterMut<'a, K, V, P>,
}

impl<'a, K, V, P: OrderPolicy> Iterator for ValuesMut<'a, K, V, P> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, P: OrderPolicy> DoubleEndedIterator for ValuesMut<'_, K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

/// Owning iterator; drains the map head first.
pub struct IntoIter<K, V, P> {
    map: DenseMap<K, V, P>,
}

impl<K, V, P> Iterator for IntoIter<K, V, P>
where
    K: DenseKey,
    V: Default,
    P: OrderPolicy,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.map.order.head(self.map.store.presence())?;
        let key = self.map.store.key(index).clone();
        Some((key, self.map.remove_at(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K, V, P> DoubleEndedIterator for IntoIter<K, V, P>
where
    K: DenseKey,
    V: Default,
    P: OrderPolicy,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.map.order.tail(self.map.store.presence())?;
        let key = self.map.store.key(index).clone();
        Some((key, self.map.remove_at(index)))
    }
}

impl<K: DenseKey, V: Default, P: OrderPolicy> ExactSizeIterator for IntoIter<K, V, P> {}

impl<K, V, P> IntoIterator for DenseMap<K, V, P>
where
    K: DenseKey,
    V: Default,
    P: OrderPolicy,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { map: self }
    }
}

impl<'a, K: DenseKey, V, P: OrderPolicy> IntoIterator for &'a DenseMap<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: DenseKey, V, P: OrderPolicy> IntoIterator for &'a mut DenseMap<K, V, P> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// --- Traits ---

impl<K, V, P> AnyMap<K, V> for DenseMap<K, V, P>
where
    K: DenseKey,
    V: Default + Clone,
    P: OrderPolicy,
{
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

impl<K, V, P> Index<&K> for DenseMap<K, V, P>
where
    K: DenseKey,
    P: OrderPolicy,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, P> Debug for DenseMap<K, V, P>
where
    K: DenseKey,
    V: Debug,
    P: OrderPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P> PartialEq for DenseMap<K, V, P>
where
    K: DenseKey,
    V: PartialEq,
    P: OrderPolicy,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, P> Eq for DenseMap<K, V, P>
where
    K: DenseKey,
    V: Eq,
    P: OrderPolicy,
{
}

impl<K, V, P> Default for DenseMap<K, V, P>
where
    K: ClosedDomain,
    V: Default,
    P: OrderPolicy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P> FromIterator<(K, V)> for DenseMap<K, V, P>
where
    K: ClosedDomain,
    V: Default,
    P: OrderPolicy,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, P> Extend<(K, V)> for DenseMap<K, V, P>
where
    K: DenseKey,
    V: Default,
    P: OrderPolicy,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{ComputeMap, NumericMap};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Suit {
        Clubs,
        Diamonds,
        Hearts,
        Spades,
    }

    impl DenseKey for Suit {
        fn dense_index(&self) -> usize {
            *self as usize
        }
    }

    impl ClosedDomain for Suit {
        fn universe() -> Vec<Self> {
            vec![Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
        }
    }

    #[test]
    fn test_dense_map_basic_operations() {
        let mut map: DenseMap<Suit, i32> = DenseMap::new();
        assert!(map.is_empty());
        assert_eq!(map.universe_size(), 4);

        assert_eq!(map.put(Suit::Hearts, 3), None);
        assert_eq!(map.put(Suit::Clubs, 1), None);
        assert_eq!(map.put(Suit::Hearts, 30), Some(3));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Suit::Hearts), Some(&30));
        assert_eq!(map.get(&Suit::Spades), None);
        assert!(map.contains_key(&Suit::Clubs));
        assert!(!map.contains_key(&Suit::Diamonds));
        assert_eq!(map[&Suit::Clubs], 1);
    }

    #[test]
    fn test_dense_map_iterates_in_index_order() {
        let mut map: DenseMap<Suit, i32> = DenseMap::new();
        map.put(Suit::Spades, 4);
        map.put(Suit::Clubs, 1);
        map.put(Suit::Hearts, 3);

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![Suit::Clubs, Suit::Hearts, Suit::Spades]);
        let back: Vec<_> = map.values().rev().copied().collect();
        assert_eq!(back, vec![4, 3, 1]);
        assert_eq!(map.iter().len(), 3);
    }

    #[test]
    fn test_dense_map_remove_zeroes_slot() {
        let mut map: DenseMap<Suit, String> = DenseMap::new();
        map.put(Suit::Diamonds, "gem".to_string());
        assert_eq!(map.remove(&Suit::Diamonds), Some("gem".to_string()));
        assert_eq!(map.remove(&Suit::Diamonds), None);
        assert!(map.store.value(Suit::Diamonds.dense_index()).is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_dense_map_size_matches_presence() {
        let mut map: DenseMap<u8, u32> = DenseMap::new();
        for i in (0..=255u8).step_by(3) {
            map.put(i, i as u32);
        }
        for i in (0..=255u8).step_by(6) {
            map.remove(&i);
        }
        assert_eq!(map.len(), map.store.presence().count_ones());
        for i in 0..=255u8 {
            assert_eq!(map.contains_key(&i), map.store.is_present(i as usize));
        }
    }

    #[test]
    fn test_dense_map_with_universe_validation() {
        let map = DenseMap::<u16, i32>::with_universe(0..100u16).unwrap();
        assert_eq!(map.universe_size(), 100);
        assert!(map.in_universe(&99));
        assert!(!map.in_universe(&100));

        let empty = DenseMap::<u16, i32>::with_universe(Vec::new());
        assert_eq!(empty.unwrap_err(), MapError::EmptyUniverse);

        let gap = DenseMap::<u16, i32>::with_universe([0u16, 2, 3]);
        assert_eq!(
            gap.unwrap_err(),
            MapError::UniverseOutOfOrder {
                position: 1,
                index: 2
            }
        );
    }

    #[test]
    fn test_dense_map_foreign_keys() {
        let mut map = DenseMap::<u16, i32>::with_universe(0..8u16).unwrap();
        assert!(!map.contains_key(&50));
        assert_eq!(map.get(&50), None);
        assert_eq!(map.remove(&50), None);
        assert_eq!(
            map.try_put(50, 1),
            Err(MapError::KeyOutsideUniverse { index: 50, size: 8 })
        );
        assert_eq!(map.try_put(5, 1), Ok(None));
        assert_eq!(map.len(), 1);
    }

    #[test]
    #[should_panic(expected = "outside this map's universe")]
    fn test_dense_map_put_foreign_key_panics() {
        let mut map = DenseMap::<u16, i32>::with_universe(0..8u16).unwrap();
        map.put(8, 1);
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn test_dense_map_index_missing_panics() {
        let map: DenseMap<Suit, i32> = DenseMap::new();
        let _ = map[&Suit::Spades];
    }

    #[test]
    fn test_dense_map_from_parallel() {
        let map: DenseMap<Suit, i32> =
            DenseMap::from_parallel(vec![Suit::Spades, Suit::Clubs], vec![4, 1]).unwrap();
        assert_eq!(map.get(&Suit::Spades), Some(&4));

        let err = DenseMap::<Suit, i32>::from_parallel(vec![Suit::Spades], vec![]).unwrap_err();
        assert_eq!(err, MapError::LengthMismatch { keys: 1, values: 0 });
    }

    #[test]
    fn test_dense_map_from_generic_map() {
        let mut source = std::collections::HashMap::new();
        source.insert(Suit::Hearts, 7);
        source.insert(Suit::Clubs, 2);
        let map: DenseMap<Suit, i32> = DenseMap::from_map(&source).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Suit::Hearts), Some(&7));
    }

    #[test]
    fn test_dense_map_from_parallel_in_runtime_universe() {
        let map = DenseMap::<u16, i32>::from_parallel_in(0..500u16, vec![499, 3, 250], vec![1, 2, 3])
            .unwrap();
        assert_eq!(map.universe_size(), 500);
        assert_eq!(map.len(), 3);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![3, 250, 499]);

        let err = DenseMap::<u16, i32>::from_parallel_in(0..4u16, vec![9], vec![1]).unwrap_err();
        assert_eq!(err, MapError::KeyOutsideUniverse { index: 9, size: 4 });

        let err = DenseMap::<u16, i32>::from_parallel_in(0..4u16, vec![1, 2], vec![1]).unwrap_err();
        assert_eq!(err, MapError::LengthMismatch { keys: 2, values: 1 });

        let err = DenseMap::<u16, i32>::from_parallel_in(Vec::new(), vec![], vec![]).unwrap_err();
        assert_eq!(err, MapError::EmptyUniverse);
    }

    #[test]
    fn test_dense_map_from_map_in_runtime_universe() {
        let mut source: std::collections::HashMap<u16, i32> = std::collections::HashMap::new();
        source.insert(1000, 7);
        source.insert(12, 2);
        let map = DenseMap::<u16, i32>::from_map_in(0..1024u16, &source).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1000), Some(&7));

        let small = DenseMap::<u16, i32>::from_map_in(0..16u16, &source);
        assert_eq!(
            small.unwrap_err(),
            MapError::KeyOutsideUniverse {
                index: 1000,
                size: 16
            }
        );

        // dense-to-dense over a runtime universe keeps the sentinel
        let dense = map.clone().with_default_return_value(-1);
        let copy = DenseMap::<u16, i32>::from_map_in(0..1024u16, &dense).unwrap();
        assert_eq!(copy, dense);
        assert_eq!(*copy.default_return_value(), -1);
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Shuffled {
        First,
        Second,
    }

    impl DenseKey for Shuffled {
        fn dense_index(&self) -> usize {
            *self as usize
        }
    }

    impl ClosedDomain for Shuffled {
        fn universe() -> Vec<Self> {
            vec![Shuffled::Second, Shuffled::First]
        }
    }

    #[test]
    fn test_dense_map_try_new_rejects_misordered_domain() {
        let err = DenseMap::<Shuffled, i32>::try_new().unwrap_err();
        assert_eq!(
            err,
            MapError::UniverseOutOfOrder {
                position: 0,
                index: 1
            }
        );
        let err = DenseMap::<Shuffled, i32>::from_parallel(vec![Shuffled::First], vec![1]);
        assert!(err.is_err());
        assert!(DenseMap::<Suit, i32>::try_new().is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid ClosedDomain universe")]
    fn test_dense_map_new_panics_on_misordered_domain() {
        let _map: DenseMap<Shuffled, i32> = DenseMap::new();
    }

    #[test]
    fn test_dense_map_copy_is_independent() {
        let mut map: DenseMap<Suit, i32> = DenseMap::new();
        map.put(Suit::Clubs, 1);
        let copy = map.clone();
        assert_eq!(copy, map);

        let mut copy = copy;
        copy.put(Suit::Hearts, 3);
        copy.put(Suit::Clubs, 10);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Suit::Clubs), Some(&1));
        assert_ne!(copy, map);
    }

    #[test]
    fn test_dense_map_sentinel_configuration() {
        let mut map: DenseMap<Suit, i32> = DenseMap::new().with_default_return_value(-1);
        assert_eq!(*map.default_return_value(), -1);
        assert_eq!(map.get_or_default(&Suit::Clubs), -1);

        // merge on an absent key stores the value itself
        assert_eq!(map.merge(Suit::Clubs, 5, |a, b| a * b), 5);
        // non-default compute removes when the result equals the sentinel
        assert_eq!(map.compute_non_default(Suit::Clubs, |_, _| -1), -1);
        assert!(!map.contains_key(&Suit::Clubs));

        map.set_default_return_value(0);
        assert_eq!(map.add_to(Suit::Spades, 2), 0);
        assert_eq!(map.sub_from(&Suit::Spades, 2), 2);
        assert!(map.is_empty());
    }

    #[test]
    fn test_dense_map_iter_mut_and_values_mut() {
        let mut map: DenseMap<Suit, i32> = DenseMap::new();
        map.put(Suit::Clubs, 1);
        map.put(Suit::Spades, 4);
        for (_, v) in map.iter_mut() {
            *v *= 10;
        }
        for v in map.values_mut().rev() {
            *v += 1;
        }
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![11, 41]);
        for (_, v) in &mut map {
            *v = 0;
        }
        assert_eq!(map.values().sum::<i32>(), 0);
    }

    #[test]
    fn test_dense_map_retain() {
        let mut map: DenseMap<u8, i32> = (0..10u8).map(|k| (k, k as i32)).collect();
        map.retain(|k, v| {
            *v += 100;
            k % 3 == 0
        });
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert_eq!(map.get(&6), Some(&106));
        assert_eq!(map.len(), map.store.presence().count_ones());
    }

    #[test]
    fn test_dense_map_clear_and_reuse() {
        let mut map: DenseMap<Suit, i32> = DenseMap::new();
        map.clear();
        map.put(Suit::Clubs, 1);
        map.put(Suit::Hearts, 3);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.iter().next(), None);
        map.put(Suit::Hearts, 4);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_dense_map_traits() {
        let map: DenseMap<Suit, i32> = vec![(Suit::Hearts, 3), (Suit::Clubs, 1)]
            .into_iter()
            .collect();
        let debug = format!("{:?}", map);
        assert_eq!(debug, "{Clubs: 1, Hearts: 3}");

        let def: DenseMap<Suit, i32> = DenseMap::default();
        assert!(def.is_empty());

        let drained: Vec<_> = map.clone().into_iter().collect();
        assert_eq!(drained, vec![(Suit::Clubs, 1), (Suit::Hearts, 3)]);
        let drained_back: Vec<_> = map.clone().into_iter().rev().collect();
        assert_eq!(drained_back, vec![(Suit::Hearts, 3), (Suit::Clubs, 1)]);

        let snaps: Vec<_> = map.snapshots().collect();
        assert_eq!(snaps[1].key(), &Suit::Hearts);
        assert_eq!(snaps[1].value(), &3);

        assert_eq!(map.get_key_value(&Suit::Clubs), Some((&Suit::Clubs, &1)));
        let mut total = 0;
        for (_, v) in &map {
            total += v;
        }
        assert_eq!(total, 4);
    }

    #[test]
    fn test_dense_map_any_map_provided_methods() {
        let mut map: DenseMap<bool, u8> = DenseMap::new();
        assert_eq!(map.put_if_absent(true, 1), None);
        assert_eq!(map.put_if_absent(true, 2), Some(1));
        assert!(map.contains_value(&1));
        assert!(map.replace_if(&true, &1, 5));
        assert_eq!(AnyMap::replace(&mut map, &false, 9), None);
        assert!(!map.remove_if(&true, &1));
        assert!(map.remove_if(&true, &5));
        assert!(map.is_empty());
    }
}
