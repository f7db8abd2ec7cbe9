//! Object-style map contracts shared by every map in the crate.
//!
//! - [`AnyMap`]: the core keyed operations plus the sentinel ("default return
//!   value") that stands in for absence.
//! - [`OrderedMap`]: head/tail access and move-to-front/back for maps that keep
//!   an explicit order.
//!
//! `AnyMap` is also implemented for `std::collections::HashMap`, so any
//! hash map can feed the iterate-and-insert constructors.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// A trait for abstraction over the dense, linked, array-backed and std maps.
pub trait AnyMap<K, V> {
    /// Returns the number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &K) -> Option<&V>;

    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Inserts or overwrites, returning the previous value.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn clear(&mut self);

    /// The value reported in place of a missing entry.
    fn default_return_value(&self) -> V;

    /// Visits every entry in the map's own order.
    fn for_each_entry(&self, f: &mut dyn FnMut(&K, &V));

    /// Value for `key`, or the sentinel when absent.
    fn get_or_default(&self, key: &K) -> V
    where
        V: Clone,
    {
        match self.get(key) {
            Some(v) => v.clone(),
            None => self.default_return_value(),
        }
    }

    /// Inserts only when `key` is absent. Returns the value already present, if any.
    fn put_if_absent(&mut self, key: K, value: V) -> Option<V>
    where
        V: Clone,
    {
        if let Some(existing) = self.get(&key) {
            return Some(existing.clone());
        }
        self.put(key, value);
        None
    }

    /// Overwrites the value of a present key; absent keys are left absent.
    fn replace(&mut self, key: &K, value: V) -> Option<V> {
        self.get_mut(key).map(|slot| std::mem::replace(slot, value))
    }

    /// Overwrites the value of `key` only if it currently equals `expected`.
    fn replace_if(&mut self, key: &K, expected: &V, value: V) -> bool
    where
        V: PartialEq,
    {
        match self.get_mut(key) {
            Some(slot) if *slot == *expected => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    /// Removes `key` only if it currently maps to `expected`.
    fn remove_if(&mut self, key: &K, expected: &V) -> bool
    where
        V: PartialEq,
    {
        if self.get(key) == Some(expected) {
            self.remove(key);
            true
        } else {
            false
        }
    }

    /// Returns `true` if any live entry holds `value`.
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let mut found = false;
        self.for_each_entry(&mut |_, v| found |= v == value);
        found
    }
}

/// Maps that keep an explicit, caller-controllable order.
pub trait OrderedMap<K, V>: AnyMap<K, V> {
    fn first_key(&self) -> Option<&K>;

    fn last_key(&self) -> Option<&K>;

    /// Removes the head entry, returning its key.
    fn poll_first_key(&mut self) -> Option<K>;

    /// Removes the tail entry, returning its key.
    fn poll_last_key(&mut self) -> Option<K>;

    fn first_value(&self) -> Option<&V>;

    fn last_value(&self) -> Option<&V>;

    /// Inserts or overwrites, then moves the entry to the head.
    fn put_and_move_to_first(&mut self, key: K, value: V) -> Option<V>;

    /// Inserts or overwrites, then moves the entry to the tail.
    fn put_and_move_to_last(&mut self, key: K, value: V) -> Option<V>;

    /// Moves a present entry to the head and returns its value.
    fn get_and_move_to_first(&mut self, key: &K) -> Option<&V>;

    /// Moves a present entry to the tail and returns its value.
    fn get_and_move_to_last(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if the entry existed and was not already the head.
    fn move_to_first(&mut self, key: &K) -> bool;

    /// Returns `true` if the entry existed and was not already the tail.
    fn move_to_last(&mut self, key: &K) -> bool;
}

impl<K, V, S> AnyMap<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Default,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }
    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }
    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        HashMap::get_mut(self, key)
    }
    fn put(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }
    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }
    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }
    fn clear(&mut self) {
        HashMap::clear(self);
    }
    fn default_return_value(&self) -> V {
        V::default()
    }
    fn for_each_entry(&self, f: &mut dyn FnMut(&K, &V)) {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }
}
