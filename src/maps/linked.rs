#![cfg(feature = "linked")]
//! Insertion-ordered dense map: a [`DenseMap`] whose order policy is [`LinkOrder`].
//!
//! Plain `put` appends new keys at the tail and leaves existing keys where they
//! are. The ordered-map operations below reposition entries in O(1) through the
//! link table.

use crate::map::OrderedMap;
use crate::maps::dense_map::DenseMap;
use crate::maps::link_order::LinkOrder;
use crate::utils::dense_key::DenseKey;

/// A dense map that iterates in insertion order.
pub type LinkedDenseMap<K, V> = DenseMap<K, V, LinkOrder>;

impl<K, V> DenseMap<K, V, LinkOrder>
where
    K: DenseKey,
    V: Default,
{
    /// Key at the head of the order.
    pub fn first_key(&self) -> Option<&K> {
        self.order.first().map(|i| self.store.key(i))
    }

    /// Key at the tail of the order.
    pub fn last_key(&self) -> Option<&K> {
        self.order.last().map(|i| self.store.key(i))
    }

    pub fn first_value(&self) -> Option<&V> {
        self.order.first().map(|i| self.store.value(i))
    }

    pub fn last_value(&self) -> Option<&V> {
        self.order.last().map(|i| self.store.value(i))
    }

    /// Removes the head entry and returns it.
    pub fn poll_first_entry(&mut self) -> Option<(K, V)> {
        let index = self.order.first()?;
        let key = self.store.key(index).clone();
        Some((key, self.remove_at(index)))
    }

    /// Removes the tail entry and returns it.
    pub fn poll_last_entry(&mut self) -> Option<(K, V)> {
        let index = self.order.last()?;
        let key = self.store.key(index).clone();
        Some((key, self.remove_at(index)))
    }

    pub fn poll_first_key(&mut self) -> Option<K> {
        self.poll_first_entry().map(|(k, _)| k)
    }

    pub fn poll_last_key(&mut self) -> Option<K> {
        self.poll_last_entry().map(|(k, _)| k)
    }

    /// Inserts or overwrites `key` and places it at the head.
    ///
    /// # Panics
    /// Panics if `key` is not part of this map's universe.
    pub fn put_and_move_to_first(&mut self, key: K, value: V) -> Option<V> {
        let index = self.slot_or_panic(&key);
        if self.store.is_present(index) {
            self.order.move_to_head(index);
            return Some(self.store.replace(index, value));
        }
        self.order.link_at_head(index);
        self.store.occupy(index, value);
        None
    }

    /// Inserts or overwrites `key` and places it at the tail.
    ///
    /// # Panics
    /// Panics if `key` is not part of this map's universe.
    pub fn put_and_move_to_last(&mut self, key: K, value: V) -> Option<V> {
        let index = self.slot_or_panic(&key);
        if self.store.is_present(index) {
            self.order.move_to_tail(index);
            return Some(self.store.replace(index, value));
        }
        self.put_at(index, value)
    }

    /// Moves a present `key` to the head and returns its value.
    pub fn get_and_move_to_first(&mut self, key: &K) -> Option<&V> {
        let index = self.live_slot(key)?;
        self.order.move_to_head(index);
        Some(self.store.value(index))
    }

    /// Moves a present `key` to the tail and returns its value.
    pub fn get_and_move_to_last(&mut self, key: &K) -> Option<&V> {
        let index = self.live_slot(key)?;
        self.order.move_to_tail(index);
        Some(self.store.value(index))
    }

    /// Returns `true` if `key` was present and not already the head.
    pub fn move_to_first(&mut self, key: &K) -> bool {
        match self.live_slot(key) {
            Some(index) => self.order.move_to_head(index),
            None => false,
        }
    }

    /// Returns `true` if `key` was present and not already the tail.
    pub fn move_to_last(&mut self, key: &K) -> bool {
        match self.live_slot(key) {
            Some(index) => self.order.move_to_tail(index),
            None => false,
        }
    }
}

impl<K, V> OrderedMap<K, V> for DenseMap<K, V, LinkOrder>
where
    K: DenseKey,
    V: Default + Clone,
{
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
