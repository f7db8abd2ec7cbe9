//! Bidirectional cursor over a dense map, with removal of the visited entry.
//!
//! The cursor sits *between* entries, like a list iterator:
//!
//! ```text
//!          previous   next
//!             |        |
//!   ... <-> [ A ] <-> [ B ] <-> ...
//! ```
//!
//! `next_entry` steps over `B` (it becomes `current` and the new `previous`),
//! `previous_entry` steps back over `A`. `remove` drops whatever was stepped over
//! last, splicing it out with the neighbours the cursor already holds.
//!
//! The absolute position is not tracked during traversal. It is computed by a
//! walk from the head the first time `next_index`/`previous_index` is asked for
//! and kept up to date afterwards.

use crate::error::{MapError, Result};
use crate::maps::dense_map::DenseMap;
use crate::maps::entry::FastEntry;
use crate::maps::order::OrderPolicy;
use crate::utils::dense_key::DenseKey;

/// A cursor over a [`DenseMap`] in the map's order.
///
/// Holds the map mutably for its whole life, so the only structural change
/// possible while it exists is [`Cursor::remove`].
pub struct Cursor<'a, K, V, P> {
    map: &'a mut DenseMap<K, V, P>,
    previous: Option<usize>,
    next: Option<usize>,
    current: Option<usize>,
    index: Option<usize>,
}

impl<K, V, P> DenseMap<K, V, P>
where
    K: DenseKey,
    P: OrderPolicy,
{
    /// Cursor positioned before the first entry.
    pub fn cursor(&mut self) -> Cursor<'_, K, V, P> {
        let next = self.order.head(self.store.presence());
        Cursor {
            map: self,
            previous: None,
            next,
            current: None,
            index: Some(0),
        }
    }

    /// Cursor positioned after the last entry.
    pub fn cursor_back(&mut self) -> Cursor<'_, K, V, P> {
        let previous = self.order.tail(self.store.presence());
        let len = self.len();
        Cursor {
            map: self,
            previous,
            next: None,
            current: None,
            index: Some(len),
        }
    }

    /// Cursor positioned just after `key`: `key` is the previous entry and its
    /// successor is the next one.
    pub fn cursor_from(&mut self, key: &K) -> Result<Cursor<'_, K, V, P>> {
        let index = self.store.slot_of(key).ok_or_else(|| self.outside(key))?;
        if !self.store.is_present(index) {
            return Err(MapError::KeyNotPresent);
        }
        let next = self.order.successor(index, self.store.presence());
        Ok(Cursor {
            map: self,
            previous: Some(index),
            next,
            current: None,
            index: None,
        })
    }
}

impl<K, V, P> Cursor<'_, K, V, P>
where
    K: DenseKey,
    P: OrderPolicy,
{
    #[inline]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[inline]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Steps forward over the next entry and returns a view of it.
    pub fn next_entry(&mut self) -> Result<FastEntry<'_, K, V>> {
        let index = self.next.ok_or(MapError::NoSuchElement)?;
        self.current = Some(index);
        self.previous = Some(index);
        self.next = self
            .map
            .order
            .successor(index, self.map.store.presence());
        if let Some(i) = self.index.as_mut() {
            *i += 1;
        }
        Ok(self.entry(index))
    }

    /// Steps backward over the previous entry and returns a view of it.
    pub fn previous_entry(&mut self) -> Result<FastEntry<'_, K, V>> {
        let index = self.previous.ok_or(MapError::NoSuchElement)?;
        self.current = Some(index);
        self.next = Some(index);
        self.previous = self
            .map
            .order
            .predecessor(index, self.map.store.presence());
        if let Some(i) = self.index.as_mut() {
            *i -= 1;
        }
        Ok(self.entry(index))
    }

    /// Ordinal position of the entry `next_entry` would return.
    pub fn next_index(&mut self) -> usize {
        self.ensure_index()
    }

    /// Ordinal position of the entry `previous_entry` would return.
    pub fn previous_index(&mut self) -> Option<usize> {
        self.ensure_index().checked_sub(1)
    }

    /// Key of the entry stepped over last.
    pub fn current_key(&self) -> Option<&K> {
        self.current.map(|i| self.map.store.key(i))
    }

    /// Value of the entry stepped over last.
    pub fn current_value(&self) -> Option<&V> {
        self.current.map(|i| self.map.store.value(i))
    }

    /// Overwrites the value of the entry stepped over last.
    pub fn set_value(&mut self, value: V) -> Result<V> {
        let index = self.current.ok_or(MapError::IllegalIteratorState)?;
        Ok(self.map.store.replace(index, value))
    }

    /// Removes the entry stepped over last and returns its value.
    ///
    /// Fails with [`MapError::IllegalIteratorState`] when nothing was stepped over
    /// since the cursor was created or since the previous removal.
    pub fn remove(&mut self) -> Result<V>
    where
        V: Default,
    {
        let index = self.current.take().ok_or(MapError::IllegalIteratorState)?;
        let present = self.map.store.presence();
        if self.previous == Some(index) {
            // stepped forward over it
            self.previous = self.map.order.predecessor(index, present);
            if let Some(i) = self.index.as_mut() {
                *i -= 1;
            }
        } else {
            self.next = self.map.order.successor(index, present);
        }
        self.map.order.splice_out(index, self.previous, self.next);
        Ok(self.map.store.vacate(index))
    }

    fn ensure_index(&mut self) -> usize {
        if let Some(i) = self.index {
            return i;
        }
        let position = match (self.previous, self.next) {
            (None, _) => 0,
            (_, None) => self.map.len(),
            (Some(previous), _) => self
                .map
                .indices()
                .position(|i| i == previous)
                .map_or(0, |p| p + 1),
        };
        self.index = Some(position);
        position
    }

    fn entry(&mut self, index: usize) -> FastEntry<'_, K, V> {
        let (keys, values, _) = self.map.store.split_mut();
        FastEntry::new(keys, values, index)
    }
}
