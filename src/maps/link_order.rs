#![cfg(feature = "linked")]
//! Insertion order kept in an index-linked list, one packed word per slot.
//!
//! # Implementation details
//! - **No per-node allocation**: `links[i]` is the list node for slot `i`, so
//!   the list lives next to the slot arrays and is sized once, with the universe.
//! - **Packed links**: each [`LinkWord`] carries `prev` in the high half and
//!   `next` in the low half; [`NONE`] ends the chain in either direction.
//! - **`first` / `last`**: the chain ends, both `NONE` while the map is empty.
//!
//! Every operation is O(1): unlinking reads one word, decodes both neighbours
//! and patches the opposite half of each.

use crate::maps::order::OrderPolicy;
use crate::maps::slot_store::Presence;
use crate::utils::link_word::{LinkWord, NONE, half, slot};

/// A packed doubly-linked order over dense slots.
#[derive(Clone, Debug)]
pub struct LinkOrder {
    links: Box<[LinkWord]>,
    first: u32,
    last: u32,
}

impl LinkOrder {
    /// First slot of the chain.
    #[inline(always)]
    pub fn first(&self) -> Option<usize> {
        slot(self.first)
    }

    /// Last slot of the chain.
    #[inline(always)]
    pub fn last(&self) -> Option<usize> {
        slot(self.last)
    }

    #[inline(always)]
    fn set_next(&mut self, at: u32, next: u32) {
        let w = &mut self.links[at as usize];
        *w = w.with_next(next);
    }

    #[inline(always)]
    fn set_prev(&mut self, at: u32, prev: u32) {
        let w = &mut self.links[at as usize];
        *w = w.with_prev(prev);
    }

    /// Appends a detached slot at the tail.
    pub fn link_at_tail(&mut self, index: usize) {
        let i = index as u32;
        if self.last == NONE {
            self.first = i;
            self.last = i;
            self.links[index] = LinkWord::DETACHED;
            return;
        }
        self.set_next(self.last, i);
        self.links[index] = LinkWord::new(self.last, NONE);
        self.last = i;
    }

    /// Prepends a detached slot at the head.
    pub fn link_at_head(&mut self, index: usize) {
        let i = index as u32;
        if self.first == NONE {
            self.first = i;
            self.last = i;
            self.links[index] = LinkWord::DETACHED;
            return;
        }
        self.set_prev(self.first, i);
        self.links[index] = LinkWord::new(NONE, self.first);
        self.first = i;
    }

    /// Removes a linked slot from the chain.
    pub fn unlink(&mut self, index: usize) {
        let w = self.links[index];
        let (prev, next) = (w.prev(), w.next());
        if prev == NONE {
            self.first = next;
        } else {
            self.set_next(prev, next);
        }
        if next == NONE {
            self.last = prev;
        } else {
            self.set_prev(next, prev);
        }
    }

    /// Moves a linked slot to the head. Returns `false` if it already was the head.
    pub fn move_to_head(&mut self, index: usize) -> bool {
        let i = index as u32;
        if self.first == i {
            return false;
        }
        // Not the head, so `prev` is a real slot.
        let w = self.links[index];
        let (prev, next) = (w.prev(), w.next());
        if self.last == i {
            self.last = prev;
            self.set_next(prev, NONE);
        } else {
            self.set_next(prev, next);
            self.set_prev(next, prev);
        }
        self.set_prev(self.first, i);
        self.links[index] = LinkWord::new(NONE, self.first);
        self.first = i;
        true
    }

    /// Moves a linked slot to the tail. Returns `false` if it already was the tail.
    pub fn move_to_tail(&mut self, index: usize) -> bool {
        let i = index as u32;
        if self.last == i {
            return false;
        }
        // Not the tail, so `next` is a real slot.
        let w = self.links[index];
        let (prev, next) = (w.prev(), w.next());
        if self.first == i {
            self.first = next;
            self.set_prev(next, NONE);
        } else {
            self.set_next(prev, next);
            self.set_prev(next, prev);
        }
        self.set_next(self.last, i);
        self.links[index] = LinkWord::new(self.last, NONE);
        self.last = i;
        true
    }

    /// Raw link word for `index`; meaningful only while the slot is live.
    #[inline(always)]
    pub fn link(&self, index: usize) -> LinkWord {
        self.links[index]
    }
}

impl OrderPolicy for LinkOrder {
    fn for_universe(size: usize) -> Self {
        Self {
            links: vec![LinkWord::DETACHED; size].into_boxed_slice(),
            first: NONE,
            last: NONE,
        }
    }

    #[inline]
    fn on_add(&mut self, index: usize) {
        self.link_at_tail(index);
    }

    #[inline]
    fn on_remove(&mut self, index: usize) {
        self.unlink(index);
    }

    #[inline]
    fn on_clear(&mut self) {
        self.first = NONE;
        self.last = NONE;
    }

    #[inline(always)]
    fn head(&self, _present: &Presence) -> Option<usize> {
        self.first()
    }

    #[inline(always)]
    fn tail(&self, _present: &Presence) -> Option<usize> {
        self.last()
    }

    #[inline(always)]
    fn successor(&self, index: usize, _present: &Presence) -> Option<usize> {
        slot(self.links[index].next())
    }

    #[inline(always)]
    fn predecessor(&self, index: usize, _present: &Presence) -> Option<usize> {
        slot(self.links[index].prev())
    }

    fn splice_out(&mut self, _index: usize, previous: Option<usize>, next: Option<usize>) {
        let (prev, next) = (half(previous), half(next));
        if prev == NONE {
            self.first = next;
        } else {
            self.set_next(prev, next);
        }
        if next == NONE {
            self.last = prev;
        } else {
            self.set_prev(next, prev);
        }
    }
}
