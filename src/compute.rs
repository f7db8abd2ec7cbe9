//! Compute, merge and numeric update operations, written once for every [`AnyMap`].
//!
//! The sentinel ([`AnyMap::default_return_value`]) plays the role of "absent".
//! Each compute operation comes in two flavours:
//!
//! | Flavour | Sentinel result |
//! |---------|-----------------|
//! | plain | stored like any other value |
//! | `_non_default` | treated as deletion: the entry is removed (or never inserted) |
//!
//! `merge` always treats a sentinel result as deletion.

use crate::map::AnyMap;

/// Compute/merge family, blanket-implemented for every [`AnyMap`].
pub trait ComputeMap<K, V>: AnyMap<K, V>
where
    V: Clone + PartialEq,
{
    /// Stores `f(key, current)`, where `current` is the sentinel for an absent key.
    fn compute<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce(&K, V) -> V,
    {
        let current = self.get_or_default(&key);
        let value = f(&key, current);
        match self.get_mut(&key) {
            Some(slot) => *slot = value.clone(),
            None => {
                self.put(key, value.clone());
            }
        }
        value
    }

    /// Like [`ComputeMap::compute`], but a sentinel result removes the entry.
    fn compute_non_default<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce(&K, V) -> V,
    {
        let sentinel = self.default_return_value();
        let current = self.get(&key).cloned();
        let present = current.is_some();
        let value = f(&key, current.unwrap_or_else(|| sentinel.clone()));
        if value == sentinel {
            if present {
                self.remove(&key);
            }
            return value;
        }
        match self.get_mut(&key) {
            Some(slot) => *slot = value.clone(),
            None => {
                self.put(key, value.clone());
            }
        }
        value
    }

    /// Inserts `f(key)` when `key` is absent; returns the resulting value.
    fn compute_if_absent<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(existing) = self.get(&key) {
            return existing.clone();
        }
        let value = f(&key);
        self.put(key, value.clone());
        value
    }

    /// Like [`ComputeMap::compute_if_absent`], but a present sentinel value also
    /// counts as absent, and a sentinel result is never stored.
    fn compute_if_absent_non_default<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        let sentinel = self.default_return_value();
        match self.get(&key) {
            Some(existing) if *existing != sentinel => existing.clone(),
            Some(_) => {
                let value = f(&key);
                if value != sentinel {
                    self.replace(&key, value.clone());
                }
                value
            }
            None => {
                let value = f(&key);
                if value != sentinel {
                    self.put(key, value.clone());
                }
                value
            }
        }
    }

    /// [`ComputeMap::compute_if_absent`] with a supplier that ignores the key.
    fn supply_if_absent<F>(&mut self, key: K, supplier: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.compute_if_absent(key, |_| supplier())
    }

    /// [`ComputeMap::compute_if_absent_non_default`] with a supplier that ignores the key.
    fn supply_if_absent_non_default<F>(&mut self, key: K, supplier: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.compute_if_absent_non_default(key, |_| supplier())
    }

    /// Stores `f(key, value)` for a present key; absent keys yield the sentinel.
    fn compute_if_present<F>(&mut self, key: &K, f: F) -> V
    where
        F: FnOnce(&K, V) -> V,
    {
        let Some(current) = self.get(key).cloned() else {
            return self.default_return_value();
        };
        let value = f(key, current);
        self.replace(key, value.clone());
        value
    }

    /// Like [`ComputeMap::compute_if_present`], but sentinel-valued entries are
    /// skipped and a sentinel result removes the entry.
    fn compute_if_present_non_default<F>(&mut self, key: &K, f: F) -> V
    where
        F: FnOnce(&K, V) -> V,
    {
        let sentinel = self.default_return_value();
        let current = match self.get(key) {
            Some(v) if *v != sentinel => v.clone(),
            _ => return sentinel,
        };
        let value = f(key, current);
        if value == sentinel {
            self.remove(key);
        } else {
            self.replace(key, value.clone());
        }
        value
    }

    /// Absent or sentinel-valued ⇒ stores `value` without calling `f`;
    /// otherwise stores `f(old, value)`. A sentinel result removes the entry.
    fn merge<F>(&mut self, key: K, value: V, f: F) -> V
    where
        F: FnOnce(V, V) -> V,
    {
        let sentinel = self.default_return_value();
        let current = self.get(&key).cloned();
        let present = current.is_some();
        let merged = match current {
            Some(old) if old != sentinel => f(old, value),
            _ => value,
        };
        if merged == sentinel {
            if present {
                self.remove(&key);
            }
        } else if present {
            self.replace(&key, merged.clone());
        } else {
            self.put(key, merged.clone());
        }
        merged
    }

    /// Applies [`ComputeMap::merge`] for every entry of `other`.
    fn merge_all<M, F>(&mut self, other: &M, mut f: F)
    where
        M: AnyMap<K, V> + ?Sized,
        K: Clone,
        F: FnMut(V, V) -> V,
    {
        let mut pending = Vec::with_capacity(other.len());
        other.for_each_entry(&mut |k, v| pending.push((k.clone(), v.clone())));
        for (key, value) in pending {
            self.merge(key, value, &mut f);
        }
    }
}

impl<K, V, M> ComputeMap<K, V> for M
where
    M: AnyMap<K, V> + ?Sized,
    V: Clone + PartialEq,
{
}

/// Value types that support in-place increment and decrement.
///
/// `V::default()` is the zero used to decide the direction of a delta.
/// Integer increments wrap at the type's bounds. A decrement that leaves the
/// type's range reports `None`.
pub trait Numeric: Copy + PartialOrd + Default {
    fn wrapping_add(self, delta: Self) -> Self;
    fn checked_sub(self, delta: Self) -> Option<Self>;
}

macro_rules! impl_numeric_int {
    ($($t:ty),* $(,)?) => {$(
        impl Numeric for $t {
            #[inline(always)]
            fn wrapping_add(self, delta: Self) -> Self {
                <$t>::wrapping_add(self, delta)
            }

            #[inline(always)]
            fn checked_sub(self, delta: Self) -> Option<Self> {
                <$t>::checked_sub(self, delta)
            }
        }
    )*};
}

macro_rules! impl_numeric_float {
    ($($t:ty),* $(,)?) => {$(
        impl Numeric for $t {
            #[inline(always)]
            fn wrapping_add(self, delta: Self) -> Self {
                self + delta
            }

            #[inline(always)]
            fn checked_sub(self, delta: Self) -> Option<Self> {
                Some(self - delta)
            }
        }
    )*};
}

impl_numeric_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_numeric_float!(f32, f64);

/// Increment/decrement helpers for maps with numeric values.
pub trait NumericMap<K, V: Numeric>: AnyMap<K, V> {
    /// Adds `delta` to the value of `key`, inserting `delta` when absent.
    /// Returns the previous value, or the sentinel when absent.
    fn add_to(&mut self, key: K, delta: V) -> V {
        match self.get_mut(&key) {
            Some(slot) => {
                let old = *slot;
                *slot = old.wrapping_add(delta);
                old
            }
            None => {
                let sentinel = self.default_return_value();
                self.put(key, delta);
                sentinel
            }
        }
    }

    /// Subtracts `delta` from a present value. When the result reaches or
    /// passes the sentinel in the direction of the subtraction, the entry is
    /// dropped. A result outside the value type's range counts as passing it.
    /// Returns the previous value, or the sentinel when absent.
    fn sub_from(&mut self, key: &K, delta: V) -> V {
        let sentinel = self.default_return_value();
        let Some(slot) = self.get_mut(key) else {
            return sentinel;
        };
        let old = *slot;
        let exhausted = match old.checked_sub(delta) {
            Some(new) => {
                *slot = new;
                if delta < V::default() {
                    new >= sentinel
                } else {
                    new <= sentinel
                }
            }
            None => true,
        };
        if exhausted {
            self.remove(key);
        }
        old
    }
}

impl<K, V, M> NumericMap<K, V> for M
where
    M: AnyMap<K, V> + ?Sized,
    V: Numeric,
{
}
