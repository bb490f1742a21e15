// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Fixed-capacity generational slot pools
//!
//! Both the object registry and the emitter collection store their values in
//! a [`SlotPool`]. A pool hands out keys made of a slot index and a
//! generation counter; freeing a slot bumps its generation, so a key held
//! past destruction simply stops resolving instead of aliasing whatever
//! reuses the slot. Removal never moves other values, only the ordering list
//! used for iteration is compacted, which keeps creation order stable.

use std::marker::PhantomData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Keys produced by a [`SlotPool`]
pub trait PoolKey: Copy + Eq {
    /// Build a key from its raw parts
    fn from_raw(index: u32, generation: u32) -> Self;

    /// Slot index
    fn index(&self) -> u32;

    /// Generation the key was issued with
    fn generation(&self) -> u32;
}

/// Statistics for monitoring slot usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Insertions that had to grow the slot array
    pub allocations: usize,
    /// Insertions that reused a previously freed slot
    pub reuses: usize,
    /// Insertions refused because the pool was full
    pub rejections: usize,
    /// Highest number of simultaneously live values
    pub peak_len: usize,
}

impl PoolStats {
    /// Percentage of successful insertions served from the free list
    pub fn reuse_rate(&self) -> f64 {
        let total = self.allocations + self.reuses;
        if total == 0 {
            0.0
        } else {
            (self.reuses as f64 / total as f64) * 100.0
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity arena with generation-checked keys
///
/// # Examples
///
/// ```
/// use arena_physics::pool::SlotPool;
/// use arena_physics::Entity;
///
/// let mut pool: SlotPool<Entity, &str> = SlotPool::with_capacity(2);
/// let a = pool.insert("a").unwrap();
/// let b = pool.insert("b").unwrap();
/// assert!(pool.insert("c").is_none());
///
/// pool.remove(a);
/// assert!(pool.get(a).is_none());
/// assert_eq!(pool.get(b), Some(&"b"));
/// ```
#[derive(Debug, Clone)]
pub struct SlotPool<K: PoolKey, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    order: Vec<K>,
    capacity: usize,
    stats: PoolStats,
    _key: PhantomData<K>,
}

impl<K: PoolKey, T> SlotPool<K, T> {
    /// Create an empty pool that holds at most `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        SlotPool {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            order: Vec::with_capacity(capacity),
            capacity,
            stats: PoolStats::default(),
            _key: PhantomData,
        }
    }

    /// Insert a value, returning its key, or `None` when the pool is full
    pub fn insert(&mut self, value: T) -> Option<K> {
        if self.order.len() >= self.capacity {
            self.stats.rejections += 1;
            return None;
        }

        let key = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.stats.reuses += 1;
            K::from_raw(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, value: Some(value) });
            self.stats.allocations += 1;
            K::from_raw(index, 0)
        };

        self.order.push(key);
        self.stats.peak_len = self.stats.peak_len.max(self.order.len());
        Some(key)
    }

    /// Remove the value behind `key`
    ///
    /// Returns `None` if the key is stale or was never issued by this pool.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index());

        // Preserve creation order of the survivors
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
        Some(value)
    }

    /// Get a reference to the value behind `key`
    pub fn get(&self, key: K) -> Option<&T> {
        let slot = self.slots.get(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Get a mutable reference to the value behind `key`
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    /// Borrow two distinct values mutably at once
    ///
    /// Returns `None` if either key is stale or both keys name the same slot.
    pub fn get2_mut(&mut self, a: K, b: K) -> Option<(&mut T, &mut T)> {
        let (ia, ib) = (a.index() as usize, b.index() as usize);
        if ia == ib || ia >= self.slots.len() || ib >= self.slots.len() {
            return None;
        }

        let (first, second) = if ia < ib {
            let (lo, hi) = self.slots.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        };

        if first.generation != a.generation() || second.generation != b.generation() {
            return None;
        }
        match (first.value.as_mut(), second.value.as_mut()) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    /// Check if `key` still resolves to a live value
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the pool holds no values
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maximum number of live values
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if another insertion would be refused
    pub fn is_full(&self) -> bool {
        self.order.len() >= self.capacity
    }

    /// Keys of live values in creation order
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Iterate over live values in creation order
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.order.iter().filter_map(move |&key| self.get(key).map(|value| (key, value)))
    }

    /// Iterate mutably over live values in slot order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    /// Parallel mutable iteration over live values
    #[cfg(feature = "parallel")]
    pub fn par_values_mut(&mut self) -> impl ParallelIterator<Item = &mut T> + '_
    where
        T: Send,
    {
        self.slots.par_iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    /// Remove every value, invalidating all outstanding keys
    pub fn clear(&mut self) -> Vec<T> {
        let keys = std::mem::take(&mut self.order);
        let mut drained = Vec::with_capacity(keys.len());
        for key in keys {
            let slot = &mut self.slots[key.index() as usize];
            if let Some(value) = slot.value.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(key.index());
                drained.push(value);
            }
        }
        drained
    }

    /// Current usage statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}
