#![forbid(unsafe_code)]

//! Grow-only arena of row slots.
//!
//! The pool is sized to the largest window ever requested, not to the
//! dataset. Growth constructs slots once and hands them to the surface in a
//! single `attach_slots` call; nothing is ever removed, so allocation cost is
//! O(peak pool size) over the whole session.
//!
//! # Invariants
//!
//! - `capacity()` never decreases.
//! - After `ensure_capacity(n)`, `capacity() >= n`.
//! - Slot `j` keeps its identity (pool index) for the life of the pool.

use crate::slot::PoolSlot;
use crate::surface::Surface;

/// Owner of every [`PoolSlot`].
#[derive(Debug, Clone, Default)]
pub struct SlotPool {
    slots: Vec<PoolSlot>,
    growths: u32,
}

impl SlotPool {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots owned.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot was ever created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How many times the pool has grown.
    #[must_use]
    pub fn growths(&self) -> u32 {
        self.growths
    }

    /// Grow to at least `n` slots, attaching new ones to `surface`.
    ///
    /// Returns the number of slots added (0 when `n <= capacity()`).
    pub fn ensure_capacity<S: Surface + ?Sized>(&mut self, n: usize, surface: &mut S) -> usize {
        let first = self.slots.len();
        if n <= first {
            return 0;
        }

        self.slots.resize_with(n, PoolSlot::new);
        surface.attach_slots(first, &self.slots[first..]);
        self.growths += 1;

        tracing::debug!(from = first, to = n, "slot pool grew");
        n - first
    }

    /// Slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`. Callers must grow the pool first.
    #[must_use]
    pub fn slot(&self, index: usize) -> &PoolSlot {
        debug_assert!(index < self.slots.len(), "slot {index} beyond pool capacity");
        &self.slots[index]
    }

    /// Mutable slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`. Callers must grow the pool first.
    pub fn slot_mut(&mut self, index: usize) -> &mut PoolSlot {
        debug_assert!(index < self.slots.len(), "slot {index} beyond pool capacity");
        &mut self.slots[index]
    }

    /// Iterate slots in pool order.
    pub fn iter(&self) -> std::slice::Iter<'_, PoolSlot> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessSurface;

    #[test]
    fn grows_and_attaches_once() {
        let mut pool = SlotPool::new();
        let mut surface = HeadlessSurface::new(100.0);
        assert_eq!(pool.ensure_capacity(29, &mut surface), 29);
        assert_eq!(pool.capacity(), 29);
        assert_eq!(surface.stats().attach_calls, 1);
        assert_eq!(surface.slots().len(), 29);
        assert!(pool.iter().all(PoolSlot::is_parked));
    }

    #[test]
    fn smaller_request_is_noop() {
        let mut pool = SlotPool::new();
        let mut surface = HeadlessSurface::new(100.0);
        pool.ensure_capacity(10, &mut surface);
        assert_eq!(pool.ensure_capacity(4, &mut surface), 0);
        assert_eq!(pool.ensure_capacity(10, &mut surface), 0);
        assert_eq!(pool.capacity(), 10);
        assert_eq!(pool.growths(), 1);
        assert_eq!(surface.stats().attach_calls, 1);
    }

    #[test]
    fn growth_appends_only_new_slots() {
        let mut pool = SlotPool::new();
        let mut surface = HeadlessSurface::new(100.0);
        pool.ensure_capacity(3, &mut surface);
        assert_eq!(pool.ensure_capacity(5, &mut surface), 2);
        assert_eq!(surface.stats().slots_attached, 5);
        assert_eq!(surface.stats().attach_calls, 2);
        assert_eq!(pool.growths(), 2);
    }

    #[test]
    #[should_panic]
    fn indexing_past_capacity_panics() {
        let pool = SlotPool::new();
        let _ = pool.slot(0);
    }
}
