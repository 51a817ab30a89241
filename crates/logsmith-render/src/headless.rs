#![forbid(unsafe_code)]

//! In-memory surface for tests and benchmarks.
//!
//! [`HeadlessSurface`] mirrors every committed slot field and counts writes,
//! so tests can assert both on what is shown and on how much work a render
//! pass did. Only the fields flagged dirty are copied into the mirror, which
//! makes a wrong dirty set show up as stale mirror content.

use crate::slot::{PoolSlot, SlotDirty};
use crate::surface::Surface;

/// Write counters accumulated by a [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Number of `attach_slots` calls.
    pub attach_calls: u32,
    /// Slots appended across all attach calls.
    pub slots_attached: usize,
    /// Number of `commit_slot` calls.
    pub slot_commits: u64,
    /// Individual fields written across all commits.
    pub field_writes: u64,
    /// Content extent writes.
    pub extent_writes: u64,
    /// Scroll position writes.
    pub scroll_writes: u64,
}

impl WriteStats {
    /// Every observable write.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.attach_calls) + self.slot_commits + self.extent_writes + self.scroll_writes
    }
}

/// A surface that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    viewport_extent: f64,
    content_extent: f64,
    scroll_offset: f64,
    slots: Vec<PoolSlot>,
    stats: WriteStats,
}

impl HeadlessSurface {
    /// A surface already laid out at `viewport_extent`.
    #[must_use]
    pub fn new(viewport_extent: f64) -> Self {
        Self {
            viewport_extent,
            ..Self::default()
        }
    }

    /// Simulate a layout change.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = extent;
    }

    /// Mirrored slots in pool order.
    #[must_use]
    pub fn slots(&self) -> &[PoolSlot] {
        &self.slots
    }

    /// Mirrored slot at `index`.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&PoolSlot> {
        self.slots.get(index)
    }

    /// Visible slots ordered by offset.
    #[must_use]
    pub fn visible_slots(&self) -> Vec<&PoolSlot> {
        let mut visible: Vec<&PoolSlot> = self.slots.iter().filter(|s| s.is_visible()).collect();
        visible.sort_by(|a, b| a.placement().offset.total_cmp(&b.placement().offset));
        visible
    }

    /// Messages of the visible slots, top to bottom.
    #[must_use]
    pub fn visible_messages(&self) -> Vec<String> {
        self.visible_slots()
            .into_iter()
            .map(|s| s.message().to_owned())
            .collect()
    }

    /// Write counters so far.
    #[must_use]
    pub fn stats(&self) -> WriteStats {
        self.stats
    }

    /// Zero the write counters.
    pub fn reset_stats(&mut self) {
        self.stats = WriteStats::default();
    }
}

impl Surface for HeadlessSurface {
    fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    fn content_extent(&self) -> f64 {
        self.content_extent
    }

    fn set_content_extent(&mut self, extent: f64) {
        self.content_extent = extent;
        self.stats.extent_writes += 1;
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.stats.scroll_writes += 1;
    }

    fn attach_slots(&mut self, first: usize, slots: &[PoolSlot]) {
        debug_assert_eq!(first, self.slots.len(), "slots must be appended in order");
        self.slots.extend_from_slice(slots);
        self.stats.attach_calls += 1;
        self.stats.slots_attached += slots.len();
    }

    fn commit_slot(&mut self, index: usize, slot: &PoolSlot, dirty: SlotDirty) {
        self.slots[index].apply(slot, dirty);
        self.stats.slot_commits += 1;
        self.stats.field_writes += u64::from(dirty.bits().count_ones());
    }
}
