#![forbid(unsafe_code)]

//! The drawing surface the renderer writes into.
//!
//! A [`Surface`] is whatever actually shows rows: a terminal, a retained
//! scene graph, or the [`HeadlessSurface`](crate::headless::HeadlessSurface)
//! used in tests. The renderer never asks a surface to create or destroy a
//! row per data entry. It appends pool slots once, then commits field-level
//! changes to existing slots by index.

use crate::slot::{PoolSlot, SlotDirty};

/// Operations the renderer needs from its host.
pub trait Surface {
    /// Visible size along the scroll axis. `0.0` before first layout.
    fn viewport_extent(&self) -> f64;

    /// Current scrollable extent of the content area.
    fn content_extent(&self) -> f64;

    /// Set the scrollable extent of the content area.
    fn set_content_extent(&mut self, extent: f64);

    /// Current scroll position.
    fn scroll_offset(&self) -> f64;

    /// Move the scroll position (used to return to the top after a filter).
    fn set_scroll_offset(&mut self, offset: f64);

    /// Append newly constructed slots, starting at pool index `first`.
    ///
    /// Called once per pool growth. Slots are never detached.
    fn attach_slots(&mut self, first: usize, slots: &[PoolSlot]);

    /// Apply the fields of `slot` flagged in `dirty` to slot `index`.
    fn commit_slot(&mut self, index: usize, slot: &PoolSlot, dirty: SlotDirty);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn viewport_extent(&self) -> f64 {
        (**self).viewport_extent()
    }

    fn content_extent(&self) -> f64 {
        (**self).content_extent()
    }

    fn set_content_extent(&mut self, extent: f64) {
        (**self).set_content_extent(extent);
    }

    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        (**self).set_scroll_offset(offset);
    }

    fn attach_slots(&mut self, first: usize, slots: &[PoolSlot]) {
        (**self).attach_slots(first, slots);
    }

    fn commit_slot(&mut self, index: usize, slot: &PoolSlot, dirty: SlotDirty) {
        (**self).commit_slot(index, slot, dirty);
    }
}
