#![forbid(unsafe_code)]

//! Window calculation: scroll offset to visible row range.
//!
//! [`compute_window`] is a pure function. Given the number of rows in the
//! active view, the scroll offset, the viewport extent, the fixed row extent,
//! and a number of buffer rows, it returns the slice of rows to bind and the
//! number of pool slots the pass needs.
//!
//! # Invariants
//!
//! - `start_index <= end_index <= total`.
//! - `required_slots` depends on geometry only, never on `total`, so the pool
//!   is sized for the worst-case viewport rather than the current data.
//! - `start_index` is clamped to `total - required_slots` so the window keeps
//!   its length except at the tail of a short view.
//! - `required_slots <= MAX_SLOTS`.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `total == 0` | Empty window at `0..0` |
//! | `viewport_extent <= 0` | One row of viewport, plus buffer |
//! | `row_extent <= 0` or non-finite | [`MIN_ROW_EXTENT`] |
//! | negative or non-finite offset | Offset `0` |
//! | rows in view plus buffer above [`MAX_SLOTS`] | Capped at [`MAX_SLOTS`] |

use std::ops::Range;

use logsmith_core::{sanitize_extent, sanitize_offset};

/// Smallest row extent used when the configured one is degenerate.
pub const MIN_ROW_EXTENT: f64 = 1.0;

/// Upper bound on slots a single pass may ask the pool for.
pub const MAX_SLOTS: usize = 4096;

/// Clamp a row extent to something usable as a divisor.
#[inline]
#[must_use]
pub fn sanitize_row_extent(row_extent: f64) -> f64 {
    if row_extent.is_finite() && row_extent > 0.0 {
        row_extent
    } else {
        MIN_ROW_EXTENT
    }
}

/// Rows to bind for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderWindow {
    /// First view row bound to slot 0.
    pub start_index: usize,
    /// One past the last bound view row.
    pub end_index: usize,
    /// Slots the pool must hold for this geometry.
    pub required_slots: usize,
    /// Total scrollable extent: `max(total * row_extent, viewport_extent)`.
    pub content_extent: f64,
}

impl RenderWindow {
    /// Number of rows actually bound.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    /// Whether no rows are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Bound rows as a range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    /// Whether view row `row` is bound this pass.
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.range().contains(&row)
    }

    /// Pool slot bound to view row `row`, if any.
    #[must_use]
    pub fn slot_for(&self, row: usize) -> Option<usize> {
        self.contains(row).then(|| row - self.start_index)
    }

    /// Offset of view row `row` along the scroll axis.
    #[must_use]
    pub fn row_offset(row: usize, row_extent: f64) -> f64 {
        row as f64 * sanitize_row_extent(row_extent)
    }
}

/// Map a scroll position to the rows that must be bound.
///
/// 1. `rows_in_view = min(ceil(viewport_extent / row_extent) + buffer, MAX_SLOTS)`
/// 2. `start = floor(scroll_offset / row_extent)` clamped to
///    `[0, max(0, total - rows_in_view)]`
/// 3. `end = min(start + rows_in_view, total)`
#[must_use]
pub fn compute_window(
    total: usize,
    scroll_offset: f64,
    viewport_extent: f64,
    row_extent: f64,
    buffer: usize,
) -> RenderWindow {
    let row_extent = sanitize_row_extent(row_extent);
    let viewport_extent = match sanitize_extent(viewport_extent) {
        extent if extent > 0.0 => extent,
        _ => row_extent,
    };

    // Float-to-int casts saturate, so absurd geometry cannot wrap.
    let rows_in_view = ((viewport_extent / row_extent).ceil() as usize)
        .saturating_add(buffer)
        .min(MAX_SLOTS);
    let requested_start = (sanitize_offset(scroll_offset) / row_extent).floor() as usize;

    let start_index = requested_start.min(total.saturating_sub(rows_in_view));
    let end_index = start_index.saturating_add(rows_in_view).min(total);

    RenderWindow {
        start_index,
        end_index,
        required_slots: rows_in_view,
        content_extent: (total as f64 * row_extent).max(viewport_extent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_dataset_mid_scroll() {
        let w = compute_window(100_000, 3200.0, 600.0, 32.0, 10);
        assert_eq!(w.required_slots, 29);
        assert_eq!(w.start_index, 100);
        assert_eq!(w.end_index, 129);
        assert_eq!(w.len(), 29);
        assert_eq!(w.content_extent, 3_200_000.0);
    }

    #[test]
    fn short_dataset_clamps_to_zero() {
        let w = compute_window(5, 0.0, 600.0, 32.0, 10);
        assert_eq!(w.required_slots, 29);
        assert_eq!(w.start_index, 0);
        assert_eq!(w.end_index, 5);
        assert_eq!(w.content_extent, 600.0);
    }

    #[test]
    fn short_dataset_ignores_stale_scroll() {
        let w = compute_window(5, 10_000.0, 600.0, 32.0, 10);
        assert_eq!(w.range(), 0..5);
    }

    #[test]
    fn empty_view() {
        let w = compute_window(0, 500.0, 600.0, 32.0, 10);
        assert_eq!(w.start_index, 0);
        assert_eq!(w.end_index, 0);
        assert!(w.is_empty());
        assert_eq!(w.required_slots, 29);
    }

    #[test]
    fn tail_keeps_full_window() {
        let w = compute_window(1000, 1_000_000.0, 600.0, 32.0, 10);
        assert_eq!(w.start_index, 1000 - 29);
        assert_eq!(w.end_index, 1000);
        assert_eq!(w.len(), w.required_slots);
    }

    #[test]
    fn zero_viewport_uses_one_row() {
        let w = compute_window(100, 0.0, 0.0, 32.0, 10);
        assert_eq!(w.required_slots, 11);
        assert_eq!(w.range(), 0..11);
    }

    #[test]
    fn degenerate_row_extent() {
        let w = compute_window(100, 3.0, 10.0, 0.0, 0);
        assert_eq!(w.required_slots, 10);
        assert_eq!(w.start_index, 3);
        let w = compute_window(100, 3.0, 10.0, f64::NAN, 0);
        assert_eq!(w.start_index, 3);
    }

    #[test]
    fn tiny_row_extent_caps_slots() {
        let w = compute_window(100, 50.0, 600.0, 1e-300, 10);
        assert_eq!(w.required_slots, MAX_SLOTS);
        assert_eq!(w.range(), 0..100);
        assert_eq!(w.content_extent, 600.0);
    }

    #[test]
    fn huge_buffer_caps_slots() {
        let w = compute_window(100_000, 3200.0, 600.0, 32.0, usize::MAX);
        assert_eq!(w.required_slots, MAX_SLOTS);
        assert_eq!(w.start_index, 100);
        assert_eq!(w.len(), MAX_SLOTS);
    }

    #[test]
    fn negative_offset_is_top() {
        let w = compute_window(100, -64.0, 64.0, 32.0, 0);
        assert_eq!(w.range(), 0..2);
    }

    #[test]
    fn slot_mapping() {
        let w = compute_window(100_000, 3200.0, 600.0, 32.0, 10);
        assert_eq!(w.slot_for(100), Some(0));
        assert_eq!(w.slot_for(128), Some(28));
        assert_eq!(w.slot_for(129), None);
        assert_eq!(w.slot_for(99), None);
        assert_eq!(RenderWindow::row_offset(100, 32.0), 3200.0);
    }

    #[test]
    fn partial_row_rounds_down() {
        let w = compute_window(1000, 3231.9, 600.0, 32.0, 10);
        assert_eq!(w.start_index, 100);
    }
}
