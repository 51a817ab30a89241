#![forbid(unsafe_code)]

//! Row renderer: window, pool, and slot binding.
//!
//! Each pass:
//!
//! 1. Computes the [`RenderWindow`] from the filtered row count and viewport.
//! 2. Writes the content extent to the surface if it changed.
//! 3. Grows the [`SlotPool`] to `required_slots`.
//! 4. Returns early if the window matches the [`RenderMemo`].
//! 5. Binds slot `j` to view row `start + j`, parking every slot that has no
//!    row this pass, and commits only the fields that changed.
//!
//! Cost per pass is bounded by the pool size, never by the dataset size.
//!
//! # Invariants
//!
//! - A slot is bound to at most one row per pass.
//! - Rendering twice with unchanged inputs performs no surface writes.
//! - Slots beyond `required_slots` (left over from a taller viewport) are
//!   parked, so a shrinking viewport never leaves stale visible rows.

use logsmith_core::{Dataset, ViewportState};
use tracing::debug_span;

use crate::pool::SlotPool;
use crate::surface::Surface;
use crate::window::{RenderWindow, compute_window, sanitize_row_extent};

/// Fixed geometry shared by every pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderGeometry {
    /// Extent of one row along the scroll axis.
    pub row_extent: f64,
    /// Extra rows bound beyond the viewport.
    pub buffer_rows: usize,
    /// Viewport extent assumed before the surface reports one.
    pub fallback_viewport_extent: f64,
}

impl Default for RenderGeometry {
    fn default() -> Self {
        Self {
            row_extent: 32.0,
            buffer_rows: 10,
            fallback_viewport_extent: 600.0,
        }
    }
}

/// What the last successful pass rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderMemo {
    /// First bound row.
    pub start_index: usize,
    /// One past the last bound row.
    pub end_index: usize,
    /// `required_slots` of the pass.
    pub viewport_bucket: usize,
    /// Content extent written to the surface.
    pub content_extent: f64,
}

impl RenderMemo {
    fn from_window(window: &RenderWindow) -> Self {
        Self {
            start_index: window.start_index,
            end_index: window.end_index,
            viewport_bucket: window.required_slots,
            content_extent: window.content_extent,
        }
    }

    fn same_rows(&self, window: &RenderWindow) -> bool {
        self.start_index == window.start_index
            && self.end_index == window.end_index
            && self.viewport_bucket == window.required_slots
    }
}

/// Result of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderOutcome {
    /// The window matched the memo; no slot was touched.
    Skipped {
        /// Window of the pass.
        window: RenderWindow,
    },
    /// Slots were rebound.
    Rendered {
        /// Window of the pass.
        window: RenderWindow,
        /// Slots committed to the surface.
        slots_written: usize,
    },
}

impl RenderOutcome {
    /// Window computed by the pass.
    #[must_use]
    pub fn window(&self) -> RenderWindow {
        match self {
            Self::Skipped { window } | Self::Rendered { window, .. } => *window,
        }
    }

    /// Whether the per-row loop was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Slots committed to the surface.
    #[must_use]
    pub fn slots_written(&self) -> usize {
        match self {
            Self::Skipped { .. } => 0,
            Self::Rendered { slots_written, .. } => *slots_written,
        }
    }
}

/// Binds the visible slice of a [`Dataset`] view to pooled slots.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    geometry: RenderGeometry,
    pool: SlotPool,
    memo: Option<RenderMemo>,
    passes: u64,
}

impl Renderer {
    /// A renderer with an empty pool.
    #[must_use]
    pub fn new(geometry: RenderGeometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    /// Geometry in use.
    #[must_use]
    pub fn geometry(&self) -> RenderGeometry {
        self.geometry
    }

    /// Row extent after sanitizing.
    #[must_use]
    pub fn row_extent(&self) -> f64 {
        sanitize_row_extent(self.geometry.row_extent)
    }

    /// The slot pool.
    #[must_use]
    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    /// The last successful pass, if still valid.
    #[must_use]
    pub fn memo(&self) -> Option<RenderMemo> {
        self.memo
    }

    /// Completed passes, skipped ones included.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Forget the memo so the next pass rebinds every slot.
    ///
    /// Needed whenever the view is replaced: the same row range may now map
    /// to different entries.
    pub fn invalidate(&mut self) {
        self.memo = None;
    }

    /// Window the next pass would use.
    #[must_use]
    pub fn window_for(&self, total: usize, viewport: &ViewportState) -> RenderWindow {
        compute_window(
            total,
            viewport.scroll_offset(),
            viewport.effective_extent(self.geometry.fallback_viewport_extent),
            self.geometry.row_extent,
            self.geometry.buffer_rows,
        )
    }

    /// Render the active view of `dataset` into `surface`.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        dataset: &Dataset,
        viewport: &ViewportState,
        surface: &mut S,
    ) -> RenderOutcome {
        let total = dataset.view_len();
        let window = self.window_for(total, viewport);
        let _span = debug_span!(
            "logsmith.render",
            total,
            start = window.start_index,
            end = window.end_index,
            slots = window.required_slots
        )
        .entered();

        let recorded_extent = self
            .memo
            .map_or_else(|| surface.content_extent(), |memo| memo.content_extent);
        if recorded_extent != window.content_extent {
            surface.set_content_extent(window.content_extent);
        }

        self.pool.ensure_capacity(window.required_slots, surface);
        self.passes += 1;

        if self.memo.is_some_and(|memo| memo.same_rows(&window)) {
            self.memo = Some(RenderMemo::from_window(&window));
            return RenderOutcome::Skipped { window };
        }

        let row_extent = self.row_extent();
        let mut slots_written = 0;
        for j in 0..self.pool.capacity() {
            let row = window.start_index + j;
            let entry = if j < window.required_slots && row < window.end_index {
                dataset.view_entry(row)
            } else {
                None
            };

            let slot = self.pool.slot_mut(j);
            let dirty = match entry {
                Some(entry) => slot.bind(entry, RenderWindow::row_offset(row, row_extent)),
                None => slot.park(),
            };
            if !dirty.is_empty() {
                surface.commit_slot(j, slot, dirty);
                slots_written += 1;
            }
        }

        self.memo = Some(RenderMemo::from_window(&window));
        tracing::trace!(slots_written, "render pass complete");
        RenderOutcome::Rendered {
            window,
            slots_written,
        }
    }
}
