#![forbid(unsafe_code)]

//! Viewport state fed by scroll and resize signals.
//!
//! All inputs are clamped rather than rejected: a negative, NaN, or infinite
//! offset becomes `0.0`, and so does a degenerate extent. Last writer wins.

/// Clamp a scroll offset to a finite, non-negative value.
#[inline]
#[must_use]
pub fn sanitize_offset(offset: f64) -> f64 {
    if offset.is_finite() && offset > 0.0 {
        offset
    } else {
        0.0
    }
}

/// Clamp an extent to a finite, non-negative value.
#[inline]
#[must_use]
pub fn sanitize_extent(extent: f64) -> f64 {
    sanitize_offset(extent)
}

/// Scroll position and visible size along the list axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportState {
    scroll_offset: f64,
    viewport_extent: f64,
}

impl ViewportState {
    /// Create a viewport state, sanitizing both values.
    #[must_use]
    pub fn new(scroll_offset: f64, viewport_extent: f64) -> Self {
        Self {
            scroll_offset: sanitize_offset(scroll_offset),
            viewport_extent: sanitize_extent(viewport_extent),
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Last reported viewport extent (0 before first layout).
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Viewport extent, or `fallback` when nothing has been laid out yet.
    #[must_use]
    pub fn effective_extent(&self, fallback: f64) -> f64 {
        if self.viewport_extent > 0.0 {
            self.viewport_extent
        } else {
            sanitize_extent(fallback)
        }
    }

    /// Record a scroll signal. Returns `true` if the offset changed.
    pub fn set_scroll_offset(&mut self, offset: f64) -> bool {
        let offset = sanitize_offset(offset);
        let changed = offset != self.scroll_offset;
        self.scroll_offset = offset;
        changed
    }

    /// Record a resize signal. Returns `true` if the extent changed.
    pub fn set_viewport_extent(&mut self, extent: f64) -> bool {
        let extent = sanitize_extent(extent);
        let changed = extent != self.viewport_extent;
        self.viewport_extent = extent;
        changed
    }

    /// Largest scroll offset that still fills the viewport.
    #[must_use]
    pub fn max_scroll_offset(&self, content_extent: f64, fallback: f64) -> f64 {
        (sanitize_extent(content_extent) - self.effective_extent(fallback)).max(0.0)
    }
}
