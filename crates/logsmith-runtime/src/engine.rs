#![forbid(unsafe_code)]

//! The render engine: one context object that owns everything.
//!
//! [`RenderEngine`] holds the [`Dataset`], the [`ViewportState`], the
//! [`Renderer`] (and with it the slot pool and memo), the [`FrameScheduler`],
//! and the [`Surface`]. Hosts feed it signals and call [`RenderEngine::on_frame`]
//! once per display frame.
//!
//! # Signal flow
//!
//! ```text
//! scroll / resize / filter ──► update state ──► request_render
//!                                                    │
//! display frame ──► on_frame ──► begin_frame? ──► Renderer::render ──► Surface
//! ```
//!
//! # Usage
//!
//! ```
//! use logsmith_core::{Dataset, LogEntry, LogLevel};
//! use logsmith_render::HeadlessSurface;
//! use logsmith_runtime::{EngineConfig, RenderEngine};
//!
//! let data: Dataset = (0..1000)
//!     .map(|i| LogEntry::new(i, "2024-01-01T00:00:00Z", LogLevel::Info, format!("event #{i}")))
//!     .collect();
//! let mut engine = RenderEngine::new(data, HeadlessSurface::new(600.0), EngineConfig::default());
//! engine.render_now();
//!
//! engine.notify_scroll(3200.0);
//! let outcome = engine.on_frame().expect("a render was pending");
//! assert_eq!(outcome.window().range(), 100..129);
//! ```
//!
//! # Failure Modes
//!
//! | Input | Behavior |
//! |-------|----------|
//! | Negative or NaN scroll offset | Treated as 0 |
//! | Surface reports 0 extent | Fallback viewport extent is used |
//! | Filter matches nothing | Zero visible rows, every slot parked |
//! | Frame tick with nothing pending | `on_frame` returns `None` |

use logsmith_core::{Dataset, ViewportState};
use logsmith_render::{RenderOutcome, RenderWindow, Renderer, SlotPool, Surface};
use tracing::debug_span;

use crate::config::EngineConfig;
use crate::scheduler::FrameScheduler;

/// Owner of the dataset, viewport, renderer, scheduler, and surface.
#[derive(Debug)]
pub struct RenderEngine<S: Surface> {
    config: EngineConfig,
    dataset: Dataset,
    viewport: ViewportState,
    renderer: Renderer,
    scheduler: FrameScheduler,
    surface: S,
    last_window: Option<RenderWindow>,
}

impl<S: Surface> RenderEngine<S> {
    /// Build an engine around `dataset` and `surface`.
    ///
    /// Nothing is rendered yet; call [`render_now`](Self::render_now) for the
    /// first paint.
    pub fn new(dataset: Dataset, surface: S, config: EngineConfig) -> Self {
        let viewport = ViewportState::new(surface.scroll_offset(), surface.viewport_extent());
        tracing::debug!(
            entries = dataset.len(),
            viewport_extent = viewport.viewport_extent(),
            "render engine created"
        );
        Self {
            renderer: Renderer::new(config.geometry()),
            config,
            dataset,
            viewport,
            scheduler: FrameScheduler::new(),
            surface,
            last_window: None,
        }
    }

    /// Apply a new filter predicate.
    ///
    /// Scrolls back to the top and forces the next pass to rebind every slot.
    pub fn set_filter_text(&mut self, text: &str) {
        let matched = self.dataset.set_filter(text).len();
        tracing::trace!(matched, "scroll reset for new view");

        self.viewport.set_scroll_offset(0.0);
        self.surface.set_scroll_offset(0.0);
        self.renderer.invalidate();
        self.request_render();
    }

    /// Record a scroll signal from the surface.
    pub fn notify_scroll(&mut self, offset: f64) {
        self.viewport.set_scroll_offset(offset);
        self.request_render();
    }

    /// Record a resize signal; the new extent is read from the surface.
    pub fn notify_resize(&mut self) {
        let extent = self.surface.viewport_extent();
        if self.viewport.set_viewport_extent(extent) {
            tracing::debug!(extent, "viewport resized");
        }
        self.request_render();
    }

    /// Scroll by `delta` rows (negative scrolls up).
    pub fn scroll_by_rows(&mut self, delta: isize) {
        let offset = self.viewport.scroll_offset() + delta as f64 * self.renderer.row_extent();
        self.scroll_surface_to(offset);
    }

    /// Scroll by `delta` viewport-sized pages.
    pub fn page(&mut self, delta: isize) {
        let rows = self.rows_per_page() as isize;
        self.scroll_by_rows(delta.saturating_mul(rows));
    }

    /// Scroll to the first row.
    pub fn scroll_to_start(&mut self) {
        self.scroll_surface_to(0.0);
    }

    /// Scroll so the last row sits at the bottom of the viewport.
    pub fn scroll_to_end(&mut self) {
        let end = self.max_scroll_offset();
        self.scroll_surface_to(end);
    }

    /// Mark a render as pending for the next frame.
    pub fn request_render(&mut self) {
        if self.scheduler.request_render() {
            tracing::trace!("render scheduled");
        }
    }

    /// Display frame callback. Renders if anything is pending.
    pub fn on_frame(&mut self) -> Option<RenderOutcome> {
        let _span = debug_span!("logsmith.frame").entered();
        if !self.scheduler.begin_frame() {
            return None;
        }
        Some(self.render_now())
    }

    /// Render immediately, bypassing the scheduler.
    pub fn render_now(&mut self) -> RenderOutcome {
        let outcome = self
            .renderer
            .render(&self.dataset, &self.viewport, &mut self.surface);
        self.last_window = Some(outcome.window());
        outcome
    }

    /// The dataset and its active view.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// The surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface, mutably. Call [`notify_resize`](Self::notify_resize)
    /// after changing its size.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The slot pool.
    #[must_use]
    pub fn pool(&self) -> &SlotPool {
        self.renderer.pool()
    }

    /// The frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Window of the most recent pass.
    #[must_use]
    pub fn last_window(&self) -> Option<RenderWindow> {
        self.last_window
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Largest offset that keeps the viewport full.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        let content = self.dataset.view_len() as f64 * self.renderer.row_extent();
        self.viewport
            .max_scroll_offset(content, self.config.fallback_viewport_extent)
    }

    /// Whole rows that fit in the viewport, at least one.
    #[must_use]
    pub fn rows_per_page(&self) -> usize {
        let extent = self
            .viewport
            .effective_extent(self.config.fallback_viewport_extent);
        ((extent / self.renderer.row_extent()).floor() as usize).max(1)
    }

    fn scroll_surface_to(&mut self, offset: f64) {
        let offset = offset.clamp(0.0, self.max_scroll_offset());
        self.surface.set_scroll_offset(offset);
        self.notify_scroll(offset);
    }
}
