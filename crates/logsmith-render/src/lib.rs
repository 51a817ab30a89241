#![forbid(unsafe_code)]

//! Render kernel: windowing, slot pooling, and row binding.
//!
//! # Role in LogSmith
//! `logsmith-render` turns a filtered view plus a scroll position into writes
//! against a [`Surface`]. It never creates a visual element per data row:
//! a grow-only [`SlotPool`] holds as many slots as the tallest window seen so
//! far, and the [`Renderer`] rebinds them in place.
//!
//! # Primary responsibilities
//! - **Window**: [`compute_window`] maps scroll offset to a row range.
//! - **Slots**: [`PoolSlot`] with compare-before-write setters.
//! - **Pool**: [`SlotPool`] growth and index-based access.
//! - **Renderer**: memoized passes that skip unchanged windows.
//! - **Headless**: [`HeadlessSurface`] for tests and benches.

pub mod headless;
pub mod pool;
pub mod renderer;
pub mod slot;
pub mod surface;
pub mod window;

pub use headless::{HeadlessSurface, WriteStats};
pub use pool::SlotPool;
pub use renderer::{RenderGeometry, RenderMemo, RenderOutcome, Renderer};
pub use slot::{PARKED_OFFSET, Placement, PoolSlot, SlotDirty, SlotFlags};
pub use surface::Surface;
pub use window::{MAX_SLOTS, MIN_ROW_EXTENT, RenderWindow, compute_window, sanitize_row_extent};
