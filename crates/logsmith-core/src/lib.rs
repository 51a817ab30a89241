#![forbid(unsafe_code)]

//! Core: log entry model, dataset filtering, and viewport state.
//!
//! # Role in LogSmith
//! `logsmith-core` holds the data side of the virtualized log viewer. The
//! [`dataset::Dataset`] owns every [`entry::LogEntry`] for the lifetime of the
//! process and exposes the currently active [`dataset::FilteredView`]. The
//! [`viewport::ViewportState`] tracks scroll offset and viewport extent as fed
//! by scroll and resize signals.
//!
//! Rendering lives in `logsmith-render`; frame scheduling and the engine that
//! ties both together live in `logsmith-runtime`.

pub mod dataset;
pub mod entry;
pub mod viewport;

pub use dataset::{Dataset, FilterQuery, FilteredView};
pub use entry::{LogEntry, LogLevel, ParseLevelError};
pub use viewport::{ViewportState, sanitize_extent, sanitize_offset};
