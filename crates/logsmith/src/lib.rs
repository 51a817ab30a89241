#![forbid(unsafe_code)]

//! LogSmith public facade crate.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a prelude for day-to-day use.

mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use logsmith_core::{
    Dataset, FilterQuery, FilteredView, LogEntry, LogLevel, ParseLevelError, ViewportState,
};

// --- Render re-exports -----------------------------------------------------

pub use logsmith_render::{
    HeadlessSurface, Placement, PoolSlot, RenderGeometry, RenderOutcome, RenderWindow, Renderer,
    SlotDirty, SlotFlags, SlotPool, Surface, compute_window,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use logsmith_runtime::{
    EngineConfig, FpsMeter, FrameClock, FrameScheduler, RenderEngine, SchedulerStats,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Dataset, Error, LogEntry, LogLevel, PoolSlot, RenderOutcome, RenderWindow, Result,
        SlotDirty, Surface, ViewportState,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{EngineConfig, FpsMeter, FrameClock, RenderEngine};

    pub use crate::{core, render};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use logsmith_core as core;
pub use logsmith_render as render;
#[cfg(feature = "runtime")]
pub use logsmith_runtime as runtime;
