#![forbid(unsafe_code)]

//! Runtime: frame scheduling and the render engine.
//!
//! # Role in LogSmith
//! `logsmith-runtime` wires the data side (`logsmith-core`) to the render
//! kernel (`logsmith-render`). Signals update state immediately; rendering
//! happens at most once per display frame.
//!
//! # Primary responsibilities
//! - **FrameScheduler**: coalesces render requests between frames.
//! - **FrameClock**: fixed-rate frame signal for hosts without vsync.
//! - **RenderEngine**: owns dataset, viewport, pool, and surface.
//! - **EngineConfig**: geometry and frame rate with env overrides.
//! - **FpsMeter**: frame rate readout for status lines.

pub mod config;
pub mod engine;
pub mod fps;
pub mod frame_clock;
pub mod scheduler;

pub use config::EngineConfig;
pub use engine::RenderEngine;
pub use fps::FpsMeter;
pub use frame_clock::{FrameClock, frame_interval};
pub use scheduler::{FrameScheduler, SchedulerStats};
