#![forbid(unsafe_code)]

//! Frame-coalesced render scheduling.
//!
//! Scroll, resize, and filter signals can arrive many times between two
//! display frames. [`FrameScheduler`] collapses them into a single pending
//! flag so at most one render runs per frame.
//!
//! # Usage
//!
//! ```
//! use logsmith_runtime::scheduler::FrameScheduler;
//!
//! let mut scheduler = FrameScheduler::new();
//!
//! // Ten signals before the next frame...
//! for _ in 0..10 {
//!     scheduler.request_render();
//! }
//!
//! // ...produce exactly one render.
//! assert!(scheduler.begin_frame());
//! assert!(!scheduler.begin_frame());
//! ```
//!
//! # Invariants
//!
//! - `begin_frame` returns `true` at most once per idle -> pending transition.
//! - The pending flag is cleared before the render runs, so a request made
//!   during the render schedules exactly one later render and is never lost.
//!
//! # Thread Safety
//!
//! Not thread-safe. Signals are delivered on the same context as the render.

/// Scheduling counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Every `request_render` call.
    pub requests: u64,
    /// Requests folded into an already pending render.
    pub coalesced: u64,
    /// Frames that ran a render.
    pub frames_rendered: u64,
    /// Frame ticks with nothing pending.
    pub idle_frames: u64,
}

/// Single-slot pending flag with counters.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: bool,
    stats: SchedulerStats,
}

impl FrameScheduler {
    /// An idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a render as pending.
    ///
    /// Returns `true` if this call moved the scheduler from idle to pending,
    /// i.e. the caller should make sure a frame callback is armed.
    pub fn request_render(&mut self) -> bool {
        self.stats.requests += 1;
        if self.pending {
            self.stats.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    /// Whether a render is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Called once per display frame.
    ///
    /// Clears the pending flag and returns whether a render must run now.
    pub fn begin_frame(&mut self) -> bool {
        if !self.pending {
            self.stats.idle_frames += 1;
            return false;
        }
        self.pending = false;
        self.stats.frames_rendered += 1;
        true
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
