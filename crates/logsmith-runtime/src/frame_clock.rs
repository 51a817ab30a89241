#![forbid(unsafe_code)]

//! Fixed-rate display frame signal.
//!
//! Terminals have no vsync callback, so the event loop polls input with a
//! timeout derived from [`FrameClock::time_until_next_frame`] and calls
//! [`FrameClock::tick`] after each poll. A tick fires at most once per frame
//! interval no matter how often it is polled.

use std::time::{Duration, Instant};

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier).unwrap_or(Duration::ZERO)
}

/// Frame interval for `fps`, clamped to at least 1 fps.
#[must_use]
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Fixed-interval frame ticker.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_frame: Option<Instant>,
    frames: u64,
}

impl FrameClock {
    /// A clock ticking every `interval`. The first tick fires immediately.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: None,
            frames: 0,
        }
    }

    /// A clock at `fps` frames per second.
    #[must_use]
    pub fn with_fps(fps: u32) -> Self {
        Self::new(frame_interval(fps))
    }

    /// Frame interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks fired so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time left until the next tick may fire.
    #[must_use]
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        match self.last_frame {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(duration_since_or_zero(now, last)),
        }
    }

    /// Fire a tick if a full interval has elapsed since the previous one.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.time_until_next_frame(now) > Duration::ZERO {
            return false;
        }
        self.last_frame = Some(now);
        self.frames += 1;
        true
    }
}
