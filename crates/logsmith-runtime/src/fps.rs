#![forbid(unsafe_code)]

//! Frames-per-second readout.
//!
//! Keeps the instants of the frames rendered in the last second. The window
//! is bounded by the frame rate, so memory stays constant.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Sliding one-second frame counter.
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    frames: VecDeque<Instant>,
    last_interval: Option<Duration>,
}

impl FpsMeter {
    /// An empty meter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rendered frame at `now`.
    pub fn record(&mut self, now: Instant) {
        if let Some(&prev) = self.frames.back() {
            self.last_interval = now.checked_duration_since(prev);
        }
        self.frames.push_back(now);
        self.evict(now);
    }

    /// Frames rendered in the second ending at `now`.
    #[must_use]
    pub fn fps(&mut self, now: Instant) -> usize {
        self.evict(now);
        self.frames.len()
    }

    /// Gap between the two most recent frames.
    #[must_use]
    pub fn last_interval(&self) -> Option<Duration> {
        self.last_interval
    }

    fn evict(&mut self, now: Instant) {
        while let Some(&front) = self.frames.front() {
            match now.checked_duration_since(front) {
                Some(age) if age >= WINDOW => {
                    self.frames.pop_front();
                }
                _ => break,
            }
        }
    }
}
