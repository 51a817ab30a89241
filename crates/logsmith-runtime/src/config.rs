#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Defaults match a 32-unit row in a 600-unit viewport at 60 fps. Every
//! value can be overridden through the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LOGSMITH_ROW_EXTENT` | [`EngineConfig::row_extent`] |
//! | `LOGSMITH_BUFFER_ROWS` | [`EngineConfig::buffer_rows`] |
//! | `LOGSMITH_FALLBACK_VIEWPORT` | [`EngineConfig::fallback_viewport_extent`] |
//! | `LOGSMITH_TARGET_FPS` | [`EngineConfig::target_fps`] |
//!
//! Unparsable values are logged and ignored. Degenerate values (a zero row
//! extent, say) are accepted here and sanitized where they are used: the
//! window calculation substitutes a minimum row extent and caps the slot
//! count at [`MAX_SLOTS`](logsmith_render::MAX_SLOTS).

use std::str::FromStr;
use std::time::Duration;

use logsmith_render::RenderGeometry;

use crate::frame_clock::frame_interval;

/// Environment variable for [`EngineConfig::row_extent`].
pub const ENV_ROW_EXTENT: &str = "LOGSMITH_ROW_EXTENT";
/// Environment variable for [`EngineConfig::buffer_rows`].
pub const ENV_BUFFER_ROWS: &str = "LOGSMITH_BUFFER_ROWS";
/// Environment variable for [`EngineConfig::fallback_viewport_extent`].
pub const ENV_FALLBACK_VIEWPORT: &str = "LOGSMITH_FALLBACK_VIEWPORT";
/// Environment variable for [`EngineConfig::target_fps`].
pub const ENV_TARGET_FPS: &str = "LOGSMITH_TARGET_FPS";

/// Configuration for a [`RenderEngine`](crate::engine::RenderEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Extent of one row along the scroll axis.
    pub row_extent: f64,
    /// Rows bound beyond the viewport to absorb scroll velocity.
    pub buffer_rows: usize,
    /// Viewport extent assumed before the surface is laid out.
    pub fallback_viewport_extent: f64,
    /// Display frames per second.
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            row_extent: 32.0,
            buffer_rows: 10,
            fallback_viewport_extent: 600.0,
            target_fps: 60,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `LOGSMITH_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_from(&lookup, ENV_ROW_EXTENT, &mut config.row_extent);
        override_from(&lookup, ENV_BUFFER_ROWS, &mut config.buffer_rows);
        override_from(
            &lookup,
            ENV_FALLBACK_VIEWPORT,
            &mut config.fallback_viewport_extent,
        );
        override_from(&lookup, ENV_TARGET_FPS, &mut config.target_fps);
        config
    }

    /// Set the row extent.
    #[must_use]
    pub fn with_row_extent(mut self, row_extent: f64) -> Self {
        self.row_extent = row_extent;
        self
    }

    /// Set the buffer row count.
    #[must_use]
    pub fn with_buffer_rows(mut self, buffer_rows: usize) -> Self {
        self.buffer_rows = buffer_rows;
        self
    }

    /// Set the fallback viewport extent.
    #[must_use]
    pub fn with_fallback_viewport_extent(mut self, extent: f64) -> Self {
        self.fallback_viewport_extent = extent;
        self
    }

    /// Set the target frame rate.
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Duration of one display frame.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        frame_interval(self.target_fps)
    }

    /// Geometry handed to the renderer.
    #[must_use]
    pub fn geometry(&self) -> RenderGeometry {
        RenderGeometry {
            row_extent: self.row_extent,
            buffer_rows: self.buffer_rows,
            fallback_viewport_extent: self.fallback_viewport_extent,
        }
    }
}

fn override_from<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = raw.as_str(), "ignoring unparsable config value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsmith_render::{MAX_SLOTS, compute_window};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.row_extent, 32.0);
        assert_eq!(config.buffer_rows, 10);
        assert_eq!(config.fallback_viewport_extent, 600.0);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn env_overrides_apply() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_ROW_EXTENT, "1"),
            (ENV_BUFFER_ROWS, " 4 "),
            (ENV_FALLBACK_VIEWPORT, "24"),
            (ENV_TARGET_FPS, "30"),
        ]));
        assert_eq!(config.row_extent, 1.0);
        assert_eq!(config.buffer_rows, 4);
        assert_eq!(config.fallback_viewport_extent, 24.0);
        assert_eq!(config.target_fps, 30);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_BUFFER_ROWS, "-3"),
            (ENV_TARGET_FPS, "fast"),
        ]));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn absurd_geometry_is_capped_when_used() {
        for (key, value) in [
            (ENV_ROW_EXTENT, "1e-300".to_string()),
            (ENV_BUFFER_ROWS, usize::MAX.to_string()),
        ] {
            let config = EngineConfig::from_lookup(lookup(&[(key, value.as_str())]));
            let geometry = config.geometry();
            let window = compute_window(
                100,
                0.0,
                geometry.fallback_viewport_extent,
                geometry.row_extent,
                geometry.buffer_rows,
            );
            assert_eq!(window.required_slots, MAX_SLOTS, "{key}={value}");
        }
    }

    #[test]
    fn builders_and_geometry() {
        let config = EngineConfig::default()
            .with_row_extent(1.0)
            .with_buffer_rows(2)
            .with_fallback_viewport_extent(24.0)
            .with_target_fps(50);
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
        let geometry = config.geometry();
        assert_eq!(geometry.row_extent, 1.0);
        assert_eq!(geometry.buffer_rows, 2);
        assert_eq!(geometry.fallback_viewport_extent, 24.0);
    }
}
