#![forbid(unsafe_code)]

//! Tracing output for the demo.
//!
//! Stdout belongs to the UI, so logs go to a file or nowhere. Filter
//! directives come from `LOGSMITH_LOG` and default to `info`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use logsmith::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "LOGSMITH_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Filter built from `directives`, falling back to `info` when they are
/// missing or malformed.
#[must_use]
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install a file subscriber if `path` is set.
///
/// Returns whether a subscriber was installed. If one is already set the
/// file is left empty and a warning goes to the existing subscriber.
///
/// # Errors
///
/// Returns [`Error::LogFile`] if the log file cannot be created.
pub fn init(path: Option<&Path>) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let file = File::create(path).map_err(|source| Error::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    let directives = std::env::var(LOG_ENV).ok();
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init();

    match installed {
        Ok(()) => {
            tracing::info!(path = %path.display(), "logging started");
            Ok(true)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "log file unused, subscriber already set");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_info() {
        assert_eq!(env_filter(None).to_string(), "info");
    }

    #[test]
    fn valid_directives_are_used() {
        let filter = env_filter(Some("logsmith_render=trace"));
        assert_eq!(filter.to_string(), "logsmith_render=trace");
    }

    #[test]
    fn malformed_directives_fall_back() {
        assert_eq!(env_filter(Some("logsmith=verbose")).to_string(), "info");
    }

    #[test]
    fn no_path_is_a_noop() {
        assert!(!init(None).unwrap());
    }

    #[test]
    fn unwritable_path_is_reported() {
        let err = init(Some(Path::new("/nonexistent-dir/for/logsmith.log"))).unwrap_err();
        assert!(matches!(err, Error::LogFile { .. }));
        assert!(err.to_string().starts_with("cannot open log file"));
    }

    #[test]
    fn second_init_reports_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");

        init(Some(&first)).unwrap();
        assert!(!init(Some(&second)).unwrap());
        assert!(first.exists());
    }
}
