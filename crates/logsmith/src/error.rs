#![forbid(unsafe_code)]

use std::fmt;
use std::path::PathBuf;

/// Top-level error type for LogSmith hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while driving the terminal.
    Terminal(std::io::Error),
    /// Invalid command-line input.
    Cli(String),
    /// The log file could not be created.
    LogFile {
        /// Requested log file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(err) => write!(f, "terminal error: {err}"),
            Self::Cli(msg) => write!(f, "{msg}"),
            Self::LogFile { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terminal(err) => Some(err),
            Self::Cli(_) => None,
            Self::LogFile { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Terminal(err)
    }
}

/// Standard result type for LogSmith hosts.
pub type Result<T> = std::result::Result<T, Error>;
