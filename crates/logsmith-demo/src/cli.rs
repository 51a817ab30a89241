#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `LOGSMITH_DEMO_*` prefix; explicit flags win.

use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use logsmith::{Error, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
LogSmith Demo: a virtualized log viewer in the terminal

USAGE:
    logsmith-demo [OPTIONS]

OPTIONS:
    --rows=N             Number of mock log entries (default: 100000)
    --seed=N             Seed for mock data generation (default: 42)
    --fps=N              Target frames per second (default: 60)
    --exit-after-ms=N    Quit automatically after N milliseconds (0 = never)
    --log-file=PATH      Write tracing output to PATH
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Up/Down, j/k        Scroll one row
    PgUp/PgDn, Space    Scroll one page
    Home/End, g/G       Jump to first/last row
    /                   Edit the filter
    Enter               Stop editing the filter
    Esc                 Clear the filter
    q / Ctrl+C          Quit

ENVIRONMENT VARIABLES:
    LOGSMITH_DEMO_ROWS            Override --rows
    LOGSMITH_DEMO_SEED            Override --seed
    LOGSMITH_DEMO_FPS             Override --fps
    LOGSMITH_DEMO_EXIT_AFTER_MS   Override --exit-after-ms
    LOGSMITH_DEMO_LOG_FILE        Override --log-file
    LOGSMITH_LOG                  Log filter directives (default: info)
    LOGSMITH_BUFFER_ROWS          Rows rendered beyond the viewport";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Mock entries to generate.
    pub rows: usize,
    /// Mock data seed.
    pub seed: u64,
    /// Target frame rate; `None` keeps the engine default.
    pub fps: Option<u32>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Tracing output file.
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            rows: 100_000,
            seed: 42,
            fps: None,
            exit_after_ms: 0,
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the viewer.
    Run(Opts),
    /// Print help and exit.
    Help,
    /// Print the version and exit.
    Version,
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version`, or invalid input.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("logsmith-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment defaults taken from `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cli`] for unknown flags or unparsable values.
    pub fn parse_from<I>(args: I, lookup: impl Fn(&str) -> Option<String>) -> Result<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();

        // Environment defaults first; bad values are ignored.
        if let Some(val) = lookup("LOGSMITH_DEMO_ROWS")
            && let Ok(n) = val.parse()
        {
            opts.rows = n;
        }
        if let Some(val) = lookup("LOGSMITH_DEMO_SEED")
            && let Ok(n) = val.parse()
        {
            opts.seed = n;
        }
        if let Some(val) = lookup("LOGSMITH_DEMO_FPS")
            && let Ok(n) = val.parse()
        {
            opts.fps = Some(n);
        }
        if let Some(val) = lookup("LOGSMITH_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = lookup("LOGSMITH_DEMO_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--rows=") {
                        opts.rows = flag_value("--rows", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = flag_value("--seed", val)?;
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = Some(flag_value("--fps", val)?);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = flag_value("--exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(Error::Cli(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}

fn flag_value<T: FromStr>(flag: &str, val: &str) -> Result<T> {
    val.parse()
        .map_err(|_| Error::Cli(format!("Invalid {flag} value: {val}")))
}
