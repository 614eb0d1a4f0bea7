//! Tracing subscriber setup for the `symbolcopy` binary.
//!
//! Filter priority: `SYMBOLCOPY_LOG`, then `RUST_LOG`, then the `-v`/`-q`
//! flags, then `warn`. Logs go to stderr so stdout stays clean for output.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(verbosity: Verbosity) {
    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(stderr_is_tty)
        .with_target(verbosity == Verbosity::Verbose)
        .without_time()
        .compact();
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(layer)
        .try_init();
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    for var in ["SYMBOLCOPY_LOG", "RUST_LOG"] {
        if let Ok(directives) = std::env::var(var)
            && let Ok(filter) = EnvFilter::try_new(&directives)
        {
            return filter;
        }
    }
    EnvFilter::new(verbosity.default_level().to_string().to_lowercase())
}
