//! Logging initialization.

use tracing::Level;
use tracing_subscriber::fmt;

/// How much the tool says.
///
/// `Quiet` keeps warnings and errors. `Debug` wins over `Quiet` when both flags are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Debug,
}

impl Verbosity {
    pub fn from_flags(debug: bool, quiet: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    /// Whether result lines go to stdout.
    pub fn reports(self) -> bool {
        self != Verbosity::Quiet
    }
}

impl From<Verbosity> for Level {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Normal => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
        }
    }
}

/// Logs go to stderr so stdout only carries result lines.
pub fn init_logging(
    verbosity: Verbosity,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let level: Level = verbosity.into();

    fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
}
