//! Argument types and setup shared between commands.

use crate::issues::Level;
use clap::ValueEnum;
use std::io::IsTerminal;

/// Log target for command setup
const LOG_TARGET: &str = "    common";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether to emit colors, consulting stdout only in `Auto` mode.
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Minimum issue level that makes the `sanitize` command fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailLevel {
    /// Fail on any issue, including passing checks
    Ok,

    /// Fail on informational issues or worse
    Info,

    /// Fail on warnings or worse
    Warn,

    /// Fail only on errors
    Error,
}

impl FailLevel {
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Ok => Level::Ok,
            Self::Info => Level::Info,
            Self::Warn => Level::Warn,
            Self::Error => Level::Error,
        }
    }
}

/// Initialize logger based on log level
///
/// A logger installed by an earlier command in the same process is kept.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let result = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();

    if let Err(e) = result {
        log::debug!(target: LOG_TARGET, "Keeping the existing logger: {e}");
    }
}
