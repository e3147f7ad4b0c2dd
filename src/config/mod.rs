//! Policy configuration loaded from `sanitizer.toml`

#[expect(clippy::module_inception, reason = "The config type lives in its own file")]
mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
