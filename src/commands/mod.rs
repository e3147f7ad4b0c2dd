//! Command-line interface and orchestration for kube-sanitizer
//!
//! This module implements the CLI commands and wires the other modules together
//! to perform end-to-end sanitization and reporting. It handles argument parsing,
//! configuration management, and the high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **sanitize**: Load a cluster facts snapshot and the configuration, run every
//!   registered rule module, and generate console and/or JSON reports
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and values
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap, creates the root
//! [`ScopeContext`](crate::scope::ScopeContext) whose cancellation token is tied to
//! Ctrl-C, and routes to the appropriate command handler.
//!
//! The `common` module provides shared argument types and logging setup.

mod common;
mod host;
mod init;
mod run;
mod sanitize;
mod validate;

pub use common::{ColorMode, FailLevel, LogLevel};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use sanitize::{SanitizeArgs, process_sanitize};
pub use validate::{ValidateArgs, validate_config};
