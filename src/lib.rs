//! kube-sanitizer crate
//!
//! Rule-based health checks for Kubernetes clusters. Rule modules ("sanitizers") read
//! already-resolved cluster facts, compare them against policy, and report deviations
//! as severity-coded issues attributed to a scoped, fully-qualified name.
//!
//! # Module Organization
//!
//! - [`scope`]: Scope context carrying the attribution path and cancellation
//! - [`facts`]: Read-only cluster fact sources
//! - [`issues`]: Issue code taxonomy, issue sink, and collector
//! - [`sanitize`]: Rule modules and the section runner
//! - [`config`]: Policy configuration
//! - [`reports`]: Console and JSON rendering of sanitization results
//! - [`commands`]: Command-line interface and orchestration

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
pub mod facts;
pub mod issues;
pub mod reports;
pub mod sanitize;
pub mod scope;

pub use crate::commands::{Host, run};
