//! Report generation for sanitization results
//!
//! This module turns the [`SectionReport`](crate::sanitize::SectionReport)s produced by
//! the section runner into output for human consumption and programmatic processing.
//!
//! # Implementation Model
//!
//! Two report generators are provided, each accessed through a `generate` function:
//! - **Console**: Terminal output with optional ANSI colors
//! - **JSON**: Machine-readable structured data
//!
//! Both generators operate on the same input, a slice of section reports, and write
//! into any `core::fmt::Write`. Per-level tallies shared by both live in `common`.

mod common;
mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
