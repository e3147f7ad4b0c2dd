//! Rule modules and the runner that drives them
//!
//! A rule module ("sanitizer") inspects one category of cluster health. It reads
//! facts through a [`ClusterLister`](crate::facts::ClusterLister), compares them
//! against a policy injected at construction, and reports each deviation as an
//! issue code through an [`IssueSink`](crate::issues::IssueSink).
//!
//! # Implementation Model
//!
//! Every rule module implements [`Sanitizer`]. Its checks run sequentially in a
//! fixed order, each under its own scope, and each reports at most one issue.
//! Policy deviations are never errors. An error is returned only for structural
//! failures such as malformed facts, which stop the remaining checks of that
//! module without rolling back issues already reported.
//!
//! Rule modules are statically registered in `section.rs`. [`run_sections`]
//! runs each registered module against a fresh [`Collector`](crate::issues::Collector)
//! and produces one [`SectionReport`] per module.

mod cluster;
mod section;

pub use cluster::{ClusterSanitizer, VersionPolicy};
pub use section::{SECTION_DEFINITIONS, SectionDef, SectionDeps, SectionReport, run_sections};

use crate::Result;
use crate::scope::ScopeContext;
use core::fmt;

/// A self-contained set of checks for one category of cluster health.
pub trait Sanitizer {
    /// Run every check of this module.
    ///
    /// # Errors
    ///
    /// Returns an error on a structural failure or when `ctx` is cancelled before a check starts
    fn sanitize(&self, ctx: &ScopeContext) -> Result<()>;
}

/// Error returned when a run is cancelled before a check starts.
///
/// Callers tell cancellation apart from structural failures by finding this type
/// in the error's source chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled {
    check: &'static str,
}

impl Cancelled {
    #[must_use]
    pub const fn before(check: &'static str) -> Self {
        Self { check }
    }

    /// The check that did not start.
    #[must_use]
    pub const fn check(&self) -> &'static str {
        self.check
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sanitization cancelled before the {} check", self.check)
    }
}

impl core::error::Error for Cancelled {}
