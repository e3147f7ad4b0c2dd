use super::{Cancelled, Sanitizer};
use crate::Result;
use crate::facts::ClusterLister;
use crate::issues::IssueSink;
use crate::issues::code::{METRICS_SERVER_MISSING, VERSION_OK, VERSION_OUT_OF_TOLERANCE};
use crate::scope::ScopeContext;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};

/// Log target for the cluster sanitizer
const LOG_TARGET: &str = "   cluster";

const METRICS_SCOPE: &str = "Metrics";
const VERSION_SCOPE: &str = "Version";

const DEFAULT_TOLERABLE_MAJOR: u32 = 1;
const DEFAULT_TOLERABLE_MINOR: u32 = 12;

/// Range of control-plane versions considered compliant.
///
/// A version is tolerated when its major component equals `tolerable_major` exactly
/// and its minor component is at least `tolerable_minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionPolicy {
    /// The only accepted major version.
    pub tolerable_major: u32,

    /// The lowest accepted minor version within `tolerable_major`.
    pub tolerable_minor: u32,
}

impl VersionPolicy {
    #[must_use]
    pub const fn new(tolerable_major: u32, tolerable_minor: u32) -> Self {
        Self {
            tolerable_major,
            tolerable_minor,
        }
    }

    /// Whether `major.minor` falls within this policy.
    #[must_use]
    pub fn tolerates(&self, major: u64, minor: u64) -> bool {
        major == u64::from(self.tolerable_major) && minor >= u64::from(self.tolerable_minor)
    }
}

impl Default for VersionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERABLE_MAJOR, DEFAULT_TOLERABLE_MINOR)
    }
}

/// Sanitizer for cluster-wide health: metrics availability and control-plane version.
pub struct ClusterSanitizer<'a> {
    sink: &'a dyn IssueSink,
    lister: &'a dyn ClusterLister,
    policy: VersionPolicy,
}

impl core::fmt::Debug for ClusterSanitizer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClusterSanitizer")
            .field("sink", &"<dyn IssueSink>")
            .field("lister", &"<dyn ClusterLister>")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<'a> ClusterSanitizer<'a> {
    /// Create a sanitizer reporting into `sink` and reading facts from `lister`.
    #[must_use]
    pub fn new(sink: &'a dyn IssueSink, lister: &'a dyn ClusterLister, policy: VersionPolicy) -> Self {
        Self { sink, lister, policy }
    }

    /// The version policy injected at construction.
    #[must_use]
    pub const fn policy(&self) -> VersionPolicy {
        self.policy
    }

    fn check_metrics_server(&self, ctx: &ScopeContext) -> Result<()> {
        ensure_not_cancelled(ctx, "metrics")?;
        log::debug!(target: LOG_TARGET, "Checking for a metrics server");

        let ctx = ctx.with_scope(METRICS_SCOPE);
        if !self.lister.has_metrics() {
            self.sink.add_code(&ctx, METRICS_SERVER_MISSING);
        }

        Ok(())
    }

    fn check_version(&self, ctx: &ScopeContext) -> Result<()> {
        ensure_not_cancelled(ctx, "version")?;

        let (major, minor) = self.lister.list_version();
        log::debug!(target: LOG_TARGET, "Checking control-plane version {major}.{minor}");

        let major = parse_version_component("major", &major)?;
        let minor = parse_version_component("minor", &minor)?;

        let ctx = ctx.with_scope(VERSION_SCOPE);
        if self.policy.tolerates(major, minor) {
            self.sink.add_code(&ctx, VERSION_OK);
        } else {
            self.sink.add_code(&ctx, VERSION_OUT_OF_TOLERANCE);
        }

        Ok(())
    }
}

impl Sanitizer for ClusterSanitizer<'_> {
    /// Runs the metrics check and then the version check.
    ///
    /// Stops at the first structural failure; issues reported by earlier checks
    /// stay recorded.
    fn sanitize(&self, ctx: &ScopeContext) -> Result<()> {
        self.check_metrics_server(ctx)?;
        self.check_version(ctx)
    }
}

fn ensure_not_cancelled(ctx: &ScopeContext, check: &'static str) -> Result<()> {
    if ctx.is_cancelled() {
        return Err(Cancelled::before(check).into());
    }

    Ok(())
}

fn parse_version_component(component: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .into_app_err_with(|| format!("unable to parse {component} version '{value}'"))
}
