use super::{Cancelled, ClusterSanitizer, Sanitizer};
use crate::Result;
use crate::config::Config;
use crate::facts::ClusterLister;
use crate::issues::{Collector, Issue, IssueSink, Level, Outcome};
use crate::scope::ScopeContext;
use ohno::{AppError, bail};

/// Log target for the section runner
const LOG_TARGET: &str = "  sections";

/// Everything a rule module may borrow while it runs.
#[derive(Clone, Copy)]
pub struct SectionDeps<'a> {
    pub sink: &'a dyn IssueSink,
    pub facts: &'a dyn ClusterLister,
    pub config: &'a Config,
}

impl core::fmt::Debug for SectionDeps<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionDeps")
            .field("sink", &"<dyn IssueSink>")
            .field("facts", &"<dyn ClusterLister>")
            .field("config", &self.config)
            .finish()
    }
}

/// A registered rule module.
pub struct SectionDef {
    pub name: &'static str,
    pub build: for<'a> fn(&'a SectionDeps<'a>) -> Box<dyn Sanitizer + 'a>,
}

impl core::fmt::Debug for SectionDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionDef").field("name", &self.name).finish_non_exhaustive()
    }
}

fn build_cluster<'a>(deps: &'a SectionDeps<'a>) -> Box<dyn Sanitizer + 'a> {
    Box::new(ClusterSanitizer::new(deps.sink, deps.facts, deps.config.cluster))
}

/// Rule modules, in the order they run.
pub const SECTION_DEFINITIONS: &[SectionDef] = &[SectionDef {
    name: "cluster",
    build: build_cluster,
}];

/// The result of running one rule module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub name: String,
    pub outcome: Outcome,

    /// Structural failure that stopped the rule module early, if any.
    pub error: Option<String>,
}

impl SectionReport {
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: Outcome, error: Option<String>) -> Self {
        Self {
            name: name.into(),
            outcome,
            error,
        }
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.outcome.values().flatten()
    }

    #[must_use]
    pub fn max_level(&self) -> Option<Level> {
        self.issues().map(|issue| issue.level).max()
    }

    /// Number of issues reported at exactly `level`.
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.issues().filter(|issue| issue.level == level).count()
    }
}

/// Run every registered rule module, each against its own collector.
///
/// A structural failure in one section is recorded in that section's report and the
/// remaining sections still run. Cancellation aborts the whole run.
///
/// # Errors
///
/// Returns an error if `ctx` is cancelled
pub fn run_sections(ctx: &ScopeContext, facts: &dyn ClusterLister, config: &Config) -> Result<Vec<SectionReport>> {
    run_definitions(ctx, SECTION_DEFINITIONS, facts, config)
}

fn run_definitions(
    ctx: &ScopeContext,
    definitions: &[SectionDef],
    facts: &dyn ClusterLister,
    config: &Config,
) -> Result<Vec<SectionReport>> {
    let mut reports = Vec::with_capacity(definitions.len());

    for def in definitions {
        if ctx.is_cancelled() {
            bail!("sanitization cancelled before section '{}'", def.name);
        }

        log::info!(target: LOG_TARGET, "Sanitizing {}", def.name);
        let collector = Collector::with_excluded_codes(config.excluded_codes.iter().copied());

        let result = {
            let deps = SectionDeps {
                sink: &collector,
                facts,
                config,
            };
            let sanitizer = (def.build)(&deps);
            sanitizer.sanitize(ctx)
        };

        let error = match result {
            Ok(()) => None,
            Err(e) if is_cancellation(&e) => return Err(e),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not complete section '{}': {e:#}", def.name);
                Some(format!("{e:#}"))
            }
        };

        let report = SectionReport::new(def.name, collector.into_outcome(), error);
        log::info!(target: LOG_TARGET, "Finished {} with {} issue(s)", def.name, report.issues().count());
        reports.push(report);
    }

    Ok(reports)
}

/// Whether `err` was caused by a rule module observing cancellation.
fn is_cancellation(err: &AppError) -> bool {
    err.source().and_then(|e| e.downcast_ref::<Cancelled>()).is_some()
}
