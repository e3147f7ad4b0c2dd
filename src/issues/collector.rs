use super::{Issue, IssueSink, Level, code};
use crate::scope::ScopeContext;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Log target for the collector
const LOG_TARGET: &str = " collector";

/// Issues grouped by fully-qualified name, FQNs sorted, issues in emission order.
pub type Outcome = BTreeMap<String, Vec<Issue>>;

/// Thread-safe issue sink that accumulates issues for one sanitization section.
#[derive(Debug, Default)]
pub struct Collector {
    excluded_codes: HashSet<u16>,
    outcome: Mutex<Outcome>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collector that drops any issue whose code is in `excluded_codes`.
    #[must_use]
    pub fn with_excluded_codes(excluded_codes: impl IntoIterator<Item = u16>) -> Self {
        Self {
            excluded_codes: excluded_codes.into_iter().collect(),
            outcome: Mutex::default(),
        }
    }

    /// Snapshot of the issues recorded so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.lock().clone()
    }

    /// Consume the collector, returning every recorded issue.
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        self.outcome.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// All recorded issues, ordered by FQN and then by emission order.
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.lock().values().flatten().cloned().collect()
    }

    /// The most severe level recorded, or `None` if no issue was recorded.
    #[must_use]
    pub fn max_level(&self) -> Option<Level> {
        self.lock().values().flatten().map(|issue| issue.level).max()
    }

    /// Total number of recorded issues across all FQNs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    /// Whether no issue has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Outcome> {
        self.outcome.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IssueSink for Collector {
    fn add_code(&self, ctx: &ScopeContext, code: u16) {
        let fqn = ctx.fqn();

        if self.excluded_codes.contains(&code) {
            log::debug!(target: LOG_TARGET, "Excluded issue {code} for '{fqn}'");
            return;
        }

        let issue = Issue::from_code(fqn, code);
        if code::lookup(code).is_none() {
            log::warn!(target: LOG_TARGET, "Unknown issue code {code} reported for '{}'", issue.fqn);
        } else {
            log::debug!(target: LOG_TARGET, "Recorded issue {code} ({}) for '{}'", issue.level, issue.fqn);
        }

        self.lock().entry(issue.fqn.clone()).or_default().push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::code::{METRICS_SERVER_MISSING, VERSION_OK, VERSION_OUT_OF_TOLERANCE};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_collector_is_empty() {
        let collector = Collector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.len(), 0);
        assert_eq!(collector.max_level(), None);
        assert!(collector.outcome().is_empty());
    }

    #[test]
    fn test_add_code_attributes_to_scope() {
        let collector = Collector::new();
        let ctx = ScopeContext::default().with_scope("Metrics");
        collector.add_code(&ctx, METRICS_SERVER_MISSING);

        let outcome = collector.outcome();
        assert_eq!(outcome.len(), 1);
        let issues = &outcome["Metrics"];
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, METRICS_SERVER_MISSING);
        assert_eq!(issues[0].level, Level::Info);
    }

    #[test]
    fn test_outcome_is_sorted_by_fqn() {
        let collector = Collector::new();
        let root = ScopeContext::default();
        collector.add_code(&root.with_scope("Version"), VERSION_OK);
        collector.add_code(&root.with_scope("Metrics"), METRICS_SERVER_MISSING);

        let fqns: Vec<_> = collector.outcome().into_keys().collect();
        assert_eq!(fqns, vec!["Metrics", "Version"]);

        let codes: Vec<_> = collector.issues().iter().map(|issue| issue.code).collect();
        assert_eq!(codes, vec![METRICS_SERVER_MISSING, VERSION_OK]);
    }

    #[test]
    fn test_issues_under_same_fqn_keep_emission_order() {
        let collector = Collector::new();
        let ctx = ScopeContext::default().with_scope("Version");
        collector.add_code(&ctx, VERSION_OUT_OF_TOLERANCE);
        collector.add_code(&ctx, VERSION_OK);

        let codes: Vec<_> = collector.outcome()["Version"].iter().map(|issue| issue.code).collect();
        assert_eq!(codes, vec![VERSION_OUT_OF_TOLERANCE, VERSION_OK]);
    }

    #[test]
    fn test_max_level() {
        let collector = Collector::new();
        let root = ScopeContext::default();
        collector.add_code(&root.with_scope("Version"), VERSION_OK);
        assert_eq!(collector.max_level(), Some(Level::Ok));

        collector.add_code(&root.with_scope("Metrics"), METRICS_SERVER_MISSING);
        assert_eq!(collector.max_level(), Some(Level::Info));
    }

    #[test]
    fn test_unknown_code_is_recorded_as_error() {
        let collector = Collector::new();
        collector.add_code(&ScopeContext::default().with_scope("Version"), 999);

        let issues = collector.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, Level::Error);
        assert_eq!(collector.max_level(), Some(Level::Error));
    }

    #[test]
    fn test_excluded_codes_are_dropped() {
        let collector = Collector::with_excluded_codes([VERSION_OK]);
        let root = ScopeContext::default();
        collector.add_code(&root.with_scope("Version"), VERSION_OK);
        collector.add_code(&root.with_scope("Metrics"), METRICS_SERVER_MISSING);

        let issues = collector.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, METRICS_SERVER_MISSING);
    }

    #[test]
    fn test_into_outcome() {
        let collector = Collector::new();
        collector.add_code(&ScopeContext::default().with_scope("Metrics"), METRICS_SERVER_MISSING);

        let outcome = collector.into_outcome();
        assert_eq!(outcome["Metrics"].len(), 1);
    }

    #[test]
    fn test_concurrent_add_code() {
        let collector = Arc::new(Collector::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let collector = Arc::clone(&collector);
                thread::spawn(move || {
                    let ctx = ScopeContext::default().with_scope(format!("section-{i}"));
                    for _ in 0..10 {
                        collector.add_code(&ctx, VERSION_OK);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(collector.len(), 80);
        assert_eq!(collector.outcome().len(), 8);
    }
}
