//! Common utilities shared across report generators.

use crate::issues::Level;
use crate::sanitize::SectionReport;
use strum::IntoEnumIterator;

/// Number of issues per level, in ascending severity, skipping levels with no issues.
pub fn level_counts(report: &SectionReport) -> Vec<(Level, usize)> {
    Level::iter()
        .map(|level| (level, report.count(level)))
        .filter(|&(_, count)| count > 0)
        .collect()
}

/// One-line summary such as `2 issue(s): 1 info, 1 warn`.
pub fn format_summary(report: &SectionReport) -> String {
    let counts = level_counts(report);
    let total: usize = counts.iter().map(|&(_, count)| count).sum();
    if total == 0 {
        return "no issues".to_string();
    }

    let parts: Vec<String> = counts.iter().map(|(level, count)| format!("{count} {level}")).collect();
    format!("{total} issue(s): {}", parts.join(", "))
}
