use super::common;
use crate::Result;
use crate::issues::Issue;
use crate::sanitize::SectionReport;
use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt::Write;
use serde_json::json;

#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(reports: &[SectionReport], generated_at: DateTime<Utc>, writer: &mut W) -> Result<()> {
    let mut sections = Vec::with_capacity(reports.len());

    for report in reports {
        let mut section_obj = serde_json::Map::new();
        section_obj.insert("name".to_string(), json!(report.name));

        let mut issues_obj = serde_json::Map::new();
        for (fqn, issues) in &report.outcome {
            issues_obj.insert(fqn.clone(), json!(issues.iter().map(issue_to_json).collect::<Vec<_>>()));
        }
        section_obj.insert("issues".to_string(), json!(issues_obj));

        let mut summary_obj = serde_json::Map::new();
        for (level, count) in common::level_counts(report) {
            summary_obj.insert(level.to_string(), json!(count));
        }
        section_obj.insert("summary".to_string(), json!(summary_obj));

        if let Some(error) = &report.error {
            section_obj.insert("error".to_string(), json!(error));
        }

        sections.push(json!(section_obj));
    }

    let output = json!({
        "generated_at": generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "sections": sections,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn issue_to_json(issue: &Issue) -> serde_json::Value {
    json!({
        "code": issue.code,
        "level": issue.level.to_string(),
        "message": issue.message,
    })
}
