use super::Host;
use super::common::{ColorMode, FailLevel, LogLevel, init_logging};
use crate::Result;
use crate::config::Config;
use crate::facts::ClusterSnapshot;
use crate::reports::{generate_console, generate_json};
use crate::sanitize::{SectionReport, run_sections};
use crate::scope::ScopeContext;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

/// Log target for the sanitize command
const LOG_TARGET: &str = "  sanitize";

#[derive(Parser, Debug)]
pub struct SanitizeArgs {
    /// Path to a JSON snapshot of cluster facts
    #[arg(long, value_name = "PATH")]
    pub facts: Utf8PathBuf,

    /// Path to configuration file (default is `sanitizer.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Output sanitization results to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output sanitization results to the console.
    /// If omitted, console output is shown only when no JSON report is generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Exit with status code 1 if any issue is at or above this level
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailLevel>,
}

/// Load facts and configuration, run every section, and write the requested reports
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded, if the run is cancelled, if a section
/// could not complete, or if an issue reaches the `--fail-on` level
pub fn process_sanitize<H: Host>(host: &mut H, args: &SanitizeArgs, ctx: &ScopeContext) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let facts = ClusterSnapshot::load(&args.facts)?;

    let reports = run_sections(ctx, &facts, &config)?;
    write_reports(host, args, &reports)?;

    let failed: Vec<&str> = reports
        .iter()
        .filter(|report| report.error.is_some())
        .map(|report| report.name.as_str())
        .collect();

    if !failed.is_empty() {
        for report in &reports {
            if let Some(error) = &report.error {
                let _ = writeln!(host.error(), "Section '{}' could not complete: {error}", report.name);
            }
        }
        bail!("sanitization did not complete for section(s): {}", failed.join(", "));
    }

    if let Some(fail_on) = args.fail_on {
        let threshold = fail_on.level();
        let worst = reports.iter().filter_map(SectionReport::max_level).max();
        if let Some(worst) = worst
            && worst >= threshold
        {
            bail!("one or more issues were reported at level '{worst}' (failing on '{threshold}' or above)");
        }
    }

    Ok(())
}

fn write_reports<H: Host>(host: &mut H, args: &SanitizeArgs, reports: &[SectionReport]) -> Result<()> {
    if args.console || args.json.is_none() {
        let mut console_output = String::new();
        generate_console(reports, args.color.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(reports, Utc::now(), &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
        log::info!(target: LOG_TARGET, "Wrote JSON report to '{filename}'");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use tokio_util::sync::CancellationToken;

    struct Fixture {
        _dir: tempfile::TempDir,
        root: Utf8PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
            Self { _dir: dir, root }
        }

        fn facts(&self, major: &str, minor: &str, metrics: bool) -> Utf8PathBuf {
            let path = self.root.join("facts.json");
            let json = format!(r#"{{"serverVersion": {{"major": "{major}", "minor": "{minor}"}}, "metricsAvailable": {metrics}}}"#);
            fs::write(&path, json).unwrap();
            path
        }

        fn config(&self, text: &str) -> Utf8PathBuf {
            let path = self.root.join("sanitizer.toml");
            fs::write(&path, text).unwrap();
            path
        }
    }

    fn args(facts: Utf8PathBuf) -> SanitizeArgs {
        SanitizeArgs {
            facts,
            config: None,
            color: ColorMode::Never,
            log_level: LogLevel::None,
            json: None,
            console: false,
            fail_on: None,
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_compliant_cluster_prints_console_report() {
        let fixture = Fixture::new();
        let mut host = TestHost::new();

        process_sanitize(&mut host, &args(fixture.facts("1", "12", true)), &ScopeContext::default()).unwrap();

        let output = host.output_str();
        assert!(output.contains("cluster\n"));
        assert!(output.contains("[ok] 406 K8s version OK"));
        assert!(!output.contains("402"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_json_report_suppresses_console_by_default() {
        let fixture = Fixture::new();
        let json_path = fixture.root.join("report.json");
        let mut host = TestHost::new();

        let mut sanitize_args = args(fixture.facts("1", "11", false));
        sanitize_args.json = Some(json_path.clone());
        process_sanitize(&mut host, &sanitize_args, &ScopeContext::default()).unwrap();

        assert!(host.output_str().is_empty());
        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["sections"][0]["issues"]["Metrics"][0]["code"], 402);
        assert_eq!(parsed["sections"][0]["issues"]["Version"][0]["code"], 405);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_console_flag_with_json_report() {
        let fixture = Fixture::new();
        let mut host = TestHost::new();

        let mut sanitize_args = args(fixture.facts("1", "11", false));
        sanitize_args.json = Some(fixture.root.join("report.json"));
        sanitize_args.console = true;
        process_sanitize(&mut host, &sanitize_args, &ScopeContext::default()).unwrap();

        assert!(host.output_str().contains("[warn] 405"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_fail_on_threshold() {
        let fixture = Fixture::new();
        let facts = fixture.facts("1", "11", true);

        let mut sanitize_args = args(facts);
        sanitize_args.fail_on = Some(FailLevel::Error);
        process_sanitize(&mut TestHost::new(), &sanitize_args, &ScopeContext::default()).unwrap();

        sanitize_args.fail_on = Some(FailLevel::Warn);
        let err = process_sanitize(&mut TestHost::new(), &sanitize_args, &ScopeContext::default()).unwrap_err();
        assert!(err.to_string().contains("level 'warn'"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_structural_failure_fails_command() {
        let fixture = Fixture::new();
        let mut host = TestHost::new();

        let err = process_sanitize(&mut host, &args(fixture.facts("abc", "12", false)), &ScopeContext::default()).unwrap_err();

        assert!(err.to_string().contains("section(s): cluster"));
        assert!(host.error_str().contains("unable to parse major version 'abc'"));
        assert!(host.output_str().contains("[info] 402"), "issues found before the failure are still reported");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_excluded_codes_from_config() {
        let fixture = Fixture::new();
        let mut host = TestHost::new();

        let mut sanitize_args = args(fixture.facts("1", "20", false));
        sanitize_args.config = Some(fixture.config("excluded_codes = [402, 406]\n"));
        process_sanitize(&mut host, &sanitize_args, &ScopeContext::default()).unwrap();

        assert!(host.output_str().contains("no issues"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_facts_file() {
        let fixture = Fixture::new();
        let err = process_sanitize(&mut TestHost::new(), &args(fixture.root.join("missing.json")), &ScopeContext::default())
            .unwrap_err();
        assert!(err.to_string().contains("reading cluster facts file"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_cancelled_run_writes_no_report() {
        let fixture = Fixture::new();
        let token = CancellationToken::new();
        token.cancel();
        let mut host = TestHost::new();

        let _ = process_sanitize(&mut host, &args(fixture.facts("1", "12", true)), &ScopeContext::new(token)).unwrap_err();
        assert!(host.output_str().is_empty());
    }
}
