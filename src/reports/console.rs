use super::common;
use crate::Result;
use crate::issues::Level;
use crate::sanitize::SectionReport;
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(reports: &[SectionReport], use_colors: bool, writer: &mut W) -> Result<()> {
    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }

        if use_colors {
            writeln!(writer, "{}", report.name.bold())?;
        } else {
            writeln!(writer, "{}", report.name)?;
        }

        for (fqn, issues) in &report.outcome {
            writeln!(writer, "  {fqn}")?;
            for issue in issues {
                let level = format!("[{}]", issue.level);
                let level = if use_colors { colorize(&level, issue.level) } else { level };
                writeln!(writer, "    {level} {} {}", issue.code, issue.message)?;
            }
        }

        if let Some(error) = &report.error {
            let line = format!("  could not complete: {error}");
            if use_colors {
                writeln!(writer, "{}", line.red())?;
            } else {
                writeln!(writer, "{line}")?;
            }
        }

        writeln!(writer, "  {}", common::format_summary(report))?;
    }

    Ok(())
}

fn colorize(text: &str, level: Level) -> String {
    match level {
        Level::Ok => text.green().to_string(),
        Level::Info => text.cyan().to_string(),
        Level::Warn => text.yellow().bold().to_string(),
        Level::Error => text.red().bold().to_string(),
    }
}
