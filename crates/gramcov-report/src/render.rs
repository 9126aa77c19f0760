use crate::coverage::CoverageReport;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Also list matched constructs with their occurrences.
    pub verbose: bool,
}

/// Render the human-readable report.
pub fn format(report: &CoverageReport) -> String {
    report.to_string()
}

pub fn format_with(report: &CoverageReport, options: FormatOptions) -> String {
    report.render(options).to_string()
}

/// A report paired with text rendering options.
pub struct Rendered<'a> {
    report: &'a CoverageReport,
    options: FormatOptions,
}

impl CoverageReport {
    pub fn render(&self, options: FormatOptions) -> Rendered<'_> {
        Rendered {
            report: self,
            options,
        }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(
            f,
            "coverage: {}/{} constructs matched ({})",
            report.matched_count(),
            report.total,
            report.grammar
        )?;

        if self.options.verbose && !report.matched.is_empty() {
            writeln!(f, "matched ({}):", report.matched.len())?;
            for (name, locations) in &report.matched {
                write!(f, "  {name}:")?;
                for (i, location) in locations.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{location}")?;
                }
                writeln!(f)?;
            }
        }

        if !report.unmatched.is_empty() {
            writeln!(f, "unmatched ({}):", report.unmatched.len())?;
            for name in &report.unmatched {
                writeln!(f, "  {name}")?;
            }
        }

        if !report.orphans.is_empty() {
            writeln!(f, "orphan annotations ({}):", report.orphans.len())?;
            for orphan in &report.orphans {
                write!(f, "  {} at {}", orphan.name, orphan.location)?;
                if let Some(suggestion) = &orphan.suggestion {
                    write!(f, " (did you mean `{suggestion}`?)")?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.render(FormatOptions::default()), f)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a CoverageReport,
    complete: bool,
}

/// Render the report as pretty-printed JSON.
pub fn to_json(report: &CoverageReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        report,
        complete: report.is_complete(),
    })
}
