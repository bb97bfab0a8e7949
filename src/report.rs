//! Rendering findings as text or JSON.
//!
//! Text output has one line per finding followed by a summary:
//!
//! ```text
//! docs/guide.md:3:1: error [section-order] '## Usage' appears before '## Installation' but is expected after it
//! Checked 1 file: 1 error, 0 warnings, 0 info
//! ```

use crate::error::{MdschemaError, Result};
use crate::schema::Severity;
use crate::validate::Violation;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// A violation attached to the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub path: String,
    #[serde(flatten)]
    pub violation: Violation,
}

/// Counts by severity over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

/// All findings of a run, kept sorted by path, line and column.
#[derive(Debug, Default)]
pub struct Report {
    findings: Vec<Finding>,
    files: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the violations of one checked file.
    pub fn add(&mut self, path: &Path, violations: Vec<Violation>) {
        self.files += 1;
        let path = path.display().to_string();
        self.findings
            .extend(violations.into_iter().map(|violation| Finding {
                path: path.clone(),
                violation,
            }));
        // Stable, so ties keep evaluation order.
        self.findings.sort_by(|a, b| {
            (a.path.as_str(), a.violation.line(), a.violation.column()).cmp(&(
                b.path.as_str(),
                b.violation.line(),
                b.violation.column(),
            ))
        });
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            files: self.files,
            ..Default::default()
        };
        for finding in &self.findings {
            match finding.violation.severity() {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    }

    /// Whether the run should fail: any error, or any warning when `strict`.
    pub fn is_failure(&self, strict: bool) -> bool {
        let summary = self.summary();
        summary.errors > 0 || (strict && summary.warnings > 0)
    }

    pub fn render(&self, format: Format) -> Result<String> {
        match format {
            Format::Text => Ok(self.render_text()),
            Format::Json => self.render_json(),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        for finding in &self.findings {
            out.push_str(&format!("{}:{}\n", finding.path, finding.violation));
        }

        let summary = self.summary();
        let files = if summary.files == 1 { "file" } else { "files" };
        if self.findings.is_empty() {
            out.push_str(&format!(
                "Checked {} {}: no problems found\n",
                summary.files, files
            ));
        } else {
            out.push_str(&format!(
                "Checked {} {}: {} {}, {} {}, {} info\n",
                summary.files,
                files,
                summary.errors,
                plural(summary.errors, "error"),
                summary.warnings,
                plural(summary.warnings, "warning"),
                summary.info
            ));
        }
        out
    }

    fn render_json(&self) -> Result<String> {
        let value = json!({
            "findings": self.findings,
            "summary": self.summary(),
        });
        serde_json::to_string_pretty(&value)
            .map(|s| s + "\n")
            .map_err(|e| MdschemaError::IoError(format!("failed to serialize report: {}", e)))
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::rules;

    fn sample() -> Report {
        let mut report = Report::new();
        report.add(
            Path::new("b.md"),
            vec![Violation::error(rules::LINKS, "broken link", 4, 2)],
        );
        report.add(
            Path::new("a.md"),
            vec![
                Violation::error(rules::UNEXPECTED_SECTION, "unexpected section '## X'", 9, 1),
                Violation::new(
                    rules::REQUIRED_SECTION,
                    "required section '## Usage' not found",
                    1,
                    1,
                    Severity::Warning,
                ),
            ],
        );
        report
    }

    #[test]
    fn test_findings_are_sorted_by_path_then_position() {
        let report = sample();
        let order: Vec<(&str, usize)> = report
            .findings()
            .iter()
            .map(|f| (f.path.as_str(), f.violation.line()))
            .collect();
        assert_eq!(order, vec![("a.md", 1), ("a.md", 9), ("b.md", 4)]);
    }

    #[test]
    fn test_text_rendering() {
        let text = sample().render(Format::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "a.md:1:1: warning [required-section] required section '## Usage' not found"
        );
        assert_eq!(lines[2], "b.md:4:2: error [links] broken link");
        assert_eq!(lines[3], "Checked 2 files: 2 errors, 1 warning, 0 info");
    }

    #[test]
    fn test_clean_run_text() {
        let mut report = Report::new();
        report.add(Path::new("a.md"), Vec::new());
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "Checked 1 file: no problems found\n"
        );
        assert!(!report.is_failure(true));
    }

    #[test]
    fn test_json_rendering() {
        let json = sample().render(Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["findings"][0]["path"], "a.md");
        assert_eq!(value["findings"][0]["severity"], "warning");
        assert_eq!(value["findings"][2]["rule"], "links");
        assert_eq!(value["summary"]["errors"], 2);
        assert_eq!(value["summary"]["files"], 2);
    }

    #[test]
    fn test_failure_policy() {
        let mut warnings_only = Report::new();
        warnings_only.add(
            Path::new("a.md"),
            vec![Violation::new(rules::SECTION_ORDER, "x", 1, 1, Severity::Warning)],
        );
        assert!(!warnings_only.is_failure(false));
        assert!(warnings_only.is_failure(true));
        assert!(sample().is_failure(false));
    }
}
