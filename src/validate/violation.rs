//! The violation record shared by every validator.

use crate::document::Section;
use crate::schema::Severity;
use serde::Serialize;
use std::fmt;

/// Rule identifiers attached to violations.
pub mod rules {
    pub const FIRST_HEADING: &str = "first-heading";
    pub const UNEXPECTED_SECTION: &str = "unexpected-section";
    pub const REQUIRED_SECTION: &str = "required-section";
    pub const SECTION_ORDER: &str = "section-order";
    pub const SECTION_COUNT: &str = "section-count";

    pub const CODE_BLOCKS: &str = "code-blocks";
    pub const TABLES: &str = "tables";
    pub const LISTS: &str = "lists";
    pub const IMAGES: &str = "images";
    pub const WORD_COUNT: &str = "word-count";
    pub const REQUIRED_TEXT: &str = "required-text";
    pub const FORBIDDEN_TEXT: &str = "forbidden-text";
    pub const FRONTMATTER: &str = "frontmatter";
    pub const LINKS: &str = "links";
    pub const HEADING_LEVELS: &str = "heading-levels";
    pub const HEADING_DEPTH: &str = "heading-depth";
    pub const DUPLICATE_HEADING: &str = "duplicate-heading";
}

/// One problem found in a document.
///
/// Immutable once created. The file path is attached by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    rule: &'static str,
    message: String,
    line: usize,
    column: usize,
    severity: Severity,
}

impl Violation {
    /// Create a violation. `line` and `column` are 1-based; 0 is raised to 1.
    pub fn new(
        rule: &'static str,
        message: impl Into<String>,
        line: usize,
        column: usize,
        severity: Severity,
    ) -> Self {
        Self {
            rule,
            message: message.into(),
            line: line.max(1),
            column: column.max(1),
            severity,
        }
    }

    /// An error-severity violation.
    pub fn error(rule: &'static str, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(rule, message, line, column, Severity::Error)
    }

    /// A violation located at a section's heading (1:1 for the root).
    pub fn at_section(
        rule: &'static str,
        message: impl Into<String>,
        section: &Section,
        severity: Severity,
    ) -> Self {
        let (line, column) = section.location();
        Self::new(rule, message, line, column, severity)
    }

    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.line, self.column, self.severity, self.rule, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_positions_are_raised_to_one() {
        let v = Violation::error(rules::FRONTMATTER, "missing", 0, 0);
        assert_eq!((v.line(), v.column()), (1, 1));
    }

    #[test]
    fn display_format() {
        let v = Violation::new(
            rules::REQUIRED_SECTION,
            "required section '## Usage' not found",
            3,
            1,
            Severity::Warning,
        );
        assert_eq!(
            v.to_string(),
            "3:1: warning [required-section] required section '## Usage' not found"
        );
    }

    #[test]
    fn serializes_with_lowercase_severity() {
        let v = Violation::error(rules::LINKS, "broken", 2, 5);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["rule"], "links");
        assert_eq!(json["line"], 2);
    }
}
