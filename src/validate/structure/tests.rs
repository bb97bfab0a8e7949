//! Tests for the structural passes.

use super::evaluate;
use crate::document::Document;
use crate::matcher::PatternMatcher;
use crate::schema::{Schema, Severity};
use crate::validate::{Context, UrlProbe, Violation, rules};
use crate::vast;

struct Offline;

impl UrlProbe for Offline {
    fn probe(&self, _url: &str) -> Result<u16, String> {
        Err("offline".to_string())
    }
}

fn check(schema_yaml: &str, markdown: &str) -> Vec<Violation> {
    let schema = Schema::from_yaml(schema_yaml).unwrap();
    let document = Document::parse("docs/guide.md", markdown);
    let matcher = PatternMatcher::new();
    let tree = vast::build(&document, &schema.structure, &matcher);
    let ctx = Context::new(&document, &schema, &tree, &matcher, &Offline);
    evaluate(&ctx)
}

fn by_rule<'a>(violations: &'a [Violation], rule: &str) -> Vec<&'a Violation> {
    violations.iter().filter(|v| v.rule() == rule).collect()
}

const TITLE_WITH_STEPS: &str = r####"
structure:
  - heading: "# Title"
    children:
      - heading: "## Installation"
      - heading: "## Usage"
"####;

// ============================================================================
// Valid documents
// ============================================================================

#[test]
fn test_matching_document_has_no_violations() {
    let markdown = "# Title\n\n## Installation\n\ntext\n\n## Usage\n\ntext\n";
    assert!(check(TITLE_WITH_STEPS, markdown).is_empty());
}

#[test]
fn test_empty_schema_and_empty_document() {
    assert!(check("", "").is_empty());
}

#[test]
fn test_optional_element_may_come_first() {
    let schema = r####"
structure:
  - heading: "## Intro"
    optional: true
  - heading: "## Usage"
"####;
    assert!(check(schema, "## Intro\n\n## Usage\n").is_empty());
    assert!(check(schema, "## Usage\n").is_empty());
}

// ============================================================================
// Unexpected sections
// ============================================================================

#[test]
fn test_extra_section_is_reported_once() {
    let schema = "structure:\n  - heading: \"# Title\"\n";
    let violations = check(schema, "# Title\n## Extra\n");

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule(), rules::UNEXPECTED_SECTION);
    assert_eq!(violations[0].line(), 2);
    assert!(violations[0].message().contains("## Extra"));
}

#[test]
fn test_allow_additional_on_ancestor_exempts_descendants() {
    let schema = r####"
structure:
  - heading: "# Title"
    allow_additional: true
"####;
    assert!(check(schema, "# Title\n## Extra\n### Deeper\n").is_empty());
}

#[test]
fn test_schema_level_allow_additional_covers_top_level_only() {
    let schema = r####"
allow_additional: true
structure:
  - heading: "# Title"
"####;
    assert!(check(schema, "# Title\n# Appendix\n## Notes\n").is_empty());

    let violations = check(schema, "# Title\n## Extra\n");
    assert_eq!(by_rule(&violations, rules::UNEXPECTED_SECTION).len(), 1);
}

// ============================================================================
// Missing and ordering
// ============================================================================

#[test]
fn test_missing_required_section() {
    let violations = check(TITLE_WITH_STEPS, "# Title\n\n## Installation\n");
    let missing = by_rule(&violations, rules::REQUIRED_SECTION);

    assert_eq!(missing.len(), 1);
    assert!(missing[0].message().contains("'## Usage'"));
    assert!(missing[0].message().contains("in 'Title'"));
    // Reported at the parent heading.
    assert_eq!(missing[0].line(), 1);
}

#[test]
fn test_missing_parent_hides_missing_children() {
    let violations = check(TITLE_WITH_STEPS, "");
    let missing = by_rule(&violations, rules::REQUIRED_SECTION);

    assert_eq!(missing.len(), 1);
    assert!(missing[0].message().contains("'# Title'"));
    assert_eq!((missing[0].line(), missing[0].column()), (1, 1));
}

#[test]
fn test_out_of_order_is_reported_as_ordering_not_missing() {
    let markdown = "# Title\n\n## Usage\n\n## Installation\n";
    let violations = check(TITLE_WITH_STEPS, markdown);

    let order = by_rule(&violations, rules::SECTION_ORDER);
    assert_eq!(order.len(), 1);
    assert_eq!(order[0].line(), 3);
    assert!(order[0].message().contains("## Usage"));
    assert!(order[0].message().contains("## Installation"));

    assert!(by_rule(&violations, rules::REQUIRED_SECTION).is_empty());
    assert!(by_rule(&violations, rules::UNEXPECTED_SECTION).is_empty());
}

#[test]
fn test_misplaced_section_also_fails_first_heading() {
    let markdown = "# Title\n\n## Usage\n\n## Installation\n";
    let violations = check(TITLE_WITH_STEPS, markdown);

    let first = by_rule(&violations, rules::FIRST_HEADING);
    assert_eq!(first.len(), 1);
    assert!(first[0].message().contains("'## Installation'"));
}

#[test]
fn test_children_of_misplaced_section_are_not_unexpected() {
    let markdown = "# Title\n\n## Usage\n\n### Flags\n\n## Installation\n";
    let violations = check(TITLE_WITH_STEPS, markdown);
    assert!(by_rule(&violations, rules::UNEXPECTED_SECTION).is_empty());
}

// ============================================================================
// First heading
// ============================================================================

#[test]
fn test_wrong_first_heading_at_root() {
    let schema = r####"
structure:
  - heading: "# Title"
"####;
    let violations = check(schema, "# Other\n");

    let first = by_rule(&violations, rules::FIRST_HEADING);
    assert_eq!(first.len(), 1);
    assert!(first[0].message().contains("found '# Other'"));
}

#[test]
fn test_permissive_scope_still_checks_first_heading() {
    let schema = r####"
structure:
  - heading: "# Title"
    allow_additional: true
    children:
      - heading: "## Usage"
"####;
    let violations = check(schema, "# Title\n## Notes\n## Usage\n");

    // The extra section itself is allowed, but it still displaces the first child.
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule(), rules::FIRST_HEADING);
    assert_eq!(violations[0].line(), 2);
    assert!(violations[0].message().contains("## Notes"));
}

// ============================================================================
// Severity and counts
// ============================================================================

#[test]
fn test_element_severity_is_used() {
    let schema = r####"
structure:
  - heading: "# Title"
    children:
      - heading: "## Usage"
        severity: warning
"####;
    let violations = check(schema, "# Title\n");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity(), Severity::Warning);
}

#[test]
fn test_count_minimum_is_enforced() {
    let schema = r####"
structure:
  - heading:
      pattern: "## Step \\d+"
    count:
      min: 3
      max: 0
"####;
    let violations = check(schema, "## Step 1\n## Step 2\n");
    let counts = by_rule(&violations, rules::SECTION_COUNT);

    assert_eq!(counts.len(), 1);
    assert!(counts[0].message().contains("at least 3"));
    assert!(counts[0].message().contains("found 2"));
}

#[test]
fn test_sections_over_count_max_are_unexpected() {
    let schema = r####"
structure:
  - heading:
      pattern: "## Step \\d+"
    count:
      min: 1
      max: 3
"####;
    let markdown = "## Step 1\n## Step 2\n## Step 3\n## Step 4\n";
    let violations = check(schema, markdown);
    let unexpected = by_rule(&violations, rules::UNEXPECTED_SECTION);

    assert_eq!(unexpected.len(), 1);
    assert_eq!(unexpected[0].line(), 4);
}

#[test]
fn test_evaluation_is_idempotent() {
    let markdown = "# Title\n\n## Usage\n\n## Extra\n\n## Installation\n";
    assert_eq!(
        check(TITLE_WITH_STEPS, markdown),
        check(TITLE_WITH_STEPS, markdown)
    );
}

#[test]
fn test_literal_heading_with_inline_code() {
    let schema = r####"
structure:
  - heading: "## Use `cargo`"
"####;
    assert!(check(schema, "## Use `cargo`\n").is_empty());
}
