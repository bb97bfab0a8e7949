//! Schema value types and defaults.
//!
//! This module defines the heading specification sum type, occurrence
//! constraints, severities, and the per-section content rule bundle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a schema element identifies its heading.
///
/// In YAML a plain string is a literal; a map selects the variant by key:
///
/// ```text
/// heading: "## Usage"
/// heading: { pattern: "## Step \\d+" }
/// heading: { expr: "slug(filename) == slug(heading)" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHeadingSpec", into = "RawHeadingSpec")]
pub enum HeadingSpec {
    /// Exact match against the reconstructed heading (`"## Text"`).
    Literal(String),
    /// Anchored regular expression over the reconstructed heading.
    Regex(String),
    /// Boolean expression over `filename` and `heading`.
    Expr(String),
}

impl HeadingSpec {
    /// The raw pattern text, whatever the variant.
    pub fn source(&self) -> &str {
        match self {
            HeadingSpec::Literal(s) | HeadingSpec::Regex(s) | HeadingSpec::Expr(s) => s,
        }
    }
}

impl fmt::Display for HeadingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingSpec::Literal(text) => write!(f, "'{}'", text.trim()),
            HeadingSpec::Regex(pattern) => write!(f, "pattern /{}/", pattern),
            HeadingSpec::Expr(expr) => write!(f, "expression `{}`", expr),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawHeadingSpec {
    Text(String),
    Keyed(KeyedHeadingSpec),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyedHeadingSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    literal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expr: Option<String>,
}

impl TryFrom<RawHeadingSpec> for HeadingSpec {
    type Error = String;

    fn try_from(raw: RawHeadingSpec) -> Result<Self, Self::Error> {
        let keyed = match raw {
            RawHeadingSpec::Text(text) => return Ok(HeadingSpec::Literal(text)),
            RawHeadingSpec::Keyed(keyed) => keyed,
        };

        match (keyed.literal, keyed.pattern, keyed.expr) {
            (Some(text), None, None) => Ok(HeadingSpec::Literal(text)),
            (None, Some(pattern), None) => Ok(HeadingSpec::Regex(pattern)),
            (None, None, Some(expr)) => Ok(HeadingSpec::Expr(expr)),
            (None, None, None) => {
                Err("heading needs one of 'literal', 'pattern' or 'expr'".to_string())
            }
            _ => Err("heading must set exactly one of 'literal', 'pattern' or 'expr'".to_string()),
        }
    }
}

impl From<HeadingSpec> for RawHeadingSpec {
    fn from(spec: HeadingSpec) -> Self {
        match spec {
            HeadingSpec::Literal(text) => RawHeadingSpec::Text(text),
            HeadingSpec::Regex(pattern) => RawHeadingSpec::Keyed(KeyedHeadingSpec {
                pattern: Some(pattern),
                ..Default::default()
            }),
            HeadingSpec::Expr(expr) => RawHeadingSpec::Keyed(KeyedHeadingSpec {
                expr: Some(expr),
                ..Default::default()
            }),
        }
    }
}

/// Occurrence bounds for an element. `max == 0` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CountConstraint {
    pub min: usize,
    pub max: usize,
}

/// Severity attached to a violation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

impl Severity {
    pub(crate) fn is_default(&self) -> bool {
        *self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(name)
    }
}

/// Text to require or forbid in a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextPattern {
    Literal(String),
    Regex { pattern: String },
}

impl fmt::Display for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextPattern::Literal(text) => write!(f, "'{}'", text),
            TextPattern::Regex { pattern } => write!(f, "pattern /{}/", pattern),
        }
    }
}

/// Code block count bounds, optionally restricted to one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeBlockRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub min: usize,
    pub max: usize,
}

/// Table count bounds plus per-table shape requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRule {
    pub min: usize,
    pub max: usize,
    pub min_columns: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_headers: Vec<String>,
}

/// Which kind of list a [`ListRule`] counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    #[default]
    Any,
    Ordered,
    Unordered,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListKind::Any => "",
            ListKind::Ordered => "ordered ",
            ListKind::Unordered => "unordered ",
        };
        f.write_str(name)
    }
}

/// List count bounds and minimum item count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListRule {
    #[serde(rename = "type")]
    pub kind: ListKind,
    pub min: usize,
    pub max: usize,
    pub min_items: usize,
}

/// Image count bounds, alt text and allowed file formats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRule {
    pub min: usize,
    pub max: usize,
    pub require_alt: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
}

/// Word count bounds over a section's prose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCountRule {
    pub min: usize,
    pub max: usize,
}

/// Content rules attached to a single schema element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRules {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub code_blocks: Vec<CodeBlockRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<ListRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<WordCountRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_text: Vec<TextPattern>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub forbidden_text: Vec<TextPattern>,
}

impl ContentRules {
    /// True when no content rule is configured.
    pub fn is_empty(&self) -> bool {
        self.code_blocks.is_empty()
            && self.tables.is_empty()
            && self.lists.is_empty()
            && self.images.is_none()
            && self.word_count.is_none()
            && self.required_text.is_empty()
            && self.forbidden_text.is_empty()
    }
}

/// Expected value type of a front matter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Any,
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Any => "any",
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        };
        f.write_str(name)
    }
}

/// String formats a front matter field can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    /// `YYYY-MM-DD`
    Date,
    Email,
    /// Absolute `http`/`https` URL.
    Url,
}

impl fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldFormat::Date => "date",
            FieldFormat::Email => "email",
            FieldFormat::Url => "url",
        };
        f.write_str(name)
    }
}

/// One expected front matter field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRule {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
}

/// Front matter requirements for the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatterRule {
    pub optional: bool,
    pub fields: Vec<FieldRule>,
}

/// Link checking options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkRules {
    /// Check `#anchor` links against the document's heading slugs.
    pub validate_internal: bool,
    /// Check relative links against the filesystem.
    pub validate_files: bool,
    /// Issue one request per external link.
    pub validate_external: bool,
    /// Per-request timeout in seconds.
    pub external_timeout: u64,
    pub allowed_domains: Vec<String>,
    pub blocked_domains: Vec<String>,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            validate_internal: true,
            validate_files: true,
            validate_external: false,
            external_timeout: default_external_timeout(),
            allowed_domains: Vec::new(),
            blocked_domains: Vec::new(),
        }
    }
}

/// Document-wide heading hygiene rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingRules {
    /// Reject a heading more than one level deeper than its parent.
    pub no_skip_levels: bool,
    /// Deepest allowed heading level (0 = unlimited).
    pub max_depth: u8,
    /// Reject duplicate heading text anywhere in the document.
    pub unique: bool,
}

pub(crate) fn default_external_timeout() -> u64 {
    10
}
