//! Schema and SchemaElement definitions.

use super::types::*;
use serde::{Deserialize, Serialize};

/// A complete validation schema.
///
/// This struct represents the contents of `.mdschema.yml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Exempt sections that no root-level element claims.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub allow_additional: bool,

    /// Expected top-level headings, in document order.
    pub structure: Vec<SchemaElement>,

    /// Front matter requirements (none when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<FrontMatterRule>,

    /// Link checking options.
    pub links: LinkRules,

    /// Document-wide heading rules.
    pub heading_rules: HeadingRules,
}

/// One expected heading and everything nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaElement {
    pub heading: HeadingSpec,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,

    /// Occurrence bounds. Supersedes `optional` for the minimum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<CountConstraint>,

    #[serde(default, skip_serializing_if = "Severity::is_default")]
    pub severity: Severity,

    /// Exempt every section nested below a match from unexpected-section reports.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_additional: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaElement>,

    #[serde(flatten)]
    pub rules: ContentRules,
}

impl SchemaElement {
    /// Create a required element with no children or rules.
    pub fn new(heading: HeadingSpec) -> Self {
        Self {
            heading,
            optional: false,
            count: None,
            severity: Severity::default(),
            allow_additional: false,
            children: Vec::new(),
            rules: ContentRules::default(),
        }
    }

    /// Shorthand for a literal heading element.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(HeadingSpec::Literal(text.into()))
    }

    pub fn with_children(mut self, children: Vec<SchemaElement>) -> Self {
        self.children = children;
        self
    }

    /// Minimum number of sections this element must bind.
    pub fn min_occurrences(&self) -> usize {
        match self.count {
            Some(count) => count.min,
            None if self.optional => 0,
            None => 1,
        }
    }

    /// Maximum number of sections this element may bind (`None` = unlimited).
    pub fn max_occurrences(&self) -> Option<usize> {
        match self.count {
            Some(CountConstraint { max: 0, .. }) => None,
            Some(count) => Some(count.max),
            None => Some(1),
        }
    }

    pub fn is_required(&self) -> bool {
        self.min_occurrences() > 0
    }
}
