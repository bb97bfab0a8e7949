//! Schema model for mdschema.
//!
//! This module defines the `Schema` struct that represents `.mdschema.yml`:
//! a tree of expected headings with occurrence counts, severities and
//! per-section content rules, plus document-wide front matter, link and
//! heading rules. Parsing is forward-compatible (unknown top-level fields are
//! ignored) and every optional field has a default.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{Schema, SchemaElement};
pub use operations::SCHEMA_FILE_NAMES;
pub use types::{
    CodeBlockRule, ContentRules, CountConstraint, FieldFormat, FieldRule, FieldType,
    FrontMatterRule, HeadingRules, HeadingSpec, ImageRule, LinkRules, ListKind, ListRule,
    Severity, TableRule, TextPattern, WordCountRule,
};
