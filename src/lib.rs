//! mdschema: validate Markdown documents against a declarative YAML schema.
//!
//! The pipeline for one document:
//! 1. [`document::Document::parse`] builds a section tree from Markdown
//! 2. [`vast::build`] binds schema elements to sections in schema order
//! 3. [`validate::validate_document`] runs the structure evaluator and the
//!    content rule validators over the bound tree
//!
//! The `mdschema` binary wraps this with schema discovery, file discovery and
//! text or JSON reporting.

pub mod cli;
pub mod commands;
pub mod discovery;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod schema;
pub mod validate;
pub mod vast;
