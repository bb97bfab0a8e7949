//! Schema loading, validation, and discovery.

use super::model::{Schema, SchemaElement};
use super::types::HeadingSpec;
use crate::error::{MdschemaError, Result};
use crate::matcher::expr::Expr;
use std::path::{Path, PathBuf};

/// File names searched for by [`Schema::discover`], in priority order.
pub const SCHEMA_FILE_NAMES: &[&str] = &[".mdschema.yml", ".mdschema.yaml"];

impl Schema {
    /// Load a schema from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Schema)` - Successfully loaded and validated schema
    /// * `Err(MdschemaError::IoError)` - The file could not be read
    /// * `Err(MdschemaError::SchemaError)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MdschemaError::IoError(format!(
                "failed to read schema file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            MdschemaError::SchemaError(msg) => {
                MdschemaError::SchemaError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse a schema from a YAML string.
    ///
    /// Unknown top-level fields are silently ignored for forward compatibility.
    /// An empty document yields the default (empty) schema.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let schema: Schema = if yaml.trim().is_empty() {
            Schema::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| MdschemaError::SchemaError(format!("failed to parse YAML: {}", e)))?
        };

        schema.validate()?;
        Ok(schema)
    }

    /// Serialize the schema to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            MdschemaError::SchemaError(format!("failed to serialize schema to YAML: {}", e))
        })
    }

    /// Validate schema values and return an error on the first invalid one.
    ///
    /// Validation rules:
    /// - headings must be non-empty
    /// - `expr` headings must parse and type-check as boolean expressions
    /// - `count.min` must not exceed a bounded `count.max`
    /// - content rule bounds must be consistent
    /// - front matter field names must be non-empty
    pub fn validate(&self) -> Result<()> {
        for (i, element) in self.structure.iter().enumerate() {
            validate_element(element, &format!("structure[{}]", i))?;
        }

        if let Some(frontmatter) = &self.frontmatter {
            for (i, field) in frontmatter.fields.iter().enumerate() {
                if field.name.trim().is_empty() {
                    return Err(MdschemaError::SchemaError(format!(
                        "frontmatter.fields[{}]: field name must be non-empty",
                        i
                    )));
                }
            }
        }

        if self.links.validate_external && self.links.external_timeout == 0 {
            return Err(MdschemaError::SchemaError(
                "links.external_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Search `start` and its ancestors for a schema file.
    ///
    /// Returns the first existing candidate, checking the names in
    /// [`SCHEMA_FILE_NAMES`] in each directory before moving up.
    pub fn discover<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
        start.as_ref().ancestors().find_map(|dir| {
            SCHEMA_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }
}

fn validate_element(element: &SchemaElement, path: &str) -> Result<()> {
    let fail = |msg: String| Err(MdschemaError::SchemaError(format!("{}: {}", path, msg)));

    if element.heading.source().trim().is_empty() {
        return fail("heading must be non-empty".to_string());
    }

    if let HeadingSpec::Expr(source) = &element.heading
        && let Err(e) = Expr::parse(source)
    {
        return fail(format!("invalid heading expression `{}`: {}", source, e));
    }

    if let Some(count) = element.count
        && count.max != 0
        && count.min > count.max
    {
        return fail(format!(
            "count.min ({}) must not exceed count.max ({})",
            count.min, count.max
        ));
    }

    let rules = &element.rules;
    for rule in &rules.code_blocks {
        check_bounds(path, "code_blocks", rule.min, rule.max)?;
    }
    for rule in &rules.tables {
        check_bounds(path, "tables", rule.min, rule.max)?;
    }
    for rule in &rules.lists {
        check_bounds(path, "lists", rule.min, rule.max)?;
    }
    if let Some(rule) = &rules.images {
        check_bounds(path, "images", rule.min, rule.max)?;
    }
    if let Some(rule) = &rules.word_count {
        check_bounds(path, "word_count", rule.min, rule.max)?;
    }

    for (i, child) in element.children.iter().enumerate() {
        validate_element(child, &format!("{}.children[{}]", path, i))?;
    }

    Ok(())
}

fn check_bounds(path: &str, rule: &str, min: usize, max: usize) -> Result<()> {
    if max != 0 && min > max {
        return Err(MdschemaError::SchemaError(format!(
            "{}: {}.min ({}) must not exceed {}.max ({})",
            path, rule, min, rule, max
        )));
    }
    Ok(())
}
