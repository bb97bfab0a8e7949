//! Implementation of the `mdschema derive` command.
//!
//! Infers a starting schema from an existing document: one literal element
//! per heading, nested like the document, plus one front matter field per
//! top-level key with its observed type.

use crate::cli::DeriveArgs;
use crate::document::{Document, SectionId};
use crate::error::{MdschemaError, Result};
use crate::schema::{FieldRule, FieldType, FrontMatterRule, Schema, SchemaElement};
use serde_yaml::Value;
use tracing::info;

/// Execute the `mdschema derive` command.
pub fn cmd_derive(args: DeriveArgs) -> Result<()> {
    let document = Document::load(&args.file)?;
    let yaml = derive_schema(&document).to_yaml()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, yaml).map_err(|e| {
                MdschemaError::IoError(format!(
                    "failed to write schema '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            info!(path = %path.display(), "wrote derived schema");
        }
        None => print!("{}", yaml),
    }
    Ok(())
}

/// Build a schema that `document` satisfies.
pub fn derive_schema(document: &Document) -> Schema {
    let structure = derive_elements(document, &document.root().children);

    let frontmatter = document
        .front_matter
        .as_ref()
        .filter(|fm| fm.error.is_none())
        .map(|fm| FrontMatterRule {
            optional: false,
            fields: fm
                .fields
                .iter()
                .filter_map(|(key, value)| {
                    key.as_str().map(|name| FieldRule {
                        name: name.to_string(),
                        kind: field_type(value),
                        ..Default::default()
                    })
                })
                .collect(),
        });

    Schema {
        structure,
        frontmatter,
        ..Default::default()
    }
}

fn derive_elements(document: &Document, ids: &[SectionId]) -> Vec<SchemaElement> {
    ids.iter()
        .filter_map(|&id| {
            let section = document.section(id);
            let heading = section.heading.as_ref()?;
            Some(
                SchemaElement::literal(heading.reconstructed())
                    .with_children(derive_elements(document, &section.children)),
            )
        })
        .collect()
}

fn field_type(value: &Value) -> FieldType {
    match value {
        Value::String(_) => FieldType::String,
        Value::Number(_) => FieldType::Number,
        Value::Bool(_) => FieldType::Boolean,
        Value::Sequence(_) => FieldType::Array,
        Value::Mapping(_) => FieldType::Object,
        Value::Null | Value::Tagged(_) => FieldType::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::HeadingSpec;
    use crate::validate::{UrlProbe, validate_document};

    struct Offline;

    impl UrlProbe for Offline {
        fn probe(&self, _url: &str) -> std::result::Result<u16, String> {
            Err("offline".to_string())
        }
    }

    const GUIDE: &str = "---\ntitle: Guide\nversion: 2\ntags: [a, b]\n---\n# Guide\n\n## Install\n\n### From source\n\n## Usage\n";

    #[test]
    fn test_structure_mirrors_heading_tree() {
        let document = Document::parse("guide.md", GUIDE);
        let schema = derive_schema(&document);

        assert_eq!(schema.structure.len(), 1);
        let guide = &schema.structure[0];
        assert_eq!(guide.heading, HeadingSpec::Literal("# Guide".to_string()));
        assert_eq!(guide.children.len(), 2);
        assert_eq!(guide.children[0].children.len(), 1);
        assert_eq!(
            guide.children[0].children[0].heading,
            HeadingSpec::Literal("### From source".to_string())
        );
    }

    #[test]
    fn test_front_matter_field_types() {
        let document = Document::parse("guide.md", GUIDE);
        let schema = derive_schema(&document);
        let fields = schema.frontmatter.unwrap().fields;

        let kinds: Vec<(&str, FieldType)> =
            fields.iter().map(|f| (f.name.as_str(), f.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("title", FieldType::String),
                ("version", FieldType::Number),
                ("tags", FieldType::Array),
            ]
        );
    }

    #[test]
    fn test_derived_schema_accepts_its_source() {
        let document = Document::parse("guide.md", GUIDE);
        let schema = derive_schema(&document);
        assert!(validate_document(&document, &schema, &Offline).is_empty());

        // And it survives a YAML round trip.
        let reloaded = Schema::from_yaml(&schema.to_yaml().unwrap()).unwrap();
        assert_eq!(reloaded.structure, schema.structure);
    }

    #[test]
    fn test_document_without_front_matter() {
        let document = Document::parse("notes.md", "# Notes\n");
        let schema = derive_schema(&document);
        assert!(schema.frontmatter.is_none());
        assert_eq!(schema.structure.len(), 1);
    }
}
