use crate::document::FrontMatter;
use crate::schema::{FieldFormat, FieldRule, FieldType};
use crate::validate::{Context, Validator, Violation, rules};
use chrono::NaiveDate;
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex")
});

/// Front matter presence, field types and string formats.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontMatterValidator;

impl Validator for FrontMatterValidator {
    fn name(&self) -> &'static str {
        rules::FRONTMATTER
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let Some(rule) = &ctx.schema.frontmatter else {
            return Vec::new();
        };

        let Some(front_matter) = &ctx.document.front_matter else {
            if rule.optional {
                return Vec::new();
            }
            return vec![Violation::error(
                rules::FRONTMATTER,
                "document has no front matter",
                1,
                1,
            )];
        };

        if let Some(error) = &front_matter.error {
            return vec![Violation::error(rules::FRONTMATTER, error.clone(), 1, 1)];
        }

        rule.fields
            .iter()
            .filter_map(|field| check_field(front_matter, field))
            .collect()
    }
}

fn check_field(front_matter: &FrontMatter, field: &FieldRule) -> Option<Violation> {
    let line = field_line(front_matter, &field.name);
    let value = match front_matter.get(&field.name) {
        None | Some(Value::Null) if field.optional => return None,
        None | Some(Value::Null) => {
            return Some(Violation::error(
                rules::FRONTMATTER,
                format!("missing required front matter field '{}'", field.name),
                line,
                1,
            ));
        }
        Some(value) => value,
    };

    if !has_type(value, field.kind) {
        return Some(Violation::error(
            rules::FRONTMATTER,
            format!(
                "front matter field '{}' should be of type {}",
                field.name, field.kind
            ),
            line,
            1,
        ));
    }

    let format = field.format?;
    let valid = value.as_str().is_some_and(|s| has_format(s, format));
    (!valid).then(|| {
        Violation::error(
            rules::FRONTMATTER,
            format!(
                "front matter field '{}' is not a valid {}",
                field.name, format
            ),
            line,
            1,
        )
    })
}

fn has_type(value: &Value, kind: FieldType) -> bool {
    match kind {
        FieldType::Any => true,
        FieldType::String => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_bool(),
        FieldType::Array => value.is_sequence(),
        FieldType::Object => value.is_mapping(),
    }
}

fn has_format(value: &str, format: FieldFormat) -> bool {
    match format {
        FieldFormat::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        FieldFormat::Email => EMAIL_REGEX.is_match(value),
        FieldFormat::Url => url::Url::parse(value)
            .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host()),
    }
}

/// Line of `name:` in the original file, or 1 when the key is absent.
///
/// Line 1 is the opening delimiter, so the first YAML line is line 2.
fn field_line(front_matter: &FrontMatter, name: &str) -> usize {
    front_matter
        .raw
        .lines()
        .position(|line| {
            line.strip_prefix(name)
                .is_some_and(|rest| rest.trim_start().starts_with(':'))
        })
        .map_or(1, |index| index + 2)
}
