use crate::validate::{Context, Validator, Violation, rules};
use std::collections::HashMap;

/// Document-wide heading rules: level skips, maximum depth, duplicates.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadingRulesValidator;

impl Validator for HeadingRulesValidator {
    fn name(&self) -> &'static str {
        "heading-rules"
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let settings = ctx.schema.heading_rules;
        let document = ctx.document;
        let mut violations = Vec::new();
        // Heading text -> line of first occurrence.
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for section in document.headed_sections() {
            let Some(heading) = &section.heading else {
                continue;
            };

            if settings.no_skip_levels
                && let Some(parent) = section
                    .parent
                    .and_then(|p| document.section(p).heading.as_ref())
                && heading.level > parent.level + 1
            {
                violations.push(Violation::error(
                    rules::HEADING_LEVELS,
                    format!(
                        "heading level {} skips from level {} of '{}'",
                        heading.level, parent.level, parent.text
                    ),
                    heading.line,
                    heading.column,
                ));
            }

            if settings.max_depth > 0 && heading.level > settings.max_depth {
                violations.push(Violation::error(
                    rules::HEADING_DEPTH,
                    format!(
                        "heading level {} exceeds maximum depth {}",
                        heading.level, settings.max_depth
                    ),
                    heading.line,
                    heading.column,
                ));
            }

            if settings.unique {
                match seen.get(heading.text.as_str()) {
                    Some(first) => violations.push(Violation::error(
                        rules::DUPLICATE_HEADING,
                        format!(
                            "duplicate heading '{}' (first used on line {})",
                            heading.text, first
                        ),
                        heading.line,
                        heading.column,
                    )),
                    None => {
                        seen.insert(&heading.text, heading.line);
                    }
                }
            }
        }

        violations
    }
}
