use super::check_count;
use crate::validate::{Context, Validator, Violation, rules};

/// Word count over a section's prose. Code blocks are not counted.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCountValidator;

impl Validator for WordCountValidator {
    fn name(&self) -> &'static str {
        rules::WORD_COUNT
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        ctx.bound_sections()
            .filter_map(|(node, section)| {
                let rule = node.element.rules.word_count?;
                let words = section.text.split_whitespace().count();
                check_count(
                    rules::WORD_COUNT,
                    section,
                    "words",
                    words,
                    rule.min,
                    rule.max,
                )
            })
            .collect()
    }
}
