use super::check_count;
use crate::validate::{Context, Validator, Violation, rules};

/// Code block counts, optionally per language.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeBlockValidator;

impl Validator for CodeBlockValidator {
    fn name(&self) -> &'static str {
        rules::CODE_BLOCKS
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (node, section) in ctx.bound_sections() {
            for rule in &node.element.rules.code_blocks {
                let count = section
                    .code_blocks
                    .iter()
                    .filter(|block| match &rule.lang {
                        Some(lang) => block
                            .lang
                            .as_deref()
                            .is_some_and(|l| l.eq_ignore_ascii_case(lang)),
                        None => true,
                    })
                    .count();

                let what = match &rule.lang {
                    Some(lang) => format!("{} code blocks", lang),
                    None => "code blocks".to_string(),
                };
                violations.extend(check_count(
                    rules::CODE_BLOCKS,
                    section,
                    &what,
                    count,
                    rule.min,
                    rule.max,
                ));
            }
        }

        violations
    }
}
