use super::check_count;
use crate::schema::ListKind;
use crate::validate::{Context, Validator, Violation, rules};

/// List counts by kind and minimum items per list.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListValidator;

impl Validator for ListValidator {
    fn name(&self) -> &'static str {
        rules::LISTS
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (node, section) in ctx.bound_sections() {
            for rule in &node.element.rules.lists {
                let lists: Vec<_> = section
                    .lists
                    .iter()
                    .filter(|list| match rule.kind {
                        ListKind::Any => true,
                        ListKind::Ordered => list.ordered,
                        ListKind::Unordered => !list.ordered,
                    })
                    .collect();

                violations.extend(check_count(
                    rules::LISTS,
                    section,
                    &format!("{}lists", rule.kind),
                    lists.len(),
                    rule.min,
                    rule.max,
                ));

                for list in lists.iter().filter(|l| l.items < rule.min_items) {
                    violations.push(Violation::error(
                        rules::LISTS,
                        format!(
                            "list has {} items, expected at least {}",
                            list.items, rule.min_items
                        ),
                        list.line,
                        list.column,
                    ));
                }
            }
        }

        violations
    }
}
