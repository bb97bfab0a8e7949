use super::check_count;
use crate::validate::{Context, Validator, Violation, rules};

/// Table counts, minimum columns and required header cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableValidator;

impl Validator for TableValidator {
    fn name(&self) -> &'static str {
        rules::TABLES
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (node, section) in ctx.bound_sections() {
            for rule in &node.element.rules.tables {
                violations.extend(check_count(
                    rules::TABLES,
                    section,
                    "tables",
                    section.tables.len(),
                    rule.min,
                    rule.max,
                ));

                for table in &section.tables {
                    if table.columns < rule.min_columns {
                        violations.push(Violation::error(
                            rules::TABLES,
                            format!(
                                "table has {} columns, expected at least {}",
                                table.columns, rule.min_columns
                            ),
                            table.line,
                            table.column,
                        ));
                    }

                    let missing: Vec<&str> = rule
                        .required_headers
                        .iter()
                        .map(|h| h.trim())
                        .filter(|wanted| {
                            !table
                                .headers
                                .iter()
                                .any(|h| h.eq_ignore_ascii_case(wanted))
                        })
                        .collect();
                    if !missing.is_empty() {
                        violations.push(Violation::error(
                            rules::TABLES,
                            format!("table is missing header(s): {}", missing.join(", ")),
                            table.line,
                            table.column,
                        ));
                    }
                }
            }
        }

        violations
    }
}
