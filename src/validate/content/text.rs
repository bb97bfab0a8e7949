use crate::document::Section;
use crate::matcher::RegexCache;
use crate::schema::TextPattern;
use crate::validate::{Context, Validator, Violation, rules};

/// Required and forbidden text in a section's raw body.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextValidator;

impl Validator for TextValidator {
    fn name(&self) -> &'static str {
        "text"
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let regexes = ctx.matcher.regexes();
        let mut violations = Vec::new();

        for (node, section) in ctx.bound_sections() {
            let content = &node.element.rules;

            for pattern in &content.required_text {
                if find_all(regexes, pattern, &section.body).is_empty() {
                    let (line, column) = section.location();
                    violations.push(Violation::error(
                        rules::REQUIRED_TEXT,
                        format!(
                            "section '{}' must contain {}",
                            section.title(),
                            pattern
                        ),
                        line,
                        column,
                    ));
                }
            }

            for pattern in &content.forbidden_text {
                for offset in find_all(regexes, pattern, &section.body) {
                    violations.push(Violation::error(
                        rules::FORBIDDEN_TEXT,
                        format!(
                            "section '{}' must not contain {}",
                            section.title(),
                            pattern
                        ),
                        line_of(section, offset),
                        1,
                    ));
                }
            }
        }

        violations
    }
}

/// Byte offsets of every occurrence of `pattern` in `body`.
///
/// A regex that does not compile is searched for as literal text.
fn find_all(regexes: &RegexCache, pattern: &TextPattern, body: &str) -> Vec<usize> {
    let literal = match pattern {
        TextPattern::Literal(text) => text,
        TextPattern::Regex { pattern } => match regexes.get(pattern) {
            Some(re) => return re.find_iter(body).map(|m| m.start()).collect(),
            None => pattern,
        },
    };

    if literal.is_empty() {
        return Vec::new();
    }
    body.match_indices(literal.as_str()).map(|(i, _)| i).collect()
}

fn line_of(section: &Section, offset: usize) -> usize {
    section.body_line + section.body[..offset].matches('\n').count()
}
