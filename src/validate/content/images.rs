use super::check_count;
use crate::validate::{Context, Validator, Violation, rules};

/// Image counts, alt text and file formats.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageValidator;

impl Validator for ImageValidator {
    fn name(&self) -> &'static str {
        rules::IMAGES
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (node, section) in ctx.bound_sections() {
            let Some(rule) = &node.element.rules.images else {
                continue;
            };

            violations.extend(check_count(
                rules::IMAGES,
                section,
                "images",
                section.images.len(),
                rule.min,
                rule.max,
            ));

            for image in &section.images {
                if rule.require_alt && image.alt.trim().is_empty() {
                    violations.push(Violation::error(
                        rules::IMAGES,
                        format!("image '{}' has no alt text", image.url),
                        image.line,
                        image.column,
                    ));
                }

                if !rule.formats.is_empty() {
                    let extension = extension(&image.url);
                    let allowed = extension.as_deref().is_some_and(|ext| {
                        rule.formats
                            .iter()
                            .any(|f| f.trim_start_matches('.').eq_ignore_ascii_case(ext))
                    });
                    if !allowed {
                        violations.push(Violation::error(
                            rules::IMAGES,
                            format!(
                                "image '{}' is not one of the allowed formats: {}",
                                image.url,
                                rule.formats.join(", ")
                            ),
                            image.line,
                            image.column,
                        ));
                    }
                }
            }
        }

        violations
    }
}

/// Lowercased file extension of a URL or path, ignoring query and fragment.
fn extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
