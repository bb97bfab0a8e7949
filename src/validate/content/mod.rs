//! Content rule validators.
//!
//! Section rules (code blocks, tables, lists, images, word count, text) run
//! once per bound section, so every occurrence of a multi-match element is
//! checked. Document rules (front matter, links, heading hygiene) run once.
//! Content violations are always errors; element severity applies to
//! structural findings only.

mod code_blocks;
mod frontmatter;
mod headings;
mod images;
mod links;
mod lists;
mod tables;
mod text;
mod word_count;


use super::{Validator, Violation};
use crate::document::Section;

pub use code_blocks::CodeBlockValidator;
pub use frontmatter::FrontMatterValidator;
pub use headings::HeadingRulesValidator;
pub use images::ImageValidator;
pub use links::{HttpProbe, LinkValidator, UrlProbe};
pub use lists::ListValidator;
pub use tables::TableValidator;
pub use text::TextValidator;
pub use word_count::WordCountValidator;

/// Content validators in the order they run.
pub fn validators() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(CodeBlockValidator),
        Box::new(TableValidator),
        Box::new(ListValidator),
        Box::new(ImageValidator),
        Box::new(WordCountValidator),
        Box::new(TextValidator),
        Box::new(FrontMatterValidator),
        Box::new(LinkValidator),
        Box::new(HeadingRulesValidator),
    ]
}

/// Check `count` against `min` and `max` (`max == 0` means unlimited).
///
/// `what` names the counted thing in plural form, e.g. `"bash code blocks"`.
fn check_count(
    rule: &'static str,
    section: &Section,
    what: &str,
    count: usize,
    min: usize,
    max: usize,
) -> Option<Violation> {
    let problem = if count < min {
        format!("expected at least {}", min)
    } else if max > 0 && count > max {
        format!("expected at most {}", max)
    } else {
        return None;
    };

    let (line, column) = section.location();
    Some(Violation::error(
        rule,
        format!(
            "section '{}' has {} {}, {}",
            section.title(),
            count,
            what,
            problem
        ),
        line,
        column,
    ))
}
