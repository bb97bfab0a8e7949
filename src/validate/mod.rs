//! Validation of one document against one schema.
//!
//! A validation run builds the bound tree once and hands it to every
//! validator through a shared [`Context`]. Structure is checked first, then
//! the content validators run in a fixed order, so the returned violations
//! are deterministic for a given (document, schema) pair.
//!
//! Error handling:
//! - Validators never fail; every problem becomes a [`Violation`]
//! - Invalid regexes degrade to literal matching (logged once per pattern)

mod content;
mod structure;
mod violation;

use crate::document::{Document, Section};
use crate::matcher::PatternMatcher;
use crate::schema::Schema;
use crate::vast::{self, Node, Tree};
use tracing::debug;

pub use content::{HttpProbe, UrlProbe};
pub use structure::StructureValidator;
pub use violation::{Violation, rules};

/// Everything a validator may look at during one run.
pub struct Context<'a, 's> {
    pub document: &'a Document,
    pub schema: &'s Schema,
    pub tree: &'a Tree<'s>,
    pub matcher: &'a PatternMatcher,
    pub probe: &'a dyn UrlProbe,
    base_name: String,
}

impl<'a, 's> Context<'a, 's> {
    pub fn new(
        document: &'a Document,
        schema: &'s Schema,
        tree: &'a Tree<'s>,
        matcher: &'a PatternMatcher,
        probe: &'a dyn UrlProbe,
    ) -> Self {
        Self {
            document,
            schema,
            tree,
            matcher,
            probe,
            base_name: document.base_name(),
        }
    }

    /// Document file name without directory or extension.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Bound nodes paired with their sections, in build order.
    pub fn bound_sections(&self) -> impl Iterator<Item = (&'a Node<'s>, &'a Section)> {
        let document = self.document;
        self.tree
            .bound_nodes()
            .filter_map(move |node| node.section.map(|id| (node, document.section(id))))
    }
}

/// One independent check over a validation context.
pub trait Validator {
    /// Short name used in debug logging.
    fn name(&self) -> &'static str;

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation>;
}

/// All validators in the order they run.
pub fn validators() -> Vec<Box<dyn Validator>> {
    let mut all: Vec<Box<dyn Validator>> = vec![Box::new(StructureValidator)];
    all.extend(content::validators());
    all
}

/// Validate `document` against `schema`.
///
/// Structure violations come first, followed by content violations. The
/// caller attaches the file path and sorts for reporting.
pub fn validate_document(
    document: &Document,
    schema: &Schema,
    probe: &dyn UrlProbe,
) -> Vec<Violation> {
    let matcher = PatternMatcher::new();
    let tree = vast::build(document, &schema.structure, &matcher);
    debug!(
        path = %document.path.display(),
        nodes = tree.nodes().len(),
        unmatched = tree.unmatched().len(),
        "built validation tree"
    );

    let ctx = Context::new(document, schema, &tree, &matcher, probe);
    let mut violations = Vec::new();
    for validator in validators() {
        let found = validator.validate(&ctx);
        debug!(validator = validator.name(), count = found.len(), "validator finished");
        violations.extend(found);
    }
    debug!(
        path = %document.path.display(),
        violations = violations.len(),
        patterns = matcher.regexes().pattern_count(),
        "validated document"
    );
    violations
}
