//! Binding schema elements to document sections.
//!
//! Binding is depth-first, one sibling list at a time. Within a list,
//! elements are bound in schema order, and the search for each element starts
//! strictly after the line of the previous element's last match. This keeps
//! binding monotonic: a section is never bound twice, declared order wins over
//! proximity, and a section that precedes an earlier element can never be
//! taken by a later one.

use super::{Node, NodeId, Tree};
use crate::document::{Document, SectionId};
use crate::matcher::PatternMatcher;
use crate::schema::SchemaElement;
use tracing::debug;

/// Build the bound tree for `document` against `elements`.
///
/// Deterministic: candidates are always scanned in document order.
pub fn build<'s>(
    document: &Document,
    elements: &'s [SchemaElement],
    matcher: &PatternMatcher,
) -> Tree<'s> {
    let section_count = document.sections().len();
    let mut builder = Builder {
        document,
        matcher,
        base_name: document.base_name(),
        bound: vec![false; section_count],
        nodes: Vec::new(),
        section_nodes: vec![None; section_count],
    };

    let roots = builder.build_list(elements, None, Some(SectionId::ROOT));

    let unmatched = document
        .headed_sections()
        .map(|s| s.id)
        .filter(|id| !builder.bound[id.0])
        .collect();

    Tree {
        roots,
        nodes: builder.nodes,
        unmatched,
        section_nodes: builder.section_nodes,
    }
}

struct Builder<'s, 'a> {
    document: &'a Document,
    matcher: &'a PatternMatcher,
    base_name: String,
    bound: Vec<bool>,
    nodes: Vec<Node<'s>>,
    section_nodes: Vec<Option<NodeId>>,
}

impl<'s> Builder<'s, '_> {
    /// Bind one sibling list against the children of `parent_section`.
    ///
    /// An unbound parent (`None`) has no candidates; its required elements
    /// still get unbound nodes so they can be reported individually.
    fn build_list(
        &mut self,
        elements: &'s [SchemaElement],
        parent: Option<NodeId>,
        parent_section: Option<SectionId>,
    ) -> Vec<NodeId> {
        let candidates: Vec<SectionId> = parent_section
            .map(|id| self.document.section(id).children.clone())
            .unwrap_or_default();

        let mut last_matched_line = 0;
        let mut ids = Vec::new();

        for (order, element) in elements.iter().enumerate() {
            let matches = self.find_matches(element, &candidates, last_matched_line);

            if matches.is_empty() {
                if element.is_required() {
                    debug!(heading = %element.heading, "no match for required element");
                    let id = self.push_node(element, None, parent, order, 0, 0);
                    let children = self.build_list(&element.children, Some(id), None);
                    self.nodes[id.0].children = children;
                    ids.push(id);
                }
                continue;
            }

            let match_count = matches.len();
            for (match_index, &section) in matches.iter().enumerate() {
                debug!(
                    heading = %element.heading,
                    line = self.document.section(section).start_line(),
                    match_index,
                    "bound element"
                );
                self.bound[section.0] = true;
                let id = self.push_node(
                    element,
                    Some(section),
                    parent,
                    order,
                    match_count,
                    match_index,
                );
                self.section_nodes[section.0] = Some(id);
                let children = self.build_list(&element.children, Some(id), Some(section));
                self.nodes[id.0].children = children;
                ids.push(id);
            }

            if let Some(&last) = matches.last() {
                last_matched_line = self.document.section(last).start_line();
            }
        }

        ids
    }

    /// Unbound candidates after `after_line` that satisfy the element's
    /// heading, up to its maximum occurrence count.
    fn find_matches(
        &self,
        element: &SchemaElement,
        candidates: &[SectionId],
        after_line: usize,
    ) -> Vec<SectionId> {
        let limit = element.max_occurrences().unwrap_or(usize::MAX);
        candidates
            .iter()
            .copied()
            .filter(|id| !self.bound[id.0])
            .filter(|&id| self.document.section(id).start_line() > after_line)
            .filter(|&id| {
                self.matcher
                    .matches(self.document.section(id), &element.heading, &self.base_name)
            })
            .take(limit)
            .collect()
    }

    fn push_node(
        &mut self,
        element: &'s SchemaElement,
        section: Option<SectionId>,
        parent: Option<NodeId>,
        order: usize,
        match_count: usize,
        match_index: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            element,
            section,
            parent,
            children: Vec::new(),
            match_count,
            match_index,
            order,
        });
        id
    }
}
