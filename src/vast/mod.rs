//! Validation AST (VAST): schema elements bound to document sections.
//!
//! The tree owns every [`Node`] in a flat arena; parent and child links are
//! [`NodeId`] indices. Nodes refer to schema elements by reference and to
//! document sections by [`SectionId`], never owning either. A tree is built
//! fresh for each (document, schema) pair and discarded after validation.

mod builder;

#[cfg(test)]
mod tests;

use crate::document::SectionId;
use crate::schema::SchemaElement;

pub use builder::build;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// One schema element bound to zero or one document section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'s> {
    pub id: NodeId,
    pub element: &'s SchemaElement,
    /// The bound section, `None` for an unbound (missing) element.
    pub section: Option<SectionId>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Total sections bound by this node's element in this sibling list.
    pub match_count: usize,
    /// 0-based position of this node among those matches.
    pub match_index: usize,
    /// Position of the element among its schema siblings.
    pub order: usize,
}

impl Node<'_> {
    pub fn is_bound(&self) -> bool {
        self.section.is_some()
    }
}

/// The bound tree for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<'s> {
    roots: Vec<NodeId>,
    nodes: Vec<Node<'s>>,
    unmatched: Vec<SectionId>,
    section_nodes: Vec<Option<NodeId>>,
}

impl<'s> Tree<'s> {
    /// Nodes bound directly under the document root, in schema order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Every node, depth-first in build order.
    pub fn nodes(&self) -> &[Node<'s>] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node<'s> {
        &self.nodes[id.0]
    }

    /// Sections that no schema element claimed, in document order.
    pub fn unmatched(&self) -> &[SectionId] {
        &self.unmatched
    }

    /// The node bound to `section`, if any.
    pub fn node_for_section(&self, section: SectionId) -> Option<&Node<'s>> {
        self.section_nodes
            .get(section.0)
            .copied()
            .flatten()
            .map(|id| self.node(id))
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node<'s>> + '_ {
        std::iter::successors(self.node(id).parent, move |&p| self.node(p).parent)
            .map(move |p| self.node(p))
    }

    /// Bound nodes only; unbound nodes carry no content.
    pub fn bound_nodes(&self) -> impl Iterator<Item = &Node<'s>> + '_ {
        self.nodes.iter().filter(|n| n.is_bound())
    }

    /// Children of `parent` (or the roots when `None`).
    pub fn siblings(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => &self.node(id).children,
            None => &self.roots,
        }
    }
}
