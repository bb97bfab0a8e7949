//! Tests for building the validation tree.

use super::*;
use crate::document::Document;
use crate::matcher::PatternMatcher;
use crate::schema::{CountConstraint, HeadingSpec, Schema};
use std::collections::HashSet;

fn parse(markdown: &str) -> Document {
    Document::parse("docs/guide.md", markdown)
}

fn title_with_steps() -> Vec<SchemaElement> {
    vec![SchemaElement::literal("# Title").with_children(vec![
        SchemaElement::literal("## Installation"),
        SchemaElement::literal("## Usage"),
    ])]
}

fn bound_titles(doc: &Document, tree: &Tree<'_>) -> Vec<String> {
    tree.bound_nodes()
        .filter_map(|n| n.section)
        .map(|id| doc.section(id).title().to_string())
        .collect()
}

#[test]
fn test_binds_matching_document() {
    let doc = parse("# Title\n\n## Installation\n\n## Usage\n");
    let schema = title_with_steps();
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    assert_eq!(tree.roots().len(), 1);
    let title = tree.node(tree.roots()[0]);
    assert!(title.is_bound());
    assert_eq!(title.children.len(), 2);
    assert_eq!(
        bound_titles(&doc, &tree),
        vec!["Title", "Installation", "Usage"]
    );
    assert!(tree.unmatched().is_empty());
}

#[test]
fn test_build_is_deterministic() {
    let doc = parse("# Title\n## Usage\n## Extra\n## Installation\n");
    let schema = title_with_steps();

    let first = build(&doc, &schema, &PatternMatcher::new());
    let second = build(&doc, &schema, &PatternMatcher::new());
    assert_eq!(first, second);
}

#[test]
fn test_no_section_is_bound_twice() {
    let doc = parse("## A\n## B\n## C\n");
    let schema = vec![
        SchemaElement::new(HeadingSpec::Regex("## .".to_string())),
        SchemaElement::new(HeadingSpec::Regex("## [A-C]".to_string())),
        SchemaElement::literal("## C"),
    ];
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    let sections: Vec<_> = tree.bound_nodes().filter_map(|n| n.section).collect();
    let unique: HashSet<_> = sections.iter().collect();
    assert_eq!(sections.len(), unique.len());
    assert_eq!(bound_titles(&doc, &tree), vec!["A", "B", "C"]);
}

#[test]
fn test_binding_is_monotonic_in_schema_order() {
    // Usage precedes Installation, so it cannot be bound after it.
    let doc = parse("# Title\n\n## Usage\n\n## Installation\n");
    let schema = title_with_steps();
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    let title = tree.node(tree.roots()[0]);
    let install = tree.node(title.children[0]);
    let usage = tree.node(title.children[1]);

    assert_eq!(
        install.section.map(|id| doc.section(id).title()),
        Some("Installation")
    );
    assert!(!usage.is_bound());
    assert_eq!(tree.unmatched().len(), 1);
    assert_eq!(doc.section(tree.unmatched()[0]).title(), "Usage");
}

#[test]
fn test_missing_required_element_gets_one_unbound_node() {
    let doc = parse("# Title\n\n## Installation\n");
    let schema = title_with_steps();
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    let unbound: Vec<_> = tree.nodes().iter().filter(|n| !n.is_bound()).collect();
    assert_eq!(unbound.len(), 1);
    assert_eq!(unbound[0].element.heading.source(), "## Usage");
    assert_eq!(unbound[0].parent, Some(tree.roots()[0]));
}

#[test]
fn test_missing_parent_keeps_unbound_children() {
    let doc = parse("");
    let schema = title_with_steps();
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    assert_eq!(tree.nodes().len(), 3);
    assert!(tree.nodes().iter().all(|n| !n.is_bound()));

    let title = tree.node(tree.roots()[0]);
    assert_eq!(title.children.len(), 2);
    for &child in &title.children {
        assert_eq!(tree.ancestors(child).count(), 1);
    }
}

#[test]
fn test_optional_missing_element_has_no_node() {
    let doc = parse("# Title\n");
    let mut schema = title_with_steps();
    for child in &mut schema[0].children {
        child.optional = true;
    }
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    assert_eq!(tree.nodes().len(), 1);
}

#[test]
fn test_multi_match_respects_count_max() {
    let doc = parse("## Step 1\n## Step 2\n## Step 3\n## Step 4\n");
    let mut step = SchemaElement::new(HeadingSpec::Regex(r"## Step \d+".to_string()));
    step.count = Some(CountConstraint { min: 1, max: 3 });
    let schema = vec![step];
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    assert_eq!(tree.roots().len(), 3);
    for (index, &id) in tree.roots().iter().enumerate() {
        let node = tree.node(id);
        assert_eq!(node.match_count, 3);
        assert_eq!(node.match_index, index);
    }
    assert_eq!(tree.unmatched().len(), 1);
    assert_eq!(doc.section(tree.unmatched()[0]).title(), "Step 4");
}

#[test]
fn test_unlimited_count_binds_every_match() {
    let doc = parse("## Step 1\n## Step 2\n## Step 3\n## Step 4\n");
    let schema = Schema::from_yaml(
        "structure:\n  - heading:\n      pattern: \"## Step \\\\d+\"\n    count: { min: 1, max: 0 }\n",
    )
    .unwrap();
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema.structure, &matcher);

    assert_eq!(tree.roots().len(), 4);
    assert!(tree.unmatched().is_empty());
}

#[test]
fn test_children_bind_within_their_parent_only() {
    let doc = parse("# Title\n## Usage\n# Appendix\n## Installation\n");
    let schema = title_with_steps();
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    let title = tree.node(tree.roots()[0]);
    let install = tree.node(title.children[0]);
    assert!(!install.is_bound());

    let unmatched: Vec<_> = tree
        .unmatched()
        .iter()
        .map(|&id| doc.section(id).title())
        .collect();
    assert_eq!(unmatched, vec!["Appendix", "Installation"]);
}

#[test]
fn test_node_for_section_and_order() {
    let doc = parse("# Title\n## Installation\n## Usage\n");
    let schema = title_with_steps();
    let matcher = PatternMatcher::new();
    let tree = build(&doc, &schema, &matcher);

    let usage = doc.headed_sections().find(|s| s.title() == "Usage").unwrap();
    let node = tree.node_for_section(usage.id).unwrap();
    assert_eq!(node.order, 1);
    assert!(tree.node_for_section(crate::document::SectionId::ROOT).is_none());
}
