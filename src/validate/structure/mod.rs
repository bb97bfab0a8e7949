//! Structural checks over the bound tree.
//!
//! Passes, in reporting order:
//! 1. First heading: the first child of each scope must satisfy the first
//!    required element of that scope
//! 2. Unexpected sections: unmatched sections not covered by `allow_additional`
//! 3. Missing sections: required elements left unbound (topmost only)
//! 4. Ordering: required elements whose section exists but precedes a
//!    sibling bound earlier in schema order
//! 5. Counts: elements bound fewer times than `count.min`
//!
//! The ordering search runs first. A section it finds is reported once as an
//! ordering problem and never again as missing or unexpected.

#[cfg(test)]
mod tests;

use super::{Context, Validator, Violation, rules};
use crate::document::{Section, SectionId};
use crate::schema::{SchemaElement, Severity};
use crate::vast::NodeId;
use std::collections::HashSet;

/// Runs the structural passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructureValidator;

impl Validator for StructureValidator {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        evaluate(ctx)
    }
}

/// A required element whose section sits before a sibling bound earlier in
/// schema order.
#[derive(Debug)]
struct Misplaced {
    node: NodeId,
    section: SectionId,
    blocking: SectionId,
}

/// Evaluate the structure of the context's document.
pub fn evaluate(ctx: &Context<'_, '_>) -> Vec<Violation> {
    let misplaced = find_misplaced(ctx);

    let mut violations = check_first_headings(ctx);
    violations.extend(check_unexpected(ctx, &misplaced));
    violations.extend(check_missing(ctx, &misplaced));
    violations.extend(misplaced.iter().map(|m| order_violation(ctx, m)));
    violations.extend(check_counts(ctx));
    violations
}

/// Every sibling scope with a bound owner: the document root plus each bound
/// node. Unbound nodes have no document children to check.
fn scopes(ctx: &Context<'_, '_>) -> Vec<(Option<NodeId>, SectionId)> {
    let mut scopes = vec![(None, SectionId::ROOT)];
    scopes.extend(
        ctx.tree
            .bound_nodes()
            .filter_map(|node| node.section.map(|section| (Some(node.id), section))),
    );
    scopes
}

fn scope_elements<'s>(ctx: &Context<'_, 's>, owner: Option<NodeId>) -> &'s [SchemaElement] {
    match owner {
        Some(id) => &ctx.tree.node(id).element.children,
        None => &ctx.schema.structure,
    }
}

fn heading_of(section: &Section) -> String {
    section
        .heading
        .as_ref()
        .map_or_else(|| "<document>".to_string(), |h| h.reconstructed())
}

// ============================================================================
// Ordering search
// ============================================================================

fn find_misplaced(ctx: &Context<'_, '_>) -> Vec<Misplaced> {
    let document = ctx.document;
    let start = |id: SectionId| document.section(id).start_line();
    let mut found = Vec::new();

    for (owner, scope) in scopes(ctx) {
        let candidates = &document.section(scope).children;
        // Bound sibling with the greatest start line seen so far.
        let mut latest: Option<SectionId> = None;

        for &id in ctx.tree.siblings(owner) {
            let node = ctx.tree.node(id);
            if let Some(section) = node.section {
                if latest.is_none_or(|l| start(section) > start(l)) {
                    latest = Some(section);
                }
                continue;
            }

            let Some(blocking) = latest else {
                continue;
            };
            let limit = start(blocking);
            let misplaced = candidates.iter().copied().find(|&candidate| {
                start(candidate) < limit
                    && ctx.tree.node_for_section(candidate).is_none()
                    && ctx.matcher.matches(
                        document.section(candidate),
                        &node.element.heading,
                        ctx.base_name(),
                    )
            });

            if let Some(section) = misplaced {
                found.push(Misplaced {
                    node: id,
                    section,
                    blocking,
                });
            }
        }
    }

    found
}

fn order_violation(ctx: &Context<'_, '_>, misplaced: &Misplaced) -> Violation {
    let section = ctx.document.section(misplaced.section);
    let blocking = ctx.document.section(misplaced.blocking);
    let element = ctx.tree.node(misplaced.node).element;
    Violation::at_section(
        rules::SECTION_ORDER,
        format!(
            "'{}' appears before '{}' but is expected after it",
            heading_of(section),
            heading_of(blocking)
        ),
        section,
        element.severity,
    )
}

// ============================================================================
// First heading
// ============================================================================

fn check_first_headings(ctx: &Context<'_, '_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (owner, scope) in scopes(ctx) {
        let elements = scope_elements(ctx, owner);
        let Some((expected_order, expected)) =
            elements.iter().enumerate().find(|(_, e)| e.is_required())
        else {
            continue;
        };
        let Some(&first_id) = ctx.document.section(scope).children.first() else {
            continue;
        };

        let first = ctx.document.section(first_id);
        if ctx
            .matcher
            .matches(first, &expected.heading, ctx.base_name())
        {
            continue;
        }

        // An optional element declared before the required one may lead.
        if let Some(node) = ctx.tree.node_for_section(first_id)
            && node.order < expected_order
        {
            continue;
        }

        violations.push(Violation::at_section(
            rules::FIRST_HEADING,
            format!(
                "first heading should be {}, found '{}'",
                expected.heading,
                heading_of(first)
            ),
            first,
            expected.severity,
        ));
    }

    violations
}

// ============================================================================
// Unexpected sections
// ============================================================================

fn check_unexpected(ctx: &Context<'_, '_>, misplaced: &[Misplaced]) -> Vec<Violation> {
    let reported: HashSet<SectionId> = misplaced.iter().map(|m| m.section).collect();

    ctx.tree
        .unmatched()
        .iter()
        .copied()
        .filter(|&id| {
            !reported.contains(&id) && !ctx.document.ancestors(id).any(|a| reported.contains(&a))
        })
        .filter(|&id| !is_exempt(ctx, id))
        .map(|id| {
            let section = ctx.document.section(id);
            Violation::at_section(
                rules::UNEXPECTED_SECTION,
                format!("unexpected section '{}'", heading_of(section)),
                section,
                Severity::Error,
            )
        })
        .collect()
}

/// Whether an unmatched section is permitted by `allow_additional`.
///
/// Any bound ancestor whose element allows additional sections exempts it.
/// A section with no bound ancestor falls back to the schema-level flag.
fn is_exempt(ctx: &Context<'_, '_>, id: SectionId) -> bool {
    let mut has_bound_ancestor = false;
    for ancestor in ctx.document.ancestors(id) {
        if let Some(node) = ctx.tree.node_for_section(ancestor) {
            has_bound_ancestor = true;
            if node.element.allow_additional {
                return true;
            }
        }
    }
    !has_bound_ancestor && ctx.schema.allow_additional
}

// ============================================================================
// Missing sections
// ============================================================================

fn check_missing(ctx: &Context<'_, '_>, misplaced: &[Misplaced]) -> Vec<Violation> {
    let reported: HashSet<NodeId> = misplaced.iter().map(|m| m.node).collect();
    let mut violations = Vec::new();

    for node in ctx.tree.nodes() {
        if node.is_bound() || !node.element.is_required() || reported.contains(&node.id) {
            continue;
        }
        // Children of a missing element are implied by the parent's report.
        if ctx.tree.ancestors(node.id).any(|a| !a.is_bound()) {
            continue;
        }

        let scope_id = node
            .parent
            .and_then(|p| ctx.tree.node(p).section)
            .unwrap_or(SectionId::ROOT);
        let scope = ctx.document.section(scope_id);
        let message = if scope.is_root() {
            format!("required section {} not found", node.element.heading)
        } else {
            format!(
                "required section {} not found in '{}'",
                node.element.heading,
                scope.title()
            )
        };

        violations.push(Violation::at_section(
            rules::REQUIRED_SECTION,
            message,
            scope,
            node.element.severity,
        ));
    }

    violations
}

// ============================================================================
// Occurrence counts
// ============================================================================

fn check_counts(ctx: &Context<'_, '_>) -> Vec<Violation> {
    ctx.bound_sections()
        .filter(|(node, _)| {
            node.match_index == 0 && node.match_count < node.element.min_occurrences()
        })
        .map(|(node, section)| {
            Violation::at_section(
                rules::SECTION_COUNT,
                format!(
                    "expected at least {} sections matching {}, found {}",
                    node.element.min_occurrences(),
                    node.element.heading,
                    node.match_count
                ),
                section,
                node.element.severity,
            )
        })
        .collect()
}
