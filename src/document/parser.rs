//! Markdown to section tree, using comrak.

use super::{CodeBlock, Heading, Image, Link, List, Section, SectionId, Table};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};

/// Parse a Markdown body into a section arena, root first.
///
/// `line_offset` is added to every source line so positions refer to the
/// original file when front matter was split off.
pub(super) fn parse_sections(body: &str, line_offset: usize) -> Vec<Section> {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    let root = parse_document(&arena, body, &options);

    let mut sections = vec![Section::default()];
    // Open sections by level; the root sits at the bottom as level 0.
    let mut stack: Vec<(u8, SectionId)> = vec![(0, SectionId::ROOT)];

    for block in root.children() {
        let heading = match &block.data.borrow().value {
            NodeValue::Heading(h) => Some(h.level),
            _ => None,
        };

        match heading {
            Some(level) => {
                while stack.last().is_some_and(|&(open, _)| open >= level) {
                    stack.pop();
                }
                let parent = stack.last().map_or(SectionId::ROOT, |&(_, id)| id);
                let id = SectionId(sections.len());
                let (line, column) = position(block, line_offset);

                let mut section = Section {
                    id,
                    heading: Some(Heading {
                        text: heading_text(block).trim().to_string(),
                        level,
                        line,
                        column,
                    }),
                    parent: Some(parent),
                    ..Default::default()
                };
                // Links and images inside the heading belong to its section.
                collect(block, &mut section, line_offset, false);
                section.text.clear();

                sections[parent.0].children.push(id);
                sections.push(section);
                stack.push((level, id));
            }
            None => {
                let current = stack.last().map_or(SectionId::ROOT, |&(_, id)| id);
                collect(block, &mut sections[current.0], line_offset, false);
            }
        }
    }

    assign_bodies(&mut sections, body, line_offset);
    sections
}

/// Attach each section's own raw source: the lines after its heading up to
/// the next heading of any level.
fn assign_bodies(sections: &mut [Section], body: &str, line_offset: usize) {
    let lines: Vec<&str> = body.lines().collect();
    // Sections are created in document order, so start lines are ascending.
    let starts: Vec<usize> = sections
        .iter()
        .map(|s| s.start_line().saturating_sub(line_offset))
        .collect();

    for i in 0..sections.len() {
        let from = starts[i];
        let to = starts
            .get(i + 1)
            .map_or(lines.len(), |next| next.saturating_sub(1));
        let from = from.min(lines.len());
        let to = to.clamp(from, lines.len());
        sections[i].body = lines[from..to].join("\n");
        sections[i].body_line = from + line_offset + 1;
    }
}

fn position<'a>(node: &'a AstNode<'a>, line_offset: usize) -> (usize, usize) {
    let pos = node.data.borrow().sourcepos;
    (pos.start.line + line_offset, pos.start.column.max(1))
}

/// Record content elements and prose text found under `node`.
fn collect<'a>(node: &'a AstNode<'a>, section: &mut Section, line_offset: usize, in_list: bool) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::CodeBlock(code) => {
            let (line, column) = position(node, line_offset);
            let lang = code
                .info
                .split_whitespace()
                .next()
                .map(str::to_string)
                .filter(|s| !s.is_empty());
            section.code_blocks.push(CodeBlock {
                lang,
                content: code.literal,
                line,
                column,
            });
            return;
        }
        NodeValue::HtmlBlock(_) | NodeValue::FrontMatter(_) => return,
        NodeValue::Table(_) => {
            let (line, column) = position(node, line_offset);
            let mut headers = Vec::new();
            let mut rows = 0;
            for row in node.children() {
                let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                if is_header {
                    headers = row.children().map(|c| inline_text(c).trim().to_string()).collect();
                } else {
                    rows += 1;
                }
            }
            section.tables.push(Table {
                columns: headers.len(),
                headers,
                rows,
                line,
                column,
            });
        }
        NodeValue::List(list) if !in_list => {
            let (line, column) = position(node, line_offset);
            section.lists.push(List {
                ordered: list.list_type == ListType::Ordered,
                items: node.children().count(),
                line,
                column,
            });
        }
        NodeValue::Image(link) => {
            let (line, column) = position(node, line_offset);
            section.images.push(Image {
                alt: inline_text(node),
                url: link.url,
                line,
                column,
            });
            return;
        }
        NodeValue::Link(link) => {
            let (line, column) = position(node, line_offset);
            section.links.push(Link {
                url: link.url,
                text: inline_text(node),
                line,
                column,
            });
        }
        NodeValue::Text(text) => section.text.push_str(&text),
        NodeValue::Code(code) => section.text.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => section.text.push(' '),
        _ => {}
    }

    let nested_list = in_list || matches!(node.data.borrow().value, NodeValue::List(_));
    for child in node.children() {
        collect(child, section, line_offset, nested_list);
    }

    if matches!(
        node.data.borrow().value,
        NodeValue::Paragraph | NodeValue::TableCell | NodeValue::Item(_)
    ) {
        section.text.push('\n');
    }
}

/// Concatenated inline text under `node`.
fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    render_inline(node, false)
}

/// Heading text as written, minus emphasis and link markup. Code spans keep
/// their backticks so a literal schema heading can spell them as the source does.
fn heading_text<'a>(node: &'a AstNode<'a>) -> String {
    render_inline(node, true)
}

fn render_inline<'a>(node: &'a AstNode<'a>, keep_code_spans: bool) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) if keep_code_spans => {
                let fence = "`".repeat(code.num_backticks.max(1));
                out.push_str(&fence);
                out.push_str(&code.literal);
                out.push_str(&fence);
            }
            NodeValue::Code(code) => out.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => {}
        }
    }
    out
}
