//! Anchor slugs for headings.

use std::collections::HashSet;

/// Normalize text to an anchor-safe slug.
///
/// Lowercases, turns whitespace into `-`, keeps alphanumerics, `-` and `_`,
/// drops everything else, collapses runs of `-` and trims `-` from both ends.
///
/// ```
/// use mdschema::document::slug;
///
/// assert_eq!(slug("Getting Started"), "getting-started");
/// assert_eq!(slug("What's new in v2.0?"), "whats-new-in-v20");
/// ```
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().chars().flat_map(char::to_lowercase) {
        let mapped = if c.is_whitespace() || c == '-' {
            '-'
        } else if c.is_alphanumeric() || c == '_' {
            c
        } else {
            continue;
        };
        if mapped == '-' && out.ends_with('-') {
            continue;
        }
        out.push(mapped);
    }
    out.trim_matches('-').to_string()
}

/// Set of heading anchors with collision-safe de-duplication.
///
/// The first heading keeps its slug; later headings with the same slug get
/// `-1`, `-2`, ... skipping any suffix another heading already produced.
#[derive(Debug, Clone, Default)]
pub struct SlugIndex {
    anchors: HashSet<String>,
    ordered: Vec<String>,
}

impl SlugIndex {
    /// Register a heading and return the anchor assigned to it.
    pub fn insert(&mut self, heading: &str) -> String {
        let base = slug(heading);
        let mut anchor = base.clone();
        let mut n = 1;
        while self.anchors.contains(&anchor) {
            anchor = format!("{}-{}", base, n);
            n += 1;
        }
        self.anchors.insert(anchor.clone());
        self.ordered.push(anchor.clone());
        anchor
    }

    pub fn contains(&self, anchor: &str) -> bool {
        self.anchors.contains(anchor)
    }

    /// Anchors in heading order.
    pub fn anchors(&self) -> &[String] {
        &self.ordered
    }
}
