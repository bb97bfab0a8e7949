//! Parsed Markdown documents.
//!
//! A document is a tree of sections stored in an arena. Index 0 is the
//! synthetic root, which has no heading and owns any content that appears
//! before the first heading. Every other section is opened by a top-level
//! heading and owns the content up to the next heading of any level, so a
//! section's content never includes its descendants' content.
//!
//! # Front matter
//!
//! An optional YAML block delimited by `---` lines at the very start of the
//! file is split off before Markdown parsing. Line numbers reported for
//! sections and content always refer to the original file.

mod frontmatter;
mod parser;
pub mod slug;


use crate::error::{MdschemaError, Result};
use std::path::{Path, PathBuf};

pub use frontmatter::FrontMatter;
pub use slug::{SlugIndex, slug};

/// Index of a section in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(pub usize);

impl SectionId {
    /// The synthetic document root.
    pub const ROOT: SectionId = SectionId(0);
}

/// A section heading with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading text with level markers stripped.
    pub text: String,
    /// 1 for `#`, 2 for `##`, and so on.
    pub level: u8,
    /// Line in the original file (1-based).
    pub line: usize,
    /// Column in the original file (1-based).
    pub column: usize,
}

impl Heading {
    /// The heading in ATX form: `"#"` repeated `level` times, a space, the text.
    pub fn reconstructed(&self) -> String {
        format!("{} {}", "#".repeat(self.level as usize), self.text)
    }
}

/// A fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// First word of the info string, if any.
    pub lang: Option<String>,
    pub content: String,
    pub line: usize,
    pub column: usize,
}

/// A GFM table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub columns: usize,
    /// Body rows (the header row is not counted).
    pub rows: usize,
    pub line: usize,
    pub column: usize,
}

/// A list that is not nested inside another list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub alt: String,
    pub url: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

/// One node of the document's section tree.
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub id: SectionId,
    /// `None` only for the synthetic root.
    pub heading: Option<Heading>,
    pub parent: Option<SectionId>,
    /// Direct subsections in document order.
    pub children: Vec<SectionId>,
    /// Raw Markdown source of this section's own content.
    pub body: String,
    /// Line of the first `body` line in the original file.
    pub body_line: usize,
    /// Plain prose of this section's own content (code blocks excluded).
    pub text: String,
    pub code_blocks: Vec<CodeBlock>,
    pub tables: Vec<Table>,
    pub lists: Vec<List>,
    pub images: Vec<Image>,
    pub links: Vec<Link>,
}

impl Default for SectionId {
    fn default() -> Self {
        SectionId::ROOT
    }
}

impl Section {
    pub fn is_root(&self) -> bool {
        self.heading.is_none()
    }

    /// Heading line, or 0 for the root.
    pub fn start_line(&self) -> usize {
        self.heading.as_ref().map_or(0, |h| h.line)
    }

    /// Location used when reporting against this section (1-based).
    pub fn location(&self) -> (usize, usize) {
        match &self.heading {
            Some(h) => (h.line, h.column),
            None => (1, 1),
        }
    }

    /// Heading text for messages, or `<document>` for the root.
    pub fn title(&self) -> &str {
        self.heading.as_ref().map_or("<document>", |h| h.text.as_str())
    }
}

/// A parsed Markdown document.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub front_matter: Option<FrontMatter>,
    sections: Vec<Section>,
}

impl Document {
    /// Read and parse a Markdown file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            MdschemaError::IoError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Ok(Self::parse(path, &source))
    }

    /// Parse Markdown source. Parsing never fails; malformed front matter is
    /// kept with its error for the front matter validator to report.
    pub fn parse<P: AsRef<Path>>(path: P, source: &str) -> Self {
        let (front_matter, body, line_offset) = frontmatter::split(source);
        let sections = parser::parse_sections(body, line_offset);
        Self {
            path: path.as_ref().to_path_buf(),
            front_matter,
            sections,
        }
    }

    pub fn root(&self) -> &Section {
        &self.sections[SectionId::ROOT.0]
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    /// All sections in document order, root first.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sections with a heading, in document order.
    pub fn headed_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_root())
    }

    /// File name without directory or extension (`docs/getting-started.md` -> `getting-started`).
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory containing the document, used to resolve relative links.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: SectionId) -> impl Iterator<Item = SectionId> + '_ {
        std::iter::successors(self.section(id).parent, move |&p| self.section(p).parent)
    }

    /// Anchor slugs for every heading, de-duplicated the way renderers do.
    pub fn slug_index(&self) -> SlugIndex {
        let mut index = SlugIndex::default();
        for section in self.headed_sections() {
            if let Some(heading) = &section.heading {
                index.insert(&heading.text);
            }
        }
        index
    }
}
