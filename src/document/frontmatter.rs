//! YAML front matter extraction.

/// Front matter found at the top of a document.
#[derive(Debug, Clone)]
pub struct FrontMatter {
    /// The YAML text between the delimiters.
    pub raw: String,
    /// Parsed top-level mapping (empty when the YAML is not a mapping).
    pub fields: serde_yaml::Mapping,
    /// Parse failure, reported by the front matter validator.
    pub error: Option<String>,
}

impl FrontMatter {
    fn parse(raw: String) -> Self {
        if raw.trim().is_empty() {
            return Self {
                raw,
                fields: serde_yaml::Mapping::new(),
                error: None,
            };
        }

        match serde_yaml::from_str::<serde_yaml::Value>(&raw) {
            Ok(serde_yaml::Value::Mapping(fields)) => Self {
                raw,
                fields,
                error: None,
            },
            Ok(_) => Self {
                raw,
                fields: serde_yaml::Mapping::new(),
                error: Some("front matter must be a YAML mapping".to_string()),
            },
            Err(e) => Self {
                raw,
                fields: serde_yaml::Mapping::new(),
                error: Some(format!("failed to parse front matter YAML: {}", e)),
            },
        }
    }

    pub fn get(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.fields.get(name)
    }
}

/// Split a document into front matter, Markdown body, and the number of
/// lines the front matter occupied.
///
/// The content must start with a `---` line and contain a closing `---`
/// line; otherwise the whole source is the body. Both LF and CRLF line
/// endings are accepted.
pub(super) fn split(source: &str) -> (Option<FrontMatter>, &str, usize) {
    let Some(first_line_end) = source.find('\n') else {
        return (None, source, 0);
    };
    if source[..first_line_end].trim_end_matches('\r') != "---" {
        return (None, source, 0);
    }

    let mut offset = first_line_end + 1;
    let mut consumed_lines = 1;
    for line in source[offset..].split_inclusive('\n') {
        consumed_lines += 1;
        let trimmed = line.trim_end_matches('\n').trim_end_matches('\r');
        if trimmed == "---" {
            let raw = source[first_line_end + 1..offset].to_string();
            let body = &source[offset + line.len()..];
            return (Some(FrontMatter::parse(raw)), body, consumed_lines);
        }
        offset += line.len();
    }

    // No closing delimiter: the leading `---` is an ordinary thematic break.
    (None, source, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_front_matter() {
        let (fm, body, offset) = split("# Title\n");
        assert!(fm.is_none());
        assert_eq!(body, "# Title\n");
        assert_eq!(offset, 0);
    }

    #[test]
    fn front_matter_is_split_and_parsed() {
        let (fm, body, offset) = split("---\ntitle: Guide\ntags: [a]\n---\n# Title\n");
        let fm = fm.unwrap();
        assert_eq!(fm.raw, "title: Guide\ntags: [a]\n");
        assert_eq!(
            fm.get("title"),
            Some(&serde_yaml::Value::String("Guide".to_string()))
        );
        assert!(fm.error.is_none());
        assert_eq!(body, "# Title\n");
        assert_eq!(offset, 4);
    }

    #[test]
    fn crlf_front_matter() {
        let (fm, body, offset) = split("---\r\ntitle: Guide\r\n---\r\n# Title\r\n");
        assert!(fm.unwrap().get("title").is_some());
        assert_eq!(body, "# Title\r\n");
        assert_eq!(offset, 3);
    }

    #[test]
    fn unclosed_front_matter_is_body() {
        let source = "---\ntitle: Guide\n# Title\n";
        let (fm, body, offset) = split(source);
        assert!(fm.is_none());
        assert_eq!(body, source);
        assert_eq!(offset, 0);
    }

    #[test]
    fn invalid_yaml_is_kept_with_error() {
        let (fm, _, _) = split("---\ntitle: [unclosed\n---\n");
        let fm = fm.unwrap();
        assert!(fm.error.is_some());
        assert!(fm.fields.is_empty());
    }

    #[test]
    fn empty_front_matter() {
        let (fm, body, offset) = split("---\n---\nText\n");
        let fm = fm.unwrap();
        assert!(fm.fields.is_empty());
        assert!(fm.error.is_none());
        assert_eq!(body, "Text\n");
        assert_eq!(offset, 2);
    }
}
