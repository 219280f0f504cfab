//! Front matter parsing for markdown posts.
//!
//! The format is intentionally permissive: a leading `---` block of
//! `key: value` lines. Anything that does not fit is ignored, never rejected.

use std::collections::BTreeMap;

/// Front matter delimiter.
pub const DELIMITER: &str = "---";

/// Key/value metadata parsed from a front matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a value. Empty values are reported as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Explicit `title`.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    /// Explicit `description`.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    /// Explicit `date`.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    /// Explicit `slug`.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.get("slug")
    }

    /// Number of parsed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split content into the raw front matter block and the body.
///
/// Returns `None` unless the content starts with the delimiter and a second
/// delimiter follows.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let after_first = content.strip_prefix(DELIMITER)?;
    let closing_pos = after_first.find(DELIMITER)?;

    let frontmatter = &after_first[..closing_pos];
    let body = after_first[closing_pos + DELIMITER.len()..].trim_start_matches('\n');

    Some((frontmatter, body))
}

/// Parse the `key: value` lines of a raw front matter block.
pub fn parse_metadata(raw: &str) -> Metadata {
    let mut metadata = Metadata::new();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches('"').trim_matches('\'');
        metadata.insert(key.trim(), value);
    }

    metadata
}

/// Parse front matter from a document.
///
/// Without a complete front matter block the metadata is empty and the body is
/// the input, untouched.
pub fn parse_frontmatter(content: &str) -> (Metadata, &str) {
    match split_frontmatter(content) {
        Some((raw, body)) => (parse_metadata(raw), body),
        None => (Metadata::new(), content),
    }
}
