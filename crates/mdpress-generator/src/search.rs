//! Client-side search index.
//!
//! The index is the post list itself, serialized as one compact JSON array
//! that `search.js` fetches and filters in the browser.

use mdpress_core::PostRecord;
use tracing::debug;

/// Serializes post records into `search_index.json`.
#[derive(Debug, Default)]
pub struct SearchIndexBuilder;

impl SearchIndexBuilder {
    /// Create a search index builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize posts, already sorted newest first.
    ///
    /// Non-ASCII text is written as-is rather than `\u` escaped.
    pub fn generate(&self, posts: &[PostRecord]) -> serde_json::Result<String> {
        debug!(count = posts.len(), "generating search index");
        serde_json::to_string(posts)
    }
}

#[cfg(test)]
mod tests {
    use mdpress_core::Config;
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_generate() {
        let config = Config::default();
        let posts = vec![
            PostRecord::new(&config, "Café", "d", "2024-02-01", "cafe", "plain text"),
            PostRecord::new(&config, "Older", "", "2024-01-01", "older", ""),
        ];

        let json = SearchIndexBuilder::new().generate(&posts).unwrap();

        assert!(json.starts_with(r#"[{"title":"Café","description":"d""#));
        assert!(!json.contains('\n'));

        let parsed: Value = serde_json::from_str(&json).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["content"], "plain text");
        assert_eq!(entries[1]["url"], "https://example.com/posts/older.html");
    }

    #[test]
    fn test_empty() {
        assert_eq!(SearchIndexBuilder::new().generate(&[]).unwrap(), "[]");
    }
}
