//! Post records and the build clock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::Config;

/// Maximum description length, in characters.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Maximum length of the plain-text search content, in characters.
pub const CONTENT_LIMIT: usize = 5000;

/// Structured record of one rendered post.
///
/// Built once by the post renderer and read by every index and feed builder.
/// The URL is derived from the slug at construction and cannot drift from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    title: String,
    description: String,
    date: String,
    url: String,
    slug: String,
    content: String,
}

impl PostRecord {
    /// Create a record, deriving its URL from the configured base URL and the slug.
    pub fn new(
        config: &Config,
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        slug: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let slug = slug.into();
        Self {
            title: title.into(),
            description: description.into(),
            date: date.into(),
            url: post_url(config, &slug),
            slug,
            content: content.into(),
        }
    }

    /// Post title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Post description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Publication date as written in the front matter (normally `YYYY-MM-DD`).
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Absolute post URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Plain-text content for search.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Site-relative output path of the rendered page.
    #[must_use]
    pub fn output_path(&self) -> String {
        post_path(&self.slug)
    }

    /// The post date as a calendar date, when it is in `YYYY-MM-DD` form.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Site-relative path of a post page.
pub fn post_path(slug: &str) -> String {
    format!("posts/{slug}.html")
}

/// Absolute URL of a post page.
pub fn post_url(config: &Config, slug: &str) -> String {
    config.url_for(&post_path(slug))
}

/// Sort records newest first by comparing their date strings.
///
/// The sort is stable, so posts sharing a date keep their input order.
pub fn sort_newest_first(posts: &mut [PostRecord]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Truncate to at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// The single instant a build treats as "now".
///
/// Captured once per build so every artifact agrees on the date, and fixed in
/// tests to make output reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildClock {
    now: DateTime<Utc>,
}

impl BuildClock {
    /// Clock at the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }

    /// Clock pinned to a given instant.
    #[must_use]
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// The captured instant.
    #[must_use]
    pub fn instant(&self) -> DateTime<Utc> {
        self.now
    }

    /// Build date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }
}

impl Default for BuildClock {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(date: &str, slug: &str) -> PostRecord {
        PostRecord::new(&Config::default(), slug, "", date, slug, "")
    }

    #[test]
    fn test_url_derived_from_slug() {
        let mut config = Config::default();
        config.site.base_url = "https://blog.example.org".to_string();
        let post = PostRecord::new(&config, "Hello", "desc", "2024-01-01", "hello-world", "");

        assert_eq!(post.url(), "https://blog.example.org/posts/hello-world.html");
        assert_eq!(post.output_path(), "posts/hello-world.html");
        assert_eq!(
            post.url(),
            format!("{}posts/{}.html", config.base_url(), post.slug())
        );
    }

    #[test]
    fn test_serialized_field_order() {
        let post = PostRecord::new(&Config::default(), "T", "D", "2024-01-01", "t", "C");
        let json = serde_json::to_string(&post).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","description":"D","date":"2024-01-01","url":"https://example.com/posts/t.html","slug":"t","content":"C"}"#
        );
    }

    #[test]
    fn test_sort_newest_first_is_stable() {
        let mut posts = vec![
            record("2023-05-01", "a"),
            record("2024-01-01", "b"),
            record("2023-05-01", "c"),
            record("2024-02-10", "d"),
        ];
        sort_newest_first(&mut posts);
        let slugs: Vec<_> = posts.iter().map(PostRecord::slug).collect();
        assert_eq!(slugs, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_sort_is_string_based() {
        let mut posts = vec![record("9 March 2024", "words"), record("2025-01-01", "iso")];
        sort_newest_first(&mut posts);
        assert_eq!(posts[0].slug(), "words");
    }

    #[test]
    fn test_parsed_date() {
        assert_eq!(
            record("2024-01-01", "a").parsed_date(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert!(record("yesterday", "a").parsed_date().is_none());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_build_clock_date() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        let clock = BuildClock::fixed(instant);
        assert_eq!(clock.date_string(), "2024-03-09");
        assert_eq!(clock.instant(), instant);
    }
}
