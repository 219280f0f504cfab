//! Sitemap generation.
//!
//! Generates XML sitemaps for search engine optimization.

use mdpress_core::{Config, PostRecord};
use tracing::debug;

/// Change frequency written for every entry.
pub const CHANGEFREQ: &str = "weekly";

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Change frequency.
    pub changefreq: &'static str,
}

impl SitemapUrl {
    fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            changefreq: CHANGEFREQ,
        }
    }

    /// Render the entry as a `<url>` element.
    fn to_xml(&self) -> String {
        format!(
            "  <url>\n    <loc>{}</loc>\n    <changefreq>{}</changefreq>\n  </url>\n",
            escape_xml(&self.loc),
            self.changefreq
        )
    }
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Entries in output order: the site root, then every post.
    pub fn urls(&self, posts: &[PostRecord]) -> Vec<SitemapUrl> {
        std::iter::once(SitemapUrl::new(self.config.base_url()))
            .chain(posts.iter().map(|post| SitemapUrl::new(post.url())))
            .collect()
    }

    /// Generate sitemap XML.
    pub fn generate(&self, posts: &[PostRecord]) -> String {
        debug!(count = posts.len() + 1, "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in self.urls(posts) {
            xml.push_str(&url.to_xml());
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.site.base_url = "https://example.com/blog".to_string();
        config
    }

    fn post(config: &Config, slug: &str) -> PostRecord {
        PostRecord::new(config, slug, "", "2024-01-01", slug, "")
    }

    #[test]
    fn test_generate_sitemap() {
        let config = test_config();
        let posts = vec![post(&config, "first"), post(&config, "second")];
        let xml = SitemapGenerator::new(config).generate(&posts);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 3);
        assert!(xml.contains("<loc>https://example.com/blog/</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/posts/first.html</loc>"));
        assert!(!xml.contains("lastmod"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_root_comes_first() {
        let config = test_config();
        let posts = vec![post(&config, "only")];
        let urls = SitemapGenerator::new(config).urls(&posts);

        assert_eq!(urls[0].loc, "https://example.com/blog/");
        assert_eq!(urls[1].loc, "https://example.com/blog/posts/only.html");
    }

    #[test]
    fn test_empty_site_has_root() {
        let xml = SitemapGenerator::new(test_config()).generate(&[]);
        assert_eq!(xml.matches("<url>").count(), 1);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b"), "a&amp;b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"'"), "&quot;&apos;");
    }
}
