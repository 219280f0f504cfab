//! Home page generation.

use mdpress_core::{BuildClock, Config, PostRecord};
use tracing::debug;

use crate::{
    jsonld,
    post::PostError,
    template::{TemplateContext, TemplateRegistry},
};

/// Renders `index.html` from the post list.
#[derive(Debug)]
pub struct IndexBuilder<'a> {
    config: &'a Config,
    templates: &'a TemplateRegistry,
    clock: BuildClock,
}

impl<'a> IndexBuilder<'a> {
    /// Create an index builder.
    #[must_use]
    pub fn new(config: &'a Config, templates: &'a TemplateRegistry, clock: BuildClock) -> Self {
        Self {
            config,
            templates,
            clock,
        }
    }

    /// Render the home page for posts already sorted newest first.
    pub fn generate(&self, posts: &[PostRecord]) -> Result<String, PostError> {
        debug!(count = posts.len(), "generating index");

        let items = posts
            .iter()
            .map(|post| self.render_item(post))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");

        let site = &self.config.site;
        let structured = jsonld::to_script(&jsonld::blog(self.config, &self.clock))?;

        let ctx = TemplateContext::new()
            .with_var("title", &site.title)
            .with_var("description", &site.description)
            .with_var("site_title", &site.title)
            .with_var("site_description", &site.description)
            .with_var("canonical", self.config.base_url())
            .with_var("base_url", self.config.base_url())
            .with_var("jsonld", structured)
            .with_var("posts", items)
            .with_var("rss_url", self.config.url_for("feed.xml"))
            .with_var("search_js", self.config.url_for("assets/search.js"))
            .with_var("search_index_url", self.config.url_for("search_index.json"));

        Ok(self.templates.render("index", &ctx)?)
    }

    fn render_item(&self, post: &PostRecord) -> Result<String, PostError> {
        let ctx = TemplateContext::new()
            .with_var("url", post.url())
            .with_var("title", post.title())
            .with_var("date", post.date())
            .with_var("description", post.description());

        Ok(self.templates.render("post_item", &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::template::Template;

    fn clock() -> BuildClock {
        BuildClock::fixed(Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_index_lists_posts_in_order() {
        let config = Config::default();
        let templates = TemplateRegistry::new();
        let posts = vec![
            PostRecord::new(&config, "Newer", "n", "2024-02-01", "newer", ""),
            PostRecord::new(&config, "Older", "o", "2024-01-01", "older", ""),
        ];

        let html = IndexBuilder::new(&config, &templates, clock())
            .generate(&posts)
            .unwrap();

        let newer = html.find("https://example.com/posts/newer.html").unwrap();
        let older = html.find("https://example.com/posts/older.html").unwrap();
        assert!(newer < older);
        assert!(html.contains(r#""@type": "Blog""#));
        assert!(html.contains(r#""dateModified": "2024-07-04""#));
        assert!(html.contains(r#"href="https://example.com/feed.xml""#));
        assert!(html.contains(r#"src="https://example.com/assets/search.js""#));
        assert!(html.contains(r#"data-index="https://example.com/search_index.json""#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/">"#));
    }

    #[test]
    fn test_item_values_escaped() {
        let config = Config::default();
        let templates = TemplateRegistry::new();
        let posts = vec![PostRecord::new(&config, "A <b>", "x & y", "2024-01-01", "a", "")];

        let html = IndexBuilder::new(&config, &templates, clock())
            .generate(&posts)
            .unwrap();

        assert!(html.contains("A &lt;b&gt;"));
        assert!(html.contains("x &amp; y"));
    }

    #[test]
    fn test_custom_templates() {
        let config = Config::default();
        let mut templates = TemplateRegistry::new();
        templates.register(Template::new("index", "[{{ posts | safe }}]"));
        templates.register(Template::new("post_item", "{{ title }}"));
        let posts = vec![
            PostRecord::new(&config, "One", "", "2024-02-01", "one", ""),
            PostRecord::new(&config, "Two", "", "2024-01-01", "two", ""),
        ];

        let html = IndexBuilder::new(&config, &templates, clock())
            .generate(&posts)
            .unwrap();

        assert_eq!(html, "[One\nTwo]");
    }
}
