//! RSS feed generation.
//!
//! Generates an RSS 2.0 feed of the most recent posts.

use mdpress_core::{BuildClock, Config, PostRecord};
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use tracing::debug;

/// RSS feed generator.
#[derive(Debug)]
pub struct RssGenerator {
    config: Config,
    clock: BuildClock,
}

impl RssGenerator {
    /// Create a new RSS generator.
    #[must_use]
    pub fn new(config: Config, clock: BuildClock) -> Self {
        Self { config, clock }
    }

    /// Build the channel from posts already sorted newest first.
    pub fn channel(&self, posts: &[PostRecord]) -> Channel {
        let limit = self.config.rss.limit;
        let items: Vec<Item> = posts
            .iter()
            .take(limit)
            .map(|post| self.post_to_item(post))
            .collect();

        debug!(count = items.len(), limit, "generating RSS feed");

        let description = if self.config.site.description.is_empty() {
            &self.config.site.title
        } else {
            &self.config.site.description
        };

        ChannelBuilder::default()
            .title(&self.config.site.title)
            .link(self.config.base_url())
            .description(description)
            .last_build_date(Some(self.clock.instant().to_rfc2822()))
            .items(items)
            .build()
    }

    /// Generate RSS feed XML.
    pub fn generate(&self, posts: &[PostRecord]) -> String {
        self.channel(posts).to_string()
    }

    /// Convert a post to an RSS item.
    fn post_to_item(&self, post: &PostRecord) -> Item {
        let guid = GuidBuilder::default()
            .value(post.url())
            .permalink(true)
            .build();

        ItemBuilder::default()
            .title(Some(post.title().to_string()))
            .link(Some(post.url().to_string()))
            .guid(Some(guid))
            .description(Some(post.description().to_string()))
            .pub_date(Some(pub_date(post)))
            .build()
    }
}

/// RFC 2822 date at midnight UTC for `YYYY-MM-DD` dates, otherwise the raw string.
fn pub_date(post: &PostRecord) -> String {
    post.parsed_date()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().to_rfc2822())
        .unwrap_or_else(|| post.date().to_string())
}
