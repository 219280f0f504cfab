//! Schema.org structured data embedded in pages.

use mdpress_core::{BuildClock, Config, PostRecord};
use serde_json::{Value, json};

/// `BlogPosting` object for a post page.
pub fn blog_posting(config: &Config, post: &PostRecord) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title(),
        "datePublished": post.date(),
        "author": { "@type": "Person", "name": config.site.author },
        "url": post.url(),
        "mainEntityOfPage": post.url(),
        "description": post.description(),
    })
}

/// `Blog` object for the home page.
pub fn blog(config: &Config, clock: &BuildClock) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Blog",
        "name": config.site.title,
        "url": config.base_url(),
        "author": { "@type": "Person", "name": config.site.author },
        "dateModified": clock.date_string(),
    })
}

/// Pretty-print an object for a `<script type="application/ld+json">` block.
///
/// `</` is written as `<\/` so post text cannot close the script element.
pub fn to_script(value: &Value) -> serde_json::Result<String> {
    Ok(serde_json::to_string_pretty(value)?.replace("</", r"<\/"))
}
