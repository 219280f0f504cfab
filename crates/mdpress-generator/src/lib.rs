//! mdpress Generator Library
//!
//! Static site generation engine for mdpress.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`resolve`] - Fallback chains for post fields
//! - [`post`] - Markdown document to post page
//! - [`collector`] - Content collection
//! - [`index`] - Home page
//! - [`search`] - JSON search index
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`rss`] - RSS feed generation
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod index;
pub mod jsonld;
pub mod post;
pub mod resolve;
pub mod robots;
pub mod rss;
pub mod search;
pub mod sitemap;
pub mod template;

pub use assets::{AssetCopier, AssetError, AssetManifest};
pub use build::{BuildError, BuildStats, Builder};
pub use collector::{CollectorError, ContentCollector, DuplicateSlug, SiteContent};
pub use index::IndexBuilder;
pub use post::{PostError, PostRenderer, RenderedPost, SourceDocument};
pub use robots::RobotsGenerator;
pub use rss::RssGenerator;
pub use search::SearchIndexBuilder;
pub use sitemap::SitemapGenerator;
pub use template::{Template, TemplateContext, TemplateError, TemplateRegistry};
