//! Post rendering.
//!
//! Turns one markdown document into a finished page and its [`PostRecord`].

use std::path::{Path, PathBuf};

use mdpress_core::{
    BuildClock, Config, PostRecord,
    post::{CONTENT_LIMIT, truncate_chars},
};
use mdpress_parser::{MarkdownParser, strip_tags};
use thiserror::Error;
use tracing::debug;

use crate::{
    jsonld,
    resolve::{FieldSource, resolve_fields},
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// Post rendering errors.
#[derive(Debug, Error)]
pub enum PostError {
    /// The source file could not be read or is not UTF-8.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Structured data serialization error.
    #[error("JSON-LD error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for post rendering.
pub type Result<T> = std::result::Result<T, PostError>;

/// A markdown source file.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    text: String,
}

impl SourceDocument {
    /// Create a document from an in-memory string.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PostError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, text))
    }

    /// Source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw text including front matter.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// File name without extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// Output of rendering one post.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    /// The record consumed by the index and feed builders.
    pub record: PostRecord,

    /// The full page.
    pub page: String,

    /// Where the post came from.
    pub source: PathBuf,
}

/// Renders markdown documents into post pages.
#[derive(Debug)]
pub struct PostRenderer {
    config: Config,
    templates: TemplateRegistry,
    markdown: MarkdownParser,
    clock: BuildClock,
}

impl PostRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new(config: Config, templates: TemplateRegistry, clock: BuildClock) -> Self {
        Self {
            config,
            templates,
            markdown: MarkdownParser::new(),
            clock,
        }
    }

    /// Render one document.
    pub fn render(&self, doc: &SourceDocument) -> Result<RenderedPost> {
        let parsed = self.markdown.parse(doc.text());
        let build_date = self.clock.date_string();

        let fields = resolve_fields(&FieldSource {
            metadata: &parsed.metadata,
            stem: doc.stem(),
            body: &parsed.raw,
            build_date: &build_date,
            title: None,
        });

        let plain = strip_tags(&parsed.html);
        let content = truncate_chars(&plain, CONTENT_LIMIT);

        let record = PostRecord::new(
            &self.config,
            fields.title,
            fields.description,
            fields.date,
            fields.slug,
            content,
        );

        let structured = jsonld::to_script(&jsonld::blog_posting(&self.config, &record))?;

        let ctx = TemplateContext::new()
            .with_var("title", record.title())
            .with_var("description", record.description())
            .with_var("date", record.date())
            .with_var("canonical", record.url())
            .with_var("jsonld", structured)
            .with_var("body", parsed.html)
            .with_var("site_title", &self.config.site.title)
            .with_var("base_url", self.config.base_url())
            .with_var("rss_url", self.config.url_for("feed.xml"));

        let page = self.templates.render("post", &ctx)?;

        debug!(
            source = %doc.path().display(),
            slug = record.slug(),
            "rendered post"
        );

        Ok(RenderedPost {
            record,
            page,
            source: doc.path().to_path_buf(),
        })
    }
}
