//! Content collection.
//!
//! Lists the markdown files of the content directory and renders each one
//! into a [`RenderedPost`], in lexicographic file name order.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use mdpress_core::{PostRecord, post::sort_newest_first};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::post::{PostError, PostRenderer, RenderedPost, SourceDocument};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Failed to list the content directory.
    #[error("failed to read content directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A post failed to render.
    #[error("failed to render {path}: {source}")]
    Post {
        path: PathBuf,
        #[source]
        source: PostError,
    },
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Two source files that produced the same slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSlug {
    pub slug: String,
    pub first: PathBuf,
    pub second: PathBuf,
}

/// Collected site content.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Rendered posts in source file order.
    pub posts: Vec<RenderedPost>,

    /// Slug collisions found while collecting.
    pub duplicates: Vec<DuplicateSlug>,
}

impl SiteContent {
    /// Post records sorted newest first.
    ///
    /// When several posts share a slug only the last one in source order is
    /// kept, matching the page that ends up on disk.
    #[must_use]
    pub fn records_newest_first(&self) -> Vec<PostRecord> {
        let last: HashMap<&str, usize> = self
            .posts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.record.slug(), i))
            .collect();

        let mut records: Vec<_> = self
            .posts
            .iter()
            .enumerate()
            .filter(|(i, p)| last.get(p.record.slug()) == Some(i))
            .map(|(_, p)| p.record.clone())
            .collect();
        sort_newest_first(&mut records);
        records
    }

    /// Source files the posts came from.
    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.posts.iter().map(|p| p.source.as_path())
    }
}

/// Finds markdown sources and renders them.
#[derive(Debug)]
pub struct ContentCollector {
    content_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Markdown files directly inside the content directory, sorted by name.
    ///
    /// Hidden files are skipped. A missing directory yields no files.
    pub fn sources(&self) -> Result<Vec<PathBuf>> {
        if !self.content_dir.exists() {
            warn!(dir = %self.content_dir.display(), "content directory does not exist");
            return Ok(Vec::new());
        }

        let read_err = |source| CollectorError::ReadDir {
            path: self.content_dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.content_dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();

            let hidden = path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'));
            if hidden || !path.is_file() {
                continue;
            }

            if path.extension().is_some_and(|ext| ext == "md") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Render every source document.
    pub fn collect(&self, renderer: &PostRenderer) -> Result<SiteContent> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let files = self.sources()?;
        info!(count = files.len(), "found markdown files");

        let mut content = SiteContent::default();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in files {
            debug!(path = %path.display(), "rendering post");

            let post = SourceDocument::read(&path)
                .and_then(|doc| renderer.render(&doc))
                .map_err(|source| CollectorError::Post {
                    path: path.clone(),
                    source,
                })?;

            let slug = post.record.slug().to_string();
            if let Some(first) = seen.insert(slug.clone(), path.clone()) {
                warn!(
                    slug = %slug,
                    first = %first.display(),
                    second = %path.display(),
                    "duplicate slug, the later post overwrites the earlier one"
                );
                content.duplicates.push(DuplicateSlug {
                    slug,
                    first,
                    second: path,
                });
            }

            content.posts.push(post);
        }

        info!(
            posts = content.posts.len(),
            duplicates = content.duplicates.len(),
            "content collection complete"
        );

        Ok(content)
    }
}
