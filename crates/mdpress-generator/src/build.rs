//! Build orchestration.
//!
//! Coordinates the full site build process.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use mdpress_core::{BuildClock, Config, PostRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{AssetCopier, AssetError},
    collector::{CollectorError, ContentCollector},
    index::IndexBuilder,
    post::{PostError, PostRenderer},
    robots::RobotsGenerator,
    rss::RssGenerator,
    search::SearchIndexBuilder,
    sitemap::SitemapGenerator,
    template::{TemplateError, TemplateRegistry},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to create a directory or write an output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template loading error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Page rendering error.
    #[error("render error: {0}")]
    Post(#[from] PostError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Search index serialization error.
    #[error("search index error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of post pages written.
    pub posts: usize,

    /// Number of assets copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    clock: BuildClock,
    templates: Option<TemplateRegistry>,
}

impl Builder {
    /// Create a new builder reading its directories from `config.build`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            clock: BuildClock::now(),
            templates: None,
        }
    }

    /// Pin the build clock.
    #[must_use]
    pub fn with_clock(mut self, clock: BuildClock) -> Self {
        self.clock = clock;
        self
    }

    /// Use the given templates instead of loading overrides from `templates_dir`.
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.config.build.output_dir
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();
        let out = self.output_dir();

        info!(
            content = %self.config.build.content_dir.display(),
            output = %out.display(),
            "starting build"
        );

        // 1. Output directories
        for dir in [out.to_path_buf(), out.join("assets"), out.join("posts")] {
            create_dir(&dir)?;
        }

        // 2. Assets
        let manifest = AssetCopier::new(self.config.build.assets.iter().cloned())
            .copy(&self.config.build.assets_dir, &out.join("assets"))?;
        stats.assets = manifest.len();

        // 3. Posts
        let templates = self.templates()?;
        let renderer = PostRenderer::new(self.config.clone(), templates.clone(), self.clock);
        let content = ContentCollector::new(&self.config.build.content_dir).collect(&renderer)?;

        for post in &content.posts {
            let path = out.join(post.record.output_path());
            write_file(&path, &post.page)?;
            debug!(path = %path.display(), "wrote post");
        }

        let posts = content.records_newest_first();
        stats.posts = posts.len();

        // 4. Derived artifacts
        self.write_artifacts(out, &templates, &posts)?;

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            posts = stats.posts,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Index, search index, sitemap, robots and feed, in that order.
    fn write_artifacts(
        &self,
        out: &Path,
        templates: &TemplateRegistry,
        posts: &[PostRecord],
    ) -> Result<()> {
        let index = IndexBuilder::new(&self.config, templates, self.clock).generate(posts)?;
        write_file(&out.join("index.html"), &index)?;

        let search = SearchIndexBuilder::new().generate(posts)?;
        write_file(&out.join("search_index.json"), &search)?;

        let sitemap = SitemapGenerator::new(self.config.clone()).generate(posts);
        write_file(&out.join("sitemap.xml"), &sitemap)?;

        let robots = RobotsGenerator::new(self.config.clone());
        robots.write(out).map_err(|source| BuildError::Io {
            path: out.join("robots.txt"),
            source,
        })?;

        let feed = RssGenerator::new(self.config.clone(), self.clock).generate(posts);
        write_file(&out.join("feed.xml"), &feed)?;

        info!(path = %out.display(), "generated index, search index, sitemap, robots and feed");
        Ok(())
    }

    fn templates(&self) -> Result<TemplateRegistry> {
        if let Some(templates) = &self.templates {
            return Ok(templates.clone());
        }

        let mut templates = TemplateRegistry::new();
        templates.load_overrides(&self.config.build.templates_dir)?;
        Ok(templates)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}
