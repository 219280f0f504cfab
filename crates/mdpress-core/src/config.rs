//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for mdpress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub rss: RssConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Canonical base URL for the site (e.g., "https://example.com/blog/").
    pub base_url: String,

    /// Site description for meta tags and the feed channel.
    #[serde(default)]
    pub description: String,

    /// Author name used in structured data.
    #[serde(default)]
    pub author: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding the markdown posts.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory holding the static assets.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Directory with template overrides (`post.html`, `index.html`).
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Asset file names copied into `<output>/assets`.
    #[serde(default = "default_assets")]
    pub assets: Vec<String>,
}

/// RSS feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    /// Maximum number of items in feed.
    #[serde(default = "default_rss_limit")]
    pub limit: usize,
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("MDPRESS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_assets() -> Vec<String> {
    ["styles.css", "toggle.js", "search.js", "favicon.svg"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_rss_limit() -> usize {
    20
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "mdpress blog".to_string(),
            base_url: "https://example.com/".to_string(),
            description: "A markdown blog built with mdpress.".to_string(),
            author: "mdpress".to_string(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            assets_dir: default_assets_dir(),
            templates_dir: default_templates_dir(),
            assets: default_assets(),
        }
    }
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            limit: default_rss_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file layered with `MDPRESS_*` environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `MDPRESS_SITE__BASE_URL`.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::from_sources(Some(path), environment())
    }

    /// Load the configuration file if it exists, otherwise the defaults.
    ///
    /// Environment variables are layered on top in both cases.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_with_env(path)
        } else {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
            Self::from_sources(None, environment())
        }
    }

    fn from_sources(file: Option<&Path>, env: config::Environment) -> Result<Self> {
        let builder = config::Config::builder();
        let builder = match file {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::Config::try_from(&Self::default())?),
        };

        let config: Config = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.trim().is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if !self.site.base_url.starts_with("http://") && !self.site.base_url.starts_with("https://")
        {
            tracing::warn!(
                base_url = %self.site.base_url,
                "site.base_url should start with http:// or https://"
            );
        }

        Ok(())
    }

    /// Base URL, always ending with a slash.
    pub fn base_url(&self) -> String {
        let base = self.site.base_url.trim();
        if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        }
    }

    /// Get the full URL for a site-relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Site"
base_url = "https://example.com/blog/"
description = "Notes and essays"
author = "Ada"

[build]
content_dir = "posts-src"
output_dir = "public"
assets = ["site.css"]

[rss]
limit = 15
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.site.base_url, "https://example.com/blog/");
        assert_eq!(config.site.description, "Notes and essays");
        assert_eq!(config.site.author, "Ada");
        assert_eq!(config.build.content_dir, PathBuf::from("posts-src"));
        assert_eq!(config.build.output_dir, PathBuf::from("public"));
        assert_eq!(config.build.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.build.assets, vec!["site.css"]);
        assert_eq!(config.rss.limit, 15);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert!(config.site.description.is_empty());
        assert!(config.site.author.is_empty());
        assert_eq!(config.build.content_dir, PathBuf::from("content"));
        assert_eq!(config.build.output_dir, PathBuf::from("dist"));
        assert_eq!(config.build.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.build.assets.len(), 4);
        assert_eq!(config.rss.limit, 20);
    }

    #[test]
    fn test_base_url_normalized() {
        let mut config = Config::default();
        config.site.base_url = "https://example.com".to_string();
        assert_eq!(config.base_url(), "https://example.com/");

        config.site.base_url = "https://example.com/blog/".to_string();
        assert_eq!(config.base_url(), "https://example.com/blog/");
    }

    #[test]
    fn test_url_for() {
        let config = Config::default();

        assert_eq!(
            config.url_for("/posts/hello.html"),
            "https://example.com/posts/hello.html"
        );
        assert_eq!(config.url_for("feed.xml"), "https://example.com/feed.xml");
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let config_content = r#"
[site]
title = ""
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml"))
            .expect("defaults");
        assert_eq!(config.site.title, "mdpress blog");
        assert_eq!(config.rss.limit, 20);
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.author, "Ada");
        assert_eq!(config.rss.limit, 15);
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        environment().source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::from_sources(
            Some(&config_path),
            env(&[
                ("MDPRESS_SITE__BASE_URL", "https://staging.example.com/"),
                ("MDPRESS_RSS__LIMIT", "5"),
                ("OTHER_SITE__TITLE", "ignored"),
            ]),
        )
        .expect("load config");

        assert_eq!(config.site.base_url, "https://staging.example.com/");
        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.rss.limit, 5);
        assert_eq!(config.build.output_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_env_overrides_defaults_without_file() {
        let config = Config::from_sources(None, env(&[("MDPRESS_SITE__TITLE", "From Env")]))
            .expect("load config");

        assert_eq!(config.site.title, "From Env");
        assert_eq!(config.site.base_url, "https://example.com/");
        assert_eq!(config.build.assets.len(), 4);
        assert_eq!(config.rss.limit, 20);
    }

    #[test]
    fn test_env_values_are_validated() {
        let result = Config::from_sources(None, env(&[("MDPRESS_SITE__TITLE", " ")]));
        assert!(result.is_err());
    }
}
