//! Robots.txt generation.
//!
//! Generates the robots.txt file for search engine crawlers.

use std::{fs, io, path::Path};

use mdpress_core::Config;
use tracing::info;

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    config: Config,
}

impl RobotsGenerator {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate robots.txt content.
    pub fn generate(&self) -> String {
        format!(
            "User-agent: *\nAllow: /\nSitemap: {}\n",
            self.config.url_for("sitemap.xml")
        )
    }

    /// Write robots.txt into `output_dir`.
    pub fn write(&self, output_dir: &Path) -> io::Result<()> {
        info!("generating robots.txt");
        fs::write(output_dir.join("robots.txt"), self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let mut config = Config::default();
        config.site.base_url = "https://example.com/blog".to_string();

        assert_eq!(
            RobotsGenerator::new(config).generate(),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/blog/sitemap.xml\n"
        );
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().unwrap();
        let generator = RobotsGenerator::new(Config::default());
        generator.write(dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join("robots.txt")).unwrap();
        assert_eq!(written, generator.generate());
    }
}
