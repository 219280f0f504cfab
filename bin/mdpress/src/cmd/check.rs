//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use mdpress_core::{BuildClock, Config};
use mdpress_generator::{AssetCopier, ContentCollector, PostRenderer, TemplateRegistry};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration, every post and the asset list.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect every error and warning without stopping at the first one.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = if config_path.exists() {
        match Config::load_with_env(config_path) {
            Ok(c) => {
                println!("  ✓ Configuration valid");
                c
            }
            Err(e) => {
                result.add_error(format!("Configuration error: {e}"));
                println!("  ✗ Configuration invalid: {e}");
                return result;
            }
        }
    } else {
        result.add_warning(format!(
            "{} not found, using default configuration",
            config_path.display()
        ));
        Config::default()
    };

    check_config_values(&config, &mut result);

    println!("\nChecking posts...");
    validate_posts(&config, &mut result);

    println!("\nChecking assets...");
    validate_assets(&config, &mut result);

    result
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    let base_url = &config.site.base_url;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.site.description.is_empty() {
        result.add_warning("site.description is empty");
    }

    let output = &config.build.output_dir;
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            output.display()
        ));
    }

    if config.rss.limit == 0 {
        result.add_warning("rss.limit is 0, the feed will have no items");
    }
}

/// Render every post and report failures and slug collisions.
fn validate_posts(config: &Config, result: &mut ValidationResult) {
    let content_dir = &config.build.content_dir;
    if !content_dir.is_dir() {
        result.add_warning(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
        return;
    }

    let mut templates = TemplateRegistry::new();
    if let Err(e) = templates.load_overrides(&config.build.templates_dir) {
        result.add_error(format!("Template error: {e}"));
        return;
    }

    let renderer = PostRenderer::new(config.clone(), templates, BuildClock::now());
    let content = match ContentCollector::new(content_dir).collect(&renderer) {
        Ok(content) => content,
        Err(e) => {
            result.add_error(e.to_string());
            println!("  ✗ {e}");
            return;
        }
    };

    for dup in &content.duplicates {
        result.add_error(format!(
            "Duplicate slug `{}`: {} and {}",
            dup.slug,
            dup.first.display(),
            dup.second.display()
        ));
    }

    if content.posts.is_empty() {
        result.add_warning("No posts found");
    }

    if content.duplicates.is_empty() {
        println!("  ✓ {} posts valid", content.posts.len());
    } else {
        println!("  ✗ {} duplicate slug(s)", content.duplicates.len());
    }
}

/// Report listed assets missing from the asset directory.
fn validate_assets(config: &Config, result: &mut ValidationResult) {
    let missing = AssetCopier::new(config.build.assets.iter().cloned()).missing(&config.build.assets_dir);

    for path in &missing {
        result.add_error(format!("Missing asset: {}", path.display()));
    }

    if missing.is_empty() {
        println!("  ✓ All {} assets present", config.build.assets.len());
    } else {
        println!("  ✗ {} asset(s) missing", missing.len());
    }
}
