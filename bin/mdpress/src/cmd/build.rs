//! Build command - generates the static site

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use mdpress_core::Config;
use mdpress_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Loads `config_path` (or the defaults when it does not exist), applies the
/// command line overrides and builds the site.
pub fn run(config_path: &Path, output: Option<&Path>, base_url: Option<&str>) -> Result<BuildStats> {
    tracing::info!(?config_path, ?output, ?base_url, "Starting build");

    let mut config = Config::load_or_default(config_path).wrap_err("Failed to load configuration")?;
    apply_overrides(&mut config, output, base_url)?;

    tracing::debug!(?config, "Loaded configuration");

    let builder = Builder::new(config);
    let stats = builder.build().wrap_err("Build failed")?;

    println!("Built {} posts → {}", stats.posts, builder.output_dir().display());

    tracing::info!(?stats, "Build completed successfully");

    Ok(stats)
}

/// Apply `--output` and `--base-url`.
fn apply_overrides(config: &mut Config, output: Option<&Path>, base_url: Option<&str>) -> Result<()> {
    if let Some(dir) = output {
        config.build.output_dir = dir.to_path_buf();
    }

    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base_url from CLI");
        config.site.base_url = url.to_string();
        config.validate().wrap_err("Invalid --base-url")?;
    }

    Ok(())
}
