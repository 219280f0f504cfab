//! New command - create a new post

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};
use mdpress_core::{Config, frontmatter::DELIMITER, slugify};

/// Run the new command.
///
/// Creates `<content_dir>/<slug>.md` with boilerplate front matter.
pub fn run(config_path: &Path, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    tracing::info!(title, ?slug, "Creating new post");

    let config = Config::load_or_default(config_path).wrap_err("Failed to load configuration")?;
    let date = Utc::now().format("%Y-%m-%d").to_string();

    let file_path = create(&config.build.content_dir, title, slug, &date)?;

    tracing::info!(?file_path, "Created new post");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

/// Write the post file, refusing to overwrite an existing one.
fn create(content_dir: &Path, title: &str, slug: Option<&str>, date: &str) -> Result<PathBuf> {
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    let title_value = frontmatter_value(&title)?;

    let slug = slugify(slug.unwrap_or(&title));
    let file_path = content_dir.join(format!("{slug}.md"));

    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    fs::create_dir_all(content_dir).wrap_err("Failed to create content directory")?;
    fs::write(&file_path, generate_frontmatter(&title_value, date))
        .wrap_err("Failed to write file")?;

    Ok(file_path)
}

/// Front matter form of a single-line value that reads back unchanged.
///
/// The reader strips every surrounding `"` and then every surrounding `'`, so
/// a value is written bare unless it has a double quote at either end, in which
/// case it is wrapped in single quotes.
fn frontmatter_value(value: &str) -> Result<String> {
    if value.is_empty() {
        bail!("Title cannot be empty");
    }
    if value.contains(DELIMITER) {
        bail!("Title cannot contain `{DELIMITER}`");
    }

    let at_ends = |c: char| value.starts_with(c) || value.ends_with(c);
    if at_ends('\'') {
        bail!("Title cannot start or end with a single quote");
    }

    Ok(if at_ends('"') {
        format!("'{value}'")
    } else {
        value.to_string()
    })
}

fn generate_frontmatter(title: &str, date: &str) -> String {
    format!(
        r#"---
title: {title}
date: {date}
description: ""
---

Write your content here.
"#
    )
}
