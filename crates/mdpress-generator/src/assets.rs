//! Static asset copying.
//!
//! Copies a fixed list of named files byte-for-byte into `<output>/assets`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A listed asset does not exist in the source directory.
    #[error("missing asset: {0}")]
    Missing(PathBuf),

    /// Failed to copy an asset.
    #[error("failed to copy {src} to {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Asset manifest for tracking copied assets.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    /// Mapping from asset name to destination path.
    assets: BTreeMap<String, PathBuf>,
}

impl AssetManifest {
    /// Create a new empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset to the manifest.
    pub fn add(&mut self, name: impl Into<String>, dest: impl Into<PathBuf>) {
        self.assets.insert(name.into(), dest.into());
    }

    /// Get the destination path of an asset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.assets.get(name).map(PathBuf::as_path)
    }

    /// Number of copied assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether nothing was copied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over `(name, destination)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.assets.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }
}

/// Copies an enumerated list of assets.
#[derive(Debug)]
pub struct AssetCopier {
    names: Vec<String>,
}

impl AssetCopier {
    /// Create a copier for the given asset file names.
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Names listed in `source_dir` that do not exist there.
    #[must_use]
    pub fn missing(&self, source_dir: &Path) -> Vec<PathBuf> {
        self.names
            .iter()
            .map(|name| source_dir.join(name))
            .filter(|path| !path.is_file())
            .collect()
    }

    /// Copy every listed asset from `source_dir` into `dest_dir`.
    ///
    /// Stops at the first missing or unreadable file.
    pub fn copy(&self, source_dir: &Path, dest_dir: &Path) -> Result<AssetManifest> {
        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            count = self.names.len(),
            "copying assets"
        );

        let mut manifest = AssetManifest::new();

        for name in &self.names {
            let src = source_dir.join(name);
            if !src.is_file() {
                return Err(AssetError::Missing(src));
            }

            let dest = dest_dir.join(name);
            copy_file(&src, &dest)?;
            debug!(src = %src.display(), dest = %dest.display(), "copied asset");

            manifest.add(name.clone(), dest);
        }

        info!(count = manifest.len(), "assets copied");
        Ok(manifest)
    }
}

/// Copy a single file, creating parent directories as needed.
fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    let copy_err = |source| AssetError::Copy {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    fs::copy(src, dest).map_err(copy_err)?;
    Ok(())
}
