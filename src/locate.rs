//! Result Locator - finds result files below an aggregation root
//!
//! Layout produced by the training runner:
//!
//! ```text
//! <root>/<model>/<setting>/.../test_metrics.json
//! ```
//!
//! Only files whose directory sits at least two levels below the root carry
//! a `(model, setting)` identity; shallower files are skipped silently.
//! Traversal is sorted by file name at every level so that equal-MAE
//! tie-breaks downstream are reproducible across platforms.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::experiment::dataset_of;
use crate::Error;

/// A result file together with the identity derived from its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLocation {
    path: PathBuf,
    model: String,
    setting: String,
}

impl ResultLocation {
    /// Create a location from explicit parts.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, model: impl Into<String>, setting: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            model: model.into(),
            setting: setting.into(),
        }
    }

    /// Derive the location of `path` relative to `root`.
    ///
    /// Returns `None` when the file's directory has fewer than two path
    /// segments below `root`, or is not below `root` at all.
    #[must_use]
    pub fn from_path(root: &Path, path: &Path) -> Option<Self> {
        let relative_dir = path.parent()?.strip_prefix(root).ok()?;
        let mut segments = relative_dir.components().filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        });
        let model = segments.next()?;
        let setting = segments.next()?;
        Some(Self::new(path, model, setting))
    }

    /// Get the result file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the model segment.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the setting segment.
    #[must_use]
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Dataset derived from the setting.
    #[must_use]
    pub fn dataset(&self) -> &str {
        dataset_of(&self.setting)
    }
}

/// Walks an aggregation root for result files.
#[derive(Debug, Clone)]
pub struct ResultLocator {
    root: PathBuf,
    file_name: String,
}

impl ResultLocator {
    /// Create a locator for `file_name` files below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    /// Get the aggregation root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield every eligible result file in sorted traversal order.
    ///
    /// Unreadable directories are logged and skipped; they never end the walk.
    pub fn locate(&self) -> impl Iterator<Item = ResultLocation> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(root = %self.root.display(), error = %Error::from(e), "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| self.is_result_file(entry))
            .filter_map(|entry| {
                let location = ResultLocation::from_path(&self.root, entry.path());
                if location.is_none() {
                    debug!(path = %entry.path().display(), "result file too shallow, skipped");
                }
                location
            })
    }

    fn is_result_file(&self, entry: &DirEntry) -> bool {
        !entry.file_type().is_dir() && entry.file_name() == OsStr::new(&self.file_name)
    }
}
