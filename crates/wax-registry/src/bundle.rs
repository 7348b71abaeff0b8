//! Collecting project files for upload.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use wax_common_fs::path::{is_hidden, to_unix_string};

use crate::RegistryError;

/// Build output directory, never shipped.
const BUILD_DIR: &str = "bin";

/// One file in a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    /// Path relative to the project root, `/`-separated.
    pub relative: String,
    /// Absolute path on disk.
    pub path: PathBuf,
    pub size: u64,
}

/// The files of a project, ready to upload.
#[derive(Debug, Clone)]
pub struct PackageBundle {
    pub name: String,
    pub root: PathBuf,
    pub files: Vec<BundleFile>,
}

impl PackageBundle {
    /// Gather every regular file under `root`, skipping hidden entries and
    /// the `bin/` build directory. Fails if any file exceeds `max_file_bytes`.
    pub fn collect(
        name: impl Into<String>,
        root: impl AsRef<Path>,
        max_file_bytes: u64,
    ) -> Result<Self, RegistryError> {
        let root = root.as_ref();
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let Ok(rel) = entry.path().strip_prefix(root) else {
                    return false;
                };
                !is_hidden(rel) && !rel.starts_with(BUILD_DIR)
            });

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let size = entry.metadata()?.len();
            if size > max_file_bytes {
                return Err(RegistryError::FileTooLarge {
                    path: entry.path().to_path_buf(),
                    size,
                    limit: max_file_bytes,
                });
            }

            let rel = entry
                .path()
                .strip_prefix(root)
                .map(|p| to_unix_string(p))
                .unwrap_or_default();
            debug!(file = %rel, size, "bundled");

            files.push(BundleFile {
                relative: rel,
                path: entry.path().to_path_buf(),
                size,
            });
        }

        Ok(Self {
            name: name.into(),
            root: root.to_path_buf(),
            files,
        })
    }

    /// Total bytes across all files.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Relative paths of all files.
    pub fn relative_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.relative.as_str()).collect()
    }
}
