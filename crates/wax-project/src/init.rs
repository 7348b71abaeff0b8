//! Project scaffolding.
//!
//! Creation is not transactional: if a step fails, whatever earlier steps
//! created stays on disk and the error is returned as-is.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use wax_common_fs::{self as wfs, path::is_plain_name, FsError};

use crate::anchor::{ProjectAnchor, ANCHOR_FILE};
use crate::manifest::{ProjectManifest, MANIFEST_FILE};
use crate::templates::{self, COMPILE_SOURCE, MAIN_SOURCE};

/// Default source extension for Qyri files.
pub const DEFAULT_SOURCE_EXTENSION: &str = "qi";

/// Project initialization errors.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid project name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error(transparent)]
    Io(#[from] FsError),

    #[error("failed to encode {file}: {source}")]
    Encode {
        file: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Scaffolding mode flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Create a library rather than an application.
    pub as_library: bool,
    /// Ship metadata only, no `src`/`bin` tree.
    pub production: bool,
}

/// Paths created by a successful initialization, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub created: Vec<PathBuf>,
}

impl ProjectLayout {
    /// Created paths relative to the project root, `/`-separated. Directories
    /// end with `/`. The root itself is omitted.
    pub fn relative_paths(&self) -> Vec<String> {
        self.created
            .iter()
            .filter_map(|p| {
                let rel = p.strip_prefix(&self.root).ok()?;
                if rel.as_os_str().is_empty() {
                    return None;
                }
                let mut s = wfs::path::to_unix_string(rel);
                if p.is_dir() {
                    s.push('/');
                }
                Some(s)
            })
            .collect()
    }
}

/// Creates new project trees under a parent directory.
#[derive(Debug, Clone)]
pub struct Initializer {
    parent: PathBuf,
    username: String,
    source_extension: String,
}

impl Initializer {
    pub fn new(parent: impl Into<PathBuf>, username: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            username: username.into(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
        }
    }

    /// Use a different extension for generated source files.
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// Create `<parent>/<name>` with manifest, anchor and the layout chosen
    /// by `options`.
    pub fn initialize(
        &self,
        name: &str,
        authors: &[String],
        options: InitOptions,
    ) -> Result<ProjectLayout, InitError> {
        check_name(name)?;

        let manifest = ProjectManifest::new(name, authors);
        let anchor = ProjectAnchor::new(name, &self.username, manifest.primary_author());

        let manifest_text = manifest.render().map_err(|source| InitError::Encode {
            file: MANIFEST_FILE,
            source,
        })?;
        let anchor_text = anchor.render().map_err(|source| InitError::Encode {
            file: ANCHOR_FILE,
            source,
        })?;

        let root = self.parent.join(name);
        let mut tree = Tree::new(&root);

        wfs::create_dir(&root).map_err(|e| match e {
            FsError::AlreadyExists { path } => InitError::AlreadyExists { path },
            other => InitError::Io(other),
        })?;
        tree.record(root.clone());

        tree.file(MANIFEST_FILE, &manifest_text)?;
        tree.file(ANCHOR_FILE, &anchor_text)?;

        if options.production {
            tree.dir("meta")?;
        } else {
            tree.dir("src")?;
            if !options.as_library {
                let main = templates::source_file("main", &self.source_extension);
                tree.file(&format!("src/{main}"), MAIN_SOURCE)?;
            }

            tree.dir("bin")?;
            tree.dir("bin/debug")?;
            if options.as_library {
                tree.dir("bin/tests")?;
                let compile = templates::source_file("compile", &self.source_extension);
                tree.file(&format!("src/{compile}"), COMPILE_SOURCE)?;
            }
        }

        info!(
            project = name,
            library = options.as_library,
            production = options.production,
            paths = tree.created.len(),
            "initialized project"
        );

        let created = tree.created;
        Ok(ProjectLayout { root, created })
    }
}

/// Create `<parent>/<name>` using the default source extension.
pub fn initialize(
    parent: impl AsRef<Path>,
    username: &str,
    name: &str,
    authors: &[String],
    options: InitOptions,
) -> Result<ProjectLayout, InitError> {
    Initializer::new(parent.as_ref(), username).initialize(name, authors, options)
}

fn check_name(name: &str) -> Result<(), InitError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else if !is_plain_name(name) {
        "name is not a plain directory name"
    } else {
        return Ok(());
    };

    Err(InitError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Records every path it creates under a root.
struct Tree<'a> {
    root: &'a Path,
    created: Vec<PathBuf>,
}

impl<'a> Tree<'a> {
    fn new(root: &'a Path) -> Self {
        Self {
            root,
            created: Vec::new(),
        }
    }

    fn record(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "created");
        self.created.push(path);
    }

    fn dir(&mut self, rel: &str) -> Result<(), InitError> {
        let path = self.root.join(rel);
        wfs::create_dir(&path)?;
        self.record(path);
        Ok(())
    }

    fn file(&mut self, rel: &str, contents: &str) -> Result<(), InitError> {
        let path = self.root.join(rel);
        wfs::write_new_string(&path, contents)?;
        self.record(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn app() -> InitOptions {
        InitOptions::default()
    }

    #[test]
    fn test_rejects_bad_names() {
        let dir = tempdir().unwrap();
        let init = Initializer::new(dir.path(), "alice");

        for name in ["", "a/b", "a\\b", "..", "."] {
            let err = init.initialize(name, &[], app()).unwrap_err();
            assert!(
                matches!(err, InitError::InvalidName { .. }),
                "expected InvalidName for {name:?}, got {err:?}"
            );
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_existing_directory_is_already_exists() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("demo")).unwrap();

        let err = Initializer::new(dir.path(), "alice")
            .initialize("demo", &[], app())
            .unwrap_err();
        assert!(matches!(err, InitError::AlreadyExists { .. }));
    }

    #[test]
    fn test_existing_file_is_already_exists() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("demo"), "not a dir").unwrap();

        let err = Initializer::new(dir.path(), "alice")
            .initialize("demo", &[], app())
            .unwrap_err();
        assert!(matches!(err, InitError::AlreadyExists { .. }));
    }

    #[test]
    fn test_missing_parent_is_io_failure() {
        let dir = tempdir().unwrap();
        let err = Initializer::new(dir.path().join("nope"), "alice")
            .initialize("demo", &[], app())
            .unwrap_err();
        assert!(matches!(err, InitError::Io(FsError::NotFound { .. })));
    }

    #[test]
    fn test_application_layout_paths() {
        let dir = tempdir().unwrap();
        let layout = Initializer::new(dir.path(), "alice")
            .initialize("demo", &[], app())
            .unwrap();

        assert_eq!(layout.root, dir.path().join("demo"));
        assert_eq!(
            layout.relative_paths(),
            vec![
                "index.yml",
                "anchor.yml",
                "src/",
                "src/main.qi",
                "bin/",
                "bin/debug/",
            ]
        );
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempdir().unwrap();
        let layout = Initializer::new(dir.path(), "alice")
            .with_source_extension("qy")
            .initialize("demo", &[], InitOptions { as_library: true, production: false })
            .unwrap();

        assert!(layout.root.join("src/compile.qy").is_file());
        assert!(!layout.root.join("src/compile.qi").exists());
    }
}
