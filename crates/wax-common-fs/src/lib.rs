//! File system utilities for Wax.
//!
//! Everything here maps `std::io` failures onto [`FsError`] so callers can
//! tell "not there" and "already there" apart from genuine I/O faults.

pub mod encoding;
pub mod path;

pub use encoding::Encoding;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

/// File system errors.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("{} is not valid {encoding}: {message}", path.display())]
    Decode {
        path: PathBuf,
        encoding: Encoding,
        message: String,
    },

    #[error("unsupported encoding: {0}")]
    UnknownEncoding(String),

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn from_io(op: &'static str, path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { op, path, source },
        }
    }

    /// Whether the error means the path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the error means the path is already taken.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Result alias for file system operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Create a single directory. Fails with [`FsError::AlreadyExists`] when the
/// path is taken and [`FsError::NotFound`] when the parent is missing.
pub fn create_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir(path).map_err(|e| FsError::from_io("create directory", path, e))?;
    trace!(path = %path.display(), "created directory");
    Ok(())
}

/// Write a new file. Never truncates an existing one.
pub fn write_new(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| FsError::from_io("create file", path, e))?;

    file.write_all(contents)
        .map_err(|e| FsError::from_io("write file", path, e))?;
    file.sync_all()
        .map_err(|e| FsError::from_io("sync file", path, e))?;

    trace!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Write a new file from a string.
pub fn write_new_string(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_new(path, contents.as_bytes())
}

/// Read a file's bytes.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| FsError::from_io("read", path, e))
}

/// Read a file and decode it with the given encoding.
pub fn read_with_encoding(path: impl AsRef<Path>, encoding: Encoding) -> Result<String> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    encoding.decode(&bytes).map_err(|message| FsError::Decode {
        path: path.to_path_buf(),
        encoding,
        message,
    })
}
