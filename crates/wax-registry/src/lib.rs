//! Registry upload for Qyri packages.
//!
//! [`PackageBundle`] gathers the files of a verified project, and a
//! [`Registry`] sends them somewhere. [`HttpRegistry`] is the HTTP
//! transport; its credential is always injected by the caller.

mod bundle;
mod error;
mod http;

pub use bundle::{BundleFile, PackageBundle};
pub use error::RegistryError;
pub use http::HttpRegistry;

use async_trait::async_trait;
use serde::Serialize;

/// Summary of a finished upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub package: String,
    pub files: usize,
    pub bytes: u64,
}

/// Destination for package uploads.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Upload every file in the bundle.
    async fn upload(&self, bundle: &PackageBundle) -> Result<UploadReceipt, RegistryError>;
}
