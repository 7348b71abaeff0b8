//! HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};
use url::Url;
use wax_common_secret::SecretString;

use crate::{BundleFile, PackageBundle, Registry, RegistryError, UploadReceipt};

/// Longest slice of a rejection body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Uploads each bundle file with `PUT {endpoint}/packages/{name}/files/{path}`.
#[derive(Debug)]
pub struct HttpRegistry {
    client: reqwest::Client,
    endpoint: Url,
    token: SecretString,
}

impl HttpRegistry {
    pub fn new(endpoint: &str, token: SecretString, timeout: Duration) -> Result<Self, RegistryError> {
        let endpoint = Url::parse(endpoint).map_err(|e| RegistryError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(RegistryError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                message: "endpoint cannot be used as a base URL".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wax/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// Target URL for one file.
    pub fn file_url(&self, package: &str, relative: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["packages", package, "files"])
                .extend(relative.split('/'));
        }
        url
    }

    async fn put_file(&self, package: &str, file: &BundleFile) -> Result<(), RegistryError> {
        let body = tokio::fs::read(&file.path)
            .await
            .map_err(|source| RegistryError::Io {
                path: file.path.clone(),
                source,
            })?;

        let url = self.file_url(package, &file.relative);
        debug!(%url, bytes = body.len(), "uploading file");

        let response = self
            .client
            .put(url)
            .bearer_auth(self.token.expose())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let mut message = self.token.scrub(text.trim());
        if message.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| message.is_char_boundary(i))
                .unwrap_or(0);
            message.truncate(cut);
        }

        Err(RegistryError::Rejected {
            status: status.as_u16(),
            path: file.relative.clone(),
            message,
        })
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn upload(&self, bundle: &PackageBundle) -> Result<UploadReceipt, RegistryError> {
        for file in &bundle.files {
            self.put_file(&bundle.name, file).await?;
        }

        let receipt = UploadReceipt {
            package: bundle.name.clone(),
            files: bundle.files.len(),
            bytes: bundle.total_bytes(),
        };
        info!(
            package = %receipt.package,
            files = receipt.files,
            bytes = receipt.bytes,
            "upload complete"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(endpoint: &str) -> HttpRegistry {
        HttpRegistry::new(
            endpoint,
            SecretString::new("tok".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_file_url_with_base_path() {
        let url = registry("https://qpm.example.test/api/").file_url("demo", "src/main.qi");
        assert_eq!(
            url.as_str(),
            "https://qpm.example.test/api/packages/demo/files/src/main.qi"
        );
    }

    #[test]
    fn test_file_url_escapes_segments() {
        let url = registry("https://qpm.example.test").file_url("demo", "src/hello world.qi");
        assert_eq!(
            url.as_str(),
            "https://qpm.example.test/packages/demo/files/src/hello%20world.qi"
        );
    }

    #[test]
    fn test_rejects_non_base_endpoint() {
        let result = HttpRegistry::new(
            "mailto:someone@example.test",
            SecretString::new("tok".to_string()),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(RegistryError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_rejects_garbage_endpoint() {
        let result = HttpRegistry::new(
            "not a url",
            SecretString::new("tok".to_string()),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(RegistryError::InvalidEndpoint { .. })));
    }
}
