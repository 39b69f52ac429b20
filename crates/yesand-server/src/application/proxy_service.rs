//! Image Proxy Service
//!
//! Re-serves generated images from the trusted blob host so browsers can
//! download them without cross-origin restrictions.

use std::sync::Arc;

use reqwest::Url;
use yesand::{DomainError, ImageFetcher};

/// Only hosts under this suffix are fetched
pub const TRUSTED_HOST_SUFFIX: &str = ".blob.core.windows.net";
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";
pub const DOWNLOAD_FILENAME: &str = "yesand.png";

/// Image bytes ready to hand back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Parse `raw` and check its host against the trusted suffix
pub fn validate_target(raw: &str) -> Result<Url, DomainError> {
    let rejected = || DomainError::Rejected("Invalid image URL".to_string());

    let url = Url::parse(raw).map_err(|_| rejected())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(rejected());
    }

    match url.host_str() {
        Some(host) if host.ends_with(TRUSTED_HOST_SUFFIX) => Ok(url),
        _ => Err(rejected()),
    }
}

pub struct ProxyService {
    fetcher: Arc<dyn ImageFetcher>,
}

impl ProxyService {
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Validate first; untrusted URLs are never fetched
    pub async fn fetch(&self, raw: &str) -> Result<ProxiedImage, DomainError> {
        let url = validate_target(raw)?;
        let fetched = self.fetcher.fetch(url.as_str()).await?;

        Ok(ProxiedImage {
            bytes: fetched.bytes,
            content_type: fetched
                .content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        })
    }
}
