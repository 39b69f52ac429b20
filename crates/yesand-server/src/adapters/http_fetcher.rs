//! HTTP Image Fetcher
//!
//! Downloads images for the proxy endpoint using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use yesand::{DomainError, FetchedImage, ImageFetcher};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of ImageFetcher
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::ExternalService(format!(
                "Upstream returned {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Failed to read body: {e}")))?;

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
