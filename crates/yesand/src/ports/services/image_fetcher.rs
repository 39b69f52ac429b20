//! Image Fetcher Port
//!
//! Downloads a remote image for the download proxy.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Raw bytes of a fetched image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// GET the resource; a non-success status is an error
    async fn fetch(&self, url: &str) -> Result<FetchedImage, DomainError>;
}
