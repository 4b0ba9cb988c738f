use async_trait::async_trait;

/// Retrieves a previously uploaded audio payload by its reference URL.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AudioFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioFetchError {
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("upstream status {0}")]
    UpstreamStatus(u16),
}
