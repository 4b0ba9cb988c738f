use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AudioFetchError, AudioFetcher};

/// Downloads uploaded audio back from object storage over plain HTTP GET.
/// Works against any store that serves the file URLs handed out at presign
/// time, including public buckets and local S3 stand-ins.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
}

impl HttpAudioFetcher {
    pub fn new(timeout: Duration) -> Result<Self, AudioFetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AudioFetchError::FetchFailed(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    #[tracing::instrument(skip(self, url))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AudioFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AudioFetchError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AudioFetchError::UpstreamStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioFetchError::FetchFailed(e.to_string()))?;

        tracing::debug!(audio_bytes = bytes.len(), "Fetched audio object");
        Ok(bytes.to_vec())
    }
}
