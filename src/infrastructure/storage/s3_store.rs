use std::sync::Arc;

use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as StorePath;
use object_store::signer::Signer;
use uuid::Uuid;

use crate::application::ports::{AudioStorage, AudioStorageError, PresignedUpload};
use crate::domain::ConversationId;
use crate::presentation::config::StorageSettings;

/// S3-compatible storage adapter. Only signs upload URLs; the audio bytes
/// themselves never pass through this service on the way in.
pub struct S3AudioStorage {
    store: Arc<AmazonS3>,
    settings: StorageSettings,
}

impl S3AudioStorage {
    pub fn new(settings: StorageSettings) -> Result<Self, AudioStorageError> {
        if !settings.is_configured() {
            return Err(AudioStorageError::NotConfigured(
                "storage bucket is not set".to_string(),
            ));
        }

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&settings.bucket)
            .with_region(&settings.region)
            .with_access_key_id(&settings.access_key_id)
            .with_secret_access_key(&settings.secret_access_key);

        if !settings.endpoint_url.is_empty() {
            builder = builder
                .with_endpoint(&settings.endpoint_url)
                .with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| AudioStorageError::NotConfigured(e.to_string()))?;

        Ok(Self {
            store: Arc::new(store),
            settings,
        })
    }

    fn file_url(&self, object_key: &str) -> String {
        if !self.settings.public_base_url.is_empty() {
            return format!(
                "{}/{}",
                self.settings.public_base_url.trim_end_matches('/'),
                object_key
            );
        }
        format!(
            "{}/{}/{}",
            self.settings.endpoint_url.trim_end_matches('/'),
            self.settings.bucket,
            object_key
        )
    }
}

#[async_trait]
impl AudioStorage for S3AudioStorage {
    #[tracing::instrument(skip(self), fields(conversation_id = %conversation_id.as_uuid()))]
    async fn presign_upload(
        &self,
        conversation_id: ConversationId,
        _mime_type: &str,
    ) -> Result<PresignedUpload, AudioStorageError> {
        let object_key = format!(
            "conversations/{}/{}.webm",
            conversation_id.as_uuid(),
            Uuid::new_v4()
        );
        let path = StorePath::from(object_key.as_str());
        let expires_in = self.settings.presign_expiry();

        let upload_url = self
            .store
            .signed_url(http::Method::PUT, &path, expires_in)
            .await
            .map_err(|e| AudioStorageError::PresignFailed(e.to_string()))?;

        Ok(PresignedUpload {
            upload_url: upload_url.to_string(),
            file_url: self.file_url(&object_key),
            object_key,
        })
    }
}
