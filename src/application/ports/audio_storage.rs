use async_trait::async_trait;

use crate::domain::ConversationId;

#[derive(Debug, Clone)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub file_url: String,
    pub object_key: String,
}

/// Object-storage capability the pipeline calls but does not implement:
/// authorizes a direct client upload and reports where the object will live.
#[async_trait]
pub trait AudioStorage: Send + Sync {
    async fn presign_upload(
        &self,
        conversation_id: ConversationId,
        mime_type: &str,
    ) -> Result<PresignedUpload, AudioStorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStorageError {
    #[error("storage not configured: {0}")]
    NotConfigured(String),
    #[error("presign failed: {0}")]
    PresignFailed(String),
}
