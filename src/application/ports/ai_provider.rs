use async_trait::async_trait;

use crate::domain::{Language, SummaryStyle};

/// Structured extraction returned by medical summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicalSummary {
    pub summary: String,
    pub symptoms: Vec<String>,
    pub diagnoses: Vec<String>,
    pub medications: Vec<String>,
    pub follow_up: Vec<String>,
}

/// Capability contract every AI backend must satisfy. Adapters normalize all
/// backend-specific failures into [`AiProviderError`]; no other error kinds
/// cross this boundary.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, AiProviderError>;

    async fn transcribe_audio(
        &self,
        audio: &[u8],
        mime_type: &str,
        language_hint: Language,
    ) -> Result<String, AiProviderError>;

    async fn summarize_medical(
        &self,
        lines: &[String],
        style: SummaryStyle,
    ) -> Result<MedicalSummary, AiProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiProviderError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("upstream error: status {0}")]
    UpstreamError(u16),
    #[error("empty response")]
    EmptyResponse,
    #[error("summary parse failed")]
    ParseFailed,
}
