use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

use crate::application::ports::{AiProvider, AiProviderError, MedicalSummary};
use crate::domain::{Language, SummaryStyle};
use crate::presentation::config::GeminiSettings;

use super::provider_factory::ProviderFactoryError;
use super::summary_json::parse_summary_json;

/// Adapter for the Gemini generateContent API: one synchronous-completion
/// endpoint covering text, inline audio and structured output.
pub struct GeminiProvider {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiProvider {
    pub fn new(settings: GeminiSettings, timeout: Duration) -> Result<Self, ProviderFactoryError> {
        if settings.api_key.is_empty() {
            return Err(ProviderFactoryError::MisconfiguredProvider(
                "gemini api_key is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderFactoryError::MisconfiguredProvider(e.to_string()))?;

        Ok(Self { client, settings })
    }

    async fn generate(&self, model: &str, parts: Vec<Value>) -> Result<String, AiProviderError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.settings.base_url, model, self.settings.api_key
        );
        let payload = json!({
            "contents": [{"parts": parts}],
            "generationConfig": {"temperature": 0.2},
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AiProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(AiProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(AiProviderError::UpstreamError(status.as_u16()));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| AiProviderError::RequestFailed(e.to_string()))?;

        candidate_text(&data)
    }
}

/// Concatenates the text parts of the first candidate; no usable content is
/// `EmptyResponse`.
fn candidate_text(data: &Value) -> Result<String, AiProviderError> {
    let parts = data
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or(AiProviderError::EmptyResponse)?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(AiProviderError::EmptyResponse);
    }

    Ok(text.trim().to_string())
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, AiProviderError> {
        let prompt = format!(
            "Translate the following medical conversation text. \
             Preserve meaning and medical terminology. \
             Output only the translated text.\n\n\
             Source language: {}\nTarget language: {}\nText: {}",
            source, target, text
        );

        tracing::debug!(model = %self.settings.translation_model, "Sending translation to Gemini");
        self.generate(&self.settings.translation_model, vec![json!({"text": prompt})])
            .await
    }

    async fn transcribe_audio(
        &self,
        audio: &[u8],
        mime_type: &str,
        language_hint: Language,
    ) -> Result<String, AiProviderError> {
        let prompt = format!(
            "Transcribe this audio accurately for medical conversation context. \
             Return plain text only with no extra commentary. \
             Language hint: {}.",
            language_hint
        );

        tracing::debug!(
            model = %self.settings.transcribe_model,
            audio_bytes = audio.len(),
            "Sending audio to Gemini"
        );

        self.generate(
            &self.settings.transcribe_model,
            vec![
                json!({"text": prompt}),
                json!({"inline_data": {"mime_type": mime_type, "data": BASE64.encode(audio)}}),
            ],
        )
        .await
    }

    async fn summarize_medical(
        &self,
        lines: &[String],
        style: SummaryStyle,
    ) -> Result<MedicalSummary, AiProviderError> {
        let prompt = format!(
            "You are summarizing a doctor-patient conversation. \
             Return strict JSON with keys: summary (string), symptoms (array), \
             diagnoses (array), medications (array), follow_up (array). \
             No markdown. No extra keys.\n\nStyle: {}\nConversation:\n{}",
            style,
            lines.join("\n")
        );

        tracing::debug!(model = %self.settings.summary_model, "Sending summary request to Gemini");
        let raw = self
            .generate(&self.settings.summary_model, vec![json!({"text": prompt})])
            .await?;

        parse_summary_json(&raw)
    }
}
