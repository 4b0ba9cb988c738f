use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde_json::{Value, json};

use crate::application::ports::{AiProvider, AiProviderError, MedicalSummary};
use crate::domain::{Language, SummaryStyle};
use crate::presentation::config::GroqSettings;

use super::provider_factory::ProviderFactoryError;
use super::summary_json::parse_summary_json;

/// Adapter for the Groq OpenAI-compatible API: chat completions for text
/// operations plus a separate multipart audio-transcription endpoint.
pub struct GroqProvider {
    client: reqwest::Client,
    settings: GroqSettings,
}

impl GroqProvider {
    pub fn new(settings: GroqSettings, timeout: Duration) -> Result<Self, ProviderFactoryError> {
        if settings.api_key.is_empty() {
            return Err(ProviderFactoryError::MisconfiguredProvider(
                "groq api_key is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderFactoryError::MisconfiguredProvider(e.to_string()))?;

        Ok(Self { client, settings })
    }

    async fn chat(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, AiProviderError> {
        let url = format!("{}/chat/completions", self.settings.base_url);
        let payload = json!({
            "model": model,
            "temperature": temperature,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
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

        let content = data
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(AiProviderError::EmptyResponse);
        }

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl AiProvider for GroqProvider {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, AiProviderError> {
        tracing::debug!(model = %self.settings.translation_model, "Sending translation to Groq");
        self.chat(
            &self.settings.translation_model,
            "You are a medical translator. Preserve meaning and medical terminology.",
            &format!(
                "Translate from {} to {}. Return only translated text.\n\nText: {}",
                source, target, text
            ),
            0.0,
        )
        .await
    }

    async fn transcribe_audio(
        &self,
        audio: &[u8],
        mime_type: &str,
        language_hint: Language,
    ) -> Result<String, AiProviderError> {
        let url = format!("{}/audio/transcriptions", self.settings.base_url);

        let file_part = multipart::Part::bytes(audio.to_vec())
            .file_name("audio.webm")
            .mime_str(mime_type)
            .map_err(|e| AiProviderError::RequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.settings.transcribe_model.clone())
            .text("language", language_hint.as_str())
            .text("response_format", "json")
            .part("file", file_part);

        tracing::debug!(
            model = %self.settings.transcribe_model,
            audio_bytes = audio.len(),
            "Sending audio to Groq transcription"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .multipart(form)
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

        let text = data
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(AiProviderError::EmptyResponse);
        }

        Ok(text)
    }

    async fn summarize_medical(
        &self,
        lines: &[String],
        style: SummaryStyle,
    ) -> Result<MedicalSummary, AiProviderError> {
        tracing::debug!(model = %self.settings.summary_model, "Sending summary request to Groq");
        let raw = self
            .chat(
                &self.settings.summary_model,
                "You summarize clinical conversations and return strict JSON only.",
                &format!(
                    "Return strict JSON with keys: summary (string), symptoms (array), \
                     diagnoses (array), medications (array), follow_up (array). \
                     No markdown.\n\nStyle: {}\nConversation:\n{}",
                    style,
                    lines.join("\n")
                ),
                0.1,
            )
            .await?;

        parse_summary_json(&raw)
    }
}
