use std::sync::Arc;

use crate::application::ports::AiProvider;
use crate::presentation::config::AiSettings;

use super::gemini_provider::GeminiProvider;
use super::groq_provider::GroqProvider;

/// Provider selector: resolves the configured provider name to a constructed
/// adapter. Construction is eager and adapters validate their own credential,
/// so misconfiguration surfaces at startup rather than deep inside a request.
pub struct AiProviderFactory;

impl AiProviderFactory {
    pub fn create(settings: &AiSettings) -> Result<Arc<dyn AiProvider>, ProviderFactoryError> {
        match settings.provider.trim().to_lowercase().as_str() {
            "gemini" => {
                let provider = GeminiProvider::new(settings.gemini.clone(), settings.timeout())?;
                Ok(Arc::new(provider))
            }
            "groq" => {
                let provider = GroqProvider::new(settings.groq.clone(), settings.timeout())?;
                Ok(Arc::new(provider))
            }
            other => Err(ProviderFactoryError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderFactoryError {
    #[error("unsupported AI provider: {0}")]
    UnsupportedProvider(String),
    #[error("misconfigured provider: {0}")]
    MisconfiguredProvider(String),
}
