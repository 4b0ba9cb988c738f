mod gemini_provider;
mod groq_provider;
mod provider_factory;
mod summary_json;

pub use gemini_provider::GeminiProvider;
pub use groq_provider::GroqProvider;
pub use provider_factory::{AiProviderFactory, ProviderFactoryError};
pub use summary_json::parse_summary_json;
