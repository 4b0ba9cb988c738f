use std::time::Duration;

use serde::Deserialize;

/// Process-wide configuration, read-only after initialization. Every field
/// has a deployment default so the appsettings file and environment overrides
/// are both optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub ai: AiSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiSettings {
    /// Which provider adapter to construct at startup: "gemini" or "groq".
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub groq: GroqSettings,
}

impl AiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            timeout_seconds: default_ai_timeout(),
            gemini: GeminiSettings::default(),
            groq: GroqSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub translation_model: String,
    #[serde(default = "default_gemini_model")]
    pub summary_model: String,
    #[serde(default = "default_gemini_model")]
    pub transcribe_model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            translation_model: default_gemini_model(),
            summary_model: default_gemini_model(),
            transcribe_model: default_gemini_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
    #[serde(default = "default_groq_translation_model")]
    pub translation_model: String,
    #[serde(default = "default_groq_summary_model")]
    pub summary_model: String,
    #[serde(default = "default_groq_transcribe_model")]
    pub transcribe_model: String,
}

impl Default for GroqSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_groq_base_url(),
            translation_model: default_groq_translation_model(),
            summary_model: default_groq_summary_model(),
            transcribe_model: default_groq_transcribe_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub endpoint_url: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default)]
    pub public_base_url: String,
    #[serde(default = "default_presign_expiry")]
    pub presign_expiry_seconds: u64,
}

impl StorageSettings {
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty()
    }

    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_seconds)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            bucket: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
            presign_expiry_seconds: default_presign_expiry(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "default_max_audio_mb")]
    pub max_audio_mb: u64,
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl AudioSettings {
    pub fn max_bytes(&self) -> u64 {
        self.max_audio_mb * 1024 * 1024
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            max_audio_mb: default_max_audio_mb(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://medrelay.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_provider() -> String {
    "groq".to_string()
}

fn default_ai_timeout() -> u64 {
    20
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_translation_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_groq_summary_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_groq_transcribe_model() -> String {
    "whisper-large-v3-turbo".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_presign_expiry() -> u64 {
    600
}

fn default_max_audio_mb() -> u64 {
    15
}

fn default_allowed_mime_types() -> Vec<String> {
    vec!["audio/webm".to_string()]
}
