mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AiSettings, AudioSettings, DatabaseSettings, GeminiSettings, GroqSettings, ServerSettings,
    Settings, StorageSettings,
};
