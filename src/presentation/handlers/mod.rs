mod audio;
mod conversations;
mod health;
mod messages;
mod responses;
mod search;
mod summary;

pub use audio::presign_audio_handler;
pub use conversations::{
    create_conversation_handler, get_conversation_handler, list_messages_handler,
};
pub use health::health_handler;
pub use messages::{finalize_audio_handler, ingest_text_handler};
pub use search::search_handler;
pub use summary::summarize_handler;
