mod conversation;
mod conversation_id;
mod language;
mod message;
mod message_id;
mod message_role;
mod modality;
mod summary;
mod summary_id;

pub use conversation::Conversation;
pub use conversation_id::ConversationId;
pub use language::Language;
pub use message::Message;
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use modality::Modality;
pub use summary::{Summary, SummaryStyle};
pub use summary_id::SummaryId;
