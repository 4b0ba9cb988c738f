use chrono::{DateTime, Utc};

use super::{ConversationId, Language};

#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: Option<String>,
    pub doctor_language: Language,
    pub patient_language: Language,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(
        title: Option<String>,
        doctor_language: Language,
        patient_language: Language,
    ) -> Self {
        Self {
            id: ConversationId::new(),
            title,
            doctor_language,
            patient_language,
            created_at: Utc::now(),
        }
    }
}
