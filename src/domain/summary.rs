use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{ConversationId, SummaryId};

/// A clinical summary snapshot of the conversation-to-date. Summaries are
/// append-only; repeated summarize calls accumulate rows.
#[derive(Debug, Clone)]
pub struct Summary {
    pub id: SummaryId,
    pub conversation_id: ConversationId,
    pub summary_text: String,
    pub symptoms: Vec<String>,
    pub diagnoses: Vec<String>,
    pub medications: Vec<String>,
    pub follow_up: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        conversation_id: ConversationId,
        summary_text: String,
        symptoms: Vec<String>,
        diagnoses: Vec<String>,
        medications: Vec<String>,
        follow_up: Vec<String>,
    ) -> Self {
        Self {
            id: SummaryId::new(),
            conversation_id,
            summary_text,
            symptoms,
            diagnoses,
            medications,
            follow_up,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryStyle {
    #[default]
    Concise,
    Clinical,
}

impl SummaryStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStyle::Concise => "concise",
            SummaryStyle::Clinical => "clinical",
        }
    }
}

impl FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concise" => Ok(SummaryStyle::Concise),
            "clinical" => Ok(SummaryStyle::Clinical),
            _ => Err(format!("Invalid summary style: {}", s)),
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
