use chrono::{DateTime, Utc};

/// One question/answer exchange with the assistant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}
