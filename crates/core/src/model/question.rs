use thiserror::Error;

use super::{AnswerLetter, TopicFocus, TrainingModule};

/// Token the model must emit right before the correct letter.
pub const ANSWER_KEY_DELIMITER: &str = "ANSWER_KEY:";

/// Optional label the model puts in front of the question body.
pub const QUESTION_LABEL: &str = "QUESTION:";

/// Ways a generated reply can break the `QUESTION: ... ANSWER_KEY: X` convention.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplyFormatError {
    #[error("reply does not contain the ANSWER_KEY: delimiter")]
    MissingDelimiter,
    #[error("reply contains the ANSWER_KEY: delimiter {0} times")]
    RepeatedDelimiter(usize),
    #[error("reply has no question text before the answer key")]
    EmptyQuestion,
    #[error("answer key must be exactly one of A, B, C or D, got {0:?}")]
    InvalidAnswerKey(String),
}

/// A question body and key as parsed from a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestion {
    pub question_text: String,
    pub answer_key: AnswerLetter,
}

/// Split a raw reply into question text and answer key.
///
/// The delimiter must appear exactly once and the trimmed trailing segment must be a
/// bare `A`, `B`, `C` or `D`.
///
/// # Errors
///
/// Returns `ReplyFormatError` describing the first convention the reply violates.
pub fn parse_generated_question(reply: &str) -> Result<GeneratedQuestion, ReplyFormatError> {
    let (body, key) = match reply.matches(ANSWER_KEY_DELIMITER).count() {
        0 => return Err(ReplyFormatError::MissingDelimiter),
        1 => reply
            .split_once(ANSWER_KEY_DELIMITER)
            .ok_or(ReplyFormatError::MissingDelimiter)?,
        n => return Err(ReplyFormatError::RepeatedDelimiter(n)),
    };

    let key = key.trim();
    let answer_key = key
        .parse::<AnswerLetter>()
        .map_err(|_| ReplyFormatError::InvalidAnswerKey(key.to_string()))?;

    let body = body.trim();
    let body = body.strip_prefix(QUESTION_LABEL).unwrap_or(body).trim();
    if body.is_empty() {
        return Err(ReplyFormatError::EmptyQuestion);
    }

    Ok(GeneratedQuestion {
        question_text: body.to_string(),
        answer_key,
    })
}

/// The question currently shown to the trainee, with its hidden key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    module: TrainingModule,
    topic_focus: TopicFocus,
    question_text: String,
    answer_key: AnswerLetter,
}

impl PendingQuestion {
    #[must_use]
    pub fn new(topic_focus: TopicFocus, generated: GeneratedQuestion) -> Self {
        Self {
            module: topic_focus.module(),
            topic_focus,
            question_text: generated.question_text,
            answer_key: generated.answer_key,
        }
    }

    #[must_use]
    pub fn module(&self) -> TrainingModule {
        self.module
    }

    #[must_use]
    pub fn topic_focus(&self) -> TopicFocus {
        self.topic_focus
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn answer_key(&self) -> AnswerLetter {
        self.answer_key
    }

    #[must_use]
    pub fn is_correct(&self, submitted: AnswerLetter) -> bool {
        submitted == self.answer_key
    }
}
