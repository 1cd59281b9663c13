use std::sync::Arc;

use tracing::{debug, warn};
use training_core::model::{
    ANSWER_KEY_DELIMITER, PendingQuestion, QUESTION_LABEL, ReplyFormatError, TopicFocus,
    parse_generated_question,
};

use crate::error::ProvisionError;
use crate::generative::GenerativeModel;
use crate::reference::ReferenceDocument;

/// A malformed reply is re-requested once before giving up.
const MAX_ATTEMPTS: usize = 2;

/// Obtains one grounded multiple-choice question per call.
#[derive(Clone)]
pub struct QuestionProvisioner {
    model: Arc<dyn GenerativeModel>,
    reference: Arc<ReferenceDocument>,
}

impl QuestionProvisioner {
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>, reference: Arc<ReferenceDocument>) -> Self {
        Self { model, reference }
    }

    /// Compose the instruction sent to the model for `focus`.
    #[must_use]
    pub fn build_prompt(&self, focus: TopicFocus) -> String {
        let section = focus.module().number();
        format!(
            "Based ONLY on SECTION {section} of this SOP:\n{sop}\n\n{focus}\n\n\
             Write ONE multiple-choice question with four lettered options (A, B, C and D).\n\
             STRICT RULE: exactly ONE option may be factually correct according to the SOP. \
             The other three must be definitively WRONG based on the text, because the trainee \
             answers with a single choice and cannot select several.\n\
             Do not use \"All of the above\", \"Some of the above\" or \"None of the above\" options.\n\
             You MUST include the lettered answer options in the question.\n\
             Output format: {QUESTION_LABEL} [question and options] {ANSWER_KEY_DELIMITER} [single letter]\n\
             End your reply with {ANSWER_KEY_DELIMITER} followed by the correct letter and nothing else.",
            sop = self.reference.text(),
            focus = focus.instruction(),
        )
    }

    /// Ask the model for a question and parse its reply.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::Generation` if the model call fails (not retried) and
    /// `ProvisionError::InvalidQuestion` if both attempts break the reply convention.
    pub async fn provision(&self, focus: TopicFocus) -> Result<PendingQuestion, ProvisionError> {
        let prompt = self.build_prompt(focus);
        let mut last_error = ReplyFormatError::MissingDelimiter;

        for attempt in 1..=MAX_ATTEMPTS {
            let reply = self.model.generate(&prompt).await?;
            match parse_generated_question(&reply) {
                Ok(generated) => {
                    debug!(module = %focus.module(), attempt, "question provisioned");
                    return Ok(PendingQuestion::new(focus, generated));
                }
                Err(err) => {
                    warn!(module = %focus.module(), attempt, error = %err, "malformed question reply");
                    last_error = err;
                }
            }
        }

        Err(ProvisionError::InvalidQuestion(last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerativeError;
    use crate::test_support::{ScriptedModel, reference, reply};
    use training_core::model::{AnswerLetter, TrainingModule};

    fn provisioner(model: Arc<ScriptedModel>) -> QuestionProvisioner {
        QuestionProvisioner::new(model, reference())
    }

    #[test]
    fn prompt_carries_section_focus_sop_and_delimiter() {
        let p = provisioner(ScriptedModel::new([]));
        let focus = TopicFocus::for_attempt(TrainingModule::Crisis, 1);
        let prompt = p.build_prompt(focus);
        assert!(prompt.contains("SECTION 3 of this SOP"));
        assert!(prompt.contains("SOP-CRIS-03: cut away"));
        assert!(prompt.contains(focus.instruction()));
        assert!(prompt.contains("None of the above"));
        assert!(prompt.contains(ANSWER_KEY_DELIMITER));
    }

    #[tokio::test]
    async fn well_formed_reply_becomes_pending_question() {
        let model = ScriptedModel::new([Ok(reply("C"))]);
        let focus = TopicFocus::for_attempt(TrainingModule::PreFlight, 0);
        let question = provisioner(model.clone()).provision(focus).await.unwrap();
        assert_eq!(question.answer_key(), AnswerLetter::C);
        assert_eq!(question.topic_focus(), focus);
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn malformed_reply_is_requested_again_once() {
        let model = ScriptedModel::new([Ok("no delimiter here".into()), Ok(reply("A"))]);
        let focus = TopicFocus::for_attempt(TrainingModule::Jump, 0);
        let question = provisioner(model.clone()).provision(focus).await.unwrap();
        assert_eq!(question.answer_key(), AnswerLetter::A);
        assert_eq!(model.prompts().len(), 2);
    }

    #[tokio::test]
    async fn two_malformed_replies_surface_invalid_question() {
        let model = ScriptedModel::new([
            Ok("no delimiter here".into()),
            Ok(reply("E")),
            Ok(reply("A")),
        ]);
        let focus = TopicFocus::for_attempt(TrainingModule::Jump, 0);
        let err = provisioner(model.clone()).provision(focus).await.unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::InvalidQuestion(ReplyFormatError::InvalidAnswerKey(ref key)) if key == "E"
        ));
        assert!(err.to_string().contains("could not generate a valid question, please retry"));
        assert_eq!(model.prompts().len(), 2);
    }

    #[tokio::test]
    async fn service_failures_are_not_retried() {
        let model = ScriptedModel::new([
            Err(GenerativeError::HttpStatus(reqwest::StatusCode::UNAUTHORIZED)),
            Ok(reply("A")),
        ]);
        let focus = TopicFocus::for_attempt(TrainingModule::PreFlight, 0);
        let err = provisioner(model.clone()).provision(focus).await.unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::Generation(GenerativeError::HttpStatus(_))
        ));
        assert_eq!(model.prompts().len(), 1);
    }
}
