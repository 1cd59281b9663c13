use std::sync::Arc;

use tracing::debug;
use training_core::Clock;
use training_core::model::AssistantTurn;

use crate::error::AssistantError;
use crate::generative::GenerativeModel;
use crate::reference::ReferenceDocument;
use crate::session::TrainingSession;

/// Phrase the model is told to use when the SOP does not cover a question.
pub const DECLINE_REPLY: &str = "I can't find that in the SkyHigh SOP, so I can't answer it.";

/// The Live Jump Mentor: free-form Q&A grounded in the SOP.
#[derive(Clone)]
pub struct AssistantService {
    clock: Clock,
    model: Arc<dyn GenerativeModel>,
    reference: Arc<ReferenceDocument>,
}

impl AssistantService {
    #[must_use]
    pub fn new(
        clock: Clock,
        model: Arc<dyn GenerativeModel>,
        reference: Arc<ReferenceDocument>,
    ) -> Self {
        Self {
            clock,
            model,
            reference,
        }
    }

    #[must_use]
    pub fn build_prompt(&self, question: &str) -> String {
        format!(
            "You are the SkyHigh Live Jump Mentor. Answer the trainee's question using ONLY \
             the SOP below. Do not add facts that are not in it. If the SOP does not contain \
             the answer, reply exactly: \"{DECLINE_REPLY}\"\n\n\
             SOP Context:\n{sop}\n\nUser Question: {question}",
            sop = self.reference.text(),
        )
    }

    /// Answer a question for a graduated trainee and append it to the transcript.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::Locked` before graduation, `AssistantError::EmptyQuestion`
    /// for blank input, or `AssistantError::Generation` if the model call fails.
    pub async fn ask(
        &self,
        session: &mut TrainingSession,
        question: &str,
    ) -> Result<AssistantTurn, AssistantError> {
        if !session.quiz().assistant_unlocked() {
            return Err(AssistantError::Locked);
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }

        let answer = self.model.generate(&self.build_prompt(question)).await?;
        debug!(chars = answer.len(), "assistant answered");

        let turn = AssistantTurn {
            question: question.to_string(),
            answer,
            asked_at: self.clock.now(),
        };
        session.push_turn(turn.clone());
        Ok(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SOP, ScriptedModel, reference};
    use training_core::time::{fixed_clock, fixed_now};

    fn assistant(model: Arc<ScriptedModel>) -> AssistantService {
        AssistantService::new(fixed_clock(), model, reference())
    }

    #[tokio::test]
    async fn locked_before_graduation() {
        let model = ScriptedModel::new([Ok("answer".into())]);
        let mut session = TrainingSession::new();
        let err = assistant(model.clone())
            .ask(&mut session, "When do I flare?")
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::Locked));
        assert!(model.prompts().is_empty());
    }

    #[test]
    fn prompt_grounds_question_in_sop() {
        let prompt = assistant(ScriptedModel::new([])).build_prompt("When do I flare?");
        assert!(prompt.contains(SOP));
        assert!(prompt.contains("User Question: When do I flare?"));
        assert!(prompt.contains(DECLINE_REPLY));
    }

    #[tokio::test]
    async fn graduated_trainee_gets_answers_recorded() {
        let model = ScriptedModel::new([Ok("Flare at 10 feet.".into())]);
        let mut session = TrainingSession::new();
        graduate(&mut session);

        let service = assistant(model);
        assert!(matches!(
            service.ask(&mut session, "   ").await,
            Err(AssistantError::EmptyQuestion)
        ));

        let turn = service.ask(&mut session, " When do I flare? ").await.unwrap();
        assert_eq!(turn.question, "When do I flare?");
        assert_eq!(turn.answer, "Flare at 10 feet.");
        assert_eq!(turn.asked_at, fixed_now());
        assert_eq!(session.transcript(), &[turn]);
    }

    fn graduate(session: &mut TrainingSession) {
        use training_core::model::{AnswerLetter, GeneratedQuestion, PendingQuestion, TrainingModule};

        for module in TrainingModule::ALL {
            session.quiz_mut().start(module).unwrap();
            for _ in 0..2 {
                let focus = session.quiz().topic_focus().unwrap();
                let question = PendingQuestion::new(
                    focus,
                    GeneratedQuestion {
                        question_text: "q".into(),
                        answer_key: AnswerLetter::A,
                    },
                );
                session.quiz_mut().attach_question(question).unwrap();
                session.quiz_mut().submit(Some(AnswerLetter::A)).unwrap();
            }
        }
        assert!(session.quiz().assistant_unlocked());
    }
}
