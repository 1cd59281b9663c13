use std::sync::Arc;
use std::time::Duration;

use storage::repository::TraineeRepository;
use tracing::{info, warn};
use training_core::Clock;
use training_core::model::{AnswerLetter, Certificate, PendingQuestion, TrainingModule};
use training_core::quiz::{GradeOutcome, QuizError};

use crate::error::QuizServiceError;
use crate::provisioner::QuestionProvisioner;
use crate::session::TrainingSession;

/// Pause after a module-completing answer so the success notice can be read.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_secs(3);

/// Drives the quiz state machine and talks to the provisioner and trainee store.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    provisioner: Arc<QuestionProvisioner>,
    trainees: Arc<dyn TraineeRepository>,
    advance_delay: Duration,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        provisioner: Arc<QuestionProvisioner>,
        trainees: Arc<dyn TraineeRepository>,
    ) -> Self {
        Self {
            clock,
            provisioner,
            trainees,
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }

    #[must_use]
    pub fn with_advance_delay(mut self, advance_delay: Duration) -> Self {
        self.advance_delay = advance_delay;
        self
    }

    /// Start or continue the quiz for `module` and return the question to show.
    ///
    /// A question already cached for the module is returned as-is; otherwise a new
    /// one is provisioned.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` if the module is locked or complete, and
    /// `QuizServiceError::Provision` if no valid question could be generated. In the
    /// latter case the session stays in place and the call can simply be repeated.
    pub async fn start(
        &self,
        session: &mut TrainingSession,
        module: TrainingModule,
    ) -> Result<PendingQuestion, QuizServiceError> {
        session.quiz_mut().start(module)?;
        self.current_question(session).await
    }

    /// Return the cached question, provisioning one first if needed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` when no quiz is running, or a provisioning error.
    pub async fn current_question(
        &self,
        session: &mut TrainingSession,
    ) -> Result<PendingQuestion, QuizServiceError> {
        if let Some(pending) = session.quiz().pending() {
            return Ok(pending.clone());
        }
        if !session.quiz().needs_question() {
            return Err(QuizError::NotStarted.into());
        }
        let focus = session.quiz().topic_focus().ok_or(QuizError::NotStarted)?;

        let question = self.provisioner.provision(focus).await?;
        Ok(session.quiz_mut().attach_question(question)?.clone())
    }

    /// Grade the trainee's choice for the pending question.
    ///
    /// On mastery the new stage is written to the trainee store (if registered), a
    /// certificate is issued after the final module, and the call waits for the
    /// configured advance delay before returning.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` for `None` and `QuizError::NotAwaitingAnswer`
    /// when nothing is pending. Neither changes the session.
    pub async fn submit(
        &self,
        session: &mut TrainingSession,
        choice: Option<AnswerLetter>,
    ) -> Result<GradeOutcome, QuizServiceError> {
        let outcome = session.quiz_mut().submit(choice)?;
        info!(
            module = %outcome.module,
            correct = outcome.correct,
            consecutive_correct = outcome.consecutive_correct,
            stage = outcome.stage.value(),
            "answer graded"
        );

        if outcome.module_completed {
            if outcome.graduated() {
                session.set_certificate(Certificate::issue(self.clock.year(), self.clock.now()));
            }
            self.sync_stage(session).await;
            if !self.advance_delay.is_zero() {
                tokio::time::sleep(self.advance_delay).await;
            }
        }

        Ok(outcome)
    }

    /// Wipe all progress and the cached question, then record stage 1 for the trainee.
    pub async fn reset(&self, session: &mut TrainingSession) {
        session.reset();
        info!("training progress reset");
        self.sync_stage(session).await;
    }

    async fn sync_stage(&self, session: &mut TrainingSession) {
        let stage = session.quiz().stage();
        let now = self.clock.now();
        let Some(trainee) = session.trainee_mut() else {
            return;
        };
        trainee.set_stage(stage, now);
        if let Err(err) = self.trainees.upsert_trainee(trainee).await {
            warn!(email = trainee.email(), error = %err, "failed to record training stage");
        }
    }
}
