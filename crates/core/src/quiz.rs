//! Module-gating state machine.
//!
//! A `QuizSession` owns the mastery counters, the training stage and the cached
//! question for one trainee. It is driven only by named events (`start`,
//! `attach_question`, `submit`, `reset`) and never performs IO itself; fetching a
//! question from the generative model is the caller's job whenever
//! [`QuizSession::needs_question`] is true.

use thiserror::Error;

use crate::model::{
    AnswerLetter, ModuleProgress, PendingQuestion, TopicFocus, TrainingModule, TrainingStage,
};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("{module} is locked until the previous section is mastered")]
    ModuleLocked { module: TrainingModule },

    #[error("{module} is already complete")]
    ModuleCompleted { module: TrainingModule },

    #[error("no quiz is in progress")]
    NotStarted,

    #[error("a question is not being awaited")]
    NotAwaitingQuestion,

    #[error("question belongs to {got}, but the active quiz is {expected}")]
    ModuleMismatch {
        expected: TrainingModule,
        got: TrainingModule,
    },

    #[error("no question is waiting for an answer")]
    NotAwaitingAnswer,

    #[error("please select an answer before submitting")]
    NoSelection,
}

//
// ─── PHASE & OUTCOME ──────────────────────────────────────────────────────────
//

/// Where the active quiz stands.
///
/// Grading happens inside [`QuizSession::submit`]; the session leaves that step in
/// `AwaitingQuestion` (keep going in the same module) or `Idle` (module mastered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    #[default]
    Idle,
    AwaitingQuestion,
    AwaitingAnswer,
}

/// Result of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOutcome {
    pub module: TrainingModule,
    pub submitted: AnswerLetter,
    pub answer_key: AnswerLetter,
    pub correct: bool,
    /// Counter for `module` after the transition (0 after a reset or a mastery).
    pub consecutive_correct: u32,
    pub module_completed: bool,
    pub stage: TrainingStage,
    pub next_module: Option<TrainingModule>,
    pub notice: &'static str,
}

impl GradeOutcome {
    /// True when this answer completed the final module.
    #[must_use]
    pub fn graduated(&self) -> bool {
        self.module_completed && self.stage.is_graduated()
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    stage: TrainingStage,
    progress: [ModuleProgress; 3],
    active_module: Option<TrainingModule>,
    phase: QuizPhase,
    pending: Option<PendingQuestion>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// Fresh session: stage 1, every counter at zero, nothing cached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: TrainingStage::FIRST,
            progress: TrainingModule::ALL.map(ModuleProgress::new),
            active_module: None,
            phase: QuizPhase::Idle,
            pending: None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> TrainingStage {
        self.stage
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn active_module(&self) -> Option<TrainingModule> {
        self.active_module
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingQuestion> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn progress(&self, module: TrainingModule) -> &ModuleProgress {
        &self.progress[module.index()]
    }

    #[must_use]
    pub fn is_quiz_active(&self) -> bool {
        self.phase != QuizPhase::Idle
    }

    #[must_use]
    pub fn assistant_unlocked(&self) -> bool {
        self.stage.is_graduated()
    }

    /// True when the active quiz has no cached question and one must be provisioned.
    #[must_use]
    pub fn needs_question(&self) -> bool {
        self.phase == QuizPhase::AwaitingQuestion && self.pending.is_none()
    }

    /// Sub-topic for the next question of the active module.
    #[must_use]
    pub fn topic_focus(&self) -> Option<TopicFocus> {
        self.active_module.map(|module| {
            TopicFocus::for_attempt(module, self.progress(module).consecutive_correct())
        })
    }

    /// Start or continue the quiz for `module`.
    ///
    /// A question already cached for the same module is kept. Switching modules
    /// discards any cached question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::ModuleLocked` if the stage has not reached `module`, and
    /// `QuizError::ModuleCompleted` if the stage has already passed it.
    pub fn start(&mut self, module: TrainingModule) -> Result<QuizPhase, QuizError> {
        if !self.stage.is_unlocked(module) {
            return Err(QuizError::ModuleLocked { module });
        }
        if self.stage.is_completed(module) {
            return Err(QuizError::ModuleCompleted { module });
        }

        if self.active_module != Some(module) {
            self.pending = None;
        }
        self.active_module = Some(module);
        self.phase = if self.pending.is_some() {
            QuizPhase::AwaitingAnswer
        } else {
            QuizPhase::AwaitingQuestion
        };
        Ok(self.phase)
    }

    /// Cache a freshly provisioned question for the active module.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAwaitingQuestion` unless the session is waiting for a
    /// question, and `QuizError::ModuleMismatch` if the question targets another module.
    pub fn attach_question(
        &mut self,
        question: PendingQuestion,
    ) -> Result<&PendingQuestion, QuizError> {
        if !self.needs_question() {
            return Err(QuizError::NotAwaitingQuestion);
        }
        let expected = self.active_module.ok_or(QuizError::NotStarted)?;
        if question.module() != expected {
            return Err(QuizError::ModuleMismatch {
                expected,
                got: question.module(),
            });
        }

        self.phase = QuizPhase::AwaitingAnswer;
        Ok(&*self.pending.insert(question))
    }

    /// Grade a submission against the cached key.
    ///
    /// The cached question is always cleared. A correct answer that reaches the
    /// mastery threshold advances the stage by one and zeroes the module counter;
    /// any incorrect answer zeroes the counter.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` when `choice` is `None` and
    /// `QuizError::NotAwaitingAnswer` when no question is pending. Neither mutates
    /// the session.
    pub fn submit(&mut self, choice: Option<AnswerLetter>) -> Result<GradeOutcome, QuizError> {
        if self.phase != QuizPhase::AwaitingAnswer || self.pending.is_none() {
            return Err(QuizError::NotAwaitingAnswer);
        }
        let submitted = choice.ok_or(QuizError::NoSelection)?;
        let question = self.pending.take().ok_or(QuizError::NotAwaitingAnswer)?;

        let module = question.module();
        let answer_key = question.answer_key();
        let correct = question.is_correct(submitted);
        let progress = &mut self.progress[module.index()];

        let mut module_completed = false;
        let notice = if correct {
            if progress.record_correct() {
                progress.reset();
                module_completed = true;
                module.mastery_notice()
            } else {
                module.keep_going_notice()
            }
        } else {
            progress.reset();
            module.incorrect_notice()
        };
        let consecutive_correct = progress.consecutive_correct();

        if module_completed {
            self.stage = self.stage.advanced();
            self.active_module = module.next();
            self.phase = QuizPhase::Idle;
        } else {
            self.phase = QuizPhase::AwaitingQuestion;
        }

        Ok(GradeOutcome {
            module,
            submitted,
            answer_key,
            correct,
            consecutive_correct,
            module_completed,
            stage: self.stage,
            next_module: if module_completed { module.next() } else { None },
            notice,
        })
    }

    /// Return to a brand-new session state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
