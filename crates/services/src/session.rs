use training_core::model::{AssistantTurn, Certificate, Trainee};
use training_core::quiz::QuizSession;

/// Everything one trainee's visit carries between actions.
///
/// Passed by `&mut` into every service call; nothing is stored globally.
#[derive(Debug, Clone, Default)]
pub struct TrainingSession {
    quiz: QuizSession,
    trainee: Option<Trainee>,
    certificate: Option<Certificate>,
    transcript: Vec<AssistantTurn>,
}

impl TrainingSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    #[must_use]
    pub fn trainee(&self) -> Option<&Trainee> {
        self.trainee.as_ref()
    }

    #[must_use]
    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificate.as_ref()
    }

    #[must_use]
    pub fn transcript(&self) -> &[AssistantTurn] {
        &self.transcript
    }

    pub(crate) fn quiz_mut(&mut self) -> &mut QuizSession {
        &mut self.quiz
    }

    pub(crate) fn trainee_mut(&mut self) -> Option<&mut Trainee> {
        self.trainee.as_mut()
    }

    pub(crate) fn set_trainee(&mut self, trainee: Trainee) {
        self.trainee = Some(trainee);
    }

    pub(crate) fn set_certificate(&mut self, certificate: Certificate) {
        self.certificate = Some(certificate);
    }

    pub(crate) fn push_turn(&mut self, turn: AssistantTurn) {
        self.transcript.push(turn);
    }

    /// Clear progress, the cached question, the certificate and the transcript.
    /// The registered trainee is kept.
    pub(crate) fn reset(&mut self) {
        self.quiz.reset();
        self.certificate = None;
        self.transcript.clear();
    }
}
