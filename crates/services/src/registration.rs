use std::sync::Arc;

use storage::repository::TraineeRepository;
use tracing::info;
use training_core::Clock;
use training_core::model::{Trainee, TraineeDraft};

use crate::error::RegistrationError;
use crate::session::TrainingSession;

/// Start-screen lead capture.
#[derive(Clone)]
pub struct RegistrationService {
    clock: Clock,
    trainees: Arc<dyn TraineeRepository>,
}

impl RegistrationService {
    #[must_use]
    pub fn new(clock: Clock, trainees: Arc<dyn TraineeRepository>) -> Self {
        Self { clock, trainees }
    }

    /// Validate name and email, upsert the trainee with the session's current
    /// stage, and attach it to the session.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::Trainee` for blank or malformed input (nothing is
    /// written) and `RegistrationError::Storage` if the upsert fails.
    pub async fn begin_training(
        &self,
        session: &mut TrainingSession,
        full_name: &str,
        email: &str,
    ) -> Result<Trainee, RegistrationError> {
        let now = self.clock.now();
        let mut trainee = TraineeDraft::new(full_name, email).validate(now)?;
        trainee.set_stage(session.quiz().stage(), now);

        self.trainees.upsert_trainee(&trainee).await?;
        info!(email = trainee.email(), "trainee registered");

        session.set_trainee(trainee.clone());
        Ok(trainee)
    }
}
