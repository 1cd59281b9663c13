use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use storage::repository::Storage;

use crate::Clock;
use crate::assistant::AssistantService;
use crate::error::AppServicesError;
use crate::generative::GenerativeModel;
use crate::provisioner::QuestionProvisioner;
use crate::quiz_service::QuizService;
use crate::reference::ReferenceDocument;
use crate::registration::RegistrationService;

/// Assembles app-facing services around one reference document and model.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
    registration: Arc<RegistrationService>,
    assistant: Arc<AssistantService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, loading the SOP from `reference_path`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the SOP cannot be loaded or storage
    /// initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        reference_path: &Path,
        model: Arc<dyn GenerativeModel>,
        clock: Clock,
        advance_delay: Duration,
    ) -> Result<Self, AppServicesError> {
        let reference = ReferenceDocument::load(reference_path).await?;
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(storage, reference, model, clock, advance_delay))
    }

    #[must_use]
    pub fn new(
        storage: Storage,
        reference: ReferenceDocument,
        model: Arc<dyn GenerativeModel>,
        clock: Clock,
        advance_delay: Duration,
    ) -> Self {
        let reference = Arc::new(reference);
        let provisioner = Arc::new(QuestionProvisioner::new(
            Arc::clone(&model),
            Arc::clone(&reference),
        ));
        let quiz = Arc::new(
            QuizService::new(clock, provisioner, Arc::clone(&storage.trainees))
                .with_advance_delay(advance_delay),
        );
        let registration = Arc::new(RegistrationService::new(
            clock,
            Arc::clone(&storage.trainees),
        ));
        let assistant = Arc::new(AssistantService::new(
            clock,
            model,
            Arc::clone(&reference),
        ));

        Self {
            quiz,
            registration,
            assistant,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn registration(&self) -> Arc<RegistrationService> {
        Arc::clone(&self.registration)
    }

    #[must_use]
    pub fn assistant(&self) -> Arc<AssistantService> {
        Arc::clone(&self.assistant)
    }
}
