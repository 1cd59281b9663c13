//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use training_core::model::{ReplyFormatError, TraineeError};
use training_core::quiz::QuizError;

/// Errors emitted by a `GenerativeModel`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerativeError {
    #[error("generative model is not configured")]
    Disabled,
    #[error("generative model returned an empty response")]
    EmptyResponse,
    #[error("generative model request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("generative model returned an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while loading the reference document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReferenceError {
    #[error("reference document {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reference document {path} is empty")]
    Empty { path: PathBuf },
}

/// Errors emitted by `QuestionProvisioner`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProvisionError {
    #[error("could not generate a valid question, please retry ({0})")]
    InvalidQuestion(ReplyFormatError),
    #[error(transparent)]
    Generation(#[from] GenerativeError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

/// Errors emitted by `RegistrationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error(transparent)]
    Trainee(#[from] TraineeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AssistantService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssistantError {
    #[error("the Live Jump Mentor unlocks after all three sections are mastered")]
    Locked,
    #[error("please enter a question")]
    EmptyQuestion,
    #[error(transparent)]
    Generation(#[from] GenerativeError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}
