#![forbid(unsafe_code)]

pub mod app_services;
pub mod assistant;
pub mod error;
pub mod generative;
pub mod provisioner;
pub mod quiz_service;
pub mod reference;
pub mod registration;
pub mod session;

#[cfg(test)]
mod test_support;

pub use training_core::Clock;

pub use app_services::AppServices;
pub use assistant::{AssistantService, DECLINE_REPLY};
pub use error::{
    AppServicesError, AssistantError, GenerativeError, ProvisionError, QuizServiceError,
    ReferenceError, RegistrationError,
};
pub use generative::{ChatCompletionsClient, GenerativeModel};
pub use provisioner::QuestionProvisioner;
pub use quiz_service::{DEFAULT_ADVANCE_DELAY, QuizService};
pub use reference::ReferenceDocument;
pub use registration::RegistrationService;
pub use session::TrainingSession;
