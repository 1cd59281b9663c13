use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use training_core::model::Trainee;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for start-screen registrations.
#[async_trait]
pub trait TraineeRepository: Send + Sync {
    /// Insert a trainee or update the existing row with the same email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the trainee cannot be stored.
    async fn upsert_trainee(&self, trainee: &Trainee) -> Result<(), StorageError>;

    /// Fetch a trainee by (normalized) email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_trainee(&self, email: &str) -> Result<Trainee, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    trainees: Arc<Mutex<HashMap<String, Trainee>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored trainees.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self
            .trainees
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }
}

#[async_trait]
impl TraineeRepository for InMemoryRepository {
    async fn upsert_trainee(&self, trainee: &Trainee) -> Result<(), StorageError> {
        let mut guard = self
            .trainees
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(trainee.email().to_string(), trainee.clone());
        Ok(())
    }

    async fn get_trainee(&self, email: &str) -> Result<Trainee, StorageError> {
        let guard = self
            .trainees
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(email).cloned().ok_or(StorageError::NotFound)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub trainees: Arc<dyn TraineeRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let trainees: Arc<dyn TraineeRepository> = Arc::new(InMemoryRepository::new());
        Self { trainees }
    }
}
