use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storage::repository::{StorageError, TraineeRepository};
use training_core::model::Trainee;

use crate::error::GenerativeError;
use crate::generative::GenerativeModel;
use crate::reference::ReferenceDocument;

pub(crate) const SOP: &str = "SECTION 1\nSOP-ENV-01: no jumps near cumulo-nimbus.\n\
SECTION 2\nSOP-NAV-01: flare at 10 feet.\n\
SECTION 3\nSOP-CRIS-03: cut away below 2,500 feet is forbidden.";

pub(crate) fn reference() -> Arc<ReferenceDocument> {
    Arc::new(ReferenceDocument::from_text("sop.txt", SOP).unwrap())
}

pub(crate) fn reply(key: &str) -> String {
    format!("QUESTION: Which is correct?\nA) one\nB) two\nC) three\nD) four\nANSWER_KEY: {key}")
}

/// Replays canned replies and records every prompt it receives.
#[derive(Default)]
pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, GenerativeError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub(crate) fn new(replies: impl IntoIterator<Item = Result<String, GenerativeError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerativeError::EmptyResponse))
    }
}

/// Trainee store whose backing database is unreachable.
pub(crate) struct OfflineTrainees;

#[async_trait]
impl TraineeRepository for OfflineTrainees {
    async fn upsert_trainee(&self, _trainee: &Trainee) -> Result<(), StorageError> {
        Err(StorageError::Connection("database is offline".into()))
    }

    async fn get_trainee(&self, _email: &str) -> Result<Trainee, StorageError> {
        Err(StorageError::Connection("database is offline".into()))
    }
}
