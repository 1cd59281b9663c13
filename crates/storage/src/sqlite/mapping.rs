use chrono::{DateTime, Utc};
use sqlx::Row;
use training_core::model::{Trainee, TrainingStage};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn stage_to_i64(stage: TrainingStage) -> i64 {
    i64::from(stage.value())
}

pub(crate) fn map_trainee_row(row: &sqlx::sqlite::SqliteRow) -> Result<Trainee, StorageError> {
    let full_name: String = row.try_get("full_name").map_err(ser)?;
    let email: String = row.try_get("email").map_err(ser)?;
    let stage: i64 = row.try_get("current_stage").map_err(ser)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(ser)?;

    let stage = TrainingStage::from_persisted(stage).map_err(ser)?;
    Trainee::from_persisted(full_name, email, stage, updated_at).map_err(ser)
}
