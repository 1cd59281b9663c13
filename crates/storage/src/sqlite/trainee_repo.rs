use training_core::model::Trainee;

use super::SqliteRepository;
use super::mapping::{map_trainee_row, stage_to_i64};
use crate::repository::{StorageError, TraineeRepository};

#[async_trait::async_trait]
impl TraineeRepository for SqliteRepository {
    async fn upsert_trainee(&self, trainee: &Trainee) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO trainees (email, full_name, current_stage, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(email) DO UPDATE SET
                full_name = excluded.full_name,
                current_stage = excluded.current_stage,
                updated_at = excluded.updated_at
            ",
        )
        .bind(trainee.email())
        .bind(trainee.full_name())
        .bind(stage_to_i64(trainee.current_stage()))
        .bind(trainee.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_trainee(&self, email: &str) -> Result<Trainee, StorageError> {
        let row = sqlx::query(
            r"
            SELECT email, full_name, current_stage, updated_at
            FROM trainees
            WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Err(StorageError::NotFound);
        };
        map_trainee_row(&row)
    }
}
