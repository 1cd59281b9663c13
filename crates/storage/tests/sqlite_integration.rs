use chrono::Duration;
use storage::repository::{Storage, StorageError, TraineeRepository};
use storage::sqlite::SqliteRepository;
use training_core::model::{TraineeDraft, TrainingStage};
use training_core::time::fixed_now;

#[tokio::test]
async fn sqlite_upsert_inserts_then_updates_by_email() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_trainee_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut trainee = TraineeDraft::new("Ada Lovelace", "ada@example.com")
        .validate(fixed_now())
        .unwrap();
    repo.upsert_trainee(&trainee).await.unwrap();

    let fetched = repo.get_trainee("ada@example.com").await.expect("fetch");
    assert_eq!(fetched, trainee);
    assert_eq!(fetched.current_stage(), TrainingStage::FIRST);

    let later = fixed_now() + Duration::minutes(5);
    trainee.set_stage(TrainingStage::from_persisted(3).unwrap(), later);
    repo.upsert_trainee(&trainee).await.unwrap();

    let fetched = repo.get_trainee("ada@example.com").await.expect("fetch");
    assert_eq!(fetched.current_stage().value(), 3);
    assert_eq!(fetched.updated_at(), later);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trainees")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn sqlite_missing_trainee_is_not_found() {
    let storage = Storage::sqlite("sqlite:file:memdb_trainee_missing?mode=memory&cache=shared")
        .await
        .expect("storage");
    let err = storage.trainees.get_trainee("ghost@example.com").await;
    assert!(matches!(err, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_trainee_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(versions, 1);
}
