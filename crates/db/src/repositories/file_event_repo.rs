//! Repository for the `file_events` mirror table.

use cablewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::file_event::FileEvent;

const COLUMNS: &str = "id, file_id, submission_id, event_type, payload, created_at";

/// Writes events against durable archive files.
pub struct FileEventRepo;

impl FileEventRepo {
    /// Insert one event, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        file_id: DbId,
        submission_id: DbId,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<FileEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO file_events (file_id, submission_id, event_type, payload) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileEvent>(&query)
            .bind(file_id)
            .bind(submission_id)
            .bind(event_type)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Events for one file, oldest first.
    pub async fn list_for_file(
        pool: &PgPool,
        file_id: DbId,
    ) -> Result<Vec<FileEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM file_events WHERE file_id = $1 ORDER BY id");
        sqlx::query_as::<_, FileEvent>(&query)
            .bind(file_id)
            .fetch_all(pool)
            .await
    }
}
