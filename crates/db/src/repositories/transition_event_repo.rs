//! Repository for the append-only `transition_events` table.

use cablewatch_core::snapshot::TransitionDraft;
use cablewatch_core::status::StatusVocabulary;
use cablewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::snapshot::TransitionEvent;

const COLUMNS: &str =
    "id, snapshot_id, code, old_status, new_status, change_type, severity, created_at";

pub struct TransitionEventRepo;

impl TransitionEventRepo {
    /// Insert one event inside an open ingestion transaction.
    pub async fn insert_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        snapshot_id: DbId,
        draft: &TransitionDraft,
    ) -> Result<TransitionEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO transition_events \
                (snapshot_id, code, old_status, new_status, change_type, severity) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TransitionEvent>(&query)
            .bind(snapshot_id)
            .bind(&draft.code)
            .bind(draft.old_status.map(|s| s.as_str()))
            .bind(draft.new_status.map(|s| s.as_str()))
            .bind(draft.change_type.as_str())
            .bind(draft.severity.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Events of one snapshot, ordered by code.
    pub async fn list_for_snapshot(
        pool: &PgPool,
        snapshot_id: DbId,
    ) -> Result<Vec<TransitionEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transition_events WHERE snapshot_id = $1 ORDER BY code, id"
        );
        sqlx::query_as::<_, TransitionEvent>(&query)
            .bind(snapshot_id)
            .fetch_all(pool)
            .await
    }
}
