//! Repository for the append-only `status_conflicts` table.

use cablewatch_core::status::StatusVocabulary;
use cablewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::snapshot::{CreateStatusConflict, StatusConflictRow};

const COLUMNS: &str = "id, snapshot_id, code, master_status, operational_status, is_conflict, \
    is_changed, severity, created_at";

pub struct StatusConflictRepo;

impl StatusConflictRepo {
    /// Insert one comparison inside an open ingestion transaction.
    pub async fn insert_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        snapshot_id: DbId,
        input: &CreateStatusConflict,
    ) -> Result<StatusConflictRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO status_conflicts \
                (snapshot_id, code, master_status, operational_status, is_conflict, \
                 is_changed, severity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusConflictRow>(&query)
            .bind(snapshot_id)
            .bind(&input.code)
            .bind(input.master_status.as_str())
            .bind(input.operational_status.as_str())
            .bind(input.is_conflict)
            .bind(input.is_changed)
            .bind(input.severity.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn list_for_snapshot(
        pool: &PgPool,
        snapshot_id: DbId,
    ) -> Result<Vec<StatusConflictRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM status_conflicts WHERE snapshot_id = $1 ORDER BY code, id"
        );
        sqlx::query_as::<_, StatusConflictRow>(&query)
            .bind(snapshot_id)
            .fetch_all(pool)
            .await
    }

    /// Only rows where the master record is terminal and disagrees.
    pub async fn list_open_conflicts(
        pool: &PgPool,
        snapshot_id: DbId,
    ) -> Result<Vec<StatusConflictRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM status_conflicts \
             WHERE snapshot_id = $1 AND is_conflict ORDER BY code, id"
        );
        sqlx::query_as::<_, StatusConflictRow>(&query)
            .bind(snapshot_id)
            .fetch_all(pool)
            .await
    }
}
