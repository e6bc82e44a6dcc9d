//! Repository for the append-only `snapshots` and `snapshot_records` tables.

use cablewatch_core::snapshot::CableRecord;
use cablewatch_core::status::StatusVocabulary;
use cablewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::snapshot::{
    CreateSnapshot, IngestPlan, IngestedSnapshot, Snapshot, SnapshotRecord,
};
use crate::repositories::{StatusConflictRepo, TransitionEventRepo};

/// Column list for `snapshots` queries.
const COLUMNS: &str = "id, worksite_id, version, source_label, record_count, created_at";

/// Column list for `snapshot_records` queries.
const RECORD_COLUMNS: &str = "id, snapshot_id, code, status, master_status, flagged_by_source, \
    section, cable_type, planned_length, laid_length";

/// Versioned snapshots. A worksite's active snapshot is its highest version;
/// older versions stay untouched.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Insert the next snapshot version for a worksite.
    ///
    /// Runs in one transaction holding a per-worksite advisory lock, so
    /// concurrent ingestions are serialized and versions stay gap-free.
    /// `plan` receives the previous active records (empty for the first
    /// version) and the incoming ones; the events and conflicts it returns
    /// are written in the same transaction.
    pub async fn ingest<F>(
        pool: &PgPool,
        input: &CreateSnapshot,
        plan: F,
    ) -> Result<IngestedSnapshot, sqlx::Error>
    where
        F: FnOnce(&[CableRecord], &[CableRecord]) -> IngestPlan,
    {
        let count = record_count(input.records.len())?;
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(input.worksite_id)
            .execute(&mut *tx)
            .await?;

        let active_query = format!(
            "SELECT {COLUMNS} FROM snapshots \
             WHERE worksite_id = $1 ORDER BY version DESC LIMIT 1"
        );
        let previous = sqlx::query_as::<_, Snapshot>(&active_query)
            .bind(input.worksite_id)
            .fetch_optional(&mut *tx)
            .await?;

        let previous_records: Vec<CableRecord> = match &previous {
            Some(snapshot) => {
                let query = format!(
                    "SELECT {RECORD_COLUMNS} FROM snapshot_records \
                     WHERE snapshot_id = $1 ORDER BY code"
                );
                sqlx::query_as::<_, SnapshotRecord>(&query)
                    .bind(snapshot.id)
                    .fetch_all(&mut *tx)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect()
            }
            None => Vec::new(),
        };

        let version = previous.as_ref().map_or(1, |s| s.version + 1);
        let insert_query = format!(
            "INSERT INTO snapshots (worksite_id, version, source_label, record_count) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let snapshot = sqlx::query_as::<_, Snapshot>(&insert_query)
            .bind(input.worksite_id)
            .bind(version)
            .bind(&input.source_label)
            .bind(count)
            .fetch_one(&mut *tx)
            .await?;

        for record in &input.records {
            sqlx::query(
                "INSERT INTO snapshot_records \
                    (snapshot_id, code, status, master_status, flagged_by_source, section, \
                     cable_type, planned_length, laid_length) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(snapshot.id)
            .bind(record.normalized_code())
            .bind(record.status.as_str())
            .bind(record.master_status.map(|s| s.as_str()))
            .bind(record.flagged_by_source)
            .bind(&record.section)
            .bind(&record.cable_type)
            .bind(record.planned_length)
            .bind(record.laid_length)
            .execute(&mut *tx)
            .await?;
        }

        let plan = plan(&previous_records, &input.records);

        let mut events = Vec::with_capacity(plan.events.len());
        for draft in &plan.events {
            events.push(TransitionEventRepo::insert_in(&mut tx, snapshot.id, draft).await?);
        }

        let mut conflicts = Vec::with_capacity(plan.conflicts.len());
        for conflict in &plan.conflicts {
            conflicts.push(StatusConflictRepo::insert_in(&mut tx, snapshot.id, conflict).await?);
        }

        tx.commit().await?;

        tracing::debug!(
            worksite_id = input.worksite_id,
            snapshot_id = snapshot.id,
            version,
            events = events.len(),
            conflicts = conflicts.len(),
            "Snapshot ingested",
        );

        Ok(IngestedSnapshot {
            snapshot,
            events,
            conflicts,
        })
    }

    /// Find a snapshot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Snapshot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM snapshots WHERE id = $1");
        sqlx::query_as::<_, Snapshot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The highest-version snapshot of a worksite.
    pub async fn find_active(
        pool: &PgPool,
        worksite_id: DbId,
    ) -> Result<Option<Snapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snapshots \
             WHERE worksite_id = $1 ORDER BY version DESC LIMIT 1"
        );
        sqlx::query_as::<_, Snapshot>(&query)
            .bind(worksite_id)
            .fetch_optional(pool)
            .await
    }

    /// Every version of a worksite, newest first.
    pub async fn list_for_worksite(
        pool: &PgPool,
        worksite_id: DbId,
    ) -> Result<Vec<Snapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snapshots WHERE worksite_id = $1 ORDER BY version DESC"
        );
        sqlx::query_as::<_, Snapshot>(&query)
            .bind(worksite_id)
            .fetch_all(pool)
            .await
    }

    /// Records of one snapshot, ordered by code.
    pub async fn list_records(
        pool: &PgPool,
        snapshot_id: DbId,
    ) -> Result<Vec<SnapshotRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM snapshot_records \
             WHERE snapshot_id = $1 ORDER BY code"
        );
        sqlx::query_as::<_, SnapshotRecord>(&query)
            .bind(snapshot_id)
            .fetch_all(pool)
            .await
    }
}

/// `record_count` is an `INTEGER` column.
fn record_count(len: usize) -> Result<i32, sqlx::Error> {
    i32::try_from(len).map_err(|err| sqlx::Error::Encode(Box::new(err)))
}
