//! Repository for the append-only `evaluation_runs` and
//! `evaluation_signals` tables.

use cablewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::evaluation::{
    CreateEvaluationRun, CreateEvaluationSignal, EvaluationRun, EvaluationRunWithSignals,
    EvaluationSignal,
};

/// Column list for `evaluation_runs` queries.
const RUN_COLUMNS: &str = "id, submission_id, scope, validated, decision, warn_count, \
    block_count, hit_count, request_token, created_at, updated_at";

/// Column list for `evaluation_signals` queries.
const SIGNAL_COLUMNS: &str = "id, run_id, code, severity, row_ids, payload, created_at";

/// Inserts and reads evaluation runs. Runs are never updated or deleted.
pub struct EvaluationRunRepo;

impl EvaluationRunRepo {
    /// Insert a run and all of its signals in one transaction.
    ///
    /// Signals are inserted in the given order, so reading them back by id
    /// reproduces it.
    pub async fn create_with_signals(
        pool: &PgPool,
        run: &CreateEvaluationRun,
        signals: &[CreateEvaluationSignal],
    ) -> Result<EvaluationRunWithSignals, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO evaluation_runs \
                (submission_id, scope, validated, decision, warn_count, block_count, \
                 hit_count, request_token) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {RUN_COLUMNS}"
        );
        let created = sqlx::query_as::<_, EvaluationRun>(&query)
            .bind(run.submission_id)
            .bind(&run.scope)
            .bind(run.validated)
            .bind(&run.decision)
            .bind(run.warn_count)
            .bind(run.block_count)
            .bind(run.hit_count)
            .bind(run.request_token)
            .fetch_one(&mut *tx)
            .await?;

        let signal_query = format!(
            "INSERT INTO evaluation_signals (run_id, code, severity, row_ids, payload) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SIGNAL_COLUMNS}"
        );
        let mut stored = Vec::with_capacity(signals.len());
        for signal in signals {
            let row = sqlx::query_as::<_, EvaluationSignal>(&signal_query)
                .bind(created.id)
                .bind(&signal.code)
                .bind(&signal.severity)
                .bind(&signal.row_ids)
                .bind(&signal.payload)
                .fetch_one(&mut *tx)
                .await?;
            stored.push(row);
        }

        tx.commit().await?;
        Ok(EvaluationRunWithSignals {
            run: created,
            signals: stored,
        })
    }

    /// Find a run by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EvaluationRun>, sqlx::Error> {
        let query = format!("SELECT {RUN_COLUMNS} FROM evaluation_runs WHERE id = $1");
        sqlx::query_as::<_, EvaluationRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a run by ID, enriched with its signals.
    pub async fn find_with_signals(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EvaluationRunWithSignals>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(run) => {
                let signals = Self::list_signals(pool, run.id).await?;
                Ok(Some(EvaluationRunWithSignals { run, signals }))
            }
            None => Ok(None),
        }
    }

    /// Runs for one submission, newest first.
    pub async fn list_for_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<EvaluationRun>, sqlx::Error> {
        let query = format!(
            "SELECT {RUN_COLUMNS} FROM evaluation_runs \
             WHERE submission_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, EvaluationRun>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_signals(
        pool: &PgPool,
        run_id: DbId,
    ) -> Result<Vec<EvaluationSignal>, sqlx::Error> {
        let query = format!(
            "SELECT {SIGNAL_COLUMNS} FROM evaluation_signals WHERE run_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, EvaluationSignal>(&query)
            .bind(run_id)
            .fetch_all(pool)
            .await
    }
}
