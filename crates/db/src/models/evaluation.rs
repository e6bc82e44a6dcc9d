//! Evaluation run and signal models.

use cablewatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `evaluation_runs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvaluationRun {
    pub id: DbId,
    pub submission_id: DbId,
    pub scope: String,
    pub validated: bool,
    pub decision: String,
    pub warn_count: i32,
    pub block_count: i32,
    pub hit_count: i32,
    pub request_token: Option<uuid::Uuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `evaluation_signals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvaluationSignal {
    pub id: DbId,
    pub run_id: DbId,
    pub code: String,
    pub severity: String,
    pub row_ids: Vec<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// A run with its signals, ordered as they were produced.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRunWithSignals {
    #[serde(flatten)]
    pub run: EvaluationRun,
    pub signals: Vec<EvaluationSignal>,
}

/// DTO for inserting a run.
#[derive(Debug, Clone)]
pub struct CreateEvaluationRun {
    pub submission_id: DbId,
    pub scope: String,
    pub validated: bool,
    pub decision: String,
    pub warn_count: i32,
    pub block_count: i32,
    pub hit_count: i32,
    pub request_token: Option<uuid::Uuid>,
}

/// DTO for inserting one signal of a run.
#[derive(Debug, Clone)]
pub struct CreateEvaluationSignal {
    pub code: String,
    pub severity: String,
    pub row_ids: Vec<DbId>,
    pub payload: serde_json::Value,
}
