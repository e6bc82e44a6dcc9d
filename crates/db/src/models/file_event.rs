//! Durable-file event mirror model.

use cablewatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Event type written when an evaluation summary is mirrored.
pub const EVALUATION_COMPLETED: &str = "evaluation.completed";

/// A row from the `file_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileEvent {
    pub id: DbId,
    pub file_id: DbId,
    pub submission_id: DbId,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
