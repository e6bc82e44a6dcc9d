//! Snapshot, snapshot record, transition event, and status conflict models.

use cablewatch_core::snapshot::CableRecord;
use cablewatch_core::status::{MasterStatus, WorkStatus};
use cablewatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `snapshots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Snapshot {
    pub id: DbId,
    pub worksite_id: DbId,
    pub version: i32,
    pub source_label: String,
    pub record_count: i32,
    pub created_at: Timestamp,
}

/// A row from the `snapshot_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SnapshotRecord {
    pub id: DbId,
    pub snapshot_id: DbId,
    pub code: String,
    pub status: String,
    pub master_status: Option<String>,
    pub flagged_by_source: bool,
    pub section: Option<String>,
    pub cable_type: Option<String>,
    pub planned_length: Option<f64>,
    pub laid_length: Option<f64>,
}

impl From<SnapshotRecord> for CableRecord {
    fn from(row: SnapshotRecord) -> Self {
        CableRecord {
            code: row.code,
            status: WorkStatus::parse(&row.status),
            master_status: row.master_status.as_deref().map(MasterStatus::parse),
            flagged_by_source: row.flagged_by_source,
            section: row.section,
            cable_type: row.cable_type,
            planned_length: row.planned_length,
            laid_length: row.laid_length,
        }
    }
}

/// A row from the `transition_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransitionEvent {
    pub id: DbId,
    pub snapshot_id: DbId,
    pub code: String,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub change_type: String,
    pub severity: String,
    pub created_at: Timestamp,
}

/// A row from the `status_conflicts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusConflictRow {
    pub id: DbId,
    pub snapshot_id: DbId,
    pub code: String,
    pub master_status: String,
    pub operational_status: String,
    pub is_conflict: bool,
    pub is_changed: bool,
    pub severity: String,
    pub created_at: Timestamp,
}

/// DTO for one cross-source comparison to persist.
#[derive(Debug, Clone)]
pub struct CreateStatusConflict {
    pub code: String,
    pub master_status: MasterStatus,
    pub operational_status: MasterStatus,
    pub is_conflict: bool,
    pub is_changed: bool,
    pub severity: cablewatch_core::severity::AlertSeverity,
}

/// Everything written by one ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestedSnapshot {
    pub snapshot: Snapshot,
    pub events: Vec<TransitionEvent>,
    pub conflicts: Vec<StatusConflictRow>,
}

/// DTO for one ingestion request.
#[derive(Debug, Clone)]
pub struct CreateSnapshot {
    pub worksite_id: DbId,
    pub source_label: String,
    pub records: Vec<CableRecord>,
}

/// What to record alongside a new snapshot, computed from the previous
/// active snapshot's records.
#[derive(Debug, Clone, Default)]
pub struct IngestPlan {
    pub events: Vec<cablewatch_core::snapshot::TransitionDraft>,
    pub conflicts: Vec<CreateStatusConflict>,
}
