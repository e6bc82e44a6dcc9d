//! Handlers for cable snapshots.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use cablewatch_core::error::CoreError;
use cablewatch_core::snapshot::CableRecord;
use cablewatch_core::status::{MasterStatus, WorkStatus};
use cablewatch_core::types::DbId;
use cablewatch_core::validation::parse::deserialize_lenient_number;
use cablewatch_db::models::snapshot::{Snapshot, TransitionEvent};
use cablewatch_db::repositories::{SnapshotRepo, TransitionEventRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::ingest::{ingest_snapshot, IngestOutcome};
use crate::error::AppResult;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// Request body for ingesting a snapshot.
#[derive(Debug, Deserialize, Validate)]
pub struct IngestSnapshotRequest {
    #[validate(length(min = 1, max = 200))]
    pub source_label: String,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub records: Vec<SnapshotRecordInput>,
}

/// One cable as sent by an importer. Status text is parsed permissively.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SnapshotRecordInput {
    #[validate(length(min = 1, max = 100))]
    pub code: String,
    #[serde(default)]
    pub status: String,
    pub master_status: Option<String>,
    #[serde(default)]
    pub flagged_by_source: bool,
    pub section: Option<String>,
    pub cable_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub planned_length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub laid_length: Option<f64>,
}

impl From<SnapshotRecordInput> for CableRecord {
    fn from(input: SnapshotRecordInput) -> Self {
        CableRecord {
            code: input.code,
            status: WorkStatus::parse(&input.status),
            master_status: input.master_status.as_deref().map(MasterStatus::parse),
            flagged_by_source: input.flagged_by_source,
            section: input.section,
            cable_type: input.cable_type,
            planned_length: input.planned_length,
            laid_length: input.laid_length,
        }
    }
}

/// POST /api/v1/worksites/{id}/snapshots
pub async fn create_snapshot(
    State(state): State<AppState>,
    Path(worksite_id): Path<DbId>,
    body: Result<Json<IngestSnapshotRequest>, JsonRejection>,
) -> AppResult<Created<IngestOutcome>> {
    let Json(input) = body?;
    input.validate()?;

    let records = input.records.into_iter().map(CableRecord::from).collect();
    let outcome = ingest_snapshot(&state.pool, worksite_id, input.source_label, records).await?;
    Ok(created(outcome))
}

/// GET /api/v1/worksites/{id}/snapshots/active
pub async fn get_active_snapshot(
    State(state): State<AppState>,
    Path(worksite_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Snapshot>>> {
    let snapshot = SnapshotRepo::find_active(&state.pool, worksite_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Snapshot for worksite", worksite_id))?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/snapshots/{id}/events
pub async fn list_snapshot_events(
    State(state): State<AppState>,
    Path(snapshot_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TransitionEvent>>>> {
    SnapshotRepo::find_by_id(&state.pool, snapshot_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Snapshot", snapshot_id))?;
    let events = TransitionEventRepo::list_for_snapshot(&state.pool, snapshot_id).await?;
    Ok(Json(DataResponse { data: events }))
}
