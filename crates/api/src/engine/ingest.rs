//! Snapshot ingestion pipeline.
//!
//! Rejects malformed record lists before anything is written, then stores
//! the next snapshot version together with the transition events from
//! diffing it against the previous active snapshot and the cross-source
//! status comparisons of its records.

use cablewatch_core::conflict::detect_work_conflict;
use cablewatch_core::error::CoreError;
use cablewatch_core::snapshot::{diff_snapshots, find_duplicate_codes, CableRecord, DiffSummary};
use cablewatch_core::types::DbId;
use cablewatch_db::models::snapshot::{
    CreateSnapshot, CreateStatusConflict, IngestPlan, IngestedSnapshot,
};
use cablewatch_db::repositories::{SnapshotRepo, WorksiteRepo};
use cablewatch_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;

/// Per-severity transition counts plus the number of stored comparisons.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IngestSummary {
    #[serde(flatten)]
    pub transitions: DiffSummary,
    pub conflicts: usize,
    pub changed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    #[serde(flatten)]
    pub ingested: IngestedSnapshot,
    pub summary: IngestSummary,
}

/// Transition events and status comparisons for `next` given `previous`.
///
/// Only records that carry a master-record status are compared, and only
/// comparisons where the two sides differ are kept.
pub fn plan_ingest(previous: &[CableRecord], next: &[CableRecord]) -> IngestPlan {
    let conflicts = next
        .iter()
        .filter_map(|record| {
            let master = record.master_status?;
            let result = detect_work_conflict(master, record.status);
            result.is_changed.then(|| CreateStatusConflict {
                code: record.normalized_code(),
                master_status: result.master,
                operational_status: result.operational,
                is_conflict: result.is_conflict,
                is_changed: result.is_changed,
                severity: result.severity,
            })
        })
        .collect();

    IngestPlan {
        events: diff_snapshots(previous, next),
        conflicts,
    }
}

/// Reject empty lists, blank codes, and codes repeated within the list.
pub fn check_records(records: &[CableRecord]) -> Result<(), CoreError> {
    if records.is_empty() {
        return Err(CoreError::Validation(
            "A snapshot must contain at least one record".to_string(),
        ));
    }
    if records.iter().any(|r| r.normalized_code().is_empty()) {
        return Err(CoreError::Validation("Record codes must not be blank".to_string()));
    }
    let duplicates = find_duplicate_codes(records);
    if !duplicates.is_empty() {
        return Err(CoreError::Validation(format!(
            "Duplicate codes in snapshot: {}",
            duplicates.join(", ")
        )));
    }
    Ok(())
}

/// Store `records` as the next snapshot of `worksite_id`.
pub async fn ingest_snapshot(
    pool: &DbPool,
    worksite_id: DbId,
    source_label: String,
    records: Vec<CableRecord>,
) -> AppResult<IngestOutcome> {
    check_records(&records)?;

    WorksiteRepo::find_by_id(pool, worksite_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Worksite", worksite_id))?;

    let input = CreateSnapshot {
        worksite_id,
        source_label,
        records,
    };

    let mut transitions = DiffSummary::default();
    let ingested = SnapshotRepo::ingest(pool, &input, |previous, next| {
        let plan = plan_ingest(previous, next);
        transitions = DiffSummary::from_drafts(&plan.events);
        plan
    })
    .await?;

    let summary = IngestSummary {
        transitions,
        conflicts: ingested.conflicts.iter().filter(|c| c.is_conflict).count(),
        changed: ingested.conflicts.len(),
    };

    if summary.transitions.block > 0 || summary.conflicts > 0 {
        tracing::warn!(
            worksite_id,
            snapshot_id = ingested.snapshot.id,
            version = ingested.snapshot.version,
            blocking_transitions = summary.transitions.block,
            conflicts = summary.conflicts,
            "Snapshot ingested with blocking transitions or conflicts",
        );
    } else {
        tracing::info!(
            worksite_id,
            snapshot_id = ingested.snapshot.id,
            version = ingested.snapshot.version,
            "Snapshot ingested",
        );
    }

    Ok(IngestOutcome { ingested, summary })
}
