//! Submission header, row, length, and file models.

use cablewatch_core::types::{DbId, Timestamp};
use cablewatch_core::validation::parse::parse_quantity;
use cablewatch_core::validation::submission::{
    FileKind, LengthRecord, SubmissionFile, SubmissionHeader, SubmissionRow,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionHeaderRow {
    pub id: DbId,
    pub worksite_id: Option<DbId>,
    pub commessa_id: Option<DbId>,
    pub status: String,
    pub report_date: Option<NaiveDate>,
    pub crew_role: Option<String>,
    pub produced_total: Option<f64>,
    pub note: Option<String>,
    pub validated_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub returned_at: Option<Timestamp>,
    pub archive_file_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SubmissionHeaderRow> for SubmissionHeader {
    fn from(row: SubmissionHeaderRow) -> Self {
        SubmissionHeader {
            id: row.id,
            status: row.status,
            report_date: row.report_date,
            crew_role: row.crew_role,
            worksite_id: row.worksite_id,
            commessa_id: row.commessa_id,
            produced_total: row.produced_total,
            note: row.note,
            validated_at: row.validated_at,
            approved_at: row.approved_at,
            returned_at: row.returned_at,
            archive_file_id: row.archive_file_id,
        }
    }
}

/// A row from the `submission_rows` table. Quantities are stored as typed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionRowRecord {
    pub id: DbId,
    pub submission_id: DbId,
    pub position: i32,
    pub category: Option<String>,
    pub description: Option<String>,
    pub workers: Option<String>,
    pub time_text: Option<String>,
    pub planned_text: Option<String>,
    pub produced_text: Option<String>,
    pub note: Option<String>,
    pub catalog_item_id: Option<DbId>,
}

impl From<SubmissionRowRecord> for SubmissionRow {
    fn from(row: SubmissionRowRecord) -> Self {
        SubmissionRow {
            id: row.id,
            position: row.position,
            category: row.category,
            description: row.description,
            workers: row.workers,
            time: row.time_text,
            planned: row.planned_text.as_deref().and_then(parse_quantity),
            produced: row.produced_text.as_deref().and_then(parse_quantity),
            note: row.note,
            catalog_item_id: row.catalog_item_id,
        }
    }
}

/// A row from the `submission_lengths` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionLengthRow {
    pub id: DbId,
    pub submission_id: DbId,
    pub cable_id: DbId,
    pub planned_length: Option<f64>,
    pub executed_length: Option<f64>,
}

impl From<SubmissionLengthRow> for LengthRecord {
    fn from(row: SubmissionLengthRow) -> Self {
        LengthRecord {
            id: row.id,
            cable_id: row.cable_id,
            planned_length: row.planned_length,
            executed_length: row.executed_length,
        }
    }
}

/// A row from the `submission_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionFileRow {
    pub id: DbId,
    pub submission_id: DbId,
    pub kind: String,
    pub deleted_at: Option<Timestamp>,
}

impl SubmissionFileRow {
    /// `None` for a kind this build does not know.
    pub fn into_file(self) -> Option<SubmissionFile> {
        Some(SubmissionFile {
            id: self.id,
            kind: FileKind::from_db(&self.kind)?,
            deleted_at: self.deleted_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a submission together with its rows, lengths, and files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubmission {
    pub worksite_id: Option<DbId>,
    pub commessa_id: Option<DbId>,
    pub status: Option<String>,
    pub report_date: Option<NaiveDate>,
    pub crew_role: Option<String>,
    pub produced_total: Option<f64>,
    pub note: Option<String>,
    pub returned_at: Option<Timestamp>,
    pub archive_file_id: Option<DbId>,
    #[serde(default)]
    pub rows: Vec<CreateSubmissionRow>,
    #[serde(default)]
    pub lengths: Vec<CreateSubmissionLength>,
    #[serde(default)]
    pub files: Vec<CreateSubmissionFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubmissionRow {
    pub position: i32,
    pub category: Option<String>,
    pub description: Option<String>,
    pub workers: Option<String>,
    pub time_text: Option<String>,
    pub planned_text: Option<String>,
    pub produced_text: Option<String>,
    pub note: Option<String>,
    pub catalog_item_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionLength {
    pub cable_id: DbId,
    pub planned_length: Option<f64>,
    pub executed_length: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionFile {
    pub kind: FileKind,
    pub deleted_at: Option<Timestamp>,
}
