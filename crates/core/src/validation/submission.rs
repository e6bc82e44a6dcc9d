//! Input model for one work submission (daily report).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};
use crate::validation::parse::deserialize_lenient_number;

// ---------------------------------------------------------------------------
// Header status constants
// ---------------------------------------------------------------------------

pub const SUBMISSION_STATUS_DRAFT: &str = "DRAFT";
pub const SUBMISSION_STATUS_SUBMITTED: &str = "SUBMITTED";
pub const SUBMISSION_STATUS_VALIDATED: &str = "VALIDATED";
pub const SUBMISSION_STATUS_APPROVED: &str = "APPROVED";
/// Terminal status for a report sent back to the crew. Requires `returned_at`.
pub const SUBMISSION_STATUS_RETURNED: &str = "RETURNED";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Submission header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionHeader {
    pub id: DbId,
    pub status: String,
    pub report_date: Option<NaiveDate>,
    /// Crew or role tag of the submitter.
    pub crew_role: Option<String>,
    pub worksite_id: Option<DbId>,
    pub commessa_id: Option<DbId>,
    /// Cumulative produced total declared on the header.
    pub produced_total: Option<f64>,
    pub note: Option<String>,
    pub validated_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub returned_at: Option<Timestamp>,
    /// Durable file the evaluation summary is mirrored to, if any.
    pub archive_file_id: Option<DbId>,
}

impl SubmissionHeader {
    /// Whether the header status equals `status`, ignoring case and padding.
    pub fn status_is(&self, status: &str) -> bool {
        self.status.trim().eq_ignore_ascii_case(status)
    }
}

/// One activity row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionRow {
    pub id: DbId,
    pub position: i32,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Free text listing the workers on the activity.
    pub workers: Option<String>,
    /// Declared time as typed: `8`, `7,5`, or `7:30`.
    pub time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub planned: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub produced: Option<f64>,
    pub note: Option<String>,
    pub catalog_item_id: Option<DbId>,
}

/// Planned vs executed length for one linked cable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LengthRecord {
    pub id: DbId,
    pub cable_id: DbId,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub planned_length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub executed_length: Option<f64>,
}

/// Kind of file attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Archival copy of the signed report.
    Archive,
    /// Photos and other evidentiary material.
    Evidence,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Evidence => "evidence",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "archive" => Some(Self::Archive),
            "evidence" => Some(Self::Evidence),
            _ => None,
        }
    }
}

/// A file attached to a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionFile {
    pub id: DbId,
    pub kind: FileKind,
    pub deleted_at: Option<Timestamp>,
}

impl SubmissionFile {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Everything the engine evaluates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    pub header: SubmissionHeader,
    pub rows: Vec<SubmissionRow>,
    pub lengths: Vec<LengthRecord>,
    pub files: Vec<SubmissionFile>,
}

impl Submission {
    /// An archival copy exists either as the linked durable file or as an
    /// active archive attachment.
    pub fn has_archive_copy(&self) -> bool {
        self.header.archive_file_id.is_some()
            || self
                .files
                .iter()
                .any(|f| f.kind == FileKind::Archive && f.is_active())
    }

    /// Evidentiary files that are not soft-deleted.
    pub fn active_evidence_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.kind == FileKind::Evidence && f.is_active())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn file(id: DbId, kind: FileKind, deleted: bool) -> SubmissionFile {
        SubmissionFile {
            id,
            kind,
            deleted_at: deleted.then(Utc::now),
        }
    }

    #[test]
    fn soft_deleted_evidence_does_not_count() {
        let submission = Submission {
            files: vec![
                file(1, FileKind::Evidence, true),
                file(2, FileKind::Evidence, false),
                file(3, FileKind::Archive, false),
            ],
            ..Default::default()
        };
        assert_eq!(submission.active_evidence_count(), 1);
    }

    #[test]
    fn archive_copy_from_header_or_attachment() {
        let mut submission = Submission::default();
        assert!(!submission.has_archive_copy());

        submission.files.push(file(1, FileKind::Archive, true));
        assert!(!submission.has_archive_copy());

        submission.header.archive_file_id = Some(9);
        assert!(submission.has_archive_copy());
    }

    #[test]
    fn status_comparison_ignores_case() {
        let header = SubmissionHeader {
            status: " returned ".to_string(),
            ..Default::default()
        };
        assert!(header.status_is(SUBMISSION_STATUS_RETURNED));
    }

    #[test]
    fn rows_deserialize_string_quantities() {
        let row: SubmissionRow = serde_json::from_value(serde_json::json!({
            "id": 1,
            "position": 1,
            "planned": "150",
            "produced": ""
        }))
        .unwrap();
        assert_eq!(row.planned, Some(150.0));
        assert_eq!(row.produced, None);
    }
}
