//! Cross-source status conflict detection.
//!
//! The master-record source is authoritative. Once it reports a cable as
//! fully installed, any disagreement from the operational side is a
//! conflict for a human to reconcile; nothing here resolves it.

use serde::{Deserialize, Serialize};

use crate::severity::AlertSeverity;
use crate::status::{MasterStatus, StatusVocabulary, WorkStatus};

/// Outcome of comparing the two status values held for one cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConflict {
    pub master: MasterStatus,
    pub operational: MasterStatus,
    /// Master record is terminal and the operational status differs.
    pub is_conflict: bool,
    /// The two values differ at all.
    pub is_changed: bool,
    pub severity: AlertSeverity,
}

/// Compare an authoritative master-record status with an independently
/// derived operational status.
pub fn detect_status_conflict(master: MasterStatus, operational: MasterStatus) -> StatusConflict {
    let is_changed = master != operational;
    let is_conflict = is_changed && master.is_terminal();

    let severity = if is_conflict {
        AlertSeverity::Critical
    } else if is_changed && operational.rank() > master.rank() {
        // Field is ahead of the master record.
        AlertSeverity::Major
    } else {
        AlertSeverity::Info
    };

    StatusConflict {
        master,
        operational,
        is_conflict,
        is_changed,
        severity,
    }
}

/// Cross-check a work-status record against its master-record status.
pub fn detect_work_conflict(master: MasterStatus, work: WorkStatus) -> StatusConflict {
    detect_status_conflict(master, MasterStatus::from_work_status(work))
}
