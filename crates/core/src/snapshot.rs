//! Snapshot diffing for the import path.
//!
//! Compares the records of snapshot N-1 with snapshot N and produces one
//! [`TransitionDraft`] per code that appeared, changed, or vanished.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::status::{MasterStatus, WorkStatus};
use crate::transition::{
    classify_disappearance, classify_new_entity, classify_transition, ChangeType,
};

/// One cable as reported by an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableRecord {
    /// Business code (marcacavo), unique within one snapshot.
    pub code: String,
    pub status: WorkStatus,
    /// Status reported by the secondary source, when the import carries it.
    #[serde(default)]
    pub master_status: Option<MasterStatus>,
    #[serde(default)]
    pub flagged_by_source: bool,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub cable_type: Option<String>,
    #[serde(default)]
    pub planned_length: Option<f64>,
    #[serde(default)]
    pub laid_length: Option<f64>,
}

impl CableRecord {
    pub fn new(code: impl Into<String>, status: WorkStatus) -> Self {
        Self {
            code: code.into(),
            status,
            master_status: None,
            flagged_by_source: false,
            section: None,
            cable_type: None,
            planned_length: None,
            laid_length: None,
        }
    }

    /// Code used for matching across snapshots.
    pub fn normalized_code(&self) -> String {
        normalize_code(&self.code)
    }
}

/// Trim and upper-case a business code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// A transition event ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDraft {
    pub code: String,
    pub old_status: Option<WorkStatus>,
    pub new_status: Option<WorkStatus>,
    pub change_type: ChangeType,
    pub severity: Severity,
}

/// Diff two snapshots, ordered by normalized code.
///
/// Codes present only in `next` become `NEW_ENTITY`; codes in both are run
/// through [`classify_transition`] (unchanged codes produce nothing); codes
/// present only in `previous` go through [`classify_disappearance`].
pub fn diff_snapshots(previous: &[CableRecord], next: &[CableRecord]) -> Vec<TransitionDraft> {
    let old_by_code: BTreeMap<String, &CableRecord> =
        previous.iter().map(|r| (r.normalized_code(), r)).collect();
    let new_by_code: BTreeMap<String, &CableRecord> =
        next.iter().map(|r| (r.normalized_code(), r)).collect();

    let codes: BTreeSet<&String> = old_by_code.keys().chain(new_by_code.keys()).collect();

    codes
        .into_iter()
        .filter_map(|code| {
            let old = old_by_code.get(code);
            let new = new_by_code.get(code);
            let (transition, old_status, new_status) = match (old, new) {
                (None, Some(n)) => (classify_new_entity(), None, Some(n.status)),
                (Some(o), Some(n)) => (
                    classify_transition(Some(o.status), n.status, n.flagged_by_source)?,
                    Some(o.status),
                    Some(n.status),
                ),
                (Some(o), None) => (classify_disappearance(Some(o.status)), Some(o.status), None),
                (None, None) => return None,
            };
            Some(TransitionDraft {
                code: code.clone(),
                old_status,
                new_status,
                change_type: transition.change_type,
                severity: transition.severity,
            })
        })
        .collect()
}

/// Normalized codes occurring more than once, sorted.
pub fn find_duplicate_codes(records: &[CableRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for record in records {
        let code = record.normalized_code();
        if !seen.insert(code.clone()) {
            duplicates.insert(code);
        }
    }
    duplicates.into_iter().collect()
}

/// Per-severity counts of a set of drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub info: usize,
    pub warn: usize,
    pub block: usize,
}

impl DiffSummary {
    pub fn from_drafts(drafts: &[TransitionDraft]) -> Self {
        drafts.iter().fold(Self::default(), |mut acc, d| {
            match d.severity {
                Severity::Info => acc.info += 1,
                Severity::Warn => acc.warn += 1,
                Severity::Block => acc.block += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: &str, status: WorkStatus) -> CableRecord {
        CableRecord::new(code, status)
    }

    #[test]
    fn vanished_completed_cable_blocks() {
        let previous = vec![rec("X", WorkStatus::Posato)];
        let drafts = diff_snapshots(&previous, &[]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].code, "X");
        assert_eq!(drafts[0].change_type, ChangeType::DisappearedUnexpected);
        assert_eq!(drafts[0].severity, Severity::Block);
        assert_eq!(drafts[0].old_status, Some(WorkStatus::Posato));
        assert_eq!(drafts[0].new_status, None);
    }

    #[test]
    fn new_code_is_new_entity() {
        let drafts = diff_snapshots(&[], &[rec("A1", WorkStatus::Libero)]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].change_type, ChangeType::NewEntity);
        assert_eq!(drafts[0].severity, Severity::Info);
    }

    #[test]
    fn unchanged_codes_produce_nothing() {
        let snapshot = vec![rec("A", WorkStatus::Tagliato), rec("B", WorkStatus::Posato)];
        assert!(diff_snapshots(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn codes_match_after_normalization() {
        let previous = vec![rec(" ab-01 ", WorkStatus::Posato)];
        let next = vec![rec("AB-01", WorkStatus::Richiesta)];
        let drafts = diff_snapshots(&previous, &next);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].code, "AB-01");
        assert_eq!(drafts[0].change_type, ChangeType::ForbiddenTransition);
    }

    #[test]
    fn output_is_ordered_by_code() {
        let previous = vec![rec("C", WorkStatus::Libero), rec("A", WorkStatus::Libero)];
        let next = vec![rec("B", WorkStatus::Libero), rec("A", WorkStatus::Richiesta)];
        let codes: Vec<_> = diff_snapshots(&previous, &next)
            .into_iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn finds_duplicate_codes() {
        let records = vec![
            rec("A", WorkStatus::Libero),
            rec("a ", WorkStatus::Posato),
            rec("B", WorkStatus::Libero),
        ];
        assert_eq!(find_duplicate_codes(&records), vec!["A".to_string()]);
        assert!(find_duplicate_codes(&records[1..]).is_empty());
    }

    #[test]
    fn summary_counts_by_severity() {
        let previous = vec![rec("A", WorkStatus::Posato), rec("B", WorkStatus::Posato)];
        let next = vec![rec("B", WorkStatus::Libero), rec("C", WorkStatus::Libero)];
        let summary = DiffSummary::from_drafts(&diff_snapshots(&previous, &next));
        assert_eq!(
            summary,
            DiffSummary {
                info: 1,
                warn: 1,
                block: 1
            }
        );
    }
}
