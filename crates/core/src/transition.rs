//! Status transition classification between successive import snapshots.
//!
//! Both classifiers are total: every input resolves to a classification or
//! to "no event". They sit on the import diff path and must never abort an
//! import because of one odd row.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::status::WorkStatus;

/// Kind of change recorded on a transition event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// Code first seen in this snapshot.
    NewEntity,
    SituazioneChanged,
    /// Completed work pushed back to a request.
    ForbiddenTransition,
    ReinstatedFromEliminated,
    Eliminated,
    ReworkAfterCompletion,
    DisappearedAllowed,
    DisappearedUnexpected,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewEntity => "NEW_ENTITY",
            Self::SituazioneChanged => "SITUAZIONE_CHANGED",
            Self::ForbiddenTransition => "FORBIDDEN_TRANSITION",
            Self::ReinstatedFromEliminated => "REINSTATED_FROM_ELIMINATED",
            Self::Eliminated => "ELIMINATED",
            Self::ReworkAfterCompletion => "REWORK_AFTER_COMPLETION",
            Self::DisappearedAllowed => "DISAPPEARED_ALLOWED",
            Self::DisappearedUnexpected => "DISAPPEARED_UNEXPECTED",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        const ALL: [ChangeType; 8] = [
            ChangeType::NewEntity,
            ChangeType::SituazioneChanged,
            ChangeType::ForbiddenTransition,
            ChangeType::ReinstatedFromEliminated,
            ChangeType::Eliminated,
            ChangeType::ReworkAfterCompletion,
            ChangeType::DisappearedAllowed,
            ChangeType::DisappearedUnexpected,
        ];
        ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one code's change between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub change_type: ChangeType,
    pub severity: Severity,
}

impl Transition {
    const fn new(change_type: ChangeType, severity: Severity) -> Self {
        Self {
            change_type,
            severity,
        }
    }
}

/// Classify the status change of a code present in both snapshots.
///
/// Returns `None` when the status did not change, and also when `old` is
/// `None`: a code with no previous status is a new entity, which the caller
/// records itself.
///
/// `_flagged_by_source` is carried for interface symmetry with the import
/// path; the transition matrix does not depend on it.
pub fn classify_transition(
    old: Option<WorkStatus>,
    new: WorkStatus,
    _flagged_by_source: bool,
) -> Option<Transition> {
    use WorkStatus::*;

    let old = old?;
    if old == new {
        return None;
    }

    let transition = match (old, new) {
        (Tagliato | Posato, Richiesta) => {
            Transition::new(ChangeType::ForbiddenTransition, Severity::Block)
        }
        (Eliminato, _) => Transition::new(ChangeType::ReinstatedFromEliminated, Severity::Block),
        (Posato, Eliminato) => Transition::new(ChangeType::Eliminated, Severity::Block),
        (Richiesta | Tagliato, Eliminato) => {
            Transition::new(ChangeType::Eliminated, Severity::Warn)
        }
        (_, Eliminato) => Transition::new(ChangeType::Eliminated, Severity::Info),
        (Posato, Libero | Bloccato) => {
            Transition::new(ChangeType::ReworkAfterCompletion, Severity::Warn)
        }
        _ => Transition::new(ChangeType::SituazioneChanged, Severity::Info),
    };
    Some(transition)
}

/// Classify a code present in the previous snapshot but absent from the new one.
///
/// Only codes that were free, blocked, or already eliminated may vanish
/// silently. An unknown previous status is treated as unexpected.
pub fn classify_disappearance(old: Option<WorkStatus>) -> Transition {
    match old {
        Some(WorkStatus::Libero | WorkStatus::Bloccato | WorkStatus::Eliminato) => {
            Transition::new(ChangeType::DisappearedAllowed, Severity::Info)
        }
        _ => Transition::new(ChangeType::DisappearedUnexpected, Severity::Block),
    }
}

/// Classification recorded for a code seen for the first time.
pub fn classify_new_entity() -> Transition {
    Transition::new(ChangeType::NewEntity, Severity::Info)
}
