//! Rule catalog configuration and raw hit types.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::types::DbId;
use crate::validation::submission::{
    SUBMISSION_STATUS_DRAFT, SUBMISSION_STATUS_SUBMITTED, SUBMISSION_STATUS_VALIDATED,
};

// ---------------------------------------------------------------------------
// Rule codes
// ---------------------------------------------------------------------------

/// Planned quantity is zero but something was produced.
pub const MISMATCH_PREVISTO0_PRODOTTO_POS: &str = "MISMATCH_PREVISTO0_PRODOTTO_POS";
/// Planned quantity is positive but nothing was produced.
pub const MISMATCH_PREVISTO_POS_PRODOTTO0: &str = "MISMATCH_PREVISTO_POS_PRODOTTO0";
pub const TIME_MISSING_OR_UNPARSEABLE: &str = "TIME_MISSING_OR_UNPARSEABLE";
pub const TIME_OUT_OF_RANGE: &str = "TIME_OUT_OF_RANGE";
pub const MISSING_OPERATORS: &str = "MISSING_OPERATORS";
pub const POSSIBLE_DUP_ROW: &str = "POSSIBLE_DUP_ROW";
pub const STATUS_SCOPE_MISMATCH: &str = "STATUS_SCOPE_MISMATCH";
pub const MISSING_ARCHIVE_COPY: &str = "MISSING_ARCHIVE_COPY";
pub const MISSING_EVIDENCE_FILES: &str = "MISSING_EVIDENCE_FILES";
pub const LENGTH_EXECUTED_EXCEEDS_PLANNED: &str = "LENGTH_EXECUTED_EXCEEDS_PLANNED";
pub const RETURNED_MISSING_TIMESTAMP: &str = "RETURNED_MISSING_TIMESTAMP";
/// Derived: a row with a WARN/BLOCK hit carries no explanatory note.
pub const MISSING_NOTE_FOR_ANOMALY: &str = "MISSING_NOTE_FOR_ANOMALY";

/// Default per-code severities, in catalog order.
const DEFAULT_SEVERITIES: &[(&str, Severity)] = &[
    (MISMATCH_PREVISTO0_PRODOTTO_POS, Severity::Warn),
    (MISMATCH_PREVISTO_POS_PRODOTTO0, Severity::Warn),
    (TIME_MISSING_OR_UNPARSEABLE, Severity::Warn),
    (TIME_OUT_OF_RANGE, Severity::Block),
    (MISSING_OPERATORS, Severity::Warn),
    (POSSIBLE_DUP_ROW, Severity::Info),
    (STATUS_SCOPE_MISMATCH, Severity::Info),
    (MISSING_ARCHIVE_COPY, Severity::Warn),
    (MISSING_EVIDENCE_FILES, Severity::Warn),
    (LENGTH_EXECUTED_EXCEEDS_PLANNED, Severity::Warn),
    (RETURNED_MISSING_TIMESTAMP, Severity::Warn),
    (MISSING_NOTE_FOR_ANOMALY, Severity::Warn),
];

/// Default upper bound for a declared working time, in hours.
pub const DEFAULT_MAX_HOURS: f64 = 24.0;

/// Default number of raw payloads kept as evidence on each signal.
pub const DEFAULT_SAMPLE_LIMIT: usize = 20;

/// Hard cap on the evidence sample. Larger limits are clamped to it.
pub const MAX_SAMPLE_LIMIT: usize = 20;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Workflow step an evaluation is run for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationScope {
    /// Crew lead submits a draft.
    Submit,
    /// Office reviews a submitted report.
    Review,
    /// Final approval.
    Approve,
}

impl EvaluationScope {
    pub const ALL: [EvaluationScope; 3] = [Self::Submit, Self::Review, Self::Approve];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Review => "review",
            Self::Approve => "approve",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for EvaluationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Severity and switch for one rule code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetting {
    pub code: String,
    pub severity: Severity,
    pub enabled: bool,
}

/// What a workflow scope expects of the submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeRule {
    pub scope: EvaluationScope,
    pub expected_status: String,
    pub requires_archive_copy: bool,
    pub requires_evidence: bool,
}

/// The full rule configuration handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalog {
    pub rules: Vec<RuleSetting>,
    pub scopes: Vec<ScopeRule>,
    pub max_hours: f64,
    pub sample_limit: usize,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        let rules = DEFAULT_SEVERITIES
            .iter()
            .map(|(code, severity)| RuleSetting {
                code: (*code).to_string(),
                severity: *severity,
                enabled: true,
            })
            .collect();

        let scopes = vec![
            ScopeRule {
                scope: EvaluationScope::Submit,
                expected_status: SUBMISSION_STATUS_DRAFT.to_string(),
                requires_archive_copy: false,
                requires_evidence: false,
            },
            ScopeRule {
                scope: EvaluationScope::Review,
                expected_status: SUBMISSION_STATUS_SUBMITTED.to_string(),
                requires_archive_copy: true,
                requires_evidence: false,
            },
            ScopeRule {
                scope: EvaluationScope::Approve,
                expected_status: SUBMISSION_STATUS_VALIDATED.to_string(),
                requires_archive_copy: true,
                requires_evidence: true,
            },
        ];

        Self {
            rules,
            scopes,
            max_hours: DEFAULT_MAX_HOURS,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

impl RuleCatalog {
    /// Override the evidence sample bound, clamped to [`MAX_SAMPLE_LIMIT`].
    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit.min(MAX_SAMPLE_LIMIT);
        self
    }

    /// Severity of an enabled rule, or `None` when the rule is absent or
    /// switched off.
    pub fn severity_of(&self, code: &str) -> Option<Severity> {
        self.rules
            .iter()
            .find(|r| r.code == code && r.enabled)
            .map(|r| r.severity)
    }

    pub fn scope_rule(&self, scope: EvaluationScope) -> Option<&ScopeRule> {
        self.scopes.iter().find(|s| s.scope == scope)
    }

    /// Switch a rule off. Unknown codes are ignored.
    pub fn disable(&mut self, code: &str) {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.code == code) {
            rule.enabled = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Raw hits
// ---------------------------------------------------------------------------

/// Reference to one submission row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowRef {
    pub id: DbId,
    pub position: i32,
}

/// A single rule firing, before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawHit {
    pub code: &'static str,
    pub severity: Severity,
    pub rows: Vec<RowRef>,
    pub payload: serde_json::Value,
}

impl RawHit {
    pub fn touches_row(&self, row_id: DbId) -> bool {
        self.rows.iter().any(|r| r.id == row_id)
    }
}
