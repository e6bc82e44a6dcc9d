//! Submission evaluation and gate decision.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::types::DbId;
use crate::validation::aggregate::{aggregate_hits, count_codes_at, Signal};
use crate::validation::checks::{CheckPlan, EvalContext};
use crate::validation::rules::{EvaluationScope, RuleCatalog};
use crate::validation::submission::Submission;

/// Whether the workflow step may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateDecision {
    Validated,
    Blocked,
}

impl GateDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validated => "VALIDATED",
            Self::Blocked => "BLOCKED",
        }
    }
}

/// Result of one evaluation, ready to be persisted as a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub submission_id: DbId,
    pub scope: EvaluationScope,
    pub validated: bool,
    pub decision: GateDecision,
    /// Distinct codes whose aggregated severity is WARN.
    pub warn_count: usize,
    /// Distinct codes whose aggregated severity is BLOCK.
    pub block_count: usize,
    /// Raw hits before aggregation.
    pub hit_count: usize,
    pub signals: Vec<Signal>,
}

/// Run every enabled check of `catalog` over `submission` for `scope`.
pub fn evaluate(
    submission: &Submission,
    scope: EvaluationScope,
    catalog: &RuleCatalog,
) -> Evaluation {
    let ctx = EvalContext {
        submission,
        scope,
        catalog,
    };
    let hits = CheckPlan::from_catalog(catalog).run(&ctx);
    let signals = aggregate_hits(&hits, catalog.sample_limit);

    let warn_count = count_codes_at(&signals, Severity::Warn);
    let block_count = count_codes_at(&signals, Severity::Block);
    let validated = block_count == 0;

    Evaluation {
        submission_id: submission.header.id,
        scope,
        validated,
        decision: if validated {
            GateDecision::Validated
        } else {
            GateDecision::Blocked
        },
        warn_count,
        block_count,
        hit_count: hits.len(),
        signals,
    }
}
