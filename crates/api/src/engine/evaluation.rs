//! Submission evaluation pipeline.
//!
//! Strictly sequential: load header, load rows/lengths/files, evaluate,
//! persist run and signals in one transaction, then mirror a summary onto
//! the submission's durable archive file. Every call creates a new run.

use async_trait::async_trait;
use cablewatch_core::error::CoreError;
use cablewatch_core::types::DbId;
use cablewatch_core::validation::aggregate::Signal;
use cablewatch_core::validation::evaluator::{evaluate, Evaluation};
use cablewatch_core::validation::rules::{EvaluationScope, RuleCatalog};
use cablewatch_db::models::evaluation::{
    CreateEvaluationRun, CreateEvaluationSignal, EvaluationRun,
};
use cablewatch_db::models::file_event::EVALUATION_COMPLETED;
use cablewatch_db::repositories::{EvaluationRunRepo, FileEventRepo, SubmissionRepo};
use cablewatch_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Best-effort sink for evaluation summaries.
#[async_trait]
pub trait EvaluationMirror: Send + Sync {
    async fn mirror(
        &self,
        file_id: DbId,
        submission_id: DbId,
        summary: &serde_json::Value,
    ) -> Result<(), sqlx::Error>;
}

/// Writes summaries to the `file_events` table.
pub struct FileEventMirror {
    pool: DbPool,
}

impl FileEventMirror {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EvaluationMirror for FileEventMirror {
    async fn mirror(
        &self,
        file_id: DbId,
        submission_id: DbId,
        summary: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        FileEventRepo::insert(&self.pool, file_id, submission_id, EVALUATION_COMPLETED, summary)
            .await
            .map(|_| ())
    }
}

/// A stored run together with the evaluation it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutcome {
    pub run_id: DbId,
    #[serde(flatten)]
    pub evaluation: Evaluation,
    #[serde(skip)]
    pub run: EvaluationRun,
}

/// Run the full pipeline for one submission.
///
/// A missing submission is a 404 and nothing is persisted. Load and
/// persistence failures abort the call; a mirror failure is logged only.
pub async fn run_evaluation(
    pool: &DbPool,
    catalog: &RuleCatalog,
    mirror: &dyn EvaluationMirror,
    submission_id: DbId,
    scope: EvaluationScope,
    request_token: Option<uuid::Uuid>,
) -> AppResult<EvaluationOutcome> {
    let submission = SubmissionRepo::load(pool, submission_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Submission", submission_id))?;

    let evaluation = evaluate(&submission, scope, catalog);

    let run_input = CreateEvaluationRun {
        submission_id,
        scope: scope.as_str().to_string(),
        validated: evaluation.validated,
        decision: evaluation.decision.as_str().to_string(),
        warn_count: count_to_i32(evaluation.warn_count)?,
        block_count: count_to_i32(evaluation.block_count)?,
        hit_count: count_to_i32(evaluation.hit_count)?,
        request_token,
    };
    let signal_inputs = evaluation
        .signals
        .iter()
        .map(signal_input)
        .collect::<AppResult<Vec<_>>>()?;

    let stored = EvaluationRunRepo::create_with_signals(pool, &run_input, &signal_inputs).await?;

    tracing::info!(
        submission_id,
        run_id = stored.run.id,
        scope = %scope,
        validated = evaluation.validated,
        warn_count = evaluation.warn_count,
        block_count = evaluation.block_count,
        "Evaluation run stored",
    );

    if let Some(file_id) = submission.header.archive_file_id {
        let summary = summary_payload(stored.run.id, &evaluation);
        if let Err(e) = mirror.mirror(file_id, submission_id, &summary).await {
            tracing::warn!(
                submission_id,
                run_id = stored.run.id,
                file_id,
                error = %e,
                "Failed to mirror evaluation summary",
            );
        }
    }

    Ok(EvaluationOutcome {
        run_id: stored.run.id,
        evaluation,
        run: stored.run,
    })
}

fn signal_input(signal: &Signal) -> AppResult<CreateEvaluationSignal> {
    let payload = serde_json::to_value(&signal.payload)
        .map_err(|e| AppError::InternalError(format!("Failed to encode signal payload: {e}")))?;
    Ok(CreateEvaluationSignal {
        code: signal.code.clone(),
        severity: signal.severity.as_str().to_string(),
        row_ids: signal.row_ids.clone(),
        payload,
    })
}

fn summary_payload(run_id: DbId, evaluation: &Evaluation) -> serde_json::Value {
    serde_json::json!({
        "run_id": run_id,
        "scope": evaluation.scope,
        "validated": evaluation.validated,
        "decision": evaluation.decision,
        "warn_count": evaluation.warn_count,
        "block_count": evaluation.block_count,
        "codes": evaluation.signals.iter().map(|s| s.code.as_str()).collect::<Vec<_>>(),
    })
}

fn count_to_i32(count: usize) -> AppResult<i32> {
    i32::try_from(count)
        .map_err(|_| AppError::InternalError(format!("Count {count} overflows i32")))
}
