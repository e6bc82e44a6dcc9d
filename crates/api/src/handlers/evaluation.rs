//! Handlers for submission evaluations.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use cablewatch_core::error::CoreError;
use cablewatch_core::types::DbId;
use cablewatch_core::validation::rules::EvaluationScope;
use cablewatch_db::models::evaluation::{EvaluationRun, EvaluationRunWithSignals};
use cablewatch_db::repositories::{EvaluationRunRepo, SubmissionRepo};
use serde::Deserialize;

use crate::engine::evaluation::{run_evaluation, EvaluationOutcome};
use crate::error::AppResult;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

/// Request body for running an evaluation.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub scope: EvaluationScope,
    /// Stored on the run for tracing. Repeating a token still creates a new run.
    pub request_token: Option<uuid::Uuid>,
}

/// POST /api/v1/submissions/{id}/evaluations
///
/// Evaluate the submission for the given scope and persist the run. A
/// blocked decision is still a successful call; `validated` tells the caller
/// whether its workflow step may proceed.
pub async fn create_evaluation(
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> AppResult<Created<EvaluationOutcome>> {
    let Json(input) = body?;
    let outcome = run_evaluation(
        &state.pool,
        &state.catalog,
        state.mirror.as_ref(),
        submission_id,
        input.scope,
        input.request_token,
    )
    .await?;
    Ok(created(outcome))
}

/// GET /api/v1/evaluations/{run_id}
pub async fn get_evaluation(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<Json<DataResponse<EvaluationRunWithSignals>>> {
    let run = EvaluationRunRepo::find_with_signals(&state.pool, run_id)
        .await?
        .ok_or_else(|| CoreError::not_found("EvaluationRun", run_id))?;
    Ok(Json(DataResponse { data: run }))
}

/// GET /api/v1/submissions/{id}/evaluations
///
/// Runs for one submission, newest first.
pub async fn list_evaluations(
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<EvaluationRun>>>> {
    SubmissionRepo::find_header(&state.pool, submission_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Submission", submission_id))?;
    let runs = EvaluationRunRepo::list_for_submission(&state.pool, submission_id).await?;
    Ok(Json(DataResponse { data: runs }))
}
