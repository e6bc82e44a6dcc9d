//! Route definitions for evaluations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::evaluation;
use crate::state::AppState;

/// ```text
/// POST   /submissions/{id}/evaluations  -> create_evaluation
/// GET    /submissions/{id}/evaluations  -> list_evaluations
/// GET    /evaluations/{run_id}          -> get_evaluation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/submissions/{id}/evaluations",
            post(evaluation::create_evaluation).get(evaluation::list_evaluations),
        )
        .route("/evaluations/{run_id}", get(evaluation::get_evaluation))
}
