pub mod evaluation;
pub mod health;
pub mod snapshot;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /submissions/{id}/evaluations        run (POST), list (GET)
/// /evaluations/{run_id}                run with signals
///
/// /worksites/{id}/snapshots            ingest (POST)
/// /worksites/{id}/snapshots/active     highest version
/// /snapshots/{id}/events               transition events
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(evaluation::router())
        .merge(snapshot::router())
}
