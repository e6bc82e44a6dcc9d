//! Route definitions for snapshots.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::snapshot;
use crate::state::AppState;

/// ```text
/// POST   /worksites/{id}/snapshots         -> create_snapshot
/// GET    /worksites/{id}/snapshots/active  -> get_active_snapshot
/// GET    /snapshots/{id}/events            -> list_snapshot_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/worksites/{id}/snapshots", post(snapshot::create_snapshot))
        .route(
            "/worksites/{id}/snapshots/active",
            get(snapshot::get_active_snapshot),
        )
        .route("/snapshots/{id}/events", get(snapshot::list_snapshot_events))
}
