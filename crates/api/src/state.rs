use std::sync::Arc;

use cablewatch_core::validation::rules::RuleCatalog;

use crate::config::ServerConfig;
use crate::engine::evaluation::EvaluationMirror;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cablewatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Rule configuration handed to every evaluation.
    pub catalog: Arc<RuleCatalog>,
    /// Where evaluation summaries are mirrored for durable files.
    pub mirror: Arc<dyn EvaluationMirror>,
}

impl AppState {
    /// State with the default rule catalog and the database-backed mirror.
    pub fn new(pool: cablewatch_db::DbPool, config: ServerConfig) -> Self {
        let catalog = RuleCatalog::default().with_sample_limit(config.signal_sample_limit);
        let mirror = crate::engine::evaluation::FileEventMirror::new(pool.clone());
        Self {
            pool,
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            mirror: Arc::new(mirror),
        }
    }
}
