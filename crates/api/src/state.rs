use std::sync::Arc;

use crate::config::ServerConfig;
use crate::processing::Orchestrator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: derain_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Drives one upload from intake to a terminal job state.
    pub orchestrator: Arc<Orchestrator>,
}
