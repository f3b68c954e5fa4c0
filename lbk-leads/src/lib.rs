//! lbk-leads library interface
//!
//! Lead import pipeline, session context and the local HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use crate::error::{ApiError, ApiResult, LeadsError, LeadsResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::session::SessionManager;

/// Application state shared across handlers
///
/// The session sits behind a single lock: every request that touches the
/// corpus runs to completion before the next one starts.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<SessionManager>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::account_routes())
        .merge(api::lead_routes())
        .merge(api::file_routes())
        .merge(api::export_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
