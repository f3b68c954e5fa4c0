//! Lead listing and status endpoints

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::models::Lead;
use crate::services::{filter_leads, LeadFilter, LeadStats};
use crate::{ApiResult, AppState};

/// Query parameters for GET /leads
#[derive(Debug, Default, Deserialize)]
pub struct LeadsQuery {
    #[serde(default)]
    pub filter: LeadFilter,
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
    /// Counters over the whole corpus, not just the filtered list
    pub stats: LeadStats,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub lead: Lead,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// GET /leads?filter=all|todo|progress|done&search=...
pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<LeadsQuery>,
) -> ApiResult<Json<LeadsResponse>> {
    let session = state.session.lock().await;
    let corpus = session.corpus()?;

    let leads = filter_leads(&corpus.leads, query.filter, &query.search)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(LeadsResponse {
        leads,
        stats: LeadStats::from_leads(&corpus.leads),
    }))
}

/// POST /leads/:id/toggle
///
/// Advances the lead to its next status.
///
/// **Errors:**
/// - 401 Unauthorized: no session
/// - 404 Not Found: unknown lead id
pub async fn toggle_lead(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<ToggleResponse>> {
    let persisted = state.session.lock().await.toggle_lead(id).await?;

    Ok(Json(ToggleResponse {
        message: persisted.value.status.label().to_string(),
        lead: persisted.value,
        warning: persisted.warning,
    }))
}

pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route("/leads", get(list_leads))
        .route("/leads/:id/toggle", post(toggle_lead))
}
