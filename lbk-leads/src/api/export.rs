//! CSV export endpoint

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::{ApiResult, AppState};

/// GET /export
///
/// Returns the corpus as a CSV attachment named `leads_export_YYYY-MM-DD.csv`.
///
/// **Errors:**
/// - 401 Unauthorized: no session
/// - 404 Not Found: no leads to export
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let export = state.session.lock().await.export()?;

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

pub fn export_routes() -> Router<AppState> {
    Router::new().route("/export", get(export_csv))
}
