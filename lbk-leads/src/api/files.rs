//! Imported file endpoints
//!
//! - GET    /files
//! - POST   /files/import
//! - DELETE /files/:index

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::models::{FileOutcome, ImportedFile};
use crate::services::RawFile;
use crate::{ApiError, ApiResult, AppState};

/// One uploaded file
#[derive(Debug, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content_base64: String,
}

/// Request payload for POST /files/import
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub files: Vec<UploadedFile>,
    /// Reprocess content that is already registered
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub files: Vec<FileOutcome>,
    pub leads_added: usize,
    pub duplicates_removed: usize,
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RemoveFileResponse {
    pub file: ImportedFile,
    pub leads_removed: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// GET /files
pub async fn list_files(State(state): State<AppState>) -> ApiResult<Json<Vec<ImportedFile>>> {
    let session = state.session.lock().await;
    Ok(Json(session.corpus()?.files.clone()))
}

/// POST /files/import
///
/// **Request:** `{"files": [{"name": "a.csv", "content_base64": "..."}], "force": false}`
///
/// Per-file failures are reported in the response body, not as an error
/// status.
///
/// **Errors:**
/// - 400 Bad Request: empty file list or undecodable base64 payload
/// - 401 Unauthorized: no session
pub async fn import_files(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    if request.files.is_empty() {
        return Err(ApiError::BadRequest("No files provided".to_string()));
    }

    let files = request
        .files
        .into_iter()
        .map(|file| {
            let bytes = STANDARD.decode(file.content_base64.trim()).map_err(|e| {
                ApiError::BadRequest(format!("Invalid base64 content for \"{}\": {}", file.name, e))
            })?;
            Ok(RawFile::new(file.name, bytes))
        })
        .collect::<ApiResult<Vec<_>>>()?;

    let persisted = state
        .session
        .lock()
        .await
        .import_files(files, request.force)
        .await?;
    let result = persisted.value;

    Ok(Json(ImportResponse {
        leads_added: result.leads_added(),
        duplicates_removed: result.duplicates_removed(),
        messages: result.messages(),
        files: result.files,
        warning: persisted.warning,
    }))
}

/// DELETE /files/:index
///
/// Removes the registry entry and every lead imported from it.
pub async fn remove_file(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<RemoveFileResponse>> {
    let persisted = state.session.lock().await.remove_file(index).await?;
    let removed = persisted.value;

    Ok(Json(RemoveFileResponse {
        message: format!("File \"{}\" removed", removed.file.name),
        file: removed.file,
        leads_removed: removed.leads_removed,
        warning: persisted.warning,
    }))
}

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(list_files))
        .route("/files/import", post(import_files))
        .route("/files/:index", delete(remove_file))
}
