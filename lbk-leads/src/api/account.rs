//! Account endpoints
//!
//! - POST /account/signup
//! - POST /account/login
//! - POST /account/logout
//! - GET  /account

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::LeadsError;
use crate::models::AccountSummary;
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub account: AccountSummary,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /account/signup
///
/// **Errors:**
/// - 400 Bad Request: missing name, email or password
/// - 409 Conflict: account already exists
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account = state
        .session
        .lock()
        .await
        .sign_up(&request.name, &request.email, &request.password)
        .await?;

    Ok(Json(AccountResponse {
        account,
        message: "Account created successfully!".to_string(),
    }))
}

/// POST /account/login
///
/// **Errors:**
/// - 404 Not Found: no account for this email
/// - 401 Unauthorized: wrong password
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let account = state
        .session
        .lock()
        .await
        .sign_in(&request.email, &request.password)
        .await?;

    Ok(Json(AccountResponse {
        account,
        message: "Welcome back!".to_string(),
    }))
}

/// POST /account/logout
pub async fn sign_out(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    state.session.lock().await.sign_out().await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /account
pub async fn current_account(State(state): State<AppState>) -> ApiResult<Json<AccountSummary>> {
    let account = state
        .session
        .lock()
        .await
        .account()
        .ok_or(LeadsError::NotSignedIn)?;

    Ok(Json(account))
}

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(current_account))
        .route("/account/signup", post(sign_up))
        .route("/account/login", post(sign_in))
        .route("/account/logout", post(sign_out))
}
