//! Registration and login.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use stockroom_core::validation::validate_credentials;
use tracing::info;

use super::ApiJson;
use crate::error::ApiError;
use crate::AppState;

/// Body of `POST /api/register` and `POST /api/login`.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub user_id: String,
    pub username: String,
    /// Session token for `Authorization: Bearer`.
    pub token: String,
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let (username, password) = validate_credentials(body.username, body.password)?;

    let account = state.store.accounts().register(&username, &password).await?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully",
        user_id: account.id,
    }))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = validate_credentials(body.username, body.password)?;

    let account = state
        .store
        .accounts()
        .verify_credentials(&username, &password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let token = state.jwt.generate_session_token(&account.id, &account.username)?;
    info!(account_id = %account.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful",
        user_id: account.id,
        username: account.username,
        token,
    }))
}
