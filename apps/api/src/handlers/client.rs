//! Client directory handlers (`/api/clients/{user_id}`).

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use stockroom_core::validation::client_fields;
use stockroom_core::{Client, ClientInput};

use super::{ApiJson, MessageResponse};
use crate::auth::Session;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub message: &'static str,
    pub client: Client,
}

/// `GET /api/clients/{user_id}`
pub async fn list_clients(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Client>>, ApiError> {
    session.authorize(&user_id)?;
    Ok(Json(state.store.clients().list(&user_id).await))
}

/// `GET /api/clients/{user_id}/{client_id}`
pub async fn get_client(
    State(state): State<AppState>,
    session: Session,
    Path((user_id, client_id)): Path<(String, String)>,
) -> Result<Json<Client>, ApiError> {
    session.authorize(&user_id)?;
    Ok(Json(state.store.clients().get(&user_id, &client_id).await?))
}

/// `POST /api/clients/{user_id}`
pub async fn create_client(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
    ApiJson(body): ApiJson<ClientInput>,
) -> Result<Json<ClientResponse>, ApiError> {
    session.authorize(&user_id)?;
    let fields = client_fields(body)?;

    let client = state.store.clients().create(&user_id, fields).await?;

    Ok(Json(ClientResponse {
        message: "Client added successfully",
        client,
    }))
}

/// `PUT /api/clients/{user_id}/{client_id}`
pub async fn update_client(
    State(state): State<AppState>,
    session: Session,
    Path((user_id, client_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<ClientInput>,
) -> Result<Json<ClientResponse>, ApiError> {
    session.authorize(&user_id)?;
    let client = state
        .store
        .clients()
        .update(&user_id, &client_id, body)
        .await?;

    Ok(Json(ClientResponse {
        message: "Client updated successfully",
        client,
    }))
}

/// `DELETE /api/clients/{user_id}/{client_id}`
pub async fn delete_client(
    State(state): State<AppState>,
    session: Session,
    Path((user_id, client_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    session.authorize(&user_id)?;
    state.store.clients().delete(&user_id, &client_id).await?;

    Ok(Json(MessageResponse {
        message: "Client deleted successfully",
    }))
}
