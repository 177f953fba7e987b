//! Product catalog handlers (`/api/inventory/{user_id}`).

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use stockroom_core::validation::product_fields;
use stockroom_core::{Product, ProductInput};

use super::{ApiJson, MessageResponse};
use crate::auth::Session;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: &'static str,
    pub product: Product,
}

/// `GET /api/inventory/{user_id}`
pub async fn list_products(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    session.authorize(&user_id)?;
    Ok(Json(state.store.products().list(&user_id).await))
}

/// `GET /api/inventory/{user_id}/{product_id}`
pub async fn get_product(
    State(state): State<AppState>,
    session: Session,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<Json<Product>, ApiError> {
    session.authorize(&user_id)?;
    Ok(Json(state.store.products().get(&user_id, &product_id).await?))
}

/// `POST /api/inventory/{user_id}`
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
    ApiJson(body): ApiJson<ProductInput>,
) -> Result<Json<ProductResponse>, ApiError> {
    session.authorize(&user_id)?;
    let fields = product_fields(body)?;

    let product = state.store.products().create(&user_id, fields).await?;

    Ok(Json(ProductResponse {
        message: "Product added successfully",
        product,
    }))
}

/// `PUT /api/inventory/{user_id}/{product_id}`
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    Path((user_id, product_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<ProductInput>,
) -> Result<Json<ProductResponse>, ApiError> {
    session.authorize(&user_id)?;
    let product = state
        .store
        .products()
        .update(&user_id, &product_id, body)
        .await?;

    Ok(Json(ProductResponse {
        message: "Product updated successfully",
        product,
    }))
}

/// `DELETE /api/inventory/{user_id}/{product_id}`
pub async fn delete_product(
    State(state): State<AppState>,
    session: Session,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    session.authorize(&user_id)?;
    state.store.products().delete(&user_id, &product_id).await?;

    Ok(Json(MessageResponse {
        message: "Product deleted successfully",
    }))
}
