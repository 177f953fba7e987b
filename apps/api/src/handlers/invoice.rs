//! Invoice handlers (`/api/invoices/{user_id}`).

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use stockroom_core::{Invoice, Order, OrderInput};

use super::ApiJson;
use crate::auth::Session;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub message: &'static str,
    pub invoice: Invoice,
    /// Always `true`: stock is decremented in the same step.
    pub inventory_updated: bool,
}

/// `GET /api/invoices/{user_id}`
pub async fn list_invoices(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    session.authorize(&user_id)?;
    Ok(Json(state.store.invoices().list(&user_id).await))
}

/// `GET /api/invoices/{user_id}/{invoice_id}`
pub async fn get_invoice(
    State(state): State<AppState>,
    session: Session,
    Path((user_id, invoice_id)): Path<(String, String)>,
) -> Result<Json<Invoice>, ApiError> {
    session.authorize(&user_id)?;
    Ok(Json(state.store.invoices().get(&user_id, &invoice_id).await?))
}

/// `POST /api/invoices/{user_id}`
///
/// ## Failure Statuses
/// - 400: missing `clientId`, empty `items`, bad quantity, insufficient stock
/// - 404: unknown client, product, or account collections
pub async fn create_invoice(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
    ApiJson(body): ApiJson<OrderInput>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    session.authorize(&user_id)?;
    let order = Order::from_input(body)?;

    let invoice = state.store.invoices().create(&user_id, &order).await?;

    Ok(Json(InvoiceResponse {
        message: "Invoice created successfully",
        invoice,
        inventory_updated: true,
    }))
}
