//! Sales reports (`/api/reports/*/{user_id}`). Read-only views over the
//! account's invoices.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use stockroom_core::{ProductSummary, SaleRecord};

use crate::auth::Session;
use crate::error::ApiError;
use crate::AppState;

/// Query string of `GET /api/reports/sales/{user_id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    /// Case-insensitive substring of the product name.
    pub product_name: Option<String>,
}

/// `GET /api/reports/sales/{user_id}?productName=`
pub async fn sales_report(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
    Query(query): Query<SalesQuery>,
) -> Result<Json<Vec<SaleRecord>>, ApiError> {
    session.authorize(&user_id)?;

    let invoices = state.store.invoices().list(&user_id).await;
    Ok(Json(stockroom_core::sales_report(
        &invoices,
        query.product_name.as_deref(),
    )))
}

/// `GET /api/reports/summary/{user_id}`
pub async fn sales_summary(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    session.authorize(&user_id)?;

    let invoices = state.store.invoices().list(&user_id).await;
    Ok(Json(stockroom_core::sales_summary(&invoices)))
}
