//! Order history route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::orders::Order;
use crate::state::AppState;

/// List submitted orders, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().list().await?))
}
