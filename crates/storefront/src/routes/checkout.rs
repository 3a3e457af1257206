//! Checkout route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use karvaan_core::OrderId;

use crate::checkout::CustomerInfo;
use crate::error::Result;
use crate::state::AppState;

/// Successful checkout response.
///
/// The order id is the only coupling to routing: the client uses it as a
/// query parameter for the confirmation view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: OrderId,
}

/// Submit the checkout form for the session's cart.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CustomerInfo>,
) -> Result<Json<CheckoutResponse>> {
    let entry = super::cart::session_cart(&state, &session).await?;
    let mut cart = entry.cart.lock().await;

    let order_id = state.checkout().submit(&mut cart, form).await?;
    Ok(Json(CheckoutResponse { order_id }))
}
