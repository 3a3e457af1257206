//! Cart route handlers.
//!
//! The session stores a cart id; the cart aggregate itself lives in
//! process memory (see [`crate::state::AppState::session_cart`]). Every
//! mutation returns the fresh cart view, including the current toast.

use std::sync::Arc;

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use karvaan_core::ProductId;

use crate::cart::{CartItem, CartStore};
use crate::error::{AppError, Result};
use crate::state::{AppState, SessionCart};

use super::session_keys;

/// Cart display data returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub count: u64,
    /// The transient feedback message, if one is currently displayed.
    pub toast: Option<String>,
}

impl CartView {
    fn render(cart: &CartStore, toast: Option<String>) -> Self {
        Self {
            items: cart.items().to_vec(),
            subtotal: cart.total(),
            count: cart.count(),
            toast,
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<Uuid> {
    session
        .get::<Uuid>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Set the cart ID in the session.
async fn set_cart_id(
    session: &Session,
    cart_id: Uuid,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART_ID, cart_id).await
}

/// Fetch (or lazily create) the session's cart.
pub(super) async fn session_cart(state: &AppState, session: &Session) -> Result<Arc<SessionCart>> {
    let id = match get_cart_id(session).await {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4();
            set_cart_id(session, id)
                .await
                .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;
            id
        }
    };
    Ok(state.session_cart(id))
}

// =============================================================================
// Request Types
// =============================================================================

/// Add to cart request data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
}

/// Update cart request data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// Remove from cart request data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart contents.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let entry = session_cart(&state, &session).await?;
    let cart = entry.cart.lock().await;
    Ok(Json(CartView::render(&cart, entry.notifier.current())))
}

/// Cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Json<CartCount>> {
    let entry = session_cart(&state, &session).await?;
    let cart = entry.cart.lock().await;
    Ok(Json(CartCount {
        count: cart.count(),
    }))
}

/// Add a catalog product to the cart.
///
/// The product is fetched from the catalog so the cart captures its
/// current price; absent fields are normalized to defaults.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get_product(ProductId::new(request.product_id))
        .await?;

    let entry = session_cart(&state, &session).await?;
    let mut cart = entry.cart.lock().await;
    cart.add(product);
    Ok(Json(CartView::render(&cart, entry.notifier.current())))
}

/// Update a cart item's quantity.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let entry = session_cart(&state, &session).await?;
    let mut cart = entry.cart.lock().await;
    cart.update_quantity(ProductId::new(request.product_id), request.quantity);
    Ok(Json(CartView::render(&cart, entry.notifier.current())))
}

/// Remove an item from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let entry = session_cart(&state, &session).await?;
    let mut cart = entry.cart.lock().await;
    cart.remove(ProductId::new(request.product_id));
    Ok(Json(CartView::render(&cart, entry.notifier.current())))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let entry = session_cart(&state, &session).await?;
    let mut cart = entry.cart.lock().await;
    cart.clear();
    Ok(Json(CartView::render(&cart, entry.notifier.current())))
}
