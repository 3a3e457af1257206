//! HTTP route handlers.
//!
//! A thin JSON surface over the cart/checkout core. Carts are scoped to
//! the session: the session stores only a cart id, the cart itself lives
//! in process memory.

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Session keys used by the storefront.
pub(crate) mod session_keys {
    /// Cart identifier for the active session.
    pub const CART_ID: &str = "cart_id";
}

/// Build the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::show))
        .route("/cart", get(cart::show))
        .route("/cart/count", get(cart::count))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/clear", post(cart::clear))
        .route("/checkout", post(checkout::submit))
        .route("/orders", get(orders::list))
}
