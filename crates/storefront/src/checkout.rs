//! Checkout workflow: validated, one-shot conversion of a cart into an
//! order.
//!
//! Validation fails closed with no state change. On success the workflow
//! suspends for a configurable processing delay, then commits: persist
//! the order snapshot, clear the cart, and yield the new order id for
//! the confirmation view. Dropping the future during the delay aborts
//! the submission entirely; once the commit starts it runs to
//! completion.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use karvaan_core::{Country, OrderId, OrderStatus, PaymentMethod};

use crate::cart::CartStore;
use crate::ids::IdGenerator;
use crate::orders::{Order, OrderRepository};
use crate::storage::StorageError;

/// Validated contact and shipping details captured at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Exactly 11 digits, no separators.
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: Country,
    pub payment_method: PaymentMethod,
}

/// Form validation failures, surfaced to the user synchronously.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("phone number must be exactly 11 digits")]
    InvalidPhone,
}

/// Errors that can abort a checkout submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form failed validation; nothing was mutated.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An empty cart cannot enter checkout.
    #[error("cart is empty")]
    EmptyCart,

    /// The order could not be persisted.
    #[error("failed to persist order: {0}")]
    Storage(#[from] StorageError),
}

/// Order total = subtotal × 1.10 (10% tax, free shipping), in cents.
fn order_total(subtotal: Decimal) -> Decimal {
    (subtotal * Decimal::new(110, 2)).round_dp(2)
}

fn validate(form: &CustomerInfo) -> Result<(), ValidationError> {
    let required = [
        ("firstName", &form.first_name),
        ("email", &form.email),
        ("address", &form.address),
        ("phone", &form.phone),
    ];
    for (name, value) in required {
        if value.is_empty() {
            return Err(ValidationError::MissingField(name));
        }
    }

    if form.phone.len() != 11 || !form.phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(())
}

/// The validated, one-shot workflow converting a cart into an [`Order`].
#[derive(Clone)]
pub struct CheckoutWorkflow {
    orders: OrderRepository,
    ids: Arc<dyn IdGenerator>,
    processing_delay: Duration,
}

impl CheckoutWorkflow {
    /// Create a workflow committing to `orders`.
    #[must_use]
    pub fn new(
        orders: OrderRepository,
        ids: Arc<dyn IdGenerator>,
        processing_delay: Duration,
    ) -> Self {
        Self {
            orders,
            ids,
            processing_delay,
        }
    }

    /// Validate `form` and convert the cart into a persisted order.
    ///
    /// On success the cart is cleared and the new order id is returned
    /// for confirmation navigation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart,
    /// [`CheckoutError::Validation`] for a rejected form (no state is
    /// mutated in either case), or [`CheckoutError::Storage`] if the
    /// order cannot be persisted.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        form: CustomerInfo,
    ) -> Result<OrderId, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        validate(&form)?;

        // Deliberate UX pause, not contention. Suspend point: dropping
        // the future here aborts the submission with no state change.
        tokio::time::sleep(self.processing_delay).await;

        let order = Order {
            id: self.ids.order_id(),
            date: Utc::now(),
            items: cart.items().to_vec(),
            total: order_total(cart.total()),
            customer: form,
            status: OrderStatus::Processing,
        };
        let order_id = order.id.clone();

        self.orders.append(order).await?;
        cart.clear();

        tracing::info!(order_id = %order_id, "order submitted");
        Ok(order_id)
    }
}
