//! Shared domain types.

pub mod country;
pub mod id;
pub mod payment;
pub mod status;

pub use country::Country;
pub use id::{OrderId, ProductId};
pub use payment::PaymentMethod;
pub use status::OrderStatus;
