//! Identifier generation for orders and fallback cart item ids.
//!
//! Generation is behind the [`IdGenerator`] port so tests can supply
//! deterministic values and production ids stay unique under rapid
//! duplicate submissions.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use karvaan_core::{OrderId, ProductId};

/// Port for minting order ids and fallback cart item ids.
pub trait IdGenerator: Send + Sync {
    /// A fresh order id, unique across the process lifetime.
    fn order_id(&self) -> OrderId;

    /// A fresh id for a cart item whose catalog record carried none.
    fn item_id(&self) -> ProductId;
}

/// Time-seeded generator.
///
/// Order ids embed the submission timestamp plus a process-wide sequence
/// number, so two submissions landing within the same millisecond still
/// get distinct ids.
#[derive(Debug)]
pub struct SystemIdGenerator {
    order_sequence: AtomicI64,
    item_sequence: AtomicI64,
}

impl SystemIdGenerator {
    /// Create a generator seeded from the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order_sequence: AtomicI64::new(0),
            item_sequence: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }
}

impl Default for SystemIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SystemIdGenerator {
    fn order_id(&self) -> OrderId {
        let sequence = self.order_sequence.fetch_add(1, Ordering::Relaxed);
        OrderId::new(format!(
            "ORD-{}-{sequence}",
            Utc::now().timestamp_millis()
        ))
    }

    fn item_id(&self) -> ProductId {
        ProductId::new(self.item_sequence.fetch_add(1, Ordering::Relaxed))
    }
}

/// Deterministic generator for tests.
#[derive(Debug)]
pub struct FixedIdGenerator {
    prefix: String,
    next: AtomicI64,
}

impl FixedIdGenerator {
    /// Create a generator yielding `{prefix}-1`, `{prefix}-2`, ...
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicI64::new(1),
        }
    }
}

impl IdGenerator for FixedIdGenerator {
    fn order_id(&self) -> OrderId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        OrderId::new(format!("{}-{n}", self.prefix))
    }

    fn item_id(&self) -> ProductId {
        ProductId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_order_ids_are_distinct_under_rapid_calls() {
        let ids = SystemIdGenerator::new();
        let first = ids.order_id();
        let second = ids.order_id();
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("ORD-"));
    }

    #[test]
    fn test_system_item_ids_are_distinct() {
        let ids = SystemIdGenerator::new();
        assert_ne!(ids.item_id(), ids.item_id());
    }

    #[test]
    fn test_fixed_generator_is_deterministic() {
        let ids = FixedIdGenerator::new("ORD-TEST");
        assert_eq!(ids.order_id(), OrderId::new("ORD-TEST-1"));
        assert_eq!(ids.order_id(), OrderId::new("ORD-TEST-2"));
        assert_eq!(ids.item_id(), ProductId::new(3));
    }
}
