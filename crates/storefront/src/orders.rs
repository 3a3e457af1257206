//! Order records and the append-only order log.
//!
//! Orders are immutable snapshots: once appended, their items and total
//! never change. The log lives in a single key-value slot as a JSON
//! array, newest first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use karvaan_core::{OrderId, OrderStatus};

use crate::cart::CartItem;
use crate::checkout::CustomerInfo;
use crate::storage::{KeyValueStore, StorageError};

/// Slot key the order log is stored under.
pub const ORDERS_KEY: &str = "orders";

/// An immutable record derived from the cart at the moment of checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    /// Snapshot of the cart items at submission time; later cart
    /// mutations do not affect it.
    pub items: Vec<CartItem>,
    /// Subtotal plus 10% tax, rounded to cents.
    pub total: Decimal,
    pub customer: CustomerInfo,
    pub status: OrderStatus,
}

/// Append-only log of submitted orders.
///
/// The slot is accessed read-then-write with no compare-and-swap, so
/// concurrent writers race last-write-wins.
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn KeyValueStore>,
}

impl OrderRepository {
    /// Create a repository over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Prepend `order` to the persisted list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slot cannot be read or written.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn append(&self, order: Order) -> Result<(), StorageError> {
        let mut orders = self.list().await?;
        orders.insert(0, order);

        let json = serde_json::to_string(&orders)?;
        self.store.put(ORDERS_KEY, &json).await
    }

    /// All persisted orders, newest first.
    ///
    /// An absent slot yields an empty list. An unparsable slot also
    /// yields an empty list (logged, never fatal); the next append
    /// overwrites it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the slot itself cannot be read.
    pub async fn list(&self) -> Result<Vec<Order>, StorageError> {
        let Some(raw) = self.store.get(ORDERS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(orders) => Ok(orders),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unparsable order log");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn order(id: &str) -> Order {
        Order {
            id: OrderId::new(id),
            date: Utc::now(),
            items: Vec::new(),
            total: Decimal::new(2200, 2),
            customer: CustomerInfo::default(),
            status: OrderStatus::Processing,
        }
    }

    fn repository() -> OrderRepository {
        OrderRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_list_is_empty_when_slot_absent() {
        assert!(repository().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_prepends_newest_first() {
        let repository = repository();

        repository.append(order("ORD-1")).await.unwrap();
        repository.append(order("ORD-2")).await.unwrap();

        let orders = repository.list().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId::new("ORD-2"));
        assert_eq!(orders[1].id, OrderId::new("ORD-1"));
    }

    #[tokio::test]
    async fn test_corrupt_slot_reads_as_empty_and_recovers() {
        let store = Arc::new(MemoryStore::new());
        store.put(ORDERS_KEY, "definitely not json").await.unwrap();

        let repository = OrderRepository::new(store);
        assert!(repository.list().await.unwrap().is_empty());

        repository.append(order("ORD-1")).await.unwrap();
        let orders = repository.list().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, OrderId::new("ORD-1"));
    }

    #[tokio::test]
    async fn test_order_roundtrips_through_json() {
        let repository = repository();
        repository.append(order("ORD-9")).await.unwrap();

        let orders = repository.list().await.unwrap();
        assert_eq!(orders[0].total, Decimal::new(2200, 2));
        assert_eq!(orders[0].status, OrderStatus::Processing);
    }
}
