//! In-memory cart aggregate.
//!
//! A [`CartStore`] owns the line items for one session. All operations
//! are synchronous and total: unknown ids are benign no-ops, and a
//! mutation that would drop a quantity below 1 removes the line instead.
//! Mutations post feedback through the injected [`NotificationSink`];
//! the sink is a side effect only and never affects cart state.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use karvaan_core::ProductId;

use crate::catalog::ProductRecord;
use crate::ids::IdGenerator;
use crate::notify::NotificationSink;

/// One product line entry with a captured price and a quantity.
///
/// The price is a snapshot taken when the product first entered the cart;
/// it is never re-fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub thumbnail: String,
    pub category: String,
    pub brand: String,
    pub discount_percentage: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Build a cart line from a catalog record, applying defaults for
    /// absent fields. `fallback_id` is only invoked when the record
    /// carries no id.
    fn from_record(product: ProductRecord, fallback_id: impl FnOnce() -> ProductId) -> Self {
        Self {
            id: product.id.unwrap_or_else(fallback_id),
            title: product.title.unwrap_or_else(|| "Unknown Product".to_owned()),
            price: product.price.unwrap_or_default(),
            thumbnail: product.thumbnail.unwrap_or_default(),
            category: product.category.unwrap_or_else(|| "General".to_owned()),
            brand: product.brand.unwrap_or_else(|| "Unknown Brand".to_owned()),
            discount_percentage: product.discount_percentage.unwrap_or_default(),
            quantity: 1,
        }
    }

    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The mutable collection of cart items for one session.
///
/// Items keep insertion order (relevant for display, irrelevant for
/// totals). At most one item exists per product id.
pub struct CartStore {
    items: Vec<CartItem>,
    notifier: Arc<dyn NotificationSink>,
    ids: Arc<dyn IdGenerator>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new(notifier: Arc<dyn NotificationSink>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            items: Vec::new(),
            notifier,
            ids,
        }
    }

    /// Add a catalog product to the cart.
    ///
    /// A product already in the cart has its quantity incremented and
    /// keeps the originally captured price and metadata; a new product
    /// is appended with quantity 1.
    pub fn add(&mut self, product: ProductRecord) {
        let item = CartItem::from_record(product, || self.ids.item_id());

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            self.notifier
                .post(&format!("\"{}\" quantity increased!", item.title));
        } else {
            self.notifier
                .post(&format!("\"{}\" added to cart!", item.title));
            self.items.push(item);
        }
    }

    /// Remove the item with `id`. Absent ids are a silent no-op.
    pub fn remove(&mut self, id: ProductId) {
        if let Some(index) = self.items.iter().position(|i| i.id == id) {
            let removed = self.items.remove(index);
            self.notifier
                .post(&format!("\"{}\" removed from cart!", removed.title));
        }
    }

    /// Set the quantity of the item with `id`.
    ///
    /// A quantity below 1 removes the item instead. Unknown ids are a
    /// silent no-op; setting the current quantity posts no notification.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove(id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return;
        };

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if quantity != item.quantity {
            item.quantity = quantity;
            let title = item.title.clone();
            self.notifier
                .post(&format!("\"{title}\" quantity updated to {quantity}!"));
        }
    }

    /// Empty the cart. Notifies only if the cart held any items.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.notifier.post("Cart cleared!");
        }
        self.items.clear();
    }

    /// Sum of price × quantity over all items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all items (for badge display).
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// The items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ids::FixedIdGenerator;
    use crate::notify::{NoopSink, RecordingSink};

    fn record(id: i64, title: &str, price: i64) -> ProductRecord {
        ProductRecord {
            id: Some(ProductId::new(id)),
            title: Some(title.to_owned()),
            price: Some(Decimal::from(price)),
            ..Default::default()
        }
    }

    fn cart_with_recorder() -> (CartStore, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let cart = CartStore::new(sink.clone(), Arc::new(FixedIdGenerator::new("ITEM")));
        (cart, sink)
    }

    #[test]
    fn test_add_new_item_then_increment() {
        let (mut cart, sink) = cart_with_recorder();

        cart.add(record(1, "Mango Crate", 10));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.add(record(1, "Mango Crate", 10));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].price, Decimal::from(10));

        assert_eq!(
            sink.messages(),
            vec![
                "\"Mango Crate\" added to cart!".to_owned(),
                "\"Mango Crate\" quantity increased!".to_owned(),
            ]
        );
    }

    #[test]
    fn test_add_keeps_originally_captured_price() {
        let (mut cart, _sink) = cart_with_recorder();

        cart.add(record(1, "Mango Crate", 10));
        // Same id, different catalog price: the snapshot wins.
        cart.add(record(1, "Mango Crate", 99));

        assert_eq!(cart.items()[0].price, Decimal::from(10));
        assert_eq!(cart.total(), Decimal::from(20));
    }

    #[test]
    fn test_add_normalizes_missing_fields() {
        let (mut cart, _sink) = cart_with_recorder();

        cart.add(ProductRecord::default());

        let item = &cart.items()[0];
        assert_eq!(item.id, ProductId::new(1)); // from the fixed generator
        assert_eq!(item.title, "Unknown Product");
        assert_eq!(item.price, Decimal::ZERO);
        assert_eq!(item.thumbnail, "");
        assert_eq!(item.category, "General");
        assert_eq!(item.brand, "Unknown Brand");
        assert_eq!(item.discount_percentage, Decimal::ZERO);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        for below_one in [0, -1] {
            let (mut cart, sink) = cart_with_recorder();
            cart.add(record(1, "Chai Set", 5));

            cart.update_quantity(ProductId::new(1), below_one);

            assert!(cart.is_empty());
            assert_eq!(
                sink.messages().last().unwrap(),
                "\"Chai Set\" removed from cart!"
            );
        }
    }

    #[test]
    fn test_update_quantity_notifies_only_on_change() {
        let (mut cart, sink) = cart_with_recorder();
        cart.add(record(1, "Chai Set", 5));

        cart.update_quantity(ProductId::new(1), 1);
        assert_eq!(sink.messages().len(), 1); // only the add notification

        cart.update_quantity(ProductId::new(1), 3);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(
            sink.messages().last().unwrap(),
            "\"Chai Set\" quantity updated to 3!"
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut cart, sink) = cart_with_recorder();
        cart.add(record(1, "Chai Set", 5));

        cart.update_quantity(ProductId::new(99), 4);

        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn test_remove_twice_is_idempotent() {
        let (mut cart, sink) = cart_with_recorder();
        cart.add(record(1, "Chai Set", 5));

        cart.remove(ProductId::new(1));
        cart.remove(ProductId::new(1));

        assert!(cart.is_empty());
        // add + one remove notification, no duplicate for the second call
        assert_eq!(sink.messages().len(), 2);
    }

    #[test]
    fn test_totals_and_count() {
        let (mut cart, _sink) = cart_with_recorder();
        cart.add(record(1, "Mango Crate", 10));
        cart.add(record(2, "Chai Set", 5));
        cart.update_quantity(ProductId::new(2), 2);

        assert_eq!(cart.total(), Decimal::from(20));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_clear_notifies_once_and_only_when_nonempty() {
        let (mut cart, sink) = cart_with_recorder();

        cart.clear();
        assert!(sink.messages().is_empty());

        cart.add(record(1, "Mango Crate", 10));
        cart.clear();

        assert!(cart.is_empty());
        let messages = sink.messages();
        assert_eq!(
            messages
                .iter()
                .filter(|m| m.as_str() == "Cart cleared!")
                .count(),
            1
        );
    }

    #[test]
    fn test_noop_sink_keeps_invariants() {
        let mut cart = CartStore::new(
            Arc::new(NoopSink),
            Arc::new(FixedIdGenerator::new("ITEM")),
        );

        cart.add(record(1, "Mango Crate", 10));
        cart.add(record(1, "Mango Crate", 10));
        cart.update_quantity(ProductId::new(1), 5);

        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total(), Decimal::from(50));
    }
}
