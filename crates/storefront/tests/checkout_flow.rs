//! End-to-end shopping flow: build a cart, submit checkout, and read the
//! order history back through a fresh repository over the same data dir.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use karvaan_core::{OrderStatus, ProductId};
use karvaan_storefront::cart::CartStore;
use karvaan_storefront::catalog::ProductRecord;
use karvaan_storefront::checkout::{CheckoutWorkflow, CustomerInfo};
use karvaan_storefront::ids::SystemIdGenerator;
use karvaan_storefront::notify::SlotNotifier;
use karvaan_storefront::orders::OrderRepository;
use karvaan_storefront::storage::FileStore;

fn product(id: i64, title: &str, price: Decimal) -> ProductRecord {
    ProductRecord {
        id: Some(ProductId::new(id)),
        title: Some(title.to_owned()),
        price: Some(price),
        category: Some("groceries".to_owned()),
        brand: Some("Karvaan".to_owned()),
        ..Default::default()
    }
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        first_name: "Bilal".to_owned(),
        last_name: "Ahmed".to_owned(),
        email: "bilal@example.com".to_owned(),
        phone: "03211234567".to_owned(),
        address: "House 7, Gulberg III".to_owned(),
        city: "Lahore".to_owned(),
        ..CustomerInfo::default()
    }
}

#[tokio::test]
async fn test_full_shopping_flow_persists_orders_newest_first() {
    let data_dir = tempfile::tempdir().unwrap();

    let ids = Arc::new(SystemIdGenerator::new());
    let notifier = Arc::new(SlotNotifier::new());
    let repository = OrderRepository::new(Arc::new(FileStore::new(data_dir.path())));
    let workflow = CheckoutWorkflow::new(repository.clone(), ids.clone(), Duration::ZERO);

    let mut cart = CartStore::new(notifier.clone(), ids.clone());

    // Two distinct products, one bumped to quantity 2: subtotal 20, count 3.
    cart.add(product(1, "Mango Crate", Decimal::from(10)));
    cart.add(product(2, "Chai Set", Decimal::from(5)));
    cart.add(product(2, "Chai Set", Decimal::from(5)));
    assert_eq!(cart.total(), Decimal::from(20));
    assert_eq!(cart.count(), 3);
    assert_eq!(
        notifier.current().unwrap(),
        "\"Chai Set\" quantity increased!"
    );

    let first_id = workflow.submit(&mut cart, customer()).await.unwrap();

    assert!(cart.is_empty());
    assert_eq!(notifier.current().unwrap(), "Cart cleared!");
    assert!(first_id.as_str().starts_with("ORD-"));

    // A second, later order lands ahead of the first.
    cart.add(product(3, "Ajrak Shawl", Decimal::new(4550, 2)));
    let second_id = workflow.submit(&mut cart, customer()).await.unwrap();
    assert_ne!(first_id, second_id);

    // Re-open the log through a fresh repository over the same directory.
    let reopened = OrderRepository::new(Arc::new(FileStore::new(data_dir.path())));
    let orders = reopened.list().await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, second_id);
    assert_eq!(orders[1].id, first_id);

    assert_eq!(orders[1].total, Decimal::new(2200, 2));
    assert_eq!(orders[1].status, OrderStatus::Processing);
    assert_eq!(orders[1].items.len(), 2);
    assert_eq!(orders[1].customer.city, "Lahore");

    assert_eq!(orders[0].total, Decimal::new(5005, 2));
    assert_eq!(orders[0].items[0].title, "Ajrak Shawl");
}

#[tokio::test]
async fn test_order_snapshot_survives_later_cart_activity() {
    let data_dir = tempfile::tempdir().unwrap();

    let ids = Arc::new(SystemIdGenerator::new());
    let notifier = Arc::new(SlotNotifier::new());
    let repository = OrderRepository::new(Arc::new(FileStore::new(data_dir.path())));
    let workflow = CheckoutWorkflow::new(repository.clone(), ids.clone(), Duration::ZERO);

    let mut cart = CartStore::new(notifier, ids);
    cart.add(product(1, "Mango Crate", Decimal::from(10)));
    workflow.submit(&mut cart, customer()).await.unwrap();

    // Post-checkout shopping must not leak into the persisted order.
    cart.add(product(2, "Chai Set", Decimal::from(5)));
    cart.update_quantity(ProductId::new(2), 9);

    let orders = repository.list().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items.len(), 1);
    assert_eq!(orders[0].items[0].id, ProductId::new(1));
    assert_eq!(orders[0].items[0].quantity, 1);
}
