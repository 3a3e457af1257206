//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::checkout::CheckoutWorkflow;
use crate::config::StorefrontConfig;
use crate::ids::SystemIdGenerator;
use crate::notify::SlotNotifier;
use crate::orders::OrderRepository;
use crate::storage::{FileStore, KeyValueStore};

/// Idle sessions keep their cart this long before eviction.
const CART_IDLE_TTL: Duration = Duration::from_secs(60 * 60);
const MAX_ACTIVE_CARTS: u64 = 10_000;

/// A session's cart plus the notifier its toasts land in.
///
/// The mutex guarantees each cart's mutations run to completion without
/// interleaving with another mutation on the same cart.
pub struct SessionCart {
    pub cart: Mutex<CartStore>,
    pub notifier: Arc<SlotNotifier>,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog client and the order log.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    orders: OrderRepository,
    checkout: CheckoutWorkflow,
    ids: Arc<SystemIdGenerator>,
    carts: Cache<Uuid, Arc<SessionCart>>,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.data_dir.clone()));
        let orders = OrderRepository::new(store);
        let ids = Arc::new(SystemIdGenerator::new());
        let checkout = CheckoutWorkflow::new(orders.clone(), ids.clone(), config.checkout_delay);
        let carts = Cache::builder()
            .max_capacity(MAX_ACTIVE_CARTS)
            .time_to_idle(CART_IDLE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                orders,
                checkout,
                ids,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the order log.
    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }

    /// Get a reference to the checkout workflow.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutWorkflow {
        &self.inner.checkout
    }

    /// Get or lazily create the cart for a session.
    #[must_use]
    pub fn session_cart(&self, id: Uuid) -> Arc<SessionCart> {
        self.inner.carts.get_with(id, || {
            let notifier = Arc::new(SlotNotifier::new());
            let cart = CartStore::new(notifier.clone(), self.inner.ids.clone());
            Arc::new(SessionCart {
                cart: Mutex::new(cart),
                notifier,
            })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use std::path::PathBuf;

    fn state() -> AppState {
        AppState::new(StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            data_dir: PathBuf::from("data"),
            catalog: CatalogConfig {
                base_url: "https://dummyjson.com".to_string(),
            },
            checkout_delay: Duration::ZERO,
            sentry_dsn: None,
        })
    }

    #[test]
    fn test_session_cart_is_stable_per_session() {
        let state = state();
        let id = Uuid::new_v4();

        let first = state.session_cart(id);
        let second = state.session_cart(id);
        assert!(Arc::ptr_eq(&first, &second));

        let other = state.session_cart(Uuid::new_v4());
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
