use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::JsonStore;
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::orders::OrdersManager;
use crate::payments::PaymentGateways;

/// Server state shared by every handler
///
/// Cloning is cheap: every member is behind an `Arc`.
///
/// | Field | Content |
/// |-------|---------|
/// | config | immutable configuration |
/// | store | products + orders JSON documents |
/// | orders | order lifecycle engine |
/// | payments | providers selected at startup |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<JsonStore>,
    pub orders: Arc<OrdersManager>,
    pub payments: Arc<PaymentGateways>,
}

impl ServerState {
    /// Open the data directory and wire every service
    pub fn initialize(config: &Config) -> Result<Self> {
        let store = Arc::new(JsonStore::open(&config.data_dir)?);
        let orders = Arc::new(OrdersManager::new(store.clone(), config.payments.timeout));
        let payments = Arc::new(PaymentGateways::from_config(&config.payments));

        Ok(Self {
            config: Arc::new(config.clone()),
            store,
            orders,
            payments,
        })
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.store.clone())
    }

    pub fn order_repo(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }
}
