//! Order Repository
//!
//! Read-only access to orders. All order mutations go through `OrdersManager`.

use crate::db::JsonStore;
use serde::Serialize;
use shared::models::{Order, PaymentStatus};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Aggregate numbers for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    pub por_estado: BTreeMap<String, usize>,
    pub por_pago: BTreeMap<String, usize>,
    /// Sum of `importe` over approved orders
    pub total_ventas: f64,
}

#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<JsonStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub fn find_all(&self) -> Vec<Order> {
        self.store.read(|docs| docs.orders.clone())
    }

    pub fn stats(&self) -> OrderStats {
        self.store.read(|docs| {
            let mut stats = OrderStats {
                total: docs.orders.len(),
                ..Default::default()
            };
            let mut ventas = rust_decimal::Decimal::ZERO;
            for order in &docs.orders {
                *stats
                    .por_estado
                    .entry(order.estado.as_str().to_string())
                    .or_default() += 1;
                *stats
                    .por_pago
                    .entry(order.payment_status.as_str().to_string())
                    .or_default() += 1;
                if order.payment_status == PaymentStatus::Approved {
                    ventas += crate::orders::money::to_decimal(order.importe);
                }
            }
            stats.total_ventas = crate::orders::money::to_f64(ventas);
            stats
        })
    }
}
