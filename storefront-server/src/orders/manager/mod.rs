//! OrdersManager - order and payment lifecycle
//!
//! Every operation that touches stock or orders runs as one
//! [`JsonStore::write`] critical section: validate, mutate, persist.
//!
//! # Lifecycle
//!
//! ```text
//! create_order ──► espera / pending          (stock reserved)
//!       │
//! start_checkout ──► processing              (externalReference set once)
//!       │
//! process_payment_notification
//!       ├─ approved  ──► approved, espera → preparando
//!       ├─ rejected  ──► rejected, stock restored once
//!       ├─ cancelled ──► rejected, stock restored once
//!       ├─ pending / in_process ──► pending
//!       └─ other     ──► stored verbatim
//! ```
//!
//! Provider calls in [`OrdersManager::start_checkout`] happen outside the lock
//! and are bounded by the configured payment timeout; its two store writes run
//! on the blocking pool.

mod error;
pub use error::*;

use super::cart::{self, ValidLine};
use super::money::{self, to_f64};
use crate::db::{Documents, JsonStore};
use crate::payments::{CheckoutSession, PaymentError, PaymentGateway, PaymentProvider};
use crate::utils::{id, time};
use shared::models::{
    CartCalculation, CartItemInput, Order, OrderItem, OrderState, PaymentStatus,
};
use std::sync::Arc;
use std::time::Duration;

/// How a payment notification identifies its order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentTarget {
    /// Provider callbacks carry the external reference
    ByReference(String),
    /// The simulated checkout page knows the order id
    ByOrderId(String),
}

/// Result of [`OrdersManager::start_checkout`]
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub session: CheckoutSession,
    pub order: Order,
}

/// Result of [`OrdersManager::process_payment_notification`]
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationOutcome {
    pub order_id: String,
    pub payment_status: PaymentStatus,
    pub order_state: OrderState,
    pub previous_status: PaymentStatus,
    /// This notification gave reserved stock back
    pub stock_restored: bool,
}

/// Order lifecycle engine over the JSON store
pub struct OrdersManager {
    store: Arc<JsonStore>,
    payment_timeout: Duration,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("store", &"<JsonStore>")
            .field("payment_timeout", &self.payment_timeout)
            .finish()
    }
}

impl OrdersManager {
    pub fn new(store: Arc<JsonStore>, payment_timeout: Duration) -> Self {
        Self {
            store,
            payment_timeout,
        }
    }

    pub fn store(&self) -> &Arc<JsonStore> {
        &self.store
    }

    /// Validate the cart, reserve stock and record a new order
    ///
    /// All lines are validated before any stock moves; the first failing line
    /// aborts with no side effects.
    pub fn create_order(&self, cliente: &str, items: &[CartItemInput]) -> OrderResult<Order> {
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let order = self.store.write(|docs| {
            let lines = cart::validate_lines(&docs.products, items)
                .into_iter()
                .collect::<Result<Vec<ValidLine>, OrderError>>()?;

            for line in &lines {
                if let Some(product) = docs.product_mut(&line.product_id) {
                    product.stock -= line.cantidad;
                }
            }

            let items: Vec<OrderItem> = lines
                .into_iter()
                .map(|l| OrderItem {
                    product_id: l.product_id,
                    nombre: l.nombre,
                    precio_unitario: l.precio,
                    cantidad: l.cantidad,
                    subtotal: to_f64(l.subtotal),
                })
                .collect();
            let order = Order {
                id: unique_order_id(docs),
                fecha_creacion: time::now_millis(),
                estado: OrderState::Espera,
                cliente: cliente.trim().to_string(),
                importe: money::sum_subtotals(&items),
                items,
                payment_status: PaymentStatus::Pending,
                external_reference: None,
                payment_created: None,
                payment_updated: None,
                payment_amount: None,
                fecha_cambio: None,
                stock_restored: false,
            };
            docs.orders.push(order.clone());
            Ok::<_, OrderError>(order)
        })?;

        tracing::info!(
            order_id = %order.id,
            importe = order.importe,
            items = order.items.len(),
            "order.created"
        );
        Ok(order)
    }

    /// Read-only cart pre-check using the same rules as [`Self::create_order`]
    pub fn calculate_cart(&self, items: &[CartItemInput]) -> OrderResult<CartCalculation> {
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        Ok(self.store.read(|docs| cart::calculate(&docs.products, items)))
    }

    pub fn get_order(&self, order_id: &str) -> OrderResult<Order> {
        self.store
            .read(|docs| docs.order(order_id).cloned())
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Admin state change; any canonical state is accepted at any time
    pub fn change_order_state(&self, order_id: &str, estado: &str) -> OrderResult<Order> {
        let estado: OrderState = estado.parse().map_err(OrderError::InvalidState)?;

        let order = self.store.write(|docs| {
            let order = docs
                .order_mut(order_id)
                .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
            order.estado = estado;
            order.fecha_cambio = Some(time::now_millis());
            Ok::<_, OrderError>(order.clone())
        })?;

        tracing::info!(order_id = %order.id, estado = %order.estado, "order.state.changed");
        Ok(order)
    }

    /// Remove an order. Reserved stock is NOT given back.
    pub fn delete_order(&self, order_id: &str) -> OrderResult<()> {
        self.store.write(|docs| {
            let before = docs.orders.len();
            docs.orders.retain(|o| o.id != order_id);
            if docs.orders.len() == before {
                return Err(OrderError::OrderNotFound(order_id.to_string()));
            }
            Ok(())
        })?;

        tracing::info!(order_id = %order_id, "order.deleted");
        Ok(())
    }

    /// Open a checkout with `provider` for an existing order
    ///
    /// 1. under the lock: check the order is payable, assign the external
    ///    reference if it has none
    /// 2. call the provider, bounded by the payment timeout
    /// 3. under the lock: mark `processing` unless a callback already settled
    ///    the payment
    pub async fn start_checkout(
        &self,
        order_id: &str,
        provider: &PaymentProvider,
    ) -> OrderResult<CheckoutOutcome> {
        let key = order_id.to_string();
        let prepared = self.store.write_blocking(move |docs| {
            let order = docs
                .order_mut(&key)
                .ok_or_else(|| OrderError::OrderNotFound(key.clone()))?;
            if !order.is_payable() {
                return Err(OrderError::InvalidOrder(
                    "el pedido no tiene items o su importe no es positivo".to_string(),
                ));
            }
            if order.external_reference.is_none() {
                order.external_reference =
                    Some(id::external_reference(&order.id, time::now_millis()));
            }
            Ok(order.clone())
        })
        .await?;

        let session = tokio::time::timeout(self.payment_timeout, provider.create_session(&prepared))
            .await
            .map_err(|_| PaymentError::Timeout)??;

        let key = order_id.to_string();
        let order = self.store.write_blocking(move |docs| {
            let order = docs
                .order_mut(&key)
                .ok_or_else(|| OrderError::OrderNotFound(key.clone()))?;
            if matches!(
                order.payment_status,
                PaymentStatus::Pending | PaymentStatus::Processing
            ) {
                order.payment_status = PaymentStatus::Processing;
            }
            order.payment_created = Some(time::now_millis());
            Ok::<_, OrderError>(order.clone())
        })
        .await?;

        tracing::info!(
            order_id = %order.id,
            provider = %session.provider,
            simulated = session.simulated,
            external_reference = order.external_reference.as_deref().unwrap_or_default(),
            "payment.session.created"
        );
        Ok(CheckoutOutcome { session, order })
    }

    /// Apply a provider (or simulated) payment result to its order
    ///
    /// Safe to replay: stock is restored at most once per order.
    pub fn process_payment_notification(
        &self,
        target: &PaymentTarget,
        status: &str,
        amount: Option<f64>,
    ) -> OrderResult<NotificationOutcome> {
        let outcome = self.store.write(|docs| {
            let order = match target {
                PaymentTarget::ByReference(reference) => docs.order_by_reference_mut(reference),
                PaymentTarget::ByOrderId(id) => docs.order_mut(id),
            };
            let Some(order) = order else {
                let key = match target {
                    PaymentTarget::ByReference(r) | PaymentTarget::ByOrderId(r) => r.clone(),
                };
                return Err(OrderError::OrderNotFound(key));
            };

            if let Some(amount) = amount.filter(|a| !money::within_tolerance(*a, order.importe)) {
                tracing::warn!(
                    target: "webhook",
                    order_id = %order.id,
                    importe = order.importe,
                    received = amount,
                    "payment amount mismatch"
                );
            }

            let now = time::now_millis();
            let previous = order.payment_status.clone();
            let mut restock = false;

            match status {
                "approved" => {
                    order.payment_status = PaymentStatus::Approved;
                    order.payment_amount = Some(amount.unwrap_or(order.importe));
                    if order.estado == OrderState::Espera {
                        order.estado = OrderState::Preparando;
                        order.fecha_cambio = Some(now);
                    }
                }
                "rejected" | "cancelled" => {
                    order.payment_status = PaymentStatus::Rejected;
                    restock = previous != PaymentStatus::Rejected && !order.stock_restored;
                    if restock {
                        order.stock_restored = true;
                    }
                }
                "pending" | "in_process" => order.payment_status = PaymentStatus::Pending,
                other => order.payment_status = PaymentStatus::from(other),
            }
            order.payment_updated = Some(now);

            let outcome = NotificationOutcome {
                order_id: order.id.clone(),
                payment_status: order.payment_status.clone(),
                order_state: order.estado,
                previous_status: previous,
                stock_restored: restock,
            };

            if restock {
                let items = order.items.clone();
                restore_stock(docs, &items);
            }
            Ok::<_, OrderError>(outcome)
        })?;

        if outcome.stock_restored {
            tracing::info!(order_id = %outcome.order_id, "stock.restored");
        }
        tracing::info!(
            target: "webhook",
            order_id = %outcome.order_id,
            previous = %outcome.previous_status,
            payment_status = %outcome.payment_status,
            estado = %outcome.order_state,
            "payment notification applied"
        );
        Ok(outcome)
    }
}

/// Give each item's quantity back to its product; deleted products are skipped
fn restore_stock(docs: &mut Documents, items: &[OrderItem]) {
    for item in items {
        match docs.product_mut(&item.product_id) {
            Some(product) => product.stock = product.stock.saturating_add(item.cantidad),
            None => tracing::warn!(
                product_id = %item.product_id,
                "cannot restore stock for missing product"
            ),
        }
    }
}

fn unique_order_id(docs: &Documents) -> String {
    loop {
        let candidate = id::order_id();
        if docs.order(&candidate).is_none() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests;
