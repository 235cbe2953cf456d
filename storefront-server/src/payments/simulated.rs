//! Simulated provider
//!
//! Sends the customer to the local checkout page, which offers approve,
//! reject and pending links to the simulate callback.

use super::notification::{self, CallbackBody};
use super::{CheckoutSession, PaymentError, PaymentGateway, PaymentNotification, ProviderKind};
use async_trait::async_trait;
use serde_json::Value;
use shared::models::Order;

#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    base_url: String,
}

impl SimulatedGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn checkout_url(&self, order_id: &str) -> String {
        format!("{}/pago/simulado/{}", self.base_url, order_id)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Simulated
    }

    async fn create_session(&self, order: &Order) -> Result<CheckoutSession, PaymentError> {
        Ok(CheckoutSession {
            url: self.checkout_url(&order.id),
            simulated: true,
            provider: ProviderKind::Simulated,
            raw: None,
        })
    }

    /// Payment lookups resolve to `approved` without asking anyone
    async fn normalize_callback(
        &self,
        body: &Value,
    ) -> Result<Option<PaymentNotification>, PaymentError> {
        Ok(match notification::classify(body) {
            CallbackBody::PaymentLookup {
                payment_id,
                reference_hint,
            } => Some(PaymentNotification {
                external_reference: reference_hint.unwrap_or_else(|| format!("ref_{payment_id}")),
                status: "approved".to_string(),
                amount: None,
            }),
            CallbackBody::Direct(n) => Some(n),
            CallbackBody::Unhandled => None,
        })
    }
}
