//! Vexor checkout sessions
//!
//! `POST {api_base}/checkout/sessions` with the secret key as bearer. A secret
//! without `VEXOR_API_BASE` cannot reach anything and fails with
//! [`PaymentError::NotConfigured`].

use super::notification::{self, CallbackBody};
use super::{
    CheckoutSession, PaymentError, PaymentGateway, PaymentNotification, ProviderKind, send_json,
};
use crate::core::PaymentConfig;
use async_trait::async_trait;
use serde_json::{Value, json};
use shared::models::Order;

const DEFAULT_PROJECT: &str = "project";

#[derive(Clone)]
pub struct VexorGateway {
    client: reqwest::Client,
    secret_key: String,
    config: PaymentConfig,
}

impl std::fmt::Debug for VexorGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VexorGateway")
            .field("api_base", &self.config.vexor.api_base)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl VexorGateway {
    pub fn new(client: reqwest::Client, secret_key: &str, config: &PaymentConfig) -> Self {
        Self {
            client,
            secret_key: secret_key.to_string(),
            config: config.clone(),
        }
    }

    pub fn session_payload(&self, order: &Order) -> Value {
        let currency = &self.config.currency;
        let urls = self.config.back_urls(&order.id);
        json!({
            "project": self.config.vexor.project.as_deref().unwrap_or(DEFAULT_PROJECT),
            "amount": order.importe,
            "currency": currency,
            "reference": order.external_reference,
            "success_url": urls.success,
            "failure_url": urls.failure,
            "pending_url": urls.pending,
            "items": order.items.iter().map(|it| json!({
                "name": it.nombre,
                "quantity": it.cantidad,
                "unit_price": it.precio_unitario,
                "currency": currency,
            })).collect::<Vec<_>>(),
        })
    }
}

/// First non-empty URL field of a session response
fn checkout_url(body: &Value) -> Option<String> {
    ["checkout_url", "url", "redirect_url", "link"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl PaymentGateway for VexorGateway {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Vexor
    }

    async fn create_session(&self, order: &Order) -> Result<CheckoutSession, PaymentError> {
        let Some(api_base) = self.config.vexor.api_base.as_deref() else {
            return Err(PaymentError::NotConfigured(
                "Integración Vexor real no configurada: define VEXOR_API_BASE".to_string(),
            ));
        };

        let request = self
            .client
            .post(format!("{}/checkout/sessions", api_base.trim_end_matches('/')))
            .bearer_auth(&self.secret_key)
            .json(&self.session_payload(order));
        let body = send_json(ProviderKind::Vexor, request).await?;

        match checkout_url(&body) {
            Some(url) => Ok(CheckoutSession {
                url,
                simulated: false,
                provider: ProviderKind::Vexor,
                raw: Some(body),
            }),
            None => Err(PaymentError::MissingCheckoutUrl {
                provider: ProviderKind::Vexor,
                body,
            }),
        }
    }

    /// Vexor callbacks carry the reference directly
    async fn normalize_callback(
        &self,
        body: &Value,
    ) -> Result<Option<PaymentNotification>, PaymentError> {
        Ok(match notification::classify(body) {
            CallbackBody::Direct(n) => Some(n),
            CallbackBody::PaymentLookup { .. } | CallbackBody::Unhandled => None,
        })
    }
}
