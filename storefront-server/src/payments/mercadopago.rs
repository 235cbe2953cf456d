//! MercadoPago checkout preferences
//!
//! REST calls with the access token as bearer:
//! - `POST {api_base}/checkout/preferences`
//! - `GET {api_base}/v1/payments/{id}` for `type=payment` notifications

use super::notification::{self, CallbackBody};
use super::{
    CheckoutSession, PaymentError, PaymentGateway, PaymentNotification, ProviderKind, send_json,
};
use crate::core::PaymentConfig;
use crate::orders::money::{line_total, to_f64, within_tolerance};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::models::Order;

#[derive(Clone)]
pub struct MercadoPagoGateway {
    client: reqwest::Client,
    access_token: String,
    config: PaymentConfig,
}

impl std::fmt::Debug for MercadoPagoGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MercadoPagoGateway")
            .field("api_base", &self.config.mp_api_base)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl MercadoPagoGateway {
    pub fn new(client: reqwest::Client, access_token: &str, config: &PaymentConfig) -> Self {
        Self {
            client,
            access_token: access_token.to_string(),
            config: config.clone(),
        }
    }

    /// Preference body for `order`
    ///
    /// Every item needs a positive unit price and quantity, and the items must
    /// add up to `order.importe` within 0.01.
    pub fn preference_payload(&self, order: &Order) -> Result<Value, PaymentError> {
        let mut items = Vec::with_capacity(order.items.len());
        let mut calculated = Decimal::ZERO;

        for item in &order.items {
            if item.precio_unitario.is_nan() || item.precio_unitario <= 0.0 {
                return Err(PaymentError::InvalidItem(format!(
                    "precio unitario inválido para {}: {}",
                    item.nombre, item.precio_unitario
                )));
            }
            if item.cantidad == 0 {
                return Err(PaymentError::InvalidItem(format!(
                    "cantidad inválida para {}: {}",
                    item.nombre, item.cantidad
                )));
            }
            calculated += line_total(item.precio_unitario, item.cantidad);
            items.push(json!({
                "title": item.nombre,
                "quantity": item.cantidad,
                "currency_id": self.config.currency,
                "unit_price": item.precio_unitario,
            }));
        }

        let calculated_total = to_f64(calculated);
        if !within_tolerance(calculated_total, order.importe) {
            tracing::warn!(
                order_id = %order.id,
                order_total = order.importe,
                calculated_total,
                "payment.total.mismatch"
            );
            return Err(PaymentError::TotalMismatch {
                order_total: order.importe,
                calculated_total,
            });
        }

        Ok(json!({
            "external_reference": order.external_reference,
            "items": items,
            "back_urls": self.config.back_urls(&order.id),
            "notification_url": self.config.notification_url(),
            "auto_return": "approved",
            "payment_methods": {
                "excluded_payment_types": [],
                "installments": 12,
            },
            "payer": {
                "name": if order.cliente.is_empty() { "Cliente" } else { order.cliente.as_str() },
            },
        }))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.mp_api_base.trim_end_matches('/'), path)
    }

    async fn lookup_payment(
        &self,
        payment_id: &str,
        reference_hint: Option<String>,
    ) -> Result<Option<PaymentNotification>, PaymentError> {
        let request = self
            .client
            .get(self.url(&format!("/v1/payments/{payment_id}")))
            .bearer_auth(&self.access_token);
        let payment = send_json(ProviderKind::MercadoPago, request).await?;

        let external_reference = notification::reference(&payment)
            .or(reference_hint)
            .ok_or(PaymentError::MissingReference)?;
        let status = payment
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("pending")
            .to_string();

        tracing::info!(
            target: "webhook",
            payment_id,
            external_reference = %external_reference,
            status = %status,
            "payment looked up"
        );
        Ok(Some(PaymentNotification {
            external_reference,
            status,
            amount: notification::amount(&payment),
        }))
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoGateway {
    fn kind(&self) -> ProviderKind {
        ProviderKind::MercadoPago
    }

    async fn create_session(&self, order: &Order) -> Result<CheckoutSession, PaymentError> {
        let payload = self.preference_payload(order)?;
        let request = self
            .client
            .post(self.url("/checkout/preferences"))
            .bearer_auth(&self.access_token)
            .json(&payload);
        let body = send_json(ProviderKind::MercadoPago, request).await?;

        let url = ["init_point", "sandbox_init_point"]
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string);

        match url {
            Some(url) => Ok(CheckoutSession {
                url,
                simulated: false,
                provider: ProviderKind::MercadoPago,
                raw: Some(body),
            }),
            None => Err(PaymentError::MissingCheckoutUrl {
                provider: ProviderKind::MercadoPago,
                body,
            }),
        }
    }

    async fn normalize_callback(
        &self,
        body: &Value,
    ) -> Result<Option<PaymentNotification>, PaymentError> {
        match notification::classify(body) {
            CallbackBody::PaymentLookup {
                payment_id,
                reference_hint,
            } => self.lookup_payment(&payment_id, reference_hint).await,
            CallbackBody::Direct(n) => Ok(Some(n)),
            CallbackBody::Unhandled => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use shared::models::{OrderItem, OrderState, PaymentStatus};

    fn gateway() -> MercadoPagoGateway {
        let config = Config::development("data");
        MercadoPagoGateway::new(reqwest::Client::new(), "TEST-token", &config.payments)
    }

    fn order(items: Vec<OrderItem>, importe: f64) -> Order {
        Order {
            id: "abc12345".into(),
            fecha_creacion: 0,
            estado: OrderState::Espera,
            cliente: String::new(),
            items,
            importe,
            payment_status: PaymentStatus::Pending,
            external_reference: Some("ref_abc12345_1".into()),
            payment_created: None,
            payment_updated: None,
            payment_amount: None,
            fecha_cambio: None,
            stock_restored: false,
        }
    }

    fn item(precio: f64, cantidad: u32) -> OrderItem {
        OrderItem {
            product_id: "burger".into(),
            nombre: "Burger".into(),
            precio_unitario: precio,
            cantidad,
            subtotal: precio * f64::from(cantidad),
        }
    }

    #[test]
    fn test_preference_payload() {
        let payload = gateway()
            .preference_payload(&order(vec![item(1000.0, 2)], 2000.0))
            .unwrap();

        assert_eq!(payload["external_reference"], "ref_abc12345_1");
        assert_eq!(payload["items"][0]["quantity"], 2);
        assert_eq!(payload["items"][0]["unit_price"], 1000.0);
        assert_eq!(payload["items"][0]["currency_id"], "ARS");
        assert_eq!(payload["auto_return"], "approved");
        assert_eq!(payload["payer"]["name"], "Cliente");
        assert!(
            payload["back_urls"]["success"]
                .as_str()
                .unwrap()
                .ends_with("?pago=success&order_id=abc12345")
        );
    }

    #[test]
    fn test_total_mismatch() {
        let err = gateway()
            .preference_payload(&order(vec![item(1000.0, 2)], 1500.0))
            .unwrap_err();
        assert!(matches!(
            err,
            PaymentError::TotalMismatch { order_total, calculated_total }
                if order_total == 1500.0 && calculated_total == 2000.0
        ));
    }

    #[test]
    fn test_total_within_tolerance() {
        assert!(
            gateway()
                .preference_payload(&order(vec![item(10.0, 3)], 30.01))
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_items() {
        let err = gateway()
            .preference_payload(&order(vec![item(0.0, 1)], 0.0))
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidItem(_)));

        let err = gateway()
            .preference_payload(&order(vec![item(100.0, 0)], 0.0))
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidItem(_)));
    }
}
