//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kitchen-facing order state
///
/// The four states are shown in sequence by the admin panel, but any state
/// may be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Espera,
    Preparando,
    Listo,
    Retirado,
}

impl OrderState {
    pub const ALL: [OrderState; 4] = [
        OrderState::Espera,
        OrderState::Preparando,
        OrderState::Listo,
        OrderState::Retirado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Espera => "espera",
            Self::Preparando => "preparando",
            Self::Listo => "listo",
            Self::Retirado => "retirado",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Payment status of an order
///
/// Provider statuses the storefront does not know about are kept verbatim
/// in [`PaymentStatus::Other`] instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Approved,
    Rejected,
    Cancelled,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line item snapshot taken when the order is created
///
/// Name and unit price are copied from the product at order time and are not
/// linked to later catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub nombre: String,
    pub precio_unitario: f64,
    pub cantidad: u32,
    pub subtotal: f64,
}

/// Order entity
///
/// Timestamps are Unix millis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub fecha_creacion: i64,
    pub estado: OrderState,
    #[serde(default)]
    pub cliente: String,
    pub items: Vec<OrderItem>,
    pub importe: f64,
    pub payment_status: PaymentStatus,
    /// Correlation key for provider callbacks, set once
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_updated: Option<i64>,
    /// Amount reported by the provider when the payment was approved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<f64>,
    /// Last time `estado` changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_cambio: Option<i64>,
    /// Reserved stock has already been given back to the catalog
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stock_restored: bool,
}

impl Order {
    /// Orders with items and a positive total can be sent to a provider
    pub fn is_payable(&self) -> bool {
        !self.items.is_empty() && self.importe > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_state_parse() {
        assert_eq!("listo".parse::<OrderState>(), Ok(OrderState::Listo));
        assert_eq!(
            "entregado".parse::<OrderState>(),
            Err("entregado".to_string())
        );
        assert_eq!(OrderState::Preparando.to_string(), "preparando");
    }

    #[test]
    fn test_payment_status_keeps_unknown_values() {
        let status: PaymentStatus = serde_json::from_str("\"charged_back\"").unwrap();
        assert_eq!(status, PaymentStatus::Other("charged_back".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"charged_back\"");

        let status: PaymentStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, PaymentStatus::Approved);
    }

    #[test]
    fn test_order_loads_document_without_payment_fields() {
        let json = r#"{
            "id": "AbC123xy",
            "fechaCreacion": 1700000000000,
            "estado": "espera",
            "cliente": "Ana",
            "items": [{"productId":"burger","nombre":"Burger","precioUnitario":1000,"cantidad":2,"subtotal":2000}],
            "importe": 2000,
            "paymentStatus": "pending",
            "externalReference": null
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.items[0].cantidad, 2);
        assert!(order.external_reference.is_none());
        assert!(!order.stock_restored);
        assert!(order.is_payable());

        let value = serde_json::to_value(&order).unwrap();
        assert!(value["externalReference"].is_null());
        assert!(value.get("stockRestored").is_none());
        assert_eq!(value["paymentStatus"], "pending");
    }
}
