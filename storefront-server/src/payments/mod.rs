//! Payment provider adapter
//!
//! One capability set for every provider: open a checkout session for an
//! order, and turn a provider callback body into a [`PaymentNotification`].
//! Providers are chosen once at startup in [`PaymentGateways::from_config`].
//!
//! | Provider | Used when | Session |
//! |----------|-----------|---------|
//! | Simulated | no credentials | local `/pago/simulado/{id}` page |
//! | MercadoPago | `MP_ACCESS_TOKEN` set | checkout preference `init_point` |
//! | Vexor | `VEXOR_SECRET_KEY` set | checkout session URL |

pub mod mercadopago;
pub mod notification;
pub mod simulated;
pub mod vexor;

pub use mercadopago::MercadoPagoGateway;
pub use notification::{CallbackBody, classify};
pub use simulated::SimulatedGateway;
pub use vexor::VexorGateway;

use crate::core::PaymentConfig;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::Order;
use std::fmt;
use thiserror::Error;

/// Payment provider errors
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("El total del pedido ({order_total}) no coincide con la suma de items ({calculated_total})")]
    TotalMismatch {
        order_total: f64,
        calculated_total: f64,
    },

    #[error("Item inválido: {0}")]
    InvalidItem(String),

    #[error("{provider} respondió {status}")]
    Upstream {
        provider: ProviderKind,
        status: u16,
        body: Value,
    },

    #[error("El proveedor de pagos no respondió a tiempo")]
    Timeout,

    #[error("Error de conexión con el proveedor de pagos: {0}")]
    Transport(String),

    #[error("{provider} no devolvió una URL de checkout")]
    MissingCheckoutUrl { provider: ProviderKind, body: Value },

    #[error("{0}")]
    NotConfigured(String),

    #[error("Notificación sin referencia externa")]
    MissingReference,
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PaymentError::Timeout
        } else {
            PaymentError::Transport(err.to_string())
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        let message = err.to_string();
        match err {
            PaymentError::TotalMismatch {
                order_total,
                calculated_total,
            } => AppError::with_message(ErrorCode::PaymentTotalMismatch, message)
                .with_detail("orderTotal", order_total)
                .with_detail("calculatedTotal", calculated_total),
            PaymentError::InvalidItem(_) => {
                AppError::with_message(ErrorCode::PaymentInvalidItem, message)
            }
            PaymentError::Upstream { status, body, .. } => {
                AppError::with_message(ErrorCode::PaymentProviderError, message)
                    .with_detail("status", status)
                    .with_detail("detail", body)
            }
            PaymentError::Timeout => AppError::with_message(ErrorCode::PaymentTimeout, message),
            PaymentError::Transport(_) => {
                AppError::with_message(ErrorCode::PaymentProviderError, message)
            }
            PaymentError::MissingCheckoutUrl { body, .. } => {
                AppError::with_message(ErrorCode::PaymentProviderError, message)
                    .with_detail("detail", body)
            }
            PaymentError::NotConfigured(_) => {
                AppError::with_message(ErrorCode::PaymentNotConfigured, message)
            }
            PaymentError::MissingReference => {
                AppError::with_message(ErrorCode::RequiredField, message)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Simulated,
    MercadoPago,
    Vexor,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::MercadoPago => "mercadopago",
            Self::Vexor => "vexor",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where to send the customer to pay
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub url: String,
    pub simulated: bool,
    pub provider: ProviderKind,
    /// Provider response, when there was one
    pub raw: Option<Value>,
}

/// Normalized provider callback
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentNotification {
    pub external_reference: String,
    pub status: String,
    pub amount: Option<f64>,
}

/// Capabilities every payment provider offers
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Open a checkout for `order`; the order already carries its external
    /// reference
    async fn create_session(&self, order: &Order) -> Result<CheckoutSession, PaymentError>;

    /// `Ok(None)` means the body is not a payment notification
    async fn normalize_callback(
        &self,
        body: &Value,
    ) -> Result<Option<PaymentNotification>, PaymentError>;
}

/// Provider selected from configuration
#[derive(Debug, Clone)]
pub enum PaymentProvider {
    Simulated(SimulatedGateway),
    MercadoPago(MercadoPagoGateway),
    Vexor(VexorGateway),
}

#[async_trait]
impl PaymentGateway for PaymentProvider {
    fn kind(&self) -> ProviderKind {
        match self {
            Self::Simulated(g) => g.kind(),
            Self::MercadoPago(g) => g.kind(),
            Self::Vexor(g) => g.kind(),
        }
    }

    async fn create_session(&self, order: &Order) -> Result<CheckoutSession, PaymentError> {
        match self {
            Self::Simulated(g) => g.create_session(order).await,
            Self::MercadoPago(g) => g.create_session(order).await,
            Self::Vexor(g) => g.create_session(order).await,
        }
    }

    async fn normalize_callback(
        &self,
        body: &Value,
    ) -> Result<Option<PaymentNotification>, PaymentError> {
        match self {
            Self::Simulated(g) => g.normalize_callback(body).await,
            Self::MercadoPago(g) => g.normalize_callback(body).await,
            Self::Vexor(g) => g.normalize_callback(body).await,
        }
    }
}

/// Send a JSON request and return the JSON body of a 2xx response
///
/// Non-JSON bodies read as `{}`.
pub(crate) async fn send_json(
    provider: ProviderKind,
    request: reqwest::RequestBuilder,
) -> Result<Value, PaymentError> {
    let resp = request.send().await?;
    let status = resp.status();
    let body = resp
        .json::<Value>()
        .await
        .unwrap_or_else(|_| Value::Object(Default::default()));

    if !status.is_success() {
        tracing::warn!(provider = %provider, status = status.as_u16(), body = %body, "provider error");
        return Err(PaymentError::Upstream {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Providers behind the two checkout endpoints
#[derive(Debug, Clone)]
pub struct PaymentGateways {
    /// `POST /api/payments/preference` and `/webhooks/mercadopago`
    pub preference: PaymentProvider,
    /// `POST /api/payments/vexor/session` and `/webhooks/vexor`
    pub session: PaymentProvider,
}

impl PaymentGateways {
    pub fn from_config(config: &PaymentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            });
        let simulated = SimulatedGateway::new(&config.base_url);

        let preference = match &config.mp_access_token {
            Some(token) => {
                PaymentProvider::MercadoPago(MercadoPagoGateway::new(client.clone(), token, config))
            }
            None => PaymentProvider::Simulated(simulated.clone()),
        };

        let session = match &config.vexor.secret_key {
            Some(secret) => {
                PaymentProvider::Vexor(VexorGateway::new(client, secret, config))
            }
            None => PaymentProvider::Simulated(simulated),
        };

        tracing::info!(
            preference = %preference.kind(),
            session = %session.kind(),
            "payment providers selected"
        );
        Self {
            preference,
            session,
        }
    }
}
