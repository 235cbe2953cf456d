//! Webhook Handlers

use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::orders::{OrderError, PaymentTarget};
use crate::payments::{PaymentGateway, PaymentProvider};
use crate::utils::{AppError, AppResult, run_blocking};
use shared::models::{OrderState, PaymentStatus};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WebhookResponse {
    Processed {
        ok: bool,
        order_id: String,
        payment_status: PaymentStatus,
        order_state: OrderState,
    },
    Ignored {
        ok: bool,
        message: &'static str,
    },
}

/// POST /webhooks/mercadopago
pub async fn mercadopago(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<Json<WebhookResponse>> {
    process(&state, &state.payments.preference, &body).await
}

/// POST /webhooks/vexor
pub async fn vexor(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<Json<WebhookResponse>> {
    process(&state, &state.payments.session, &body).await
}

/// Empty bodies read as `{}`
fn parse_body(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(target: "webhook", error = %e, "webhook.malformed");
        AppError::invalid_request(format!("JSON inválido: {}", e))
    })
}

async fn process(
    state: &ServerState,
    provider: &PaymentProvider,
    body: &[u8],
) -> AppResult<Json<WebhookResponse>> {
    let payload = parse_body(body)?;
    tracing::info!(target: "webhook", provider = %provider.kind(), body = %payload, "webhook.received");

    let Some(notification) = provider.normalize_callback(&payload).await? else {
        tracing::info!(target: "webhook", body = %payload, "webhook.unhandled");
        return Ok(Json(WebhookResponse::Ignored {
            ok: true,
            message: "webhook received but not processed",
        }));
    };

    let target = PaymentTarget::ByReference(notification.external_reference.clone());
    let orders = state.orders.clone();
    let outcome = run_blocking(move || {
        orders.process_payment_notification(&target, &notification.status, notification.amount)
    })
    .await?
    .map_err(|e| {
        if let OrderError::OrderNotFound(reference) = &e {
            tracing::warn!(target: "webhook", external_reference = %reference, "webhook.order.not_found");
        }
        e
    })?;

    Ok(Json(WebhookResponse::Processed {
        ok: true,
        order_id: outcome.order_id,
        payment_status: outcome.payment_status,
        order_state: outcome.order_state,
    }))
}
