//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::page;
use crate::api::JsonBody;
use crate::core::{BackUrls, ServerState};
use crate::orders::{CheckoutOutcome, PaymentTarget};
use crate::payments::{PaymentGateway, PaymentProvider};
use crate::utils::{AppError, AppResult, run_blocking};

/// Results the simulated checkout page may report
const SIMULATED_RESULTS: [&str; 3] = ["approved", "rejected", "pending"];

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default, rename = "orderId")]
    pub order_id: Option<String>,
}

impl CheckoutRequest {
    fn order_id(&self) -> AppResult<&str> {
        self.order_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::required("orderId"))
    }
}

#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    init_point: String,
    external_reference: Option<String>,
    simulated: bool,
    total: f64,
    items_count: usize,
    order_id: String,
    provider: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    checkout_url: String,
    simulated: bool,
    provider: &'static str,
    external_reference: Option<String>,
    total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VexorPublicConfig {
    project: Option<String>,
    publishable_key_present: bool,
    secret_present: bool,
    api_base_present: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsConfigResponse {
    mode: &'static str,
    provider: &'static str,
    has_token: bool,
    #[serde(rename = "back_urls")]
    back_urls: BackUrls,
    webhook: Option<String>,
    vexor: VexorPublicConfig,
}

#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    #[serde(default, rename = "orderId")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

async fn checkout(
    state: &ServerState,
    request: &CheckoutRequest,
    provider: &PaymentProvider,
) -> AppResult<CheckoutOutcome> {
    let order_id = request.order_id()?;
    Ok(state.orders.start_checkout(order_id, provider).await?)
}

/// GET /api/payments/config
pub async fn config(State(state): State<ServerState>) -> Json<PaymentsConfigResponse> {
    let payments = &state.config.payments;
    let base = &payments.base_url;
    let back = |explicit: &Option<String>, pago: &str| {
        explicit
            .clone()
            .unwrap_or_else(|| format!("{}/?pago={}", base, pago))
    };

    Json(PaymentsConfigResponse {
        mode: if payments.mp_access_token.is_some() {
            "real"
        } else {
            "simulated"
        },
        provider: payments.active_provider(),
        has_token: payments.mp_access_token.is_some(),
        back_urls: BackUrls {
            success: back(&payments.back_success, "success"),
            failure: back(&payments.back_failure, "failure"),
            pending: back(&payments.back_pending, "pending"),
        },
        webhook: payments.webhook_url.clone(),
        vexor: VexorPublicConfig {
            project: payments.vexor.project.clone(),
            publishable_key_present: payments.vexor.publishable_key.is_some(),
            secret_present: payments.vexor.secret_key.is_some(),
            api_base_present: payments.vexor.api_base.is_some(),
        },
    })
}

/// POST /api/payments/preference
pub async fn create_preference(
    State(state): State<ServerState>,
    JsonBody(request): JsonBody<CheckoutRequest>,
) -> AppResult<Json<PreferenceResponse>> {
    let provider = &state.payments.preference;
    let CheckoutOutcome { session, order } = checkout(&state, &request, provider).await?;

    Ok(Json(PreferenceResponse {
        init_point: session.url,
        external_reference: order.external_reference,
        simulated: session.simulated,
        total: order.importe,
        items_count: order.items.len(),
        order_id: order.id,
        provider: provider.kind().as_str(),
    }))
}

/// POST /api/payments/vexor/session
pub async fn create_session(
    State(state): State<ServerState>,
    JsonBody(request): JsonBody<CheckoutRequest>,
) -> AppResult<Json<SessionResponse>> {
    let provider = &state.payments.session;
    let CheckoutOutcome { session, order } = checkout(&state, &request, provider).await?;

    Ok(Json(SessionResponse {
        checkout_url: session.url,
        simulated: session.simulated,
        provider: provider.kind().as_str(),
        external_reference: order.external_reference,
        total: order.importe,
        session: session.raw,
    }))
}

/// GET /api/payments/vexor/simulate?orderId&status
///
/// Applies the chosen result and sends the customer back to the storefront
/// with `?pago=success|failure|pending&order_id=`.
pub async fn simulate(
    State(state): State<ServerState>,
    Query(query): Query<SimulateQuery>,
) -> AppResult<Redirect> {
    let (Some(order_id), Some(status)) = (
        query.order_id.filter(|id| !id.is_empty()),
        query
            .status
            .filter(|s| SIMULATED_RESULTS.contains(&s.as_str())),
    ) else {
        return Err(AppError::invalid_request("Parámetros inválidos"));
    };

    let orders = state.orders.clone();
    let result = status.clone();
    let outcome = run_blocking(move || {
        orders.process_payment_notification(&PaymentTarget::ByOrderId(order_id), &result, None)
    })
    .await??;

    let pago = match status.as_str() {
        "approved" => "success",
        "rejected" => "failure",
        _ => "pending",
    };
    tracing::info!(
        order_id = %outcome.order_id,
        status = %outcome.payment_status,
        previous = %outcome.previous_status,
        "payment.simulated.callback"
    );

    Ok(Redirect::to(&format!(
        "{}/?pago={}&order_id={}",
        state.config.public_base_url, pago, outcome.order_id
    )))
}

/// GET /pago/simulado/:order_id
pub async fn checkout_page(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Html<String>> {
    let order = state.orders.get_order(&order_id)?;
    Ok(Html(page::render(&order, &state.config.public_base_url)))
}
