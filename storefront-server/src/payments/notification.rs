//! Callback body classification
//!
//! Providers post two shapes:
//!
//! ```text
//! {"type":"payment","data":{"id":123}}                     -> PaymentLookup
//! {"external_reference":"ref_x","status":"approved", ...}  -> Direct
//! ```
//!
//! Anything else is acknowledged without processing.

use super::PaymentNotification;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum CallbackBody {
    /// A payment id the provider must be asked about
    PaymentLookup {
        payment_id: String,
        reference_hint: Option<String>,
    },
    /// The body already carries reference and status
    Direct(PaymentNotification),
    Unhandled,
}

/// Classify a raw callback body
pub fn classify(body: &Value) -> CallbackBody {
    let reference_hint = reference(body);

    if body.get("type").and_then(Value::as_str) == Some("payment") {
        if let Some(payment_id) = body.pointer("/data/id").and_then(id_string) {
            return CallbackBody::PaymentLookup {
                payment_id,
                reference_hint,
            };
        }
    }

    match reference_hint {
        Some(external_reference) => CallbackBody::Direct(PaymentNotification {
            external_reference,
            status: body
                .get("status")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("approved")
                .to_string(),
            amount: amount(body),
        }),
        None => CallbackBody::Unhandled,
    }
}

/// Reference from `external_reference` or `reference`
pub fn reference(body: &Value) -> Option<String> {
    ["external_reference", "reference"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Positive amount from `transaction_amount` or `amount`; zero means unknown
pub fn amount(body: &Value) -> Option<f64> {
    ["transaction_amount", "amount"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_f64))
        .find(|a| *a > 0.0)
}

/// Payment ids arrive as numbers or strings
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_type_needs_lookup() {
        let body = json!({"type": "payment", "data": {"id": 123456}});
        assert_eq!(
            classify(&body),
            CallbackBody::PaymentLookup {
                payment_id: "123456".into(),
                reference_hint: None,
            }
        );

        let body = json!({"type": "payment", "data": {"id": "987"}, "external_reference": "ref_a_1"});
        assert_eq!(
            classify(&body),
            CallbackBody::PaymentLookup {
                payment_id: "987".into(),
                reference_hint: Some("ref_a_1".into()),
            }
        );
    }

    #[test]
    fn test_direct_notification() {
        let body = json!({
            "external_reference": "ref_X",
            "status": "rejected",
            "transaction_amount": 2000
        });
        assert_eq!(
            classify(&body),
            CallbackBody::Direct(PaymentNotification {
                external_reference: "ref_X".into(),
                status: "rejected".into(),
                amount: Some(2000.0),
            })
        );
    }

    #[test]
    fn test_direct_defaults_to_approved_without_amount() {
        let body = json!({"reference": "ref_Y", "transaction_amount": 0});
        let CallbackBody::Direct(n) = classify(&body) else {
            panic!("expected direct notification");
        };
        assert_eq!(n.status, "approved");
        assert_eq!(n.amount, None);
    }

    #[test]
    fn test_unhandled_bodies() {
        assert_eq!(classify(&json!({})), CallbackBody::Unhandled);
        assert_eq!(
            classify(&json!({"type": "merchant_order", "data": {"id": 1}})),
            CallbackBody::Unhandled
        );
        assert_eq!(
            classify(&json!({"type": "payment", "data": {}})),
            CallbackBody::Unhandled
        );
    }
}
