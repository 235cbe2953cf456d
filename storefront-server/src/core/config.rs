//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | PORT / HTTP_PORT | 4000 | HTTP port (`PORT` wins) |
//! | BIND_ADDR | 127.0.0.1 | listen address |
//! | PUBLIC_BASE_URL | http://localhost:{port} | base for redirects and simulated checkout links |
//! | DATA_DIR | data | folder with `products.json` and `orders.json` |
//! | ENVIRONMENT | development | development / staging / production |
//! | ADMIN_TOKEN | dev placeholder | admin bearer token (required outside development) |
//! | LOG_LEVEL / LOG_DIR / LOG_JSON | info / - / false | logging |
//! | MP_ACCESS_TOKEN | - | enables the MercadoPago gateway |
//! | MP_API_BASE | https://api.mercadopago.com | MercadoPago REST base |
//! | MP_BACK_SUCCESS / MP_BACK_FAILURE / MP_BACK_PENDING | per order | return URLs |
//! | MP_WEBHOOK | {base}/webhooks/mercadopago | notification URL |
//! | VEXOR_SECRET_KEY / VEXOR_API_BASE / VEXOR_PROJECT / VEXOR_PUBLISHABLE_KEY | - | Vexor gateway |
//! | PAYMENT_TIMEOUT_MS | 15000 | outbound provider call timeout |
//! | CURRENCY | ARS | currency sent to providers |

use super::error::{Result, ServerError};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MP_API_BASE: &str = "https://api.mercadopago.com";
const DEFAULT_PAYMENT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_CURRENCY: &str = "ARS";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub bind_addr: String,
    /// Public base URL without trailing slash
    pub public_base_url: String,
    pub data_dir: PathBuf,
    /// development | staging | production
    pub environment: String,
    pub admin_token: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    pub payments: PaymentConfig,
}

/// Payment provider settings
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Same as [`Config::public_base_url`]
    pub base_url: String,
    pub mp_access_token: Option<String>,
    pub mp_api_base: String,
    pub back_success: Option<String>,
    pub back_failure: Option<String>,
    pub back_pending: Option<String>,
    pub webhook_url: Option<String>,
    pub vexor: VexorConfig,
    pub timeout: Duration,
    pub currency: String,
}

#[derive(Debug, Clone, Default)]
pub struct VexorConfig {
    pub secret_key: Option<String>,
    pub api_base: Option<String>,
    pub project: Option<String>,
    pub publishable_key: Option<String>,
}

impl VexorConfig {
    /// Any Vexor setting present
    pub fn is_present(&self) -> bool {
        self.secret_key.is_some()
            || self.api_base.is_some()
            || self.project.is_some()
            || self.publishable_key.is_some()
    }
}

/// Customer return URLs after checkout
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_opt(name).and_then(|v| v.trim().parse().ok())
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development
    fn require_secret(name: &str, environment: &str) -> Result<String> {
        match env_opt(name) {
            Some(v) => Ok(v),
            None if environment == "development" => Ok(format!("dev-{name}-not-for-production")),
            None => Err(ServerError::Config(format!(
                "{name} must be set in {environment} environment"
            ))),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let environment = env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let http_port = env_parse("PORT")
            .or_else(|| env_parse("HTTP_PORT"))
            .unwrap_or(DEFAULT_PORT);
        let public_base_url = env_opt("PUBLIC_BASE_URL")
            .map(trim_slash)
            .unwrap_or_else(|| format!("http://localhost:{http_port}"));

        let payments = PaymentConfig {
            base_url: public_base_url.clone(),
            mp_access_token: env_opt("MP_ACCESS_TOKEN"),
            mp_api_base: env_opt("MP_API_BASE")
                .map(trim_slash)
                .unwrap_or_else(|| DEFAULT_MP_API_BASE.into()),
            back_success: env_opt("MP_BACK_SUCCESS"),
            back_failure: env_opt("MP_BACK_FAILURE"),
            back_pending: env_opt("MP_BACK_PENDING"),
            webhook_url: env_opt("MP_WEBHOOK"),
            vexor: VexorConfig {
                secret_key: env_opt("VEXOR_SECRET_KEY"),
                api_base: env_opt("VEXOR_API_BASE").map(trim_slash),
                project: env_opt("NEXT_PUBLIC_VEXOR_PROJECT").or_else(|| env_opt("VEXOR_PROJECT")),
                publishable_key: env_opt("NEXT_PUBLIC_VEXOR_PUBLISHABLE_KEY")
                    .or_else(|| env_opt("VEXOR_PUBLISHABLE_KEY")),
            },
            timeout: Duration::from_millis(
                env_parse("PAYMENT_TIMEOUT_MS").unwrap_or(DEFAULT_PAYMENT_TIMEOUT_MS),
            ),
            currency: env_opt("CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.into()),
        };

        Ok(Self {
            http_port,
            bind_addr: env_opt("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".into()),
            public_base_url,
            data_dir: env_opt("DATA_DIR").unwrap_or_else(|| "data".into()).into(),
            admin_token: Self::require_secret("ADMIN_TOKEN", &environment)?,
            environment,
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            payments,
        })
    }

    /// Development defaults without reading the environment
    ///
    /// Every provider is simulated. Used by tests.
    pub fn development(data_dir: impl Into<PathBuf>) -> Self {
        let public_base_url = format!("http://localhost:{DEFAULT_PORT}");
        Self {
            http_port: DEFAULT_PORT,
            bind_addr: "127.0.0.1".into(),
            public_base_url: public_base_url.clone(),
            data_dir: data_dir.into(),
            environment: "development".into(),
            admin_token: "dev-ADMIN_TOKEN-not-for-production".into(),
            log_level: "info".into(),
            log_dir: None,
            log_json: false,
            payments: PaymentConfig {
                base_url: public_base_url,
                mp_access_token: None,
                mp_api_base: DEFAULT_MP_API_BASE.into(),
                back_success: None,
                back_failure: None,
                back_pending: None,
                webhook_url: None,
                vexor: VexorConfig::default(),
                timeout: Duration::from_millis(DEFAULT_PAYMENT_TIMEOUT_MS),
                currency: DEFAULT_CURRENCY.into(),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl PaymentConfig {
    /// Return URLs for an order; explicit `MP_BACK_*` values win
    pub fn back_urls(&self, order_id: &str) -> BackUrls {
        let default = |pago: &str| format!("{}/?pago={}&order_id={}", self.base_url, pago, order_id);
        BackUrls {
            success: self.back_success.clone().unwrap_or_else(|| default("success")),
            failure: self.back_failure.clone().unwrap_or_else(|| default("failure")),
            pending: self.back_pending.clone().unwrap_or_else(|| default("pending")),
        }
    }

    /// Where MercadoPago should post notifications
    pub fn notification_url(&self) -> String {
        self.webhook_url
            .clone()
            .unwrap_or_else(|| format!("{}/webhooks/mercadopago", self.base_url))
    }

    /// Name of the provider the storefront advertises
    pub fn active_provider(&self) -> &'static str {
        if self.vexor.is_present() {
            "vexor"
        } else if self.mp_access_token.is_some() {
            "mercadopago"
        } else {
            "simulated"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_urls_default_to_storefront() {
        let config = Config::development("data");
        let urls = config.payments.back_urls("AbC123xy");
        assert_eq!(
            urls.success,
            "http://localhost:4000/?pago=success&order_id=AbC123xy"
        );
        assert_eq!(
            urls.pending,
            "http://localhost:4000/?pago=pending&order_id=AbC123xy"
        );
    }

    #[test]
    fn test_back_urls_overrides() {
        let mut config = Config::development("data");
        config.payments.back_failure = Some("https://shop.example/fallo".into());
        let urls = config.payments.back_urls("x");
        assert_eq!(urls.failure, "https://shop.example/fallo");
        assert!(urls.success.starts_with("http://localhost:4000/"));
    }

    #[test]
    fn test_active_provider() {
        let mut payments = Config::development("data").payments;
        assert_eq!(payments.active_provider(), "simulated");

        payments.mp_access_token = Some("TEST-123".into());
        assert_eq!(payments.active_provider(), "mercadopago");

        payments.vexor.project = Some("burger-house".into());
        assert_eq!(payments.active_provider(), "vexor");
    }

    #[test]
    fn test_notification_url() {
        let payments = Config::development("data").payments;
        assert_eq!(
            payments.notification_url(),
            "http://localhost:4000/webhooks/mercadopago"
        );
    }
}
