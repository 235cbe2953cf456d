//! Helpers shared by the HTTP integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use storefront_server::{Config, ServerState, api};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "test-admin-token";

pub struct TestApp {
    pub dir: TempDir,
    pub state: ServerState,
    pub router: Router,
}

/// Response status, headers and body (JSON, or a string for anything else)
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// App over a fresh data directory, every provider simulated
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::development(dir.path());
        config.admin_token = ADMIN_TOKEN.to_string();
        customize(&mut config);

        let state = ServerState::initialize(&config).unwrap();
        let router = api::create_router(state.clone());
        Self { dir, state, router }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Body>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request("POST", uri, None, Some(Body::from(body.to_string())))
            .await
    }

    pub async fn admin(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        self.request(
            method,
            uri,
            Some(ADMIN_TOKEN),
            body.map(|b| Body::from(b.to_string())),
        )
        .await
    }

    /// Create a product through the admin API
    pub async fn seed_product(&self, id: &str, precio: f64, stock: i64) {
        let resp = self
            .admin(
                "POST",
                "/api/products",
                Some(json!({
                    "id": id,
                    "nombre": id.to_uppercase(),
                    "precio": precio,
                    "stock": stock,
                })),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    }

    pub async fn stock_of(&self, id: &str) -> u64 {
        let resp = self.get(&format!("/api/products/{}", id)).await;
        resp.body["stock"].as_u64().unwrap()
    }

    /// Create an order and return its id
    pub async fn create_order(&self, items: Value) -> String {
        let resp = self
            .post("/api/orders", json!({ "cliente": "Ana", "items": items }))
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
        resp.body["id"].as_str().unwrap().to_string()
    }
}

/// Serve `router` on an ephemeral local port; returns its base URL
pub async fn spawn_mock(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
