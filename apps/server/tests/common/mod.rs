//! Shared helpers for router tests.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use spendly_server::{api::app_router, build_state, config::Config};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db_path: String,
    pub blob_dir: String,
    _tmp: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("spendly.db").to_string_lossy().to_string();
    let blob_dir = tmp.path().join("blobs").to_string_lossy().to_string();

    let vars: HashMap<&str, String> = HashMap::from([
        ("SPENDLY_DB_PATH", db_path.clone()),
        ("SPENDLY_BLOB_DIR", blob_dir.clone()),
        ("SPENDLY_SECRET_KEY", BASE64.encode([42u8; 32])),
    ]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = build_state(&config).await.unwrap();
    let router = app_router(state, &config).unwrap();

    TestApp {
        router,
        db_path,
        blob_dir,
        _tmp: tmp,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).to_string(),
            ))
        };
        (status, json)
    }

    /// Registers `username` and returns a bearer token for it.
    pub async fn register(&self, username: &str) -> String {
        let (status, _) = self
            .send(
                Method::POST,
                "/api/v1/auth/signup",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "correct horse battery staple",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "password": "correct horse battery staple",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["accessToken"].as_str().unwrap().to_string()
    }
}
