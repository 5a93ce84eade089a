// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Shared helpers for the end-to-end suite: an in-process application over
//! in-memory SQLite, driven through the real router without a socket.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use secret_vault::infrastructure::repositories::schema;
use secret_vault::presentation::web::{build_router, AppState};

pub struct TestApp {
    router: Router,
    /// Direct database access for at-rest assertions.
    pub pool: SqlitePool,
}

/// Builds a fresh application over an empty in-memory database.
pub async fn spawn_app() -> TestApp {
    let pool = schema::initialize_in_memory().await.expect("in-memory database");
    let state = AppState::assemble(
        pool.clone(),
        b"e2e-master-secret".to_vec(),
        b"e2e-token-signing-key",
        chrono::Duration::hours(1),
    )
    .expect("state assembly");
    TestApp {
        router: build_router(state),
        pool,
    }
}

impl TestApp {
    /// Sends one request and returns status plus parsed JSON body
    /// (`Value::Null` for empty bodies).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        auth_header: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, Some(&format!("Bearer {}", token)), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(&format!("Bearer {}", token)), Some(body)).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(&format!("Bearer {}", token)), Some(body)).await
    }

    /// Registers a user and returns the issued token.
    pub async fn register(&self, login: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/register",
                None,
                Some(serde_json::json!({"login": login, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {:?}", body);
        body["token"].as_str().expect("token").to_string()
    }

    /// Logs a user in and returns the issued token.
    pub async fn login(&self, login: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/login",
            None,
            Some(serde_json::json!({"login": login, "password": password})),
        )
        .await
    }
}

/// Extracts the message list from an error body.
pub fn messages(body: &Value) -> Vec<String> {
    body["messages"]
        .as_array()
        .map(|list| list.iter().filter_map(|m| m.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
