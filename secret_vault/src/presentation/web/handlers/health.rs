// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Health and build-metadata endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::presentation::web::dto::{AboutResponse, HealthResponse};

/// `GET /api/health`
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
        .into_response()
}

/// `GET /api/about`
#[utoipa::path(
    get,
    path = "/api/about",
    responses(
        (status = 200, description = "Build metadata", body = AboutResponse)
    )
)]
pub async fn about() -> Response {
    (
        StatusCode::OK,
        Json(AboutResponse {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_commit: option_env!("VAULT_GIT_COMMIT").map(str::to_string),
            build_date: option_env!("VAULT_BUILD_DATE").map(str::to_string),
        }),
    )
        .into_response()
}
