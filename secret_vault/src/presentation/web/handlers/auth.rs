// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Registration and login endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use secret_vault_domain::{ErrorKind, VaultError};

use crate::presentation::web::dto::{LoginRequest, RegisterRequest, TokenResponse};
use crate::presentation::web::state::AppState;

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::AuthApp, rejection.to_string()));
        }
    };

    match state.auth.register(&request.login, &request.password).await {
        Ok(issued) => (StatusCode::CREATED, Json(TokenResponse { token: issued.token })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}

/// `POST /api/login`
pub async fn login(State(state): State<AppState>, payload: Result<Json<LoginRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::AuthApp, rejection.to_string()));
        }
    };

    match state.auth.login(&request.login, &request.password).await {
        Ok(issued) => (StatusCode::OK, Json(TokenResponse { token: issued.token })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}
