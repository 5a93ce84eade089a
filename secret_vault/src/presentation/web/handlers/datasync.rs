// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Bulk synchronization endpoints under `/api/items/datasync`. Pull answers
//! the caller's whole vault (204 when empty); push stores a batch through
//! the same validation and encryption paths as single creates.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use secret_vault_domain::{ErrorKind, VaultError};

use super::op_context;
use crate::application::services::SnapshotInput;
use crate::presentation::web::auth::AuthUser;
use crate::presentation::web::dto::{DatasyncPullResponse, DatasyncPushRequest, DatasyncPushResponse};
use crate::presentation::web::state::AppState;

/// `GET /api/items/datasync`
pub async fn pull(State(state): State<AppState>, AuthUser(user): AuthUser, headers: HeaderMap) -> Response {
    match state.datasync.pull(op_context(&headers), user).await {
        Ok(snapshot) if snapshot.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(snapshot) => match DatasyncPullResponse::try_from(&snapshot) {
            Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            Err(err) => state.errors.render(&err),
        },
        Err(err) => state.errors.render(&err),
    }
}

/// `POST /api/items/datasync`
pub async fn push(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    payload: Result<Json<DatasyncPushRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::DatasyncApp, rejection.to_string()));
        }
    };
    let input = match SnapshotInput::try_from(request) {
        Ok(input) => input,
        Err(err) => return state.errors.render(&err),
    };

    match state.datasync.push(op_context(&headers), user, input).await {
        Ok(stored) => (StatusCode::CREATED, Json(DatasyncPushResponse { stored })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}
