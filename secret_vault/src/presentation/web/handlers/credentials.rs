// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Credential endpoints under `/api/items/credentials`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use secret_vault_domain::{ErrorKind, VaultError};

use super::{op_context, parse_id};
use crate::presentation::web::auth::AuthUser;
use crate::presentation::web::dto::{CredentialPayload, CredentialPushRequest, PushResponse};
use crate::presentation::web::state::AppState;

/// `POST /api/items/credentials`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    payload: Result<Json<CredentialPushRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::CredentialApp, rejection.to_string()));
        }
    };

    match state.credentials.create(op_context(&headers), user, request.into()).await {
        Ok(id) => (StatusCode::CREATED, Json(PushResponse { id: id.to_string() })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}

/// `GET /api/items/credentials`
pub async fn list(State(state): State<AppState>, AuthUser(user): AuthUser, headers: HeaderMap) -> Response {
    match state.credentials.list(op_context(&headers), user).await {
        Ok(records) if records.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(records) => {
            match records.iter().map(CredentialPayload::try_from).collect::<Result<Vec<_>, _>>() {
                Ok(items) => (StatusCode::OK, Json(items)).into_response(),
                Err(err) => state.errors.render(&err),
            }
        }
        Err(err) => state.errors.render(&err),
    }
}

/// `GET /api/items/credentials/:id`
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id(&raw_id, ErrorKind::CredentialNotFound) {
        Ok(id) => id,
        Err(err) => return state.errors.render(&err),
    };

    match state.credentials.get(op_context(&headers), user, id).await {
        Ok(record) => match CredentialPayload::try_from(&record) {
            Ok(item) => (StatusCode::OK, Json(item)).into_response(),
            Err(err) => state.errors.render(&err),
        },
        Err(err) => state.errors.render(&err),
    }
}

/// `PUT /api/items/credentials/:id`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    payload: Result<Json<CredentialPushRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&raw_id, ErrorKind::CredentialNotFound) {
        Ok(id) => id,
        Err(err) => return state.errors.render(&err),
    };
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::CredentialApp, rejection.to_string()));
        }
    };

    match state.credentials.update(op_context(&headers), user, id, request.into()).await {
        Ok(id) => (StatusCode::CREATED, Json(PushResponse { id: id.to_string() })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}
