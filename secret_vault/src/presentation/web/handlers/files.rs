// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! File blob endpoints under `/api/items/files`. Payloads cross the wire as
//! base64; decoding failures are client errors, not technical ones.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use secret_vault_domain::{ErrorKind, VaultError};

use super::{op_context, parse_id};
use crate::application::services::FileDataInput;
use crate::presentation::web::auth::AuthUser;
use crate::presentation::web::dto::{FilePayload, FilePushRequest, PushResponse};
use crate::presentation::web::state::AppState;

/// `POST /api/items/files`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    payload: Result<Json<FilePushRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::FileDataApp, rejection.to_string()));
        }
    };
    let input = match FileDataInput::try_from(request) {
        Ok(input) => input,
        Err(err) => return state.errors.render(&err),
    };

    match state.files.create(op_context(&headers), user, input).await {
        Ok(id) => (StatusCode::CREATED, Json(PushResponse { id: id.to_string() })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}

/// `GET /api/items/files`
pub async fn list(State(state): State<AppState>, AuthUser(user): AuthUser, headers: HeaderMap) -> Response {
    match state.files.list(op_context(&headers), user).await {
        Ok(records) if records.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(records) => match records.iter().map(FilePayload::try_from).collect::<Result<Vec<_>, _>>() {
            Ok(items) => (StatusCode::OK, Json(items)).into_response(),
            Err(err) => state.errors.render(&err),
        },
        Err(err) => state.errors.render(&err),
    }
}

/// `GET /api/items/files/:id`
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id(&raw_id, ErrorKind::FileDataNotFound) {
        Ok(id) => id,
        Err(err) => return state.errors.render(&err),
    };

    match state.files.get(op_context(&headers), user, id).await {
        Ok(record) => match FilePayload::try_from(&record) {
            Ok(item) => (StatusCode::OK, Json(item)).into_response(),
            Err(err) => state.errors.render(&err),
        },
        Err(err) => state.errors.render(&err),
    }
}

/// `PUT /api/items/files/:id`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    payload: Result<Json<FilePushRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&raw_id, ErrorKind::FileDataNotFound) {
        Ok(id) => id,
        Err(err) => return state.errors.render(&err),
    };
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::FileDataApp, rejection.to_string()));
        }
    };
    let input = match FileDataInput::try_from(request) {
        Ok(input) => input,
        Err(err) => return state.errors.render(&err),
    };

    match state.files.update(op_context(&headers), user, id, input).await {
        Ok(id) => (StatusCode::CREATED, Json(PushResponse { id: id.to_string() })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}
