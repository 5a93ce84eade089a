// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Bank card endpoints under `/api/items/bankcards`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use secret_vault_domain::{ErrorKind, VaultError};

use super::{op_context, parse_id};
use crate::presentation::web::auth::AuthUser;
use crate::presentation::web::dto::{BankCardPayload, BankCardPushRequest, PushResponse};
use crate::presentation::web::state::AppState;

/// `POST /api/items/bankcards`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    payload: Result<Json<BankCardPushRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::BankCardApp, rejection.to_string()));
        }
    };

    match state.bank_cards.create(op_context(&headers), user, request.into()).await {
        Ok(id) => (StatusCode::CREATED, Json(PushResponse { id: id.to_string() })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}

/// `GET /api/items/bankcards`
pub async fn list(State(state): State<AppState>, AuthUser(user): AuthUser, headers: HeaderMap) -> Response {
    match state.bank_cards.list(op_context(&headers), user).await {
        Ok(records) if records.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(records) => match records.iter().map(BankCardPayload::try_from).collect::<Result<Vec<_>, _>>() {
            Ok(items) => (StatusCode::OK, Json(items)).into_response(),
            Err(err) => state.errors.render(&err),
        },
        Err(err) => state.errors.render(&err),
    }
}

/// `GET /api/items/bankcards/:id`
pub async fn get(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id(&raw_id, ErrorKind::BankCardNotFound) {
        Ok(id) => id,
        Err(err) => return state.errors.render(&err),
    };

    match state.bank_cards.get(op_context(&headers), user, id).await {
        Ok(record) => match BankCardPayload::try_from(&record) {
            Ok(item) => (StatusCode::OK, Json(item)).into_response(),
            Err(err) => state.errors.render(&err),
        },
        Err(err) => state.errors.render(&err),
    }
}

/// `PUT /api/items/bankcards/:id`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    payload: Result<Json<BankCardPushRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&raw_id, ErrorKind::BankCardNotFound) {
        Ok(id) => id,
        Err(err) => return state.errors.render(&err),
    };
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return state
                .errors
                .render(&VaultError::with_detail(ErrorKind::BankCardApp, rejection.to_string()));
        }
    };

    match state.bank_cards.update(op_context(&headers), user, id, request.into()).await {
        Ok(id) => (StatusCode::CREATED, Json(PushResponse { id: id.to_string() })).into_response(),
        Err(err) => state.errors.render(&err),
    }
}
