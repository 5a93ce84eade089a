// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bearer Authentication Middleware
//!
//! Guards the `/api/items` subtree. The Authorization header may carry the
//! literal `Bearer ` prefix or a bare token; both are accepted. Every
//! verification failure, including a missing header, renders through the
//! error registry as the one canonical invalid-token response.
//!
//! On success the resolved [`AuthUser`] rides the request extensions and
//! handlers receive it as an extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use secret_vault_domain::{ErrorKind, UserId, VaultError};

use super::state::AppState;

/// The authenticated caller of a protected route.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent only if the route skipped the auth middleware, which is a
        // wiring bug, not a client error.
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Token-verifying middleware for protected routes.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let token = header_value.strip_prefix("Bearer ").unwrap_or(header_value).trim();

    if token.is_empty() {
        return state
            .errors
            .render(&VaultError::with_detail(ErrorKind::AuthInvalidAccessToken, "missing bearer token"));
    }

    match state.auth.validate_token(token) {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthUser(user_id));
            next.run(request).await
        }
        Err(err) => state.errors.render(&err),
    }
}
