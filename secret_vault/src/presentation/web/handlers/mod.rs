// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # HTTP Handlers
//!
//! Thin adapters: extract and decode the request, invoke exactly one
//! application service call, and map the outcome, routing every error
//! through the registry so the response shape and logging decision are
//! uniform across resources.

pub mod auth;
pub mod bank_cards;
pub mod credentials;
pub mod datasync;
pub mod files;
pub mod health;
pub mod notes;
pub mod openapi;

use axum::http::HeaderMap;

use secret_vault_domain::{ErrorKind, OpContext, SecretId, VaultError};

/// Builds the operation context from the request-id header, which the
/// request-id layer guarantees to be present.
pub(crate) fn op_context(headers: &HeaderMap) -> OpContext {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(OpContext::with_request_id)
        .unwrap_or_default()
}

/// Parses a path id, folding malformed input into the resource's not-found
/// kind. The parse cause is dropped on purpose: a garbage id must answer
/// 404, not escalate to a technical failure.
pub(crate) fn parse_id(raw: &str, not_found: ErrorKind) -> Result<SecretId, VaultError> {
    SecretId::parse(raw).map_err(|_| VaultError::with_detail(not_found, format!("malformed id '{}'", raw)))
}
