// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Token Issuer Port
//!
//! Stateless bearer credentials. A token is self-contained: verification
//! checks the integrity tag and the expiry against the process signing key
//! and needs no database lookup. The payload names the user and is not
//! treated as confidential.
//!
//! There is no refresh token and no revocation list; logout is client-side
//! discard. The port is narrow enough that an opaque session id backed by a
//! short-TTL cache could be substituted later without touching handlers.

use chrono::{DateTime, Utc};

use crate::error::VaultError;
use crate::value_objects::UserId;

/// A freshly issued bearer token with its expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The serialized signed token presented in the Authorization header.
    pub token: String,
    /// Instant after which verification fails.
    pub expires_at: DateTime<Utc>,
}

/// Domain port for bearer token issue and verification.
pub trait TokenIssuer: Send + Sync {
    /// Issues a fresh token for the user.
    fn issue(&self, user_id: UserId) -> Result<AccessToken, VaultError>;

    /// Verifies a serialized token and returns the user it names.
    ///
    /// Expired, tampered, and malformed tokens all fail; the caller
    /// collapses every failure to one public outcome.
    fn verify(&self, token: &str) -> Result<UserId, VaultError>;
}
