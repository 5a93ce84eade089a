// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Key Provider Port
//!
//! Vends the 256-bit data encryption key for a user.
//!
//! ## Contract
//!
//! - Deterministic per `(user id, process master secret)`: repeated calls in
//!   one process generation return byte-identical keys
//! - Keys of distinct users are indistinguishable from independent random
//!   keys; one user's key never opens another user's envelopes
//! - Failure to load the user's key material and failure to derive are both
//!   surfaced as `KeyUnavailable`, with the underlying cause wrapped
//!
//! Implementations are shared across request tasks and must be safe for
//! concurrent use; duplicate derivation under a cache race is acceptable
//! because the output is deterministic.

use async_trait::async_trait;

use crate::error::VaultError;
use crate::value_objects::{Dek, UserId};

/// Domain port for per-user key derivation.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// Returns the data encryption key for `user_id`.
    async fn provide(&self, user_id: UserId) -> Result<Dek, VaultError>;
}
