// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Password Hasher Port
//!
//! Adaptive password hashing for registration and login. Hashes are PHC
//! strings carrying the algorithm identifier and per-user salt, so
//! verification needs no side data and parameters can be tightened without a
//! schema change.
//!
//! `verify_sink` exists to keep login timing flat: when the login does not
//! name a user, the auth service burns the same hashing work against a fixed
//! reference hash instead of returning early.

use crate::error::VaultError;

/// Domain port for password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a password with a fresh per-user salt into a PHC string.
    fn hash(&self, password: &str) -> Result<String, VaultError>;

    /// Verifies a password against a stored PHC string in constant time.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for malformed hashes or
    /// backend failure.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, VaultError>;

    /// Performs a full verification against a fixed reference hash and
    /// discards the result. Used to equalize timing for unknown logins.
    fn verify_sink(&self, password: &str);
}
