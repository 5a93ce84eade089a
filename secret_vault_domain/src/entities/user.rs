// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # User Entity
//!
//! Identity record for one vault tenant. Two fields carry the user's entire
//! security context:
//!
//! - `password_hash`: a PHC-format string with the hash algorithm identifier
//!   and per-user salt embedded. It is never serialized outward.
//! - `crypto_material`: 32 high-entropy bytes generated once at registration.
//!   Combined with the process master secret it yields the user's data
//!   encryption key; it never changes during the user's lifetime, so derived
//!   keys stay stable.
//!
//! Users are created on successful registration and never deleted by the
//! core.

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// A registered vault user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique opaque identifier.
    pub id: UserId,
    /// Globally unique, case-sensitive login.
    pub login: String,
    /// PHC-format password hash. Never returned to clients.
    pub password_hash: String,
    /// Input material for per-user key derivation. Generated once.
    pub crypto_material: Vec<u8>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Assembles a new user at registration time.
    ///
    /// The caller (the auth service) validates the login, hashes the
    /// password, and generates the crypto material; this constructor only
    /// stamps identity and time.
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>, crypto_material: Vec<u8>) -> Self {
        Self {
            id: UserId::generate(),
            login: login.into(),
            password_hash: password_hash.into(),
            crypto_material,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_users_get_distinct_ids() {
        let a = User::new("alice", "$argon2id$stub", vec![0u8; 32]);
        let b = User::new("bob", "$argon2id$stub", vec![0u8; 32]);
        assert_ne!(a.id, b.id);
    }
}
