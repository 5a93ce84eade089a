// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # User ID Value Object
//!
//! Typed identifier for vault users. A `UserId` participates in three
//! security-relevant places, so keeping it strongly typed matters:
//!
//! - ownership checks compare the caller's id against a record's id
//! - key derivation uses the id bytes as the KDF salt, binding every
//!   data encryption key to exactly one user
//! - token claims carry the id as the subject
//!
//! The identifier is a UUID v4, generated at registration and stable for the
//! user's lifetime.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ErrorKind, VaultError};

/// Unique identifier of a vault user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its canonical string form.
    pub fn parse(value: &str) -> Result<Self, VaultError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|e| VaultError::with_detail(ErrorKind::Internal, format!("invalid user id: {}", e)))
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the 16 raw bytes of the identifier.
    ///
    /// Used as the KDF salt; must be stable across releases.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn round_trips_through_string_form() {
        let id = UserId::generate();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_garbage() {
        assert!(UserId::parse("not-a-uuid").is_err());
    }
}
