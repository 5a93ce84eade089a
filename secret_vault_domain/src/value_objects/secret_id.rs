// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Typed identifier for stored secrets, shared by all four variants.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ErrorKind, VaultError};

/// Unique identifier of a stored secret (any variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretId(Uuid);

impl SecretId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its canonical string form.
    pub fn parse(value: &str) -> Result<Self, VaultError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|e| VaultError::with_detail(ErrorKind::Internal, format!("invalid secret id: {}", e)))
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for SecretId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SecretId {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_string_form() {
        let id = SecretId::generate();
        assert_eq!(id, SecretId::parse(&id.to_string()).unwrap());
    }
}
