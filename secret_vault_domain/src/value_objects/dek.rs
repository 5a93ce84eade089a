// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Data Encryption Key
//!
//! The 256-bit symmetric key bound to exactly one user. Keys are derived,
//! never persisted, and automatically wiped from memory when dropped.
//!
//! ## Security Properties
//!
//! - **Zeroization**: key bytes are cleared on drop so freed memory does not
//!   retain key material
//! - **Redacted Debug**: formatting a key never prints its bytes
//! - **Determinism**: two derivations for the same user within one process
//!   generation yield byte-identical keys, which makes a concurrent
//!   double-derivation race harmless

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ErrorKind, VaultError};

/// A 32-byte data encryption key for AES-256-GCM.
#[derive(Clone, PartialEq, Eq)]
pub struct Dek([u8; Dek::LEN]);

impl Dek {
    /// Key length in bytes (256 bits).
    pub const LEN: usize = 32;

    /// Wraps raw key bytes.
    pub fn new(bytes: [u8; Dek::LEN]) -> Self {
        Self(bytes)
    }

    /// Builds a key from a slice, rejecting wrong lengths.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VaultError> {
        let arr: [u8; Dek::LEN] = bytes.try_into().map_err(|_| {
            VaultError::with_detail(
                ErrorKind::KeyUnavailable,
                format!("derived key has {} bytes, expected {}", bytes.len(), Dek::LEN),
            )
        })?;
        Ok(Self(arr))
    }

    /// Exposes the key bytes to the cipher.
    pub fn as_bytes(&self) -> &[u8; Dek::LEN] {
        &self.0
    }
}

impl Zeroize for Dek {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Dek {}

impl std::fmt::Debug for Dek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Dek(..)")
    }
}
