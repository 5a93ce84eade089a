// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Argon2 Password Hasher Adapter
//!
//! Implements the [`PasswordHasher`] port with Argon2id at the library's
//! default cost parameters. Hashes are PHC strings, so the algorithm, its
//! parameters, and the per-user salt are embedded in the stored value and
//! verification needs nothing else.
//!
//! The adapter precomputes one reference hash at construction. When a login
//! names no user, the auth service verifies the presented password against
//! this reference and discards the outcome, so the unknown-login path costs
//! the same hashing work as the known-login path.

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use ring::rand::{SecureRandom, SystemRandom};

use secret_vault_domain::{ErrorKind, PasswordHasher, VaultError};

/// Salt length for fresh hashes.
const SALT_LEN: usize = 16;

/// Argon2id implementation of the password hasher port.
pub struct Argon2Hasher {
    rng: SystemRandom,
    /// Reference hash used to equalize timing for unknown logins.
    sink_hash: String,
}

impl Argon2Hasher {
    pub fn new() -> Result<Self, VaultError> {
        let rng = SystemRandom::new();
        let sink_hash = Self::hash_with(&rng, "timing-equalization-reference")?;
        Ok(Self { rng, sink_hash })
    }

    fn hash_with(rng: &SystemRandom, password: &str) -> Result<String, VaultError> {
        let mut salt = [0u8; SALT_LEN];
        rng.fill(&mut salt)
            .map_err(|e| VaultError::with_detail(ErrorKind::Internal, format!("salt generation failed: {:?}", e)))?;
        let salt_string = SaltString::encode_b64(&salt)
            .map_err(|e| VaultError::with_detail(ErrorKind::Internal, format!("invalid salt: {}", e)))?;

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt_string)
            .map_err(|e| VaultError::with_detail(ErrorKind::Internal, format!("argon2 hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, VaultError> {
        Self::hash_with(&self.rng, password)
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, VaultError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| VaultError::with_detail(ErrorKind::Internal, format!("malformed password hash: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(VaultError::with_detail(
                ErrorKind::Internal,
                format!("password verification failed: {}", e),
            )),
        }
    }

    fn verify_sink(&self, password: &str) {
        // Outcome intentionally discarded; only the elapsed work matters.
        let _ = self.verify(password, &self.sink_hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_succeeds() {
        let hasher = Argon2Hasher::new().unwrap();
        let phc = hasher.hash("p@ss").unwrap();
        assert!(phc.starts_with("$argon2"));
        assert!(hasher.verify("p@ss", &phc).unwrap());
    }

    #[test]
    fn wrong_password_is_a_clean_mismatch() {
        let hasher = Argon2Hasher::new().unwrap();
        let phc = hasher.hash("p@ss").unwrap();
        assert!(!hasher.verify("other", &phc).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = Argon2Hasher::new().unwrap();
        assert_ne!(hasher.hash("p@ss").unwrap(), hasher.hash("p@ss").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_mismatch() {
        let hasher = Argon2Hasher::new().unwrap();
        assert!(hasher.verify("p", "not-a-phc-string").is_err());
    }

    #[test]
    fn sink_verification_does_not_panic() {
        let hasher = Argon2Hasher::new().unwrap();
        hasher.verify_sink("whatever");
    }
}
