// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # HKDF Key Provider Adapter
//!
//! Implements the [`KeyProvider`] port: derives the 256-bit per-user data
//! encryption key and caches it for the process lifetime.
//!
//! ## Derivation
//!
//! HKDF-SHA256 with:
//!
//! - **IKM**: the user's stored crypto material concatenated with the
//!   process-wide master secret
//! - **Salt**: the 16 raw bytes of the user id, binding the key to the user
//! - **Info**: a fixed string naming the scheme version
//!
//! The inputs never change while the process runs, so the derivation is
//! deterministic and cached keys never go stale.
//!
//! ## Cache Discipline
//!
//! Read-lock lookup first; on miss, derive outside any lock, then write-lock
//! to insert. Two tasks racing on the same fresh user may both derive, which
//! is harmless because the outputs are byte-identical; the second insert
//! overwrites with equal bytes. The map is bounded: at capacity, keys are
//! still derived per call but no longer inserted. Entries are discarded only
//! with the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use ring::hkdf;
use zeroize::Zeroizing;

use secret_vault_domain::{Dek, ErrorKind, KeyProvider, UserId, UserRepository, VaultError};

/// Scheme identifier mixed into every derivation.
const DEK_INFO: &[u8] = b"secret-vault/dek/v1";

/// Default bound on cached keys.
pub const DEFAULT_CACHE_CAPACITY: usize = 8192;

/// Output length marker for ring's HKDF expand.
struct OkmLen(usize);

impl hkdf::KeyType for OkmLen {
    fn len(&self) -> usize {
        self.0
    }
}

/// HKDF-SHA256 implementation of the key provider port.
pub struct HkdfKeyProvider {
    users: Arc<dyn UserRepository>,
    master_secret: Zeroizing<Vec<u8>>,
    cache: RwLock<HashMap<UserId, Dek>>,
    capacity: usize,
}

impl HkdfKeyProvider {
    /// Creates a provider with the default cache bound.
    pub fn new(users: Arc<dyn UserRepository>, master_secret: Vec<u8>) -> Self {
        Self::with_capacity(users, master_secret, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a provider with an explicit cache bound.
    pub fn with_capacity(users: Arc<dyn UserRepository>, master_secret: Vec<u8>, capacity: usize) -> Self {
        Self {
            users,
            master_secret: Zeroizing::new(master_secret),
            cache: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Runs the KDF for one user.
    fn derive(&self, user_id: UserId, crypto_material: &[u8]) -> Result<Dek, VaultError> {
        let salt = hkdf::Salt::new(hkdf::HKDF_SHA256, user_id.as_bytes());

        let mut ikm = Zeroizing::new(Vec::with_capacity(crypto_material.len() + self.master_secret.len()));
        ikm.extend_from_slice(crypto_material);
        ikm.extend_from_slice(&self.master_secret);

        let prk = salt.extract(&ikm);
        let okm = prk
            .expand(&[DEK_INFO], OkmLen(Dek::LEN))
            .map_err(|e| VaultError::with_detail(ErrorKind::KeyUnavailable, format!("HKDF expand failed: {:?}", e)))?;

        let mut key_bytes = [0u8; Dek::LEN];
        okm.fill(&mut key_bytes)
            .map_err(|e| VaultError::with_detail(ErrorKind::KeyUnavailable, format!("HKDF fill failed: {:?}", e)))?;

        Ok(Dek::new(key_bytes))
    }
}

#[async_trait]
impl KeyProvider for HkdfKeyProvider {
    async fn provide(&self, user_id: UserId) -> Result<Dek, VaultError> {
        if let Some(key) = self.cache.read().get(&user_id) {
            return Ok(key.clone());
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| VaultError::wrap_with(ErrorKind::KeyUnavailable, "loading key material", e))?
            .ok_or_else(|| {
                VaultError::with_detail(ErrorKind::KeyUnavailable, format!("no key material for user {}", user_id))
            })?;

        let key = self.derive(user_id, &user.crypto_material)?;

        let mut cache = self.cache.write();
        if cache.len() < self.capacity || cache.contains_key(&user_id) {
            cache.insert(user_id, key.clone());
        }
        Ok(key)
    }
}
