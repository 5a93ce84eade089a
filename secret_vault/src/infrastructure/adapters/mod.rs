// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Adapters
//!
//! Concrete implementations of the domain security ports:
//!
//! - [`AesGcmEnvelope`]: AES-256-GCM field encryption
//! - [`HkdfKeyProvider`]: HKDF-SHA256 per-user key derivation with a bounded
//!   in-process cache
//! - [`Argon2Hasher`]: Argon2id password hashing (PHC strings)
//! - [`JwtTokenIssuer`]: HMAC-SHA256 signed bearer tokens
//!
//! Plus [`generate_crypto_material`], the CSPRNG source for the per-user key
//! material created at registration.

mod aes_gcm_envelope;
mod argon2_hasher;
mod hkdf_key_provider;
mod jwt_tokens;

pub use aes_gcm_envelope::AesGcmEnvelope;
pub use argon2_hasher::Argon2Hasher;
pub use hkdf_key_provider::HkdfKeyProvider;
pub use jwt_tokens::JwtTokenIssuer;

use ring::rand::{SecureRandom, SystemRandom};
use secret_vault_domain::{ErrorKind, VaultError};

/// Size of the per-user key derivation input material.
pub const CRYPTO_MATERIAL_LEN: usize = 32;

/// Draws fresh high-entropy key material for a new user.
pub fn generate_crypto_material() -> Result<Vec<u8>, VaultError> {
    let rng = SystemRandom::new();
    let mut material = vec![0u8; CRYPTO_MATERIAL_LEN];
    rng.fill(&mut material).map_err(|e| {
        VaultError::with_detail(ErrorKind::Internal, format!("crypto material generation failed: {:?}", e))
    })?;
    Ok(material)
}
