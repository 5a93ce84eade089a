// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # AES-256-GCM Envelope Adapter
//!
//! Implements the [`EnvelopeCrypto`] port with AES-256-GCM authenticated
//! encryption.
//!
//! ## Envelope Layout
//!
//! ```text
//! +---------+--------------+----------------------+
//! | version |    nonce     |  ciphertext || tag   |
//! |  1 byte |   12 bytes   |  plaintext + 16 bytes|
//! +---------+--------------+----------------------+
//! ```
//!
//! The envelope is opaque to every other component. The version byte exists
//! so a future algorithm change can coexist with rows sealed today; the only
//! version currently produced or accepted is `0x01`.
//!
//! ## Security Notes
//!
//! - Nonces are 12 random bytes drawn from the system CSPRNG per seal, so
//!   sealing the same plaintext twice yields distinct envelopes
//! - Decryption failures are classified: short input, unknown version, and
//!   tag mismatch are distinct error kinds, which keeps operator diagnostics
//!   honest without leaking anything to clients
//! - A tag mismatch returns an error, never garbage plaintext

use aes_gcm::{AeadInPlace, Aes256Gcm, Key, KeyInit, Nonce};
use ring::rand::{SecureRandom, SystemRandom};

use secret_vault_domain::{Dek, EnvelopeCrypto, ErrorKind, VaultError};

/// Only envelope version in circulation.
const ENVELOPE_VERSION: u8 = 0x01;
/// GCM nonce size (96 bits).
const NONCE_LEN: usize = 12;
/// GCM authentication tag size (128 bits).
const TAG_LEN: usize = 16;

/// AES-256-GCM implementation of the envelope port.
pub struct AesGcmEnvelope {
    rng: SystemRandom,
}

impl AesGcmEnvelope {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// Generates a fresh random nonce.
    fn generate_nonce(&self) -> Result<[u8; NONCE_LEN], VaultError> {
        let mut nonce = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce)
            .map_err(|e| VaultError::with_detail(ErrorKind::CipherFailure, format!("nonce generation failed: {:?}", e)))?;
        Ok(nonce)
    }
}

impl Default for AesGcmEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeCrypto for AesGcmEnvelope {
    fn seal(&self, key: &Dek, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        let nonce = self.generate_nonce()?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

        let mut buffer = plaintext.to_vec();
        cipher
            .encrypt_in_place(Nonce::from_slice(&nonce), b"", &mut buffer)
            .map_err(|e| {
                VaultError::with_detail(ErrorKind::CipherFailure, format!("AES-256-GCM encryption failed: {:?}", e))
            })?;

        let mut envelope = Vec::with_capacity(1 + NONCE_LEN + buffer.len());
        envelope.push(ENVELOPE_VERSION);
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&buffer);
        Ok(envelope)
    }

    fn open(&self, key: &Dek, envelope: &[u8]) -> Result<Vec<u8>, VaultError> {
        if envelope.len() < 1 + NONCE_LEN + TAG_LEN {
            return Err(VaultError::with_detail(
                ErrorKind::CipherMalformed,
                format!("envelope of {} bytes is too short", envelope.len()),
            ));
        }
        if envelope[0] != ENVELOPE_VERSION {
            return Err(VaultError::with_detail(
                ErrorKind::CipherVersion,
                format!("unsupported envelope version {:#04x}", envelope[0]),
            ));
        }

        let (nonce, ciphertext) = envelope[1..].split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

        let mut buffer = ciphertext.to_vec();
        cipher
            .decrypt_in_place(Nonce::from_slice(nonce), b"", &mut buffer)
            .map_err(|_| VaultError::new(ErrorKind::CipherAuthFailed))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Dek {
        Dek::new([byte; 32])
    }

    #[test]
    fn round_trip_is_identity() {
        let envelope = AesGcmEnvelope::new();
        let k = key(0x11);
        let plaintext = b"correct horse battery staple";

        let sealed = envelope.seal(&k, plaintext).unwrap();
        let opened = envelope.open(&k, &sealed).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let envelope = AesGcmEnvelope::new();
        let k = key(0x22);
        let sealed = envelope.seal(&k, b"").unwrap();
        assert_eq!(envelope.open(&k, &sealed).unwrap(), b"");
    }

    #[test]
    fn repeated_seals_differ() {
        let envelope = AesGcmEnvelope::new();
        let k = key(0x33);
        let a = envelope.seal(&k, b"same plaintext").unwrap();
        let b = envelope.seal(&k, b"same plaintext").unwrap();
        assert_ne!(a, b);
        // The nonces themselves differ, not just the ciphertext.
        assert_ne!(a[1..1 + NONCE_LEN], b[1..1 + NONCE_LEN]);
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let envelope = AesGcmEnvelope::new();
        let sealed = envelope.seal(&key(0x44), b"secret").unwrap();
        let err = envelope.open(&key(0x45), &sealed).unwrap_err();
        assert!(err.is(ErrorKind::CipherAuthFailed));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let envelope = AesGcmEnvelope::new();
        let k = key(0x55);
        let mut sealed = envelope.seal(&k, b"secret").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        let err = envelope.open(&k, &sealed).unwrap_err();
        assert!(err.is(ErrorKind::CipherAuthFailed));
    }

    #[test]
    fn short_input_is_malformed() {
        let envelope = AesGcmEnvelope::new();
        let err = envelope.open(&key(0x66), &[ENVELOPE_VERSION, 1, 2, 3]).unwrap_err();
        assert!(err.is(ErrorKind::CipherMalformed));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let envelope = AesGcmEnvelope::new();
        let k = key(0x77);
        let mut sealed = envelope.seal(&k, b"secret").unwrap();
        sealed[0] = 0x02;
        let err = envelope.open(&k, &sealed).unwrap_err();
        assert!(err.is(ErrorKind::CipherVersion));
    }

    #[test]
    fn envelope_layout_is_versioned() {
        let envelope = AesGcmEnvelope::new();
        let sealed = envelope.seal(&key(0x88), b"x").unwrap();
        assert_eq!(sealed[0], ENVELOPE_VERSION);
        assert_eq!(sealed.len(), 1 + NONCE_LEN + 1 + TAG_LEN);
    }
}
