// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Envelope Crypto Port
//!
//! Authenticated symmetric encryption of sensitive field bytes.
//!
//! ## Contract
//!
//! - `open(key, seal(key, p)) == p` bitwise
//! - `open` with a different key fails with an authentication error and
//!   never returns garbage
//! - repeated `seal` of the same plaintext yields distinct envelopes (fresh
//!   nonce per call)
//! - `open` distinguishes malformed input, an unsupported envelope version,
//!   and an authentication failure, so callers can classify precisely
//!
//! The envelope is a single opaque byte sequence; nobody outside the
//! implementing adapter inspects its parts.

use crate::error::VaultError;
use crate::value_objects::Dek;

/// Domain port for authenticated field encryption.
pub trait EnvelopeCrypto: Send + Sync {
    /// Encrypts plaintext into a self-contained envelope.
    fn seal(&self, key: &Dek, plaintext: &[u8]) -> Result<Vec<u8>, VaultError>;

    /// Decrypts an envelope produced by [`EnvelopeCrypto::seal`].
    fn open(&self, key: &Dek, envelope: &[u8]) -> Result<Vec<u8>, VaultError>;
}
