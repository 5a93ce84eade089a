// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Services
//!
//! Contracts for the security primitives the vault depends on. The domain
//! owns the interfaces; infrastructure adapters own the algorithms:
//!
//! - [`KeyProvider`]: vends the per-user data encryption key
//! - [`EnvelopeCrypto`]: authenticated symmetric encryption of field bytes
//! - [`PasswordHasher`]: adaptive password hashing with embedded parameters
//! - [`TokenIssuer`]: stateless bearer token issue and verification
//!
//! Key derivation goes through the user repository and may suspend, so
//! [`KeyProvider`] is async. Envelope operations work on small in-memory
//! fields and stay synchronous.

mod envelope_crypto;
mod key_provider;
mod password_hasher;
mod token_issuer;

pub use envelope_crypto::EnvelopeCrypto;
pub use key_provider::KeyProvider;
pub use password_hasher::PasswordHasher;
pub use token_issuer::{AccessToken, TokenIssuer};
