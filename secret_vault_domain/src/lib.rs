// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secret Vault Domain
//!
//! Core business logic of the multi-tenant encrypted secrets vault. The
//! crate is independent of databases, HTTP frameworks, and cipher backends;
//! it owns the rules and the contracts, and the composition crate plugs in
//! the machinery.
//!
//! ## Module Structure
//!
//! ### Entities
//! Objects with identity that persists through state changes:
//!
//! - `User`: a registered tenant with password hash and key material
//! - `Credential`, `BankCard`, `Note`, `FileData`: the four secret variants,
//!   each implementing the `SecretRecord` contract consumed by the
//!   persistence middleware
//!
//! ### Value Objects
//! Immutable, self-validating types:
//!
//! - `UserId`, `SecretId`: typed identifiers
//! - `Dek`: the per-user data encryption key, zeroized on drop
//!
//! ### Domain Services
//! Ports for the security primitives, implemented by infrastructure:
//!
//! - `KeyProvider`: derivation and caching of per-user keys
//! - `EnvelopeCrypto`: authenticated field encryption
//! - `PasswordHasher`: adaptive password hashing
//! - `TokenIssuer`: stateless bearer tokens
//!
//! ### Repositories and Middleware
//! Persistence ports plus the higher-order composition that wraps raw
//! save/load functions with encryption, ownership enforcement, and tracing.
//! Business code calls a repository; envelopes happen underneath.
//!
//! ### Errors
//! A single `VaultError` with machine-matchable kinds and a cause tree that
//! survives layer boundaries, feeding the delivery-layer error registry.
//!
//! ## Invariants Enforced Here
//!
//! - A record's owner never changes after creation
//! - `updated_at` is monotonically non-decreasing per record
//! - Validation reports every violation of an input at once
//! - Raw persistence beneath the encryption layer never sees plaintext;
//!   callers above the decryption layer never see envelopes

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Flat re-exports for the common types, mirroring how the crate is consumed.
pub use entities::{BankCard, Credential, FileData, Note, SecretRecord, User};
pub use error::{ErrorClass, ErrorKind, VaultError};
pub use repositories::{LoadQuery, OpContext, SaveParams, SecretRepository, SecretStore, UserRepository};
pub use services::{AccessToken, EnvelopeCrypto, KeyProvider, PasswordHasher, TokenIssuer};
pub use value_objects::{Dek, SecretId, UserId};
