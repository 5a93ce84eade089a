// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secret Vault
//!
//! Multi-tenant encrypted secrets vault exposed as an HTTPS API. Users
//! store credentials, bank cards, notes, and file blobs; every
//! user-supplied field is sealed at rest with a key derived uniquely per
//! user, so a database compromise discloses only ciphertext.
//!
//! ## Architecture
//!
//! Clean Architecture over the domain crate:
//!
//! - **Application Layer**: auth and per-resource orchestration services
//! - **Infrastructure Layer**: AES-GCM envelopes, HKDF key derivation,
//!   Argon2 hashing, JWT tokens, SQLite repositories, and the middleware
//!   chain assembly
//! - **Presentation Layer**: axum router, handlers, wire types, the error
//!   registry, and the TLS-capable transport shell
//!
//! ## Request Flow
//!
//! ```text
//! HTTP request -> middleware chain -> handler adapter -> application service
//!     -> repository middleware chain -> database client
//! ```
//!
//! Encryption applies on the write path and decryption on the read path,
//! inside the repository middleware, so handlers and services only ever see
//! plaintext while raw persistence only ever sees envelopes.

pub mod application;
pub mod infrastructure;
pub mod presentation;
