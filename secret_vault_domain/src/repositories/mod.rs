// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Persistence Ports
//!
//! Repository contracts plus the middleware machinery that composes them.
//!
//! The domain never talks to a database engine. It sees two things:
//!
//! - [`UserRepository`]: identity records, keyed by id and login
//! - [`SecretRepository`]: one generic save/load contract instantiated per
//!   secret variant
//!
//! The [`middleware`] module turns a raw save/load pair into a full
//! repository by stacking cross-cutting layers (encryption, ownership
//! enforcement, tracing) around it. Infrastructure supplies the raw pair;
//! composition happens once at startup.

pub mod middleware;
mod secret_repository;
mod user_repository;

pub use secret_repository::{LoadQuery, OpContext, SaveParams, SecretRepository, SecretStore};
pub use user_repository::UserRepository;
