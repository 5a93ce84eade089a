// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Value Objects
//!
//! Immutable, validated types used across the domain:
//!
//! - [`UserId`] / [`SecretId`]: typed identifiers that cannot be confused
//!   with each other or with plain strings
//! - [`Dek`]: the per-user data encryption key, zeroized on drop
//!
//! All identifiers are UUID v4 under the hood and serialize as their
//! canonical string form.

mod dek;
mod secret_id;
mod user_id;

pub use dek::Dek;
pub use secret_id::SecretId;
pub use user_id::UserId;
