// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Identity persistence port. User rows carry no user-supplied plaintext
//! besides the login, so they bypass the envelope middleware entirely.

use async_trait::async_trait;

use crate::entities::User;
use crate::error::VaultError;
use crate::value_objects::UserId;

/// Persistence contract for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user.
    ///
    /// Fails with `UserAlreadyExists` when the login is taken; the unique
    /// constraint on the login column is the source of truth.
    async fn save(&self, user: &User) -> Result<(), VaultError>;

    /// Looks a user up by login. `Ok(None)` when unknown.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, VaultError>;

    /// Looks a user up by id. `Ok(None)` when unknown.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, VaultError>;
}
