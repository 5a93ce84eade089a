// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Auth Service
//!
//! Registration, login, and bearer-token validation.
//!
//! ## Outcomes
//!
//! - invalid registration input wraps into `AuthApp`
//! - an unknown login and a wrong password both collapse to
//!   `AuthWrongLoginOrPassword`, and the unknown-login branch burns the same
//!   password-hashing work through the hasher's sink so the two branches
//!   take about the same time
//! - a taken login wraps into `AuthUserAlreadyExists`
//! - hash, key-material, and token failures wrap into `AuthTech` with the
//!   cause joined for the log sink
//!
//! Registration generates the user's crypto material exactly once; from then
//! on every data encryption key for the user derives from it.

use std::sync::Arc;

use secret_vault_domain::{
    AccessToken, ErrorKind, PasswordHasher, TokenIssuer, User, UserId, UserRepository, VaultError,
};

use crate::infrastructure::adapters::generate_crypto_material;

/// Registration, login, and token validation.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, hasher, tokens }
    }

    /// Registers a new user and returns a fresh token.
    pub async fn register(&self, login: &str, password: &str) -> Result<AccessToken, VaultError> {
        Self::validate_registration(login, password).map_err(|e| VaultError::wrap(ErrorKind::AuthApp, e))?;

        let password_hash = self
            .hasher
            .hash(password)
            .map_err(|e| VaultError::wrap_with(ErrorKind::AuthTech, "hashing password", e))?;
        let crypto_material = generate_crypto_material()
            .map_err(|e| VaultError::wrap_with(ErrorKind::AuthTech, "generating key material", e))?;

        let user = User::new(login, password_hash, crypto_material);
        match self.users.save(&user).await {
            Ok(()) => {}
            Err(e) if e.is(ErrorKind::UserAlreadyExists) => {
                return Err(VaultError::wrap(ErrorKind::AuthUserAlreadyExists, e));
            }
            Err(e) => return Err(VaultError::wrap_with(ErrorKind::AuthTech, "persisting user", e)),
        }

        tracing::info!(user_id = %user.id, "user registered");
        self.tokens
            .issue(user.id)
            .map_err(|e| VaultError::wrap_with(ErrorKind::AuthTech, "issuing token", e))
    }

    /// Authenticates a user and returns a fresh token.
    ///
    /// Neither the response nor the timing discloses whether the login
    /// exists.
    pub async fn login(&self, login: &str, password: &str) -> Result<AccessToken, VaultError> {
        let user = self
            .users
            .find_by_login(login)
            .await
            .map_err(|e| VaultError::wrap_with(ErrorKind::AuthTech, "looking up user", e))?;

        let user = match user {
            Some(user) => user,
            None => {
                self.hasher.verify_sink(password);
                return Err(VaultError::new(ErrorKind::AuthWrongLoginOrPassword));
            }
        };

        let matches = self
            .hasher
            .verify(password, &user.password_hash)
            .map_err(|e| VaultError::wrap_with(ErrorKind::AuthTech, "verifying password", e))?;
        if !matches {
            return Err(VaultError::new(ErrorKind::AuthWrongLoginOrPassword));
        }

        self.tokens
            .issue(user.id)
            .map_err(|e| VaultError::wrap_with(ErrorKind::AuthTech, "issuing token", e))
    }

    /// Verifies a bearer token and returns the user it names.
    pub fn validate_token(&self, token: &str) -> Result<UserId, VaultError> {
        self.tokens.verify(token)
    }

    fn validate_registration(login: &str, password: &str) -> Result<(), VaultError> {
        let mut violations = Vec::new();
        if login.is_empty() {
            violations.push(VaultError::new(ErrorKind::IncorrectLogin));
        }
        if password.is_empty() {
            violations.push(VaultError::new(ErrorKind::IncorrectPassword));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(VaultError::join(violations))
        }
    }
}
