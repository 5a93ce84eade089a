// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite User Repository
//!
//! Identity persistence over the `users` table. The unique constraint on the
//! login column is the authority for registration conflicts; the driver's
//! unique-violation error maps to the `UserAlreadyExists` kind so the auth
//! service never races a separate existence check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use secret_vault_domain::{ErrorKind, User, UserId, UserRepository, VaultError};

/// SQLite implementation of the user repository port.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: SqliteRow) -> Result<User, VaultError> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    Ok(User {
        id: UserId::parse(&id)?,
        login: row.get("login"),
        password_hash: row.get("password_hash"),
        crypto_material: row.get("crypto_material"),
        created_at: parse_timestamp(&created_at)?,
    })
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, VaultError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| VaultError::serialization(format!("invalid timestamp '{}': {}", value, e)))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &User) -> Result<(), VaultError> {
        let result = sqlx::query(
            "INSERT INTO users (id, login, password_hash, crypto_material, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(&user.crypto_material)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(VaultError::with_detail(
                ErrorKind::UserAlreadyExists,
                format!("login '{}' is taken", user.login),
            )),
            Err(e) => Err(VaultError::database(format!("failed to save user: {}", e))),
        }
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, VaultError> {
        let row = sqlx::query("SELECT id, login, password_hash, crypto_material, created_at FROM users WHERE login = ?")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| VaultError::database(format!("failed to query user by login: {}", e)))?;
        row.map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, VaultError> {
        let row = sqlx::query("SELECT id, login, password_hash, crypto_material, created_at FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| VaultError::database(format!("failed to query user by id: {}", e)))?;
        row.map(user_from_row).transpose()
    }
}
