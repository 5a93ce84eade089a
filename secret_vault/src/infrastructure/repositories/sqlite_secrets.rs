// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Raw SQLite Secret Stores
//!
//! The innermost save/load function pairs for the four secret variants.
//! These functions are the bottom of every middleware chain: the bytes they
//! bind and read are cipher envelopes, never plaintext, because the
//! encryption layer always sits directly above them.
//!
//! Saves are insert-or-replace by id, which serves both create and update;
//! the application layer owns the ownership check that gates updates. Loads
//! by id deliberately ignore the owner column so the ownership layer can
//! tell "not found" apart from "someone else's".

use std::sync::Arc;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use secret_vault_domain::repositories::middleware::{LoadFn, SaveFn};
use secret_vault_domain::{BankCard, Credential, FileData, Note, SecretId, UserId, VaultError};

use super::sqlite_users::parse_timestamp;

fn db_err(action: &str, e: sqlx::Error) -> VaultError {
    VaultError::database(format!("failed to {}: {}", action, e))
}

// --- credentials ------------------------------------------------------------

fn credential_from_row(row: SqliteRow) -> Result<Credential, VaultError> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let updated_at: String = row.get("updated_at");
    Ok(Credential {
        id: SecretId::parse(&id)?,
        user_id: UserId::parse(&user_id)?,
        login: row.get("login"),
        password: row.get("password"),
        description: row.get("description"),
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Base save/load pair over the `credentials` table.
pub fn credential_store(pool: SqlitePool) -> (SaveFn<Credential>, LoadFn<Credential>) {
    let save_pool = pool.clone();
    let save: SaveFn<Credential> = Arc::new(move |_ctx, params| {
        let pool = save_pool.clone();
        Box::pin(async move {
            let record = params.record;
            sqlx::query(
                "INSERT OR REPLACE INTO credentials (id, user_id, login, password, description, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.login)
            .bind(&record.password)
            .bind(&record.description)
            .bind(record.updated_at.to_rfc3339())
            .execute(&pool)
            .await
            .map_err(|e| db_err("save credential", e))?;
            Ok(())
        })
    });

    let load: LoadFn<Credential> = Arc::new(move |_ctx, query| {
        let pool = pool.clone();
        Box::pin(async move {
            let rows = match query.id {
                Some(id) => {
                    sqlx::query("SELECT * FROM credentials WHERE id = ?")
                        .bind(id.to_string())
                        .fetch_all(&pool)
                        .await
                }
                None => {
                    sqlx::query("SELECT * FROM credentials WHERE user_id = ? ORDER BY updated_at")
                        .bind(query.user_id.to_string())
                        .fetch_all(&pool)
                        .await
                }
            }
            .map_err(|e| db_err("load credentials", e))?;
            rows.into_iter().map(credential_from_row).collect()
        })
    });

    (save, load)
}

// --- bank cards -------------------------------------------------------------

fn bank_card_from_row(row: SqliteRow) -> Result<BankCard, VaultError> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let updated_at: String = row.get("updated_at");
    Ok(BankCard {
        id: SecretId::parse(&id)?,
        user_id: UserId::parse(&user_id)?,
        number: row.get("card_number"),
        holder: row.get("holder"),
        expiry_month: row.get("expiry_month"),
        expiry_year: row.get("expiry_year"),
        cvv: row.get("cvv"),
        description: row.get("description"),
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Base save/load pair over the `bank_cards` table.
pub fn bank_card_store(pool: SqlitePool) -> (SaveFn<BankCard>, LoadFn<BankCard>) {
    let save_pool = pool.clone();
    let save: SaveFn<BankCard> = Arc::new(move |_ctx, params| {
        let pool = save_pool.clone();
        Box::pin(async move {
            let record = params.record;
            sqlx::query(
                "INSERT OR REPLACE INTO bank_cards \
                 (id, user_id, card_number, holder, expiry_month, expiry_year, cvv, description, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.number)
            .bind(&record.holder)
            .bind(&record.expiry_month)
            .bind(&record.expiry_year)
            .bind(&record.cvv)
            .bind(&record.description)
            .bind(record.updated_at.to_rfc3339())
            .execute(&pool)
            .await
            .map_err(|e| db_err("save bank card", e))?;
            Ok(())
        })
    });

    let load: LoadFn<BankCard> = Arc::new(move |_ctx, query| {
        let pool = pool.clone();
        Box::pin(async move {
            let rows = match query.id {
                Some(id) => {
                    sqlx::query("SELECT * FROM bank_cards WHERE id = ?")
                        .bind(id.to_string())
                        .fetch_all(&pool)
                        .await
                }
                None => {
                    sqlx::query("SELECT * FROM bank_cards WHERE user_id = ? ORDER BY updated_at")
                        .bind(query.user_id.to_string())
                        .fetch_all(&pool)
                        .await
                }
            }
            .map_err(|e| db_err("load bank cards", e))?;
            rows.into_iter().map(bank_card_from_row).collect()
        })
    });

    (save, load)
}

// --- notes ------------------------------------------------------------------

fn note_from_row(row: SqliteRow) -> Result<Note, VaultError> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let updated_at: String = row.get("updated_at");
    Ok(Note {
        id: SecretId::parse(&id)?,
        user_id: UserId::parse(&user_id)?,
        note: row.get("note"),
        description: row.get("description"),
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Base save/load pair over the `notes` table.
pub fn note_store(pool: SqlitePool) -> (SaveFn<Note>, LoadFn<Note>) {
    let save_pool = pool.clone();
    let save: SaveFn<Note> = Arc::new(move |_ctx, params| {
        let pool = save_pool.clone();
        Box::pin(async move {
            let record = params.record;
            sqlx::query(
                "INSERT OR REPLACE INTO notes (id, user_id, note, description, updated_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.note)
            .bind(&record.description)
            .bind(record.updated_at.to_rfc3339())
            .execute(&pool)
            .await
            .map_err(|e| db_err("save note", e))?;
            Ok(())
        })
    });

    let load: LoadFn<Note> = Arc::new(move |_ctx, query| {
        let pool = pool.clone();
        Box::pin(async move {
            let rows = match query.id {
                Some(id) => {
                    sqlx::query("SELECT * FROM notes WHERE id = ?")
                        .bind(id.to_string())
                        .fetch_all(&pool)
                        .await
                }
                None => {
                    sqlx::query("SELECT * FROM notes WHERE user_id = ? ORDER BY updated_at")
                        .bind(query.user_id.to_string())
                        .fetch_all(&pool)
                        .await
                }
            }
            .map_err(|e| db_err("load notes", e))?;
            rows.into_iter().map(note_from_row).collect()
        })
    });

    (save, load)
}

// --- file data --------------------------------------------------------------

fn file_data_from_row(row: SqliteRow) -> Result<FileData, VaultError> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let updated_at: String = row.get("updated_at");
    Ok(FileData {
        id: SecretId::parse(&id)?,
        user_id: UserId::parse(&user_id)?,
        payload: row.get("payload"),
        storage_key: row.get("storage_key"),
        description: row.get("description"),
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Base save/load pair over the `file_data` table.
pub fn file_data_store(pool: SqlitePool) -> (SaveFn<FileData>, LoadFn<FileData>) {
    let save_pool = pool.clone();
    let save: SaveFn<FileData> = Arc::new(move |_ctx, params| {
        let pool = save_pool.clone();
        Box::pin(async move {
            let record = params.record;
            sqlx::query(
                "INSERT OR REPLACE INTO file_data (id, user_id, payload, storage_key, description, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.payload)
            .bind(&record.storage_key)
            .bind(&record.description)
            .bind(record.updated_at.to_rfc3339())
            .execute(&pool)
            .await
            .map_err(|e| db_err("save file data", e))?;
            Ok(())
        })
    });

    let load: LoadFn<FileData> = Arc::new(move |_ctx, query| {
        let pool = pool.clone();
        Box::pin(async move {
            let rows = match query.id {
                Some(id) => {
                    sqlx::query("SELECT * FROM file_data WHERE id = ?")
                        .bind(id.to_string())
                        .fetch_all(&pool)
                        .await
                }
                None => {
                    sqlx::query("SELECT * FROM file_data WHERE user_id = ? ORDER BY updated_at")
                        .bind(query.user_id.to_string())
                        .fetch_all(&pool)
                        .await
                }
            }
            .map_err(|e| db_err("load file data", e))?;
            rows.into_iter().map(file_data_from_row).collect()
        })
    });

    (save, load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::schema;
    use secret_vault_domain::{LoadQuery, OpContext, SaveParams};

    // The raw stores are exercised with envelope-shaped opaque bytes; the
    // encryption layer above them is tested elsewhere.
    fn sealed(bytes: &[u8]) -> Vec<u8> {
        let mut out = vec![0x01];
        out.extend_from_slice(bytes);
        out
    }

    #[tokio::test]
    async fn credential_store_round_trips_rows() {
        let pool = schema::initialize_in_memory().await.unwrap();
        // The secrets tables reference users; insert the owner first.
        let users = crate::infrastructure::repositories::SqliteUserRepository::new(pool.clone());
        let owner = secret_vault_domain::User::new("alice", "h", vec![0u8; 32]);
        use secret_vault_domain::UserRepository as _;
        users.save(&owner).await.unwrap();

        let (save, load) = credential_store(pool);
        let mut cred = Credential::new(owner.id, "plain-login", "plain-pass", "d").unwrap();
        cred.login = sealed(b"\x10\x20");
        cred.password = sealed(b"\x30\x40");
        cred.description = sealed(b"");
        save(OpContext::new(), SaveParams::new(cred.clone())).await.unwrap();

        let by_id = load(OpContext::new(), LoadQuery::by_id(owner.id, cred.id)).await.unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].login, sealed(b"\x10\x20"));

        let listed = load(OpContext::new(), LoadQuery::all_for(owner.id)).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn save_replaces_by_id() {
        let pool = schema::initialize_in_memory().await.unwrap();
        let users = crate::infrastructure::repositories::SqliteUserRepository::new(pool.clone());
        let owner = secret_vault_domain::User::new("alice", "h", vec![0u8; 32]);
        use secret_vault_domain::UserRepository as _;
        users.save(&owner).await.unwrap();

        let (save, load) = note_store(pool);
        let mut note = Note::new(owner.id, "v1", "").unwrap();
        note.note = sealed(b"v1");
        save(OpContext::new(), SaveParams::new(note.clone())).await.unwrap();

        note.note = sealed(b"v2");
        save(OpContext::new(), SaveParams::new(note.clone())).await.unwrap();

        let rows = load(OpContext::new(), LoadQuery::by_id(owner.id, note.id)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].note, sealed(b"v2"));
    }

    #[tokio::test]
    async fn load_by_id_ignores_the_caller_column() {
        // The ownership decision belongs to the middleware above; the raw
        // store must return the row so that layer can see the real owner.
        let pool = schema::initialize_in_memory().await.unwrap();
        let users = crate::infrastructure::repositories::SqliteUserRepository::new(pool.clone());
        let alice = secret_vault_domain::User::new("alice", "h", vec![0u8; 32]);
        let bob = secret_vault_domain::User::new("bob", "h", vec![1u8; 32]);
        use secret_vault_domain::UserRepository as _;
        users.save(&alice).await.unwrap();
        users.save(&bob).await.unwrap();

        let (save, load) = file_data_store(pool);
        let mut file = FileData::new(alice.id, vec![1], "k", "").unwrap();
        file.payload = sealed(b"blob");
        file.storage_key = sealed(b"k");
        file.description = sealed(b"");
        save(OpContext::new(), SaveParams::new(file.clone())).await.unwrap();

        let rows = load(OpContext::new(), LoadQuery::by_id(bob.id, file.id)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, alice.id);
    }
}
