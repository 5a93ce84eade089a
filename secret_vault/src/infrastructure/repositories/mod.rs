// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Repositories
//!
//! SQLite persistence plus the one place where middleware chains are
//! assembled. Each variant repository is the raw store wrapped in, from the
//! inside out:
//!
//! - write path: encryption, then tracing
//! - read path: ownership enforcement, then decryption, then tracing
//!
//! Encryption sits directly above the raw store and decryption directly
//! below the tracing shell, so everything between them handles envelopes
//! only.

pub mod schema;
mod sqlite_secrets;
mod sqlite_users;

pub use sqlite_users::SqliteUserRepository;

use std::sync::Arc;

use sqlx::SqlitePool;

use secret_vault_domain::repositories::middleware::{
    decrypt_on_load, encrypt_on_save, enforce_owner, trace_load, trace_save, LoadFn, SaveFn,
};
use secret_vault_domain::{
    BankCard, Credential, EnvelopeCrypto, FileData, KeyProvider, Note, SecretRecord, SecretRepository, SecretStore,
};

fn assemble<R: SecretRecord>(
    base: (SaveFn<R>, LoadFn<R>),
    keys: &Arc<dyn KeyProvider>,
    cipher: &Arc<dyn EnvelopeCrypto>,
) -> Arc<dyn SecretRepository<R>> {
    let (base_save, base_load) = base;
    Arc::new(SecretStore::assemble(
        base_save,
        base_load,
        vec![
            encrypt_on_save(Arc::clone(keys), Arc::clone(cipher)),
            trace_save(),
        ],
        vec![
            enforce_owner(),
            decrypt_on_load(Arc::clone(keys), Arc::clone(cipher)),
            trace_load(),
        ],
    ))
}

/// Credential repository with the full middleware stack.
pub fn credential_repository(
    pool: SqlitePool,
    keys: &Arc<dyn KeyProvider>,
    cipher: &Arc<dyn EnvelopeCrypto>,
) -> Arc<dyn SecretRepository<Credential>> {
    assemble(sqlite_secrets::credential_store(pool), keys, cipher)
}

/// Bank card repository with the full middleware stack.
pub fn bank_card_repository(
    pool: SqlitePool,
    keys: &Arc<dyn KeyProvider>,
    cipher: &Arc<dyn EnvelopeCrypto>,
) -> Arc<dyn SecretRepository<BankCard>> {
    assemble(sqlite_secrets::bank_card_store(pool), keys, cipher)
}

/// Note repository with the full middleware stack.
pub fn note_repository(
    pool: SqlitePool,
    keys: &Arc<dyn KeyProvider>,
    cipher: &Arc<dyn EnvelopeCrypto>,
) -> Arc<dyn SecretRepository<Note>> {
    assemble(sqlite_secrets::note_store(pool), keys, cipher)
}

/// File repository with the full middleware stack.
pub fn file_data_repository(
    pool: SqlitePool,
    keys: &Arc<dyn KeyProvider>,
    cipher: &Arc<dyn EnvelopeCrypto>,
) -> Arc<dyn SecretRepository<FileData>> {
    assemble(sqlite_secrets::file_data_store(pool), keys, cipher)
}
