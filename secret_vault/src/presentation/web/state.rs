// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Server State
//!
//! The shared application state handed to every handler, and the one place
//! where the whole dependency graph is wired: SQLite pool at the bottom,
//! key provider and cipher in the middle, middleware-assembled repositories
//! above them, application services on top.

use std::sync::Arc;

use chrono::Duration;
use sqlx::SqlitePool;

use secret_vault_domain::{EnvelopeCrypto, KeyProvider, UserRepository, VaultError};

use crate::application::services::{
    AuthService, BankCardService, CredentialService, DatasyncService, FileDataService, NoteService,
};
use crate::infrastructure::adapters::{AesGcmEnvelope, Argon2Hasher, HkdfKeyProvider, JwtTokenIssuer};
use crate::infrastructure::repositories::{
    bank_card_repository, credential_repository, file_data_repository, note_repository, SqliteUserRepository,
};
use crate::presentation::web::error::{default_registry, ErrorRegistry};

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub credentials: Arc<CredentialService>,
    pub bank_cards: Arc<BankCardService>,
    pub notes: Arc<NoteService>,
    pub files: Arc<FileDataService>,
    pub datasync: Arc<DatasyncService>,
    pub errors: Arc<ErrorRegistry>,
}

impl AppState {
    /// Wires every layer over an initialized database pool.
    ///
    /// The master secret and token signing key arrive from configuration
    /// and are consumed here; nothing else ever sees them.
    pub fn assemble(
        pool: SqlitePool,
        master_secret: Vec<u8>,
        token_signing_key: &[u8],
        token_lifetime: Duration,
    ) -> Result<Self, VaultError> {
        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
        let keys: Arc<dyn KeyProvider> = Arc::new(HkdfKeyProvider::new(Arc::clone(&users), master_secret));
        let cipher: Arc<dyn EnvelopeCrypto> = Arc::new(AesGcmEnvelope::new());
        let hasher = Arc::new(Argon2Hasher::new()?);
        let tokens = Arc::new(JwtTokenIssuer::new(token_signing_key, token_lifetime));

        let credentials = Arc::new(CredentialService::new(credential_repository(pool.clone(), &keys, &cipher)));
        let bank_cards = Arc::new(BankCardService::new(bank_card_repository(pool.clone(), &keys, &cipher)));
        let notes = Arc::new(NoteService::new(note_repository(pool.clone(), &keys, &cipher)));
        let files = Arc::new(FileDataService::new(file_data_repository(pool, &keys, &cipher)));
        let datasync = Arc::new(DatasyncService::new(
            Arc::clone(&credentials),
            Arc::clone(&bank_cards),
            Arc::clone(&notes),
            Arc::clone(&files),
        ));

        Ok(Self {
            auth: Arc::new(AuthService::new(users, hasher, tokens)),
            credentials,
            bank_cards,
            notes,
            files,
            datasync,
            errors: Arc::new(default_registry()),
        })
    }
}
