// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Datasync Service
//!
//! Bulk synchronization across all four variants. Pull assembles the
//! caller's complete vault snapshot; push replays a batch of plaintext
//! inputs through the ordinary create paths so every batch item gets the
//! same validation and encryption treatment as a single create.

use std::sync::Arc;

use secret_vault_domain::{BankCard, Credential, ErrorKind, FileData, Note, OpContext, UserId, VaultError};

use super::{BankCardInput, BankCardService, CredentialInput, CredentialService, FileDataInput, FileDataService, NoteInput, NoteService};

/// Full decrypted vault contents of one user.
#[derive(Debug, Default)]
pub struct VaultSnapshot {
    pub credentials: Vec<Credential>,
    pub bank_cards: Vec<BankCard>,
    pub notes: Vec<Note>,
    pub files: Vec<FileData>,
}

impl VaultSnapshot {
    /// True when the user has no secrets of any variant.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty() && self.bank_cards.is_empty() && self.notes.is_empty() && self.files.is_empty()
    }
}

/// Batch of plaintext inputs to push in one request.
#[derive(Debug, Default)]
pub struct SnapshotInput {
    pub credentials: Vec<CredentialInput>,
    pub bank_cards: Vec<BankCardInput>,
    pub notes: Vec<NoteInput>,
    pub files: Vec<FileDataInput>,
}

/// Bulk pull/push across the variant services.
pub struct DatasyncService {
    credentials: Arc<CredentialService>,
    bank_cards: Arc<BankCardService>,
    notes: Arc<NoteService>,
    files: Arc<FileDataService>,
}

impl DatasyncService {
    pub fn new(
        credentials: Arc<CredentialService>,
        bank_cards: Arc<BankCardService>,
        notes: Arc<NoteService>,
        files: Arc<FileDataService>,
    ) -> Self {
        Self {
            credentials,
            bank_cards,
            notes,
            files,
        }
    }

    /// Pulls the caller's complete vault.
    pub async fn pull(&self, ctx: OpContext, user_id: UserId) -> Result<VaultSnapshot, VaultError> {
        let snapshot = VaultSnapshot {
            credentials: self.credentials.list(ctx.clone(), user_id).await.map_err(Self::remap)?,
            bank_cards: self.bank_cards.list(ctx.clone(), user_id).await.map_err(Self::remap)?,
            notes: self.notes.list(ctx.clone(), user_id).await.map_err(Self::remap)?,
            files: self.files.list(ctx, user_id).await.map_err(Self::remap)?,
        };
        Ok(snapshot)
    }

    /// Pushes a batch of new secrets and returns how many were stored.
    ///
    /// The batch is not transactional across variants: a validation failure
    /// aborts at the failing item, and earlier items stay stored. Clients
    /// re-push idempotently by pulling first.
    pub async fn push(&self, ctx: OpContext, user_id: UserId, input: SnapshotInput) -> Result<usize, VaultError> {
        let mut stored = 0usize;

        for item in input.credentials {
            self.credentials.create(ctx.clone(), user_id, item).await?;
            stored += 1;
        }
        for item in input.bank_cards {
            self.bank_cards.create(ctx.clone(), user_id, item).await?;
            stored += 1;
        }
        for item in input.notes {
            self.notes.create(ctx.clone(), user_id, item).await?;
            stored += 1;
        }
        for item in input.files {
            self.files.create(ctx.clone(), user_id, item).await?;
            stored += 1;
        }

        Ok(stored)
    }

    fn remap(err: VaultError) -> VaultError {
        VaultError::wrap(ErrorKind::DatasyncTech, err)
    }
}
