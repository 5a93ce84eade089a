// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Credential Service
//!
//! Application orchestration for the credential variant: validate the
//! request into an entity, perform one repository operation, and re-map the
//! error kinds for delivery. The repository underneath carries the full
//! encryption middleware, so this code only ever sees plaintext.

use std::sync::Arc;

use secret_vault_domain::{
    Credential, ErrorKind, LoadQuery, OpContext, SaveParams, SecretId, SecretRecord, SecretRepository, UserId, VaultError,
};

/// Plaintext request payload for create and update.
#[derive(Debug, Clone)]
pub struct CredentialInput {
    pub login: String,
    pub password: String,
    pub description: String,
}

/// Create/list/get/update for credentials.
pub struct CredentialService {
    repo: Arc<dyn SecretRepository<Credential>>,
}

impl CredentialService {
    pub fn new(repo: Arc<dyn SecretRepository<Credential>>) -> Self {
        Self { repo }
    }

    /// Creates a credential and returns its id.
    pub async fn create(&self, ctx: OpContext, user_id: UserId, input: CredentialInput) -> Result<SecretId, VaultError> {
        let record = Credential::new(user_id, &input.login, &input.password, &input.description)
            .map_err(Self::remap_validation)?;
        let id = record.id;
        self.repo
            .save(ctx, SaveParams::new(record))
            .await
            .map_err(Self::remap_failure)?;
        Ok(id)
    }

    /// Lists every credential owned by the caller.
    pub async fn list(&self, ctx: OpContext, user_id: UserId) -> Result<Vec<Credential>, VaultError> {
        self.repo
            .load(ctx, LoadQuery::all_for(user_id))
            .await
            .map_err(Self::remap_failure)
    }

    /// Fetches one credential by id on behalf of the caller.
    pub async fn get(&self, ctx: OpContext, user_id: UserId, id: SecretId) -> Result<Credential, VaultError> {
        let mut records = self
            .repo
            .load(ctx, LoadQuery::by_id(user_id, id))
            .await
            .map_err(Self::remap_failure)?;
        records.pop().ok_or_else(|| {
            VaultError::with_detail(ErrorKind::CredentialNotFound, format!("credential {} does not exist", id))
        })
    }

    /// Replaces a credential the caller owns and returns its id.
    pub async fn update(
        &self,
        ctx: OpContext,
        user_id: UserId,
        id: SecretId,
        input: CredentialInput,
    ) -> Result<SecretId, VaultError> {
        // The get both verifies ownership and yields the previous timestamp.
        let existing = self.get(ctx.clone(), user_id, id).await?;

        let mut record = Credential::new(user_id, &input.login, &input.password, &input.description)
            .map_err(Self::remap_validation)?;
        record.id = existing.id;
        record.touch(existing.updated_at);

        self.repo
            .save(ctx, SaveParams::new(record))
            .await
            .map_err(Self::remap_failure)?;
        Ok(id)
    }

    fn remap_validation(err: VaultError) -> VaultError {
        let mapped = err
            .into_siblings()
            .into_iter()
            .map(|violation| {
                let kind = match violation.kind() {
                    ErrorKind::IncorrectLogin => ErrorKind::CredentialIncorrectLogin,
                    ErrorKind::IncorrectPassword => ErrorKind::CredentialIncorrectPassword,
                    _ => ErrorKind::CredentialApp,
                };
                VaultError::wrap(kind, violation)
            })
            .collect();
        VaultError::join(mapped)
    }

    fn remap_failure(err: VaultError) -> VaultError {
        if err.is(ErrorKind::OwnershipViolation) {
            VaultError::wrap(ErrorKind::CredentialAccessDenied, err)
        } else {
            VaultError::wrap(ErrorKind::CredentialTech, err)
        }
    }
}
