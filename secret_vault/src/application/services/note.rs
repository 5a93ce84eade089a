// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Note orchestration.

use std::sync::Arc;

use secret_vault_domain::{
    ErrorKind, LoadQuery, Note, OpContext, SaveParams, SecretId, SecretRecord, SecretRepository, UserId, VaultError,
};

/// Plaintext request payload for create and update.
#[derive(Debug, Clone)]
pub struct NoteInput {
    pub note: String,
    pub description: String,
}

/// Create/list/get/update for notes.
pub struct NoteService {
    repo: Arc<dyn SecretRepository<Note>>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn SecretRepository<Note>>) -> Self {
        Self { repo }
    }

    /// Creates a note and returns its id.
    pub async fn create(&self, ctx: OpContext, user_id: UserId, input: NoteInput) -> Result<SecretId, VaultError> {
        let record = Note::new(user_id, &input.note, &input.description).map_err(Self::remap_validation)?;
        let id = record.id;
        self.repo
            .save(ctx, SaveParams::new(record))
            .await
            .map_err(Self::remap_failure)?;
        Ok(id)
    }

    /// Lists every note owned by the caller.
    pub async fn list(&self, ctx: OpContext, user_id: UserId) -> Result<Vec<Note>, VaultError> {
        self.repo
            .load(ctx, LoadQuery::all_for(user_id))
            .await
            .map_err(Self::remap_failure)
    }

    /// Fetches one note by id on behalf of the caller.
    pub async fn get(&self, ctx: OpContext, user_id: UserId, id: SecretId) -> Result<Note, VaultError> {
        let mut records = self
            .repo
            .load(ctx, LoadQuery::by_id(user_id, id))
            .await
            .map_err(Self::remap_failure)?;
        records
            .pop()
            .ok_or_else(|| VaultError::with_detail(ErrorKind::NoteNotFound, format!("note {} does not exist", id)))
    }

    /// Replaces a note the caller owns and returns its id.
    pub async fn update(
        &self,
        ctx: OpContext,
        user_id: UserId,
        id: SecretId,
        input: NoteInput,
    ) -> Result<SecretId, VaultError> {
        let existing = self.get(ctx.clone(), user_id, id).await?;

        let mut record = Note::new(user_id, &input.note, &input.description).map_err(Self::remap_validation)?;
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
                    ErrorKind::EmptyNote => ErrorKind::NoteEmptyText,
                    _ => ErrorKind::NoteApp,
                };
                VaultError::wrap(kind, violation)
            })
            .collect();
        VaultError::join(mapped)
    }

    fn remap_failure(err: VaultError) -> VaultError {
        if err.is(ErrorKind::OwnershipViolation) {
            VaultError::wrap(ErrorKind::NoteAccessDenied, err)
        } else {
            VaultError::wrap(ErrorKind::NoteTech, err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<HashMap<SecretId, Note>>,
    }

    #[async_trait]
    impl SecretRepository<Note> for MemoryRepo {
        async fn save(&self, _ctx: OpContext, params: SaveParams<Note>) -> Result<(), VaultError> {
            self.rows.lock().unwrap().insert(params.record.id, params.record);
            Ok(())
        }

        async fn load(&self, _ctx: OpContext, query: LoadQuery) -> Result<Vec<Note>, VaultError> {
            let rows = self.rows.lock().unwrap();
            match query.id {
                Some(id) => match rows.get(&id) {
                    None => Ok(vec![]),
                    Some(r) if r.user_id != query.user_id => Err(VaultError::new(ErrorKind::OwnershipViolation)),
                    Some(r) => Ok(vec![r.clone()]),
                },
                None => Ok(rows.values().filter(|r| r.user_id == query.user_id).cloned().collect()),
            }
        }
    }

    #[tokio::test]
    async fn empty_note_is_remapped() {
        let svc = NoteService::new(Arc::new(MemoryRepo::default()));
        let err = svc
            .create(
                OpContext::new(),
                UserId::generate(),
                NoteInput {
                    note: String::new(),
                    description: "d".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NoteEmptyText));
        assert!(err.is(ErrorKind::EmptyNote));
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_caller() {
        let svc = NoteService::new(Arc::new(MemoryRepo::default()));
        let alice = UserId::generate();
        let bob = UserId::generate();
        svc.create(
            OpContext::new(),
            alice,
            NoteInput {
                note: "mine".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

        assert_eq!(svc.list(OpContext::new(), alice).await.unwrap().len(), 1);
        assert!(svc.list(OpContext::new(), bob).await.unwrap().is_empty());
    }
}
