// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! File blob orchestration. Payloads arrive as raw bytes (the HTTP layer
//! handles base64) and are stored inline as one envelope.

use std::sync::Arc;

use secret_vault_domain::{
    ErrorKind, FileData, LoadQuery, OpContext, SaveParams, SecretId, SecretRecord, SecretRepository, UserId, VaultError,
};

/// Request payload for create and update.
#[derive(Debug, Clone)]
pub struct FileDataInput {
    pub payload: Vec<u8>,
    pub storage_key: String,
    pub description: String,
}

/// Create/list/get/update for file blobs.
pub struct FileDataService {
    repo: Arc<dyn SecretRepository<FileData>>,
}

impl FileDataService {
    pub fn new(repo: Arc<dyn SecretRepository<FileData>>) -> Self {
        Self { repo }
    }

    /// Stores a blob and returns its id.
    pub async fn create(&self, ctx: OpContext, user_id: UserId, input: FileDataInput) -> Result<SecretId, VaultError> {
        let record = FileData::new(user_id, input.payload, &input.storage_key, &input.description)
            .map_err(Self::remap_validation)?;
        let id = record.id;
        self.repo
            .save(ctx, SaveParams::new(record))
            .await
            .map_err(Self::remap_failure)?;
        Ok(id)
    }

    /// Lists every blob owned by the caller.
    pub async fn list(&self, ctx: OpContext, user_id: UserId) -> Result<Vec<FileData>, VaultError> {
        self.repo
            .load(ctx, LoadQuery::all_for(user_id))
            .await
            .map_err(Self::remap_failure)
    }

    /// Fetches one blob by id on behalf of the caller.
    pub async fn get(&self, ctx: OpContext, user_id: UserId, id: SecretId) -> Result<FileData, VaultError> {
        let mut records = self
            .repo
            .load(ctx, LoadQuery::by_id(user_id, id))
            .await
            .map_err(Self::remap_failure)?;
        records
            .pop()
            .ok_or_else(|| VaultError::with_detail(ErrorKind::FileDataNotFound, format!("file {} does not exist", id)))
    }

    /// Replaces a blob the caller owns and returns its id.
    pub async fn update(
        &self,
        ctx: OpContext,
        user_id: UserId,
        id: SecretId,
        input: FileDataInput,
    ) -> Result<SecretId, VaultError> {
        let existing = self.get(ctx.clone(), user_id, id).await?;

        let mut record = FileData::new(user_id, input.payload, &input.storage_key, &input.description)
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
                    ErrorKind::EmptyFilePayload => ErrorKind::FileDataEmptyPayload,
                    _ => ErrorKind::FileDataApp,
                };
                VaultError::wrap(kind, violation)
            })
            .collect();
        VaultError::join(mapped)
    }

    fn remap_failure(err: VaultError) -> VaultError {
        if err.is(ErrorKind::OwnershipViolation) {
            VaultError::wrap(ErrorKind::FileDataAccessDenied, err)
        } else {
            VaultError::wrap(ErrorKind::FileDataTech, err)
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
        rows: Mutex<HashMap<SecretId, FileData>>,
    }

    #[async_trait]
    impl SecretRepository<FileData> for MemoryRepo {
        async fn save(&self, _ctx: OpContext, params: SaveParams<FileData>) -> Result<(), VaultError> {
            self.rows.lock().unwrap().insert(params.record.id, params.record);
            Ok(())
        }

        async fn load(&self, _ctx: OpContext, query: LoadQuery) -> Result<Vec<FileData>, VaultError> {
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
    async fn empty_payload_is_remapped() {
        let svc = FileDataService::new(Arc::new(MemoryRepo::default()));
        let err = svc
            .create(
                OpContext::new(),
                UserId::generate(),
                FileDataInput {
                    payload: Vec::new(),
                    storage_key: "k".into(),
                    description: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::FileDataEmptyPayload));
    }

    #[tokio::test]
    async fn binary_round_trip() {
        let svc = FileDataService::new(Arc::new(MemoryRepo::default()));
        let user = UserId::generate();
        let payload = vec![0u8, 255, 13, 10, 26];
        let id = svc
            .create(
                OpContext::new(),
                user,
                FileDataInput {
                    payload: payload.clone(),
                    storage_key: "backup.bin".into(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(svc.get(OpContext::new(), user, id).await.unwrap().payload, payload);
    }
}
