// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File Data Entity
//!
//! An arbitrary binary blob. The payload is stored inline as one envelope;
//! the storage key is the client-visible name under which the blob was
//! pushed. Payload, storage key, and description are all sensitive.

use chrono::{DateTime, Utc};

use crate::entities::secret_record::{FieldTransform, SecretRecord};
use crate::error::{ErrorKind, VaultError};
use crate::value_objects::{SecretId, UserId};

/// A binary blob secret.
#[derive(Debug, Clone)]
pub struct FileData {
    pub id: SecretId,
    pub user_id: UserId,
    /// Sensitive. Raw file bytes.
    pub payload: Vec<u8>,
    /// Sensitive. Client-chosen name for the blob.
    pub storage_key: Vec<u8>,
    /// Sensitive. Free-form description.
    pub description: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

impl FileData {
    /// Creates a validated file record owned by `user_id`.
    pub fn new(user_id: UserId, payload: Vec<u8>, storage_key: &str, description: &str) -> Result<Self, VaultError> {
        if payload.is_empty() {
            return Err(VaultError::new(ErrorKind::EmptyFilePayload));
        }
        Ok(Self {
            id: SecretId::generate(),
            user_id,
            payload,
            storage_key: storage_key.as_bytes().to_vec(),
            description: description.as_bytes().to_vec(),
            updated_at: Utc::now(),
        })
    }
}

impl SecretRecord for FileData {
    const RESOURCE: &'static str = "file";

    fn id(&self) -> SecretId {
        self.id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.updated_at {
            self.updated_at = at;
        }
    }

    fn for_each_sensitive_field(&mut self, apply: &mut FieldTransform<'_>) -> Result<(), VaultError> {
        apply("payload", &mut self.payload)?;
        apply("storage_key", &mut self.storage_key)?;
        apply("description", &mut self.description)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_rejected() {
        let err = FileData::new(UserId::generate(), Vec::new(), "k", "d").unwrap_err();
        assert!(err.is(ErrorKind::EmptyFilePayload));
    }

    #[test]
    fn binary_payload_is_kept_verbatim() {
        let payload = vec![0u8, 159, 146, 150];
        let file = FileData::new(UserId::generate(), payload.clone(), "k", "").unwrap();
        assert_eq!(file.payload, payload);
    }
}
