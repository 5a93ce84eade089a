// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Free-form text secret. The note body and description are sensitive.

use chrono::{DateTime, Utc};

use crate::entities::secret_record::{FieldTransform, SecretRecord};
use crate::error::{ErrorKind, VaultError};
use crate::value_objects::{SecretId, UserId};

/// A free-form note secret.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: SecretId,
    pub user_id: UserId,
    /// Sensitive. The note body.
    pub note: Vec<u8>,
    /// Sensitive. Free-form description.
    pub description: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a validated note owned by `user_id`.
    pub fn new(user_id: UserId, note: &str, description: &str) -> Result<Self, VaultError> {
        if note.is_empty() {
            return Err(VaultError::new(ErrorKind::EmptyNote));
        }
        Ok(Self {
            id: SecretId::generate(),
            user_id,
            note: note.as_bytes().to_vec(),
            description: description.as_bytes().to_vec(),
            updated_at: Utc::now(),
        })
    }
}

impl SecretRecord for Note {
    const RESOURCE: &'static str = "note";

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
        apply("note", &mut self.note)?;
        apply("description", &mut self.description)?;
        Ok(())
    }
}
