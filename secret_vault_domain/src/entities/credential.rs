// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Credential Entity
//!
//! A stored login/password pair. All three user-supplied fields (login,
//! password, description) are sensitive and travel as bytes: UTF-8 plaintext
//! inside the application layer, cipher envelopes at rest.
//!
//! Creation validates that login and password are non-empty and joins both
//! violations into one error, so a request failing on both fields produces
//! both public messages.

use chrono::{DateTime, Utc};

use crate::entities::secret_record::{FieldTransform, SecretRecord};
use crate::error::{ErrorKind, VaultError};
use crate::value_objects::{SecretId, UserId};

/// A login/password secret.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: SecretId,
    pub user_id: UserId,
    /// Sensitive. Login at the external system.
    pub login: Vec<u8>,
    /// Sensitive. Password at the external system.
    pub password: Vec<u8>,
    /// Sensitive. Free-form description.
    pub description: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Creates a validated credential owned by `user_id`.
    pub fn new(user_id: UserId, login: &str, password: &str, description: &str) -> Result<Self, VaultError> {
        Self::validate(login, password)?;
        Ok(Self {
            id: SecretId::generate(),
            user_id,
            login: login.as_bytes().to_vec(),
            password: password.as_bytes().to_vec(),
            description: description.as_bytes().to_vec(),
            updated_at: Utc::now(),
        })
    }

    fn validate(login: &str, password: &str) -> Result<(), VaultError> {
        let mut violations = Vec::new();
        if login.is_empty() {
            violations.push(VaultError::new(ErrorKind::IncorrectLogin));
        }
        if password.is_empty() {
            violations.push(VaultError::new(ErrorKind::IncorrectPassword));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(VaultError::join(violations))
        }
    }
}

impl SecretRecord for Credential {
    const RESOURCE: &'static str = "credential";

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
        apply("login", &mut self.login)?;
        apply("password", &mut self.password)?;
        apply("description", &mut self.description)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_credential_is_created() {
        let cred = Credential::new(UserId::generate(), "u@e", "s", "d").unwrap();
        assert_eq!(cred.login, b"u@e");
        assert_eq!(cred.password, b"s");
    }

    #[test]
    fn empty_login_and_password_join_both_violations() {
        let err = Credential::new(UserId::generate(), "", "", "d").unwrap_err();
        assert!(err.is(ErrorKind::IncorrectLogin));
        assert!(err.is(ErrorKind::IncorrectPassword));
    }

    #[test]
    fn empty_password_alone_reports_one_violation() {
        let err = Credential::new(UserId::generate(), "u", "", "").unwrap_err();
        assert!(!err.is(ErrorKind::IncorrectLogin));
        assert!(err.is(ErrorKind::IncorrectPassword));
    }

    #[test]
    fn touch_never_moves_backwards() {
        let mut cred = Credential::new(UserId::generate(), "u", "p", "").unwrap();
        let before = cred.updated_at;
        cred.touch(before - chrono::Duration::seconds(10));
        assert_eq!(cred.updated_at, before);
        cred.touch(before + chrono::Duration::seconds(10));
        assert!(cred.updated_at > before);
    }

    #[test]
    fn visits_fields_in_declaration_order() {
        let mut cred = Credential::new(UserId::generate(), "u", "p", "d").unwrap();
        let mut seen = Vec::new();
        cred.for_each_sensitive_field(&mut |name, _| {
            seen.push(name);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec!["login", "password", "description"]);
    }
}
