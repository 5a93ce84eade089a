// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Wire Types
//!
//! Request and response bodies for the HTTP surface, plus their conversions
//! to and from application inputs and domain entities. Sensitive entity
//! fields are bytes; here they become strings (UTF-8) or base64 (file
//! payloads). Conversion from a stored entity can only fail when a row was
//! corrupted, which surfaces as a serialization failure and routes to a
//! logged 500.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use secret_vault_domain::{BankCard, Credential, ErrorKind, FileData, Note, VaultError};

use crate::application::services::{BankCardInput, CredentialInput, FileDataInput, NoteInput, SnapshotInput, VaultSnapshot};

// --- auth -------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// --- common -----------------------------------------------------------------

/// Body of every successful create/update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PushResponse {
    pub id: String,
}

fn text(bytes: &[u8], field: &str) -> Result<String, VaultError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| VaultError::serialization(format!("stored field '{}' is not valid UTF-8", field)))
}

// --- credentials ------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialPushRequest {
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub description: String,
}

impl From<CredentialPushRequest> for CredentialInput {
    fn from(req: CredentialPushRequest) -> Self {
        Self {
            login: req.login,
            password: req.password,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CredentialPayload {
    pub id: String,
    pub login: String,
    pub password: String,
    pub description: String,
}

impl TryFrom<&Credential> for CredentialPayload {
    type Error = VaultError;

    fn try_from(record: &Credential) -> Result<Self, VaultError> {
        Ok(Self {
            id: record.id.to_string(),
            login: text(&record.login, "login")?,
            password: text(&record.password, "password")?,
            description: text(&record.description, "description")?,
        })
    }
}

// --- bank cards -------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct BankCardPushRequest {
    pub number: String,
    pub holder: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cvv: String,
    #[serde(default)]
    pub description: String,
}

impl From<BankCardPushRequest> for BankCardInput {
    fn from(req: BankCardPushRequest) -> Self {
        Self {
            number: req.number,
            holder: req.holder,
            expiry_month: req.expiry_month,
            expiry_year: req.expiry_year,
            cvv: req.cvv,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BankCardPayload {
    pub id: String,
    pub number: String,
    pub holder: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cvv: String,
    pub description: String,
}

impl TryFrom<&BankCard> for BankCardPayload {
    type Error = VaultError;

    fn try_from(record: &BankCard) -> Result<Self, VaultError> {
        let month = text(&record.expiry_month, "expiry_month")?;
        let year = text(&record.expiry_year, "expiry_year")?;
        Ok(Self {
            id: record.id.to_string(),
            number: text(&record.number, "number")?,
            holder: text(&record.holder, "holder")?,
            expiry_month: month
                .parse()
                .map_err(|_| VaultError::serialization(format!("stored expiry month '{}' is not a number", month)))?,
            expiry_year: year
                .parse()
                .map_err(|_| VaultError::serialization(format!("stored expiry year '{}' is not a number", year)))?,
            cvv: text(&record.cvv, "cvv")?,
            description: text(&record.description, "description")?,
        })
    }
}

// --- notes ------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct NotePushRequest {
    pub note: String,
    #[serde(default)]
    pub description: String,
}

impl From<NotePushRequest> for NoteInput {
    fn from(req: NotePushRequest) -> Self {
        Self {
            note: req.note,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotePayload {
    pub id: String,
    pub note: String,
    pub description: String,
}

impl TryFrom<&Note> for NotePayload {
    type Error = VaultError;

    fn try_from(record: &Note) -> Result<Self, VaultError> {
        Ok(Self {
            id: record.id.to_string(),
            note: text(&record.note, "note")?,
            description: text(&record.description, "description")?,
        })
    }
}

// --- files ------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct FilePushRequest {
    /// Base64-encoded file bytes.
    pub payload: String,
    #[serde(default)]
    pub storage_key: String,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<FilePushRequest> for FileDataInput {
    type Error = VaultError;

    fn try_from(req: FilePushRequest) -> Result<Self, VaultError> {
        let payload = BASE64
            .decode(req.payload.as_bytes())
            .map_err(|e| VaultError::with_detail(ErrorKind::FileDataApp, format!("payload is not valid base64: {}", e)))?;
        Ok(Self {
            payload,
            storage_key: req.storage_key,
            description: req.description,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FilePayload {
    pub id: String,
    /// Base64-encoded file bytes.
    pub payload: String,
    pub storage_key: String,
    pub description: String,
}

impl TryFrom<&FileData> for FilePayload {
    type Error = VaultError;

    fn try_from(record: &FileData) -> Result<Self, VaultError> {
        Ok(Self {
            id: record.id.to_string(),
            payload: BASE64.encode(&record.payload),
            storage_key: text(&record.storage_key, "storage_key")?,
            description: text(&record.description, "description")?,
        })
    }
}

// --- datasync ---------------------------------------------------------------

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DatasyncPushRequest {
    #[serde(default)]
    pub credentials: Vec<CredentialPushRequest>,
    #[serde(default)]
    pub bankcards: Vec<BankCardPushRequest>,
    #[serde(default)]
    pub notes: Vec<NotePushRequest>,
    #[serde(default)]
    pub files: Vec<FilePushRequest>,
}

impl TryFrom<DatasyncPushRequest> for SnapshotInput {
    type Error = VaultError;

    fn try_from(req: DatasyncPushRequest) -> Result<Self, VaultError> {
        Ok(Self {
            credentials: req.credentials.into_iter().map(Into::into).collect(),
            bank_cards: req.bankcards.into_iter().map(Into::into).collect(),
            notes: req.notes.into_iter().map(Into::into).collect(),
            files: req
                .files
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DatasyncPushResponse {
    pub stored: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DatasyncPullResponse {
    pub credentials: Vec<CredentialPayload>,
    pub bankcards: Vec<BankCardPayload>,
    pub notes: Vec<NotePayload>,
    pub files: Vec<FilePayload>,
}

impl TryFrom<&VaultSnapshot> for DatasyncPullResponse {
    type Error = VaultError;

    fn try_from(snapshot: &VaultSnapshot) -> Result<Self, VaultError> {
        Ok(Self {
            credentials: snapshot.credentials.iter().map(TryInto::try_into).collect::<Result<_, _>>()?,
            bankcards: snapshot.bank_cards.iter().map(TryInto::try_into).collect::<Result<_, _>>()?,
            notes: snapshot.notes.iter().map(TryInto::try_into).collect::<Result<_, _>>()?,
            files: snapshot.files.iter().map(TryInto::try_into).collect::<Result<_, _>>()?,
        })
    }
}

// --- health and about -------------------------------------------------------

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AboutResponse {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secret_vault_domain::UserId;

    #[test]
    fn credential_payload_is_plain_text() {
        let record = Credential::new(UserId::generate(), "u@e", "s", "d").unwrap();
        let payload = CredentialPayload::try_from(&record).unwrap();
        assert_eq!(payload.login, "u@e");
        assert_eq!(payload.password, "s");
        assert_eq!(payload.description, "d");
    }

    #[test]
    fn corrupted_bytes_fail_conversion() {
        let mut record = Credential::new(UserId::generate(), "u", "p", "").unwrap();
        record.login = vec![0xFF, 0xFE];
        let err = CredentialPayload::try_from(&record).unwrap_err();
        assert!(err.is(ErrorKind::Serialization));
    }

    #[test]
    fn file_payload_round_trips_base64() {
        let bytes = vec![0u8, 1, 2, 254, 255];
        let record = FileData::new(UserId::generate(), bytes.clone(), "k", "").unwrap();
        let payload = FilePayload::try_from(&record).unwrap();
        assert_eq!(BASE64.decode(payload.payload.as_bytes()).unwrap(), bytes);
    }

    #[test]
    fn bad_base64_in_push_is_a_file_app_error() {
        let req = FilePushRequest {
            payload: "not base64 !!!".into(),
            storage_key: "k".into(),
            description: String::new(),
        };
        let err = FileDataInput::try_from(req).unwrap_err();
        assert!(err.is(ErrorKind::FileDataApp));
    }

    #[test]
    fn bank_card_payload_restores_numeric_expiry() {
        let card = BankCard::new(
            UserId::generate(),
            "4539578763621486",
            "ALICE",
            7,
            2031,
            "123",
            "",
        )
        .unwrap();
        let payload = BankCardPayload::try_from(&card).unwrap();
        assert_eq!(payload.expiry_month, 7);
        assert_eq!(payload.expiry_year, 2031);
    }
}
