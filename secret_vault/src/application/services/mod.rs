// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Services
//!
//! One service per resource plus authentication:
//!
//! - [`AuthService`]: registration, login, token validation
//! - [`CredentialService`], [`BankCardService`], [`NoteService`],
//!   [`FileDataService`]: create/list/get/update for the four variants
//! - [`DatasyncService`]: bulk pull/push across all variants
//!
//! ## Error re-mapping discipline
//!
//! Domain kinds are wrapped into resource-scoped kinds so the delivery
//! registry can match either level. Unknown failures are wrapped with the
//! resource's Tech kind, which routes them to a logged 500. Ownership
//! violations surface as the resource's access-denied kind; an id that does
//! not exist at all surfaces as the resource's not-found kind.

mod auth;
mod bank_card;
mod credential;
mod datasync;
mod file_data;
mod note;

pub use auth::AuthService;
pub use bank_card::{BankCardInput, BankCardService};
pub use credential::{CredentialInput, CredentialService};
pub use datasync::{DatasyncService, SnapshotInput, VaultSnapshot};
pub use file_data::{FileDataInput, FileDataService};
pub use note::{NoteInput, NoteService};
