// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secret Record Contract
//!
//! The interface every secret variant offers to the persistence middleware.
//! It deliberately exposes only what the cross-cutting layers need: the
//! owner (for key lookup and ownership enforcement), the timestamp (for
//! monotonic updates), and an in-place visitor over the sensitive fields
//! (for sealing and opening envelopes without the middleware knowing the
//! variant's shape).

use chrono::{DateTime, Utc};

use crate::error::VaultError;
use crate::value_objects::{SecretId, UserId};

/// Visitor applied to each sensitive field of a record.
///
/// Receives the field name (for error context) and the field's bytes for
/// in-place replacement. Returning an error aborts the visit.
pub type FieldTransform<'a> = dyn FnMut(&'static str, &mut Vec<u8>) -> Result<(), VaultError> + 'a;

/// Contract between secret variants and the persistence middleware.
pub trait SecretRecord: Clone + Send + Sync + 'static {
    /// Resource name used in logs and error detail ("credential", ...).
    const RESOURCE: &'static str;

    /// Unique identifier of this record.
    fn id(&self) -> SecretId;

    /// Owner of this record. Never changes after creation.
    fn user_id(&self) -> UserId;

    /// Last modification timestamp.
    fn updated_at(&self) -> DateTime<Utc>;

    /// Advances the modification timestamp, keeping it monotonic.
    fn touch(&mut self, at: DateTime<Utc>);

    /// Applies a transform to every sensitive field in declaration order.
    ///
    /// The encryption middleware seals fields through this; the decryption
    /// middleware opens them. The first failing field aborts the visit and
    /// the error identifies it.
    fn for_each_sensitive_field(&mut self, apply: &mut FieldTransform<'_>) -> Result<(), VaultError>;
}
