// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secret Repository Contract
//!
//! One generic persistence contract shared by the four secret variants, plus
//! the parameter types flowing through it and the [`SecretStore`] that backs
//! the contract with a composed middleware chain.
//!
//! ## Shapes
//!
//! Every variant's persistence reduces to two function shapes:
//!
//! - save: `(OpContext, SaveParams<R>) -> Result<(), VaultError>`
//! - load: `(OpContext, LoadQuery) -> Result<Vec<R>, VaultError>`
//!
//! Loading by id queries the id alone so the ownership layer can distinguish
//! "not found" from "owned by someone else"; loading without an id lists the
//! caller's records. The query always carries the caller for key lookup and
//! ownership enforcement.

use async_trait::async_trait;

use crate::entities::SecretRecord;
use crate::error::VaultError;
use crate::repositories::middleware::{chain_load, chain_save, LoadFn, LoadLayer, SaveFn, SaveLayer};
use crate::value_objects::{SecretId, UserId};

/// Per-operation context threaded through the middleware chain.
///
/// Carries the request correlation id for logs. Cancellation is the enclosing
/// task's concern: dropping the operation future aborts the chain before
/// anything is persisted or returned.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    request_id: Option<String>,
}

impl OpContext {
    /// Context without correlation (tests, startup tasks).
    pub fn new() -> Self {
        Self::default()
    }

    /// Context correlated to an inbound request.
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }

    /// The correlation id, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

/// Parameters of a save operation.
#[derive(Debug, Clone)]
pub struct SaveParams<R> {
    /// The record to persist. Plaintext above the encryption layer,
    /// envelopes below it.
    pub record: R,
}

impl<R> SaveParams<R> {
    pub fn new(record: R) -> Self {
        Self { record }
    }
}

/// Parameters of a load operation.
#[derive(Debug, Clone)]
pub struct LoadQuery {
    /// The caller. Used for key lookup, ownership enforcement, and listing.
    pub user_id: UserId,
    /// When present, load exactly this record regardless of owner; the
    /// ownership layer decides whether the caller may see it.
    pub id: Option<SecretId>,
}

impl LoadQuery {
    /// Query for every record owned by the caller.
    pub fn all_for(user_id: UserId) -> Self {
        Self { user_id, id: None }
    }

    /// Query for one record by id on behalf of the caller.
    pub fn by_id(user_id: UserId, id: SecretId) -> Self {
        Self { user_id, id: Some(id) }
    }
}

/// Persistence contract for one secret variant.
#[async_trait]
pub trait SecretRepository<R: SecretRecord>: Send + Sync {
    /// Persists the record (insert or replace by id).
    async fn save(&self, ctx: OpContext, params: SaveParams<R>) -> Result<(), VaultError>;

    /// Loads records per the query. Empty result is not an error.
    async fn load(&self, ctx: OpContext, query: LoadQuery) -> Result<Vec<R>, VaultError>;
}

/// A repository assembled from a base function pair and middleware layers.
///
/// This is the only [`SecretRepository`] implementation in the system; the
/// variants differ solely in their base functions and the layers stacked on
/// top.
pub struct SecretStore<R: SecretRecord> {
    save_fn: SaveFn<R>,
    load_fn: LoadFn<R>,
}

impl<R: SecretRecord> SecretStore<R> {
    /// Wraps an already-composed function pair.
    pub fn new(save_fn: SaveFn<R>, load_fn: LoadFn<R>) -> Self {
        Self { save_fn, load_fn }
    }

    /// Composes base functions with layers.
    ///
    /// Layers apply right-to-left: the last layer in each vector becomes the
    /// outermost call. Encryption must be the innermost save layer and
    /// decryption the outermost load layer so everything beneath them sees
    /// only envelopes.
    pub fn assemble(
        base_save: SaveFn<R>,
        base_load: LoadFn<R>,
        save_layers: Vec<SaveLayer<R>>,
        load_layers: Vec<LoadLayer<R>>,
    ) -> Self {
        Self::new(chain_save(base_save, save_layers), chain_load(base_load, load_layers))
    }
}

#[async_trait]
impl<R: SecretRecord> SecretRepository<R> for SecretStore<R> {
    async fn save(&self, ctx: OpContext, params: SaveParams<R>) -> Result<(), VaultError> {
        (self.save_fn)(ctx, params).await
    }

    async fn load(&self, ctx: OpContext, query: LoadQuery) -> Result<Vec<R>, VaultError> {
        (self.load_fn)(ctx, query).await
    }
}
