// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Persistence Middleware
//!
//! Higher-order composition of persistence operations. A middleware layer
//! transforms a save or load function into another of the same shape, so
//! cross-cutting behavior stacks without the business code or the database
//! code knowing about it.
//!
//! ## Composition
//!
//! `chain_save(base, [mw1, mw2])` produces `mw2(mw1(base))`: call order is
//! `mw2 -> mw1 -> base` inward and the reverse outward. The same holds for
//! loads.
//!
//! ## Built-in layers
//!
//! - [`encrypt_on_save`]: look up the caller's key, seal every sensitive
//!   field of a copy of the record, delegate with the envelope-bearing copy.
//!   The caller's plaintext record is never mutated. A failing field aborts
//!   the chain with the field named in the error.
//! - [`decrypt_on_load`]: delegate first; an empty result short-circuits
//!   without touching the key provider; otherwise open every field of every
//!   record in place. Any failure aborts the whole load, so partially
//!   decrypted results are never returned.
//! - [`enforce_owner`]: reject records the querying user does not own,
//!   before they reach the decryption layer.
//! - [`trace_save`] / [`trace_load`]: structured timing logs, showing where
//!   an additional cross-cutting step slots into the chain.
//!
//! ## Required ordering
//!
//! Encryption innermost on the write path, decryption outermost on the read
//! path. Every layer between them (tracing, ownership, a future retry)
//! observes envelopes only, so the invariant "raw persistence never sees
//! plaintext" holds regardless of what else is stacked.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::entities::SecretRecord;
use crate::error::VaultError;
use crate::repositories::secret_repository::{LoadQuery, OpContext, SaveParams};
use crate::services::{EnvelopeCrypto, KeyProvider};

/// Boxed save operation for one secret variant.
pub type SaveFn<R> =
    Arc<dyn Fn(OpContext, SaveParams<R>) -> BoxFuture<'static, Result<(), VaultError>> + Send + Sync>;

/// Boxed load operation for one secret variant.
pub type LoadFn<R> =
    Arc<dyn Fn(OpContext, LoadQuery) -> BoxFuture<'static, Result<Vec<R>, VaultError>> + Send + Sync>;

/// A transformation of a save function into another save function.
pub type SaveLayer<R> = Box<dyn FnOnce(SaveFn<R>) -> SaveFn<R> + Send>;

/// A transformation of a load function into another load function.
pub type LoadLayer<R> = Box<dyn FnOnce(LoadFn<R>) -> LoadFn<R> + Send>;

/// Stacks save layers onto a base function, last layer outermost.
pub fn chain_save<R: SecretRecord>(base: SaveFn<R>, layers: Vec<SaveLayer<R>>) -> SaveFn<R> {
    layers.into_iter().fold(base, |inner, layer| layer(inner))
}

/// Stacks load layers onto a base function, last layer outermost.
pub fn chain_load<R: SecretRecord>(base: LoadFn<R>, layers: Vec<LoadLayer<R>>) -> LoadFn<R> {
    layers.into_iter().fold(base, |inner, layer| layer(inner))
}

/// Encryption layer for the write path.
///
/// Must be innermost so every layer below sees envelopes only.
pub fn encrypt_on_save<R: SecretRecord>(
    keys: Arc<dyn KeyProvider>,
    cipher: Arc<dyn EnvelopeCrypto>,
) -> SaveLayer<R> {
    Box::new(move |next: SaveFn<R>| {
        Arc::new(move |ctx: OpContext, params: SaveParams<R>| {
            let keys = Arc::clone(&keys);
            let cipher = Arc::clone(&cipher);
            let next = Arc::clone(&next);
            Box::pin(async move {
                let key = keys.provide(params.record.user_id()).await?;

                // Seal a copy; the caller keeps its plaintext record intact.
                let mut sealed = params.record.clone();
                sealed.for_each_sensitive_field(&mut |field, value| {
                    let envelope = cipher.seal(&key, value).map_err(|e| {
                        let kind = e.kind();
                        VaultError::wrap_with(kind, format!("sealing {} field '{}'", R::RESOURCE, field), e)
                    })?;
                    *value = envelope;
                    Ok(())
                })?;

                next(ctx, SaveParams::new(sealed)).await
            })
        })
    })
}

/// Decryption layer for the read path.
///
/// Must be outermost so callers above it never see envelopes.
pub fn decrypt_on_load<R: SecretRecord>(
    keys: Arc<dyn KeyProvider>,
    cipher: Arc<dyn EnvelopeCrypto>,
) -> LoadLayer<R> {
    Box::new(move |next: LoadFn<R>| {
        Arc::new(move |ctx: OpContext, query: LoadQuery| {
            let keys = Arc::clone(&keys);
            let cipher = Arc::clone(&cipher);
            let next = Arc::clone(&next);
            Box::pin(async move {
                let user_id = query.user_id;
                let mut records = next(ctx, query).await?;
                if records.is_empty() {
                    return Ok(records);
                }

                let key = keys.provide(user_id).await?;
                for record in &mut records {
                    record.for_each_sensitive_field(&mut |field, value| {
                        let plaintext = cipher.open(&key, value).map_err(|e| {
                            let kind = e.kind();
                            VaultError::wrap_with(kind, format!("opening {} field '{}'", R::RESOURCE, field), e)
                        })?;
                        *value = plaintext;
                        Ok(())
                    })?;
                }
                Ok(records)
            })
        })
    })
}

/// Ownership layer for the read path.
///
/// Sits between the base and the decryption layer: records owned by another
/// user are rejected while still sealed, so a cross-tenant query can never
/// surface foreign plaintext or even trigger a foreign-key decryption
/// attempt.
pub fn enforce_owner<R: SecretRecord>() -> LoadLayer<R> {
    Box::new(move |next: LoadFn<R>| {
        Arc::new(move |ctx: OpContext, query: LoadQuery| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                let user_id = query.user_id;
                let records = next(ctx, query).await?;
                for record in &records {
                    if record.user_id() != user_id {
                        return Err(VaultError::with_detail(
                            crate::error::ErrorKind::OwnershipViolation,
                            format!("{} {} requested by {}", R::RESOURCE, record.id(), user_id),
                        ));
                    }
                }
                Ok(records)
            })
        })
    })
}

/// Timing/outcome log layer for the write path.
pub fn trace_save<R: SecretRecord>() -> SaveLayer<R> {
    Box::new(move |next: SaveFn<R>| {
        Arc::new(move |ctx: OpContext, params: SaveParams<R>| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                let started = std::time::Instant::now();
                let request_id = ctx.request_id().unwrap_or("-").to_owned();
                let result = next(ctx, params).await;
                tracing::debug!(
                    resource = R::RESOURCE,
                    %request_id,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    ok = result.is_ok(),
                    "save completed"
                );
                result
            })
        })
    })
}

/// Timing/outcome log layer for the read path.
pub fn trace_load<R: SecretRecord>() -> LoadLayer<R> {
    Box::new(move |next: LoadFn<R>| {
        Arc::new(move |ctx: OpContext, query: LoadQuery| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                let started = std::time::Instant::now();
                let request_id = ctx.request_id().unwrap_or("-").to_owned();
                let result = next(ctx, query).await;
                tracing::debug!(
                    resource = R::RESOURCE,
                    %request_id,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    rows = result.as_ref().map(|r| r.len()).unwrap_or(0),
                    ok = result.is_ok(),
                    "load completed"
                );
                result
            })
        })
    })
}
