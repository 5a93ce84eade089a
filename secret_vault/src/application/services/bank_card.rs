// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Bank card orchestration. Mirrors the credential service with the card
//! validation kinds re-mapped to their resource-scoped counterparts.

use std::sync::Arc;

use secret_vault_domain::{
    BankCard, ErrorKind, LoadQuery, OpContext, SaveParams, SecretId, SecretRecord, SecretRepository, UserId, VaultError,
};

/// Plaintext request payload for create and update.
#[derive(Debug, Clone)]
pub struct BankCardInput {
    pub number: String,
    pub holder: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cvv: String,
    pub description: String,
}

/// Create/list/get/update for bank cards.
pub struct BankCardService {
    repo: Arc<dyn SecretRepository<BankCard>>,
}

impl BankCardService {
    pub fn new(repo: Arc<dyn SecretRepository<BankCard>>) -> Self {
        Self { repo }
    }

    /// Creates a card and returns its id.
    pub async fn create(&self, ctx: OpContext, user_id: UserId, input: BankCardInput) -> Result<SecretId, VaultError> {
        let record = Self::build(user_id, &input)?;
        let id = record.id;
        self.repo
            .save(ctx, SaveParams::new(record))
            .await
            .map_err(Self::remap_failure)?;
        Ok(id)
    }

    /// Lists every card owned by the caller.
    pub async fn list(&self, ctx: OpContext, user_id: UserId) -> Result<Vec<BankCard>, VaultError> {
        self.repo
            .load(ctx, LoadQuery::all_for(user_id))
            .await
            .map_err(Self::remap_failure)
    }

    /// Fetches one card by id on behalf of the caller.
    pub async fn get(&self, ctx: OpContext, user_id: UserId, id: SecretId) -> Result<BankCard, VaultError> {
        let mut records = self
            .repo
            .load(ctx, LoadQuery::by_id(user_id, id))
            .await
            .map_err(Self::remap_failure)?;
        records
            .pop()
            .ok_or_else(|| VaultError::with_detail(ErrorKind::BankCardNotFound, format!("bank card {} does not exist", id)))
    }

    /// Replaces a card the caller owns and returns its id.
    pub async fn update(
        &self,
        ctx: OpContext,
        user_id: UserId,
        id: SecretId,
        input: BankCardInput,
    ) -> Result<SecretId, VaultError> {
        let existing = self.get(ctx.clone(), user_id, id).await?;

        let mut record = Self::build(user_id, &input)?;
        record.id = existing.id;
        record.touch(existing.updated_at);

        self.repo
            .save(ctx, SaveParams::new(record))
            .await
            .map_err(Self::remap_failure)?;
        Ok(id)
    }

    fn build(user_id: UserId, input: &BankCardInput) -> Result<BankCard, VaultError> {
        BankCard::new(
            user_id,
            &input.number,
            &input.holder,
            input.expiry_month,
            input.expiry_year,
            &input.cvv,
            &input.description,
        )
        .map_err(Self::remap_validation)
    }

    fn remap_validation(err: VaultError) -> VaultError {
        let mapped = err
            .into_siblings()
            .into_iter()
            .map(|violation| {
                let kind = match violation.kind() {
                    ErrorKind::InvalidCardNumber => ErrorKind::BankCardInvalidNumber,
                    ErrorKind::InvalidCardHolder => ErrorKind::BankCardInvalidHolder,
                    ErrorKind::InvalidCardExpiryMonth => ErrorKind::BankCardInvalidExpiryMonth,
                    ErrorKind::InvalidCardExpiryYear => ErrorKind::BankCardInvalidExpiryYear,
                    ErrorKind::InvalidCardCvv => ErrorKind::BankCardInvalidCvv,
                    _ => ErrorKind::BankCardApp,
                };
                VaultError::wrap(kind, violation)
            })
            .collect();
        VaultError::join(mapped)
    }

    fn remap_failure(err: VaultError) -> VaultError {
        if err.is(ErrorKind::OwnershipViolation) {
            VaultError::wrap(ErrorKind::BankCardAccessDenied, err)
        } else {
            VaultError::wrap(ErrorKind::BankCardTech, err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Datelike;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<HashMap<SecretId, BankCard>>,
    }

    #[async_trait]
    impl SecretRepository<BankCard> for MemoryRepo {
        async fn save(&self, _ctx: OpContext, params: SaveParams<BankCard>) -> Result<(), VaultError> {
            self.rows.lock().unwrap().insert(params.record.id, params.record);
            Ok(())
        }

        async fn load(&self, _ctx: OpContext, query: LoadQuery) -> Result<Vec<BankCard>, VaultError> {
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

    fn valid_input() -> BankCardInput {
        BankCardInput {
            number: "4539578763621486".into(),
            holder: "ALICE EXAMPLE".into(),
            expiry_month: 12,
            expiry_year: (chrono::Utc::now().year() + 2) as u16,
            cvv: "123".into(),
            description: "personal".into(),
        }
    }

    #[tokio::test]
    async fn create_get_round_trip() {
        let svc = BankCardService::new(Arc::new(MemoryRepo::default()));
        let user = UserId::generate();
        let id = svc.create(OpContext::new(), user, valid_input()).await.unwrap();
        let card = svc.get(OpContext::new(), user, id).await.unwrap();
        assert_eq!(card.number, b"4539578763621486");
    }

    #[tokio::test]
    async fn card_violations_are_remapped() {
        let svc = BankCardService::new(Arc::new(MemoryRepo::default()));
        let mut input = valid_input();
        input.number = "1234".into();
        input.cvv = "12".into();

        let err = svc.create(OpContext::new(), UserId::generate(), input).await.unwrap_err();
        assert!(err.is(ErrorKind::BankCardInvalidNumber));
        assert!(err.is(ErrorKind::BankCardInvalidCvv));
        assert!(!err.is(ErrorKind::BankCardInvalidHolder));
    }

    #[tokio::test]
    async fn foreign_card_is_access_denied() {
        let svc = BankCardService::new(Arc::new(MemoryRepo::default()));
        let id = svc
            .create(OpContext::new(), UserId::generate(), valid_input())
            .await
            .unwrap();
        let err = svc.get(OpContext::new(), UserId::generate(), id).await.unwrap_err();
        assert!(err.is(ErrorKind::BankCardAccessDenied));
    }
}
