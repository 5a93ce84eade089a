// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bank Card Entity
//!
//! Payment card data. Every user-supplied field is sensitive, including the
//! expiry numbers, which are stored as their decimal string bytes so the
//! whole record can go through the same envelope path.
//!
//! ## Validation
//!
//! Creation checks, joining every violation into one error:
//!
//! - card number: 12 to 19 ASCII digits passing the Luhn checksum
//! - holder: non-empty
//! - expiry month: 1 to 12
//! - expiry: not in the past at month granularity (the card is valid through
//!   its expiry month)
//! - CVV: 3 or 4 ASCII digits

use chrono::{DateTime, Datelike, Utc};

use crate::entities::secret_record::{FieldTransform, SecretRecord};
use crate::error::{ErrorKind, VaultError};
use crate::value_objects::{SecretId, UserId};

/// A payment card secret.
#[derive(Debug, Clone)]
pub struct BankCard {
    pub id: SecretId,
    pub user_id: UserId,
    /// Sensitive. Primary account number, digits only.
    pub number: Vec<u8>,
    /// Sensitive. Card holder name as embossed.
    pub holder: Vec<u8>,
    /// Sensitive. Expiry month, decimal string "1".."12".
    pub expiry_month: Vec<u8>,
    /// Sensitive. Expiry year, decimal string, four digits.
    pub expiry_year: Vec<u8>,
    /// Sensitive. Card verification value, 3 or 4 digits.
    pub cvv: Vec<u8>,
    /// Sensitive. Free-form description.
    pub description: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

impl BankCard {
    /// Creates a validated bank card owned by `user_id`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        number: &str,
        holder: &str,
        expiry_month: u8,
        expiry_year: u16,
        cvv: &str,
        description: &str,
    ) -> Result<Self, VaultError> {
        Self::validate(number, holder, expiry_month, expiry_year, cvv, Utc::now())?;
        Ok(Self {
            id: SecretId::generate(),
            user_id,
            number: number.as_bytes().to_vec(),
            holder: holder.as_bytes().to_vec(),
            expiry_month: expiry_month.to_string().into_bytes(),
            expiry_year: expiry_year.to_string().into_bytes(),
            cvv: cvv.as_bytes().to_vec(),
            description: description.as_bytes().to_vec(),
            updated_at: Utc::now(),
        })
    }

    fn validate(
        number: &str,
        holder: &str,
        expiry_month: u8,
        expiry_year: u16,
        cvv: &str,
        now: DateTime<Utc>,
    ) -> Result<(), VaultError> {
        let mut violations = Vec::new();

        if !is_luhn_valid(number) {
            violations.push(VaultError::new(ErrorKind::InvalidCardNumber));
        }
        if holder.trim().is_empty() {
            violations.push(VaultError::new(ErrorKind::InvalidCardHolder));
        }

        let month_ok = (1..=12).contains(&expiry_month);
        if !month_ok {
            violations.push(VaultError::new(ErrorKind::InvalidCardExpiryMonth));
        }

        // Expiry comparison only makes sense for a plausible month.
        let year_now = now.year() as u16;
        let month_now = now.month() as u8;
        let expired = expiry_year < year_now || (expiry_year == year_now && month_ok && expiry_month < month_now);
        if expired {
            violations.push(VaultError::new(ErrorKind::InvalidCardExpiryYear));
        }

        let cvv_ok = (cvv.len() == 3 || cvv.len() == 4) && cvv.bytes().all(|b| b.is_ascii_digit());
        if !cvv_ok {
            violations.push(VaultError::new(ErrorKind::InvalidCardCvv));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(VaultError::join(violations))
        }
    }
}

/// Luhn checksum over an ASCII digit string.
///
/// Rejects non-digit characters and implausible lengths outright.
fn is_luhn_valid(number: &str) -> bool {
    if number.len() < 12 || number.len() > 19 || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let mut sum = 0u32;
    for (i, b) in number.bytes().rev().enumerate() {
        let mut digit = (b - b'0') as u32;
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

impl SecretRecord for BankCard {
    const RESOURCE: &'static str = "bank card";

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
        apply("number", &mut self.number)?;
        apply("holder", &mut self.holder)?;
        apply("expiry_month", &mut self.expiry_month)?;
        apply("expiry_year", &mut self.expiry_year)?;
        apply("cvv", &mut self.cvv)?;
        apply("description", &mut self.description)?;
        Ok(())
    }
}
