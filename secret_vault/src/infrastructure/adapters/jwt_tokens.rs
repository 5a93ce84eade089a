// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # JWT Token Adapter
//!
//! Implements the [`TokenIssuer`] port with HMAC-SHA256 signed JWTs.
//!
//! Claims are `{sub, iat, exp}` where `sub` is the user id. Verification
//! enforces the signature and the expiry with zero leeway; every failure
//! mode (expired, tampered, malformed, wrong algorithm) surfaces as the same
//! invalid-token kind, and the delivery layer collapses them to one public
//! message.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use secret_vault_domain::{AccessToken, ErrorKind, TokenIssuer, UserId, VaultError};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 implementation of the token issuer port.
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
    validation: Validation,
}

impl JwtTokenIssuer {
    /// Builds an issuer around the process signing key and token lifetime.
    pub fn new(signing_key: &[u8], lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // A token is invalid the second it expires.
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            lifetime,
            validation,
        }
    }

    fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<AccessToken, VaultError> {
        let expires_at = now + self.lifetime;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| VaultError::with_detail(ErrorKind::AuthTech, format!("token signing failed: {}", e)))?;
        Ok(AccessToken { token, expires_at })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: UserId) -> Result<AccessToken, VaultError> {
        self.issue_at(user_id, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<UserId, VaultError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| VaultError::with_detail(ErrorKind::AuthInvalidAccessToken, format!("token rejected: {}", e)))?;
        // The cause is deliberately dropped: a malformed subject must stay
        // an invalid-token outcome, not escalate to a technical failure.
        UserId::parse(&data.claims.sub).map_err(|_| {
            VaultError::with_detail(ErrorKind::AuthInvalidAccessToken, "token subject is not a user id")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(b"test-signing-key", Duration::hours(1))
    }

    #[test]
    fn issued_token_verifies_to_the_same_user() {
        let issuer = issuer();
        let user = UserId::generate();
        let token = issuer.issue(user).unwrap();
        assert_eq!(issuer.verify(&token.token).unwrap(), user);
    }

    #[test]
    fn expiry_is_stamped_from_lifetime() {
        let issuer = issuer();
        let before = Utc::now();
        let token = issuer.issue(UserId::generate()).unwrap();
        assert!(token.expires_at >= before + Duration::minutes(59));
        assert!(token.expires_at <= Utc::now() + Duration::hours(1));
    }

    #[test]
    fn expired_token_fails_even_with_valid_signature() {
        let expired = JwtTokenIssuer::new(b"test-signing-key", Duration::seconds(-120));
        let token = expired.issue(UserId::generate()).unwrap();
        let err = issuer().verify(&token.token).unwrap_err();
        assert!(err.is(ErrorKind::AuthInvalidAccessToken));
    }

    #[test]
    fn foreign_signing_key_is_rejected() {
        let other = JwtTokenIssuer::new(b"some-other-key", Duration::hours(1));
        let token = other.issue(UserId::generate()).unwrap();
        assert!(issuer().verify(&token.token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let issuer = issuer();
        let mut token = issuer.issue(UserId::generate()).unwrap().token;
        token.replace_range(token.len() - 2.., "xx");
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(issuer().verify("garbage").is_err());
        assert!(issuer().verify("").is_err());
    }
}
