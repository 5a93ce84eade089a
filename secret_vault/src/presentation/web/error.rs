// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # HTTP Error Registry
//!
//! Deterministic classification of an arbitrary error value into a single
//! HTTP outcome: status, public message list, and a logging decision.
//!
//! ## Algorithm
//!
//! 1. **Match**: walk the error's entire cause tree and collect every rule
//!    whose kind occurs anywhere in it, preserving registry order.
//! 2. **Best**: pick the match with the highest-priority class
//!    (`Tech < Auth < Validation < Generic`); ties go to the earliest rule.
//! 3. **Message**: a non-mergeable best answers alone. A mergeable best
//!    collects the messages of every matched mergeable rule with the same
//!    class and status, deduplicated in first-seen order, which is how a
//!    compound validation failure becomes one multi-message response.
//! 4. **Log**: the best rule's flag. Rendering emits the full internal
//!    error chain to the log sink when set; clients only ever see the
//!    public messages.
//!
//! A `None` input yields 500 without logging; a non-`None` input that no
//! rule matches yields 500 with logging, because an unclassified error is a
//! programming mistake worth an operator's attention.
//!
//! Registries are immutable after construction and compose by
//! concatenation. Duplicate kinds are allowed and resolve by the same
//! ordering rules.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use secret_vault_domain::{ErrorClass, ErrorKind, VaultError};

/// Public message for every technical failure.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Delivery policy attached to one error kind.
#[derive(Debug, Clone, Copy)]
pub struct ErrorPolicy {
    pub status: StatusCode,
    pub message: &'static str,
    pub log: bool,
    pub mergeable: bool,
    pub class: ErrorClass,
}

/// One registry entry.
#[derive(Debug, Clone, Copy)]
pub struct ErrorRule {
    pub kind: ErrorKind,
    pub policy: ErrorPolicy,
}

impl ErrorRule {
    pub fn new(kind: ErrorKind, policy: ErrorPolicy) -> Self {
        Self { kind, policy }
    }
}

/// The computed HTTP outcome for one error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedError {
    pub status: StatusCode,
    pub messages: Vec<String>,
    pub should_log: bool,
}

/// Wire shape of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub messages: Vec<String>,
}

/// Ordered, immutable rule set.
pub struct ErrorRegistry {
    rules: Vec<ErrorRule>,
}

impl ErrorRegistry {
    pub fn new(rules: Vec<ErrorRule>) -> Self {
        Self { rules }
    }

    /// Concatenates two registries, keeping this one's rules first.
    pub fn concat(mut self, other: ErrorRegistry) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Classifies an error value. Pure: same input, same outcome.
    pub fn handle(&self, error: Option<&VaultError>) -> ProcessedError {
        let Some(error) = error else {
            return ProcessedError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                messages: vec![INTERNAL_MESSAGE.to_string()],
                should_log: false,
            };
        };

        let kinds = error.kinds();
        let matched: Vec<&ErrorRule> = self.rules.iter().filter(|rule| kinds.contains(&rule.kind)).collect();

        let Some(best) = matched
            .iter()
            .enumerate()
            .min_by_key(|(position, rule)| (rule.policy.class, *position))
            .map(|(_, rule)| *rule)
        else {
            return ProcessedError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                messages: vec![INTERNAL_MESSAGE.to_string()],
                should_log: true,
            };
        };

        let messages = if !best.policy.mergeable {
            vec![best.policy.message.to_string()]
        } else {
            let mut seen: Vec<&'static str> = Vec::new();
            for rule in &matched {
                let policy = rule.policy;
                if policy.mergeable
                    && policy.class == best.policy.class
                    && policy.status == best.policy.status
                    && !seen.contains(&policy.message)
                {
                    seen.push(policy.message);
                }
            }
            seen.into_iter().map(String::from).collect()
        };

        ProcessedError {
            status: best.policy.status,
            messages,
            should_log: best.policy.log,
        }
    }

    /// Classifies, logs when required, and renders the HTTP response.
    pub fn render(&self, error: &VaultError) -> Response {
        let processed = self.handle(Some(error));
        if processed.should_log {
            tracing::error!(status = %processed.status, error = %error, "request failed");
        }
        (
            processed.status,
            Json(ErrorBody {
                messages: processed.messages,
            }),
        )
            .into_response()
    }
}

fn tech(kind: ErrorKind) -> ErrorRule {
    ErrorRule::new(
        kind,
        ErrorPolicy {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_MESSAGE,
            log: true,
            mergeable: false,
            class: ErrorClass::Tech,
        },
    )
}

fn auth(kind: ErrorKind, status: StatusCode, message: &'static str) -> ErrorRule {
    ErrorRule::new(
        kind,
        ErrorPolicy {
            status,
            message,
            log: false,
            mergeable: false,
            class: ErrorClass::Auth,
        },
    )
}

fn validation(kind: ErrorKind, message: &'static str) -> ErrorRule {
    ErrorRule::new(
        kind,
        ErrorPolicy {
            status: StatusCode::BAD_REQUEST,
            message,
            log: false,
            mergeable: true,
            class: ErrorClass::Validation,
        },
    )
}

fn bad_request(kind: ErrorKind, message: &'static str) -> ErrorRule {
    ErrorRule::new(
        kind,
        ErrorPolicy {
            status: StatusCode::BAD_REQUEST,
            message,
            log: false,
            mergeable: false,
            class: ErrorClass::Validation,
        },
    )
}

fn generic(kind: ErrorKind, status: StatusCode, message: &'static str) -> ErrorRule {
    ErrorRule::new(
        kind,
        ErrorPolicy {
            status,
            message,
            log: false,
            mergeable: false,
            class: ErrorClass::Generic,
        },
    )
}

/// The complete rule set for the vault API.
///
/// Validation rules come first so that, among equal-priority matches, the
/// mergeable field-level rules win the tie and compound failures merge.
pub fn default_registry() -> ErrorRegistry {
    ErrorRegistry::new(vec![
        // Field validation, domain-level kinds.
        validation(ErrorKind::IncorrectLogin, "Invalid login"),
        validation(ErrorKind::IncorrectPassword, "Invalid password"),
        validation(ErrorKind::InvalidCardNumber, "Invalid card number"),
        validation(ErrorKind::InvalidCardHolder, "Invalid card holder"),
        validation(ErrorKind::InvalidCardExpiryMonth, "Invalid card expiry month"),
        validation(ErrorKind::InvalidCardExpiryYear, "Invalid card expiry year"),
        validation(ErrorKind::InvalidCardCvv, "Invalid card CVV"),
        validation(ErrorKind::EmptyNote, "Note text must not be empty"),
        validation(ErrorKind::EmptyFilePayload, "File payload must not be empty"),
        // Field validation, application-level kinds. Same messages; the
        // merge step deduplicates when both levels of a chain match.
        validation(ErrorKind::CredentialIncorrectLogin, "Invalid login"),
        validation(ErrorKind::CredentialIncorrectPassword, "Invalid password"),
        validation(ErrorKind::BankCardInvalidNumber, "Invalid card number"),
        validation(ErrorKind::BankCardInvalidHolder, "Invalid card holder"),
        validation(ErrorKind::BankCardInvalidExpiryMonth, "Invalid card expiry month"),
        validation(ErrorKind::BankCardInvalidExpiryYear, "Invalid card expiry year"),
        validation(ErrorKind::BankCardInvalidCvv, "Invalid card CVV"),
        validation(ErrorKind::NoteEmptyText, "Note text must not be empty"),
        validation(ErrorKind::FileDataEmptyPayload, "File payload must not be empty"),
        // Malformed-request fallbacks.
        bad_request(ErrorKind::AuthApp, "Invalid login or password"),
        bad_request(ErrorKind::CredentialApp, "Invalid credential data"),
        bad_request(ErrorKind::BankCardApp, "Invalid bank card data"),
        bad_request(ErrorKind::NoteApp, "Invalid note data"),
        bad_request(ErrorKind::FileDataApp, "Invalid file data"),
        bad_request(ErrorKind::DatasyncApp, "Invalid datasync data"),
        // Authentication outcomes.
        auth(
            ErrorKind::AuthWrongLoginOrPassword,
            StatusCode::UNAUTHORIZED,
            "Wrong login or password",
        ),
        auth(
            ErrorKind::AuthInvalidAccessToken,
            StatusCode::UNAUTHORIZED,
            "Your access token is invalid or has expired. Please log in",
        ),
        auth(
            ErrorKind::AuthUserAlreadyExists,
            StatusCode::CONFLICT,
            "User already exists",
        ),
        // Ownership and existence.
        generic(
            ErrorKind::CredentialAccessDenied,
            StatusCode::FORBIDDEN,
            "Access to this credential is denied",
        ),
        generic(
            ErrorKind::BankCardAccessDenied,
            StatusCode::FORBIDDEN,
            "Access to this bank card is denied",
        ),
        generic(
            ErrorKind::NoteAccessDenied,
            StatusCode::FORBIDDEN,
            "Access to this note is denied",
        ),
        generic(
            ErrorKind::FileDataAccessDenied,
            StatusCode::FORBIDDEN,
            "Access to this file is denied",
        ),
        generic(ErrorKind::CredentialNotFound, StatusCode::NOT_FOUND, "Credential not found"),
        generic(ErrorKind::BankCardNotFound, StatusCode::NOT_FOUND, "Bank card not found"),
        generic(ErrorKind::NoteNotFound, StatusCode::NOT_FOUND, "Note not found"),
        generic(ErrorKind::FileDataNotFound, StatusCode::NOT_FOUND, "File not found"),
        // Technical failures: logged, never disclosed.
        tech(ErrorKind::AuthTech),
        tech(ErrorKind::CredentialTech),
        tech(ErrorKind::BankCardTech),
        tech(ErrorKind::NoteTech),
        tech(ErrorKind::FileDataTech),
        tech(ErrorKind::DatasyncTech),
        tech(ErrorKind::KeyUnavailable),
        tech(ErrorKind::CipherFailure),
        tech(ErrorKind::CipherMalformed),
        tech(ErrorKind::CipherVersion),
        tech(ErrorKind::CipherAuthFailed),
        tech(ErrorKind::Database),
        tech(ErrorKind::Serialization),
        tech(ErrorKind::Internal),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ErrorRegistry {
        default_registry()
    }

    #[test]
    fn nil_input_is_a_quiet_500() {
        let processed = registry().handle(None);
        assert_eq!(processed.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(processed.messages, vec![INTERNAL_MESSAGE.to_string()]);
        assert!(!processed.should_log);
    }

    #[test]
    fn unmatched_error_is_a_logged_500() {
        // OwnershipViolation has no rule of its own: the application layer
        // always wraps it. Reaching the registry bare means a bug.
        let err = VaultError::new(ErrorKind::OwnershipViolation);
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(processed.should_log);
    }

    #[test]
    fn handle_is_deterministic() {
        let err = VaultError::join(vec![
            VaultError::new(ErrorKind::CredentialIncorrectLogin),
            VaultError::new(ErrorKind::CredentialIncorrectPassword),
        ]);
        let registry = registry();
        assert_eq!(registry.handle(Some(&err)), registry.handle(Some(&err)));
    }

    #[test]
    fn compound_validation_merges_each_message_once() {
        // Both levels of both chains match; four rules collapse to two
        // messages, in registry order.
        let err = VaultError::join(vec![
            VaultError::wrap(
                ErrorKind::CredentialIncorrectLogin,
                VaultError::new(ErrorKind::IncorrectLogin),
            ),
            VaultError::wrap(
                ErrorKind::CredentialIncorrectPassword,
                VaultError::new(ErrorKind::IncorrectPassword),
            ),
        ]);
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            processed.messages,
            vec!["Invalid login".to_string(), "Invalid password".to_string()]
        );
        assert!(!processed.should_log);
    }

    #[test]
    fn tech_outranks_validation_in_a_join() {
        let err = VaultError::join(vec![
            VaultError::new(ErrorKind::CredentialIncorrectLogin),
            VaultError::wrap(ErrorKind::CredentialTech, VaultError::database("disk full")),
        ]);
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(processed.messages, vec![INTERNAL_MESSAGE.to_string()]);
        assert!(processed.should_log);
    }

    #[test]
    fn auth_outranks_validation() {
        let err = VaultError::join(vec![
            VaultError::new(ErrorKind::AuthWrongLoginOrPassword),
            VaultError::new(ErrorKind::IncorrectLogin),
        ]);
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::UNAUTHORIZED);
        assert_eq!(processed.messages, vec!["Wrong login or password".to_string()]);
    }

    #[test]
    fn non_mergeable_best_answers_alone() {
        let err = VaultError::wrap(
            ErrorKind::CredentialAccessDenied,
            VaultError::new(ErrorKind::OwnershipViolation),
        );
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::FORBIDDEN);
        assert_eq!(processed.messages, vec!["Access to this credential is denied".to_string()]);
        assert!(!processed.should_log);
    }

    #[test]
    fn deep_wrapping_still_matches() {
        let err = VaultError::wrap_with(
            ErrorKind::CredentialTech,
            "save failed",
            VaultError::wrap(ErrorKind::KeyUnavailable, VaultError::database("connection reset")),
        );
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(processed.should_log);
    }

    #[test]
    fn invalid_token_has_the_canonical_message() {
        let err = VaultError::new(ErrorKind::AuthInvalidAccessToken);
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            processed.messages,
            vec!["Your access token is invalid or has expired. Please log in".to_string()]
        );
    }

    #[test]
    fn registration_conflict_is_a_409() {
        let err = VaultError::wrap(
            ErrorKind::AuthUserAlreadyExists,
            VaultError::new(ErrorKind::UserAlreadyExists),
        );
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::CONFLICT);
        assert_eq!(processed.messages, vec!["User already exists".to_string()]);
    }

    #[test]
    fn concatenation_preserves_order_and_duplicates() {
        let custom = ErrorRegistry::new(vec![ErrorRule::new(
            ErrorKind::NoteEmptyText,
            ErrorPolicy {
                status: StatusCode::BAD_REQUEST,
                message: "Custom note message",
                log: false,
                mergeable: true,
                class: ErrorClass::Validation,
            },
        )]);
        let combined = custom.concat(default_registry());

        let err = VaultError::new(ErrorKind::NoteEmptyText);
        let processed = combined.handle(Some(&err));
        // The earlier duplicate wins the tie and both merge, deduplicated by
        // message text only when identical; these differ.
        assert_eq!(
            processed.messages,
            vec!["Custom note message".to_string(), "Note text must not be empty".to_string()]
        );
    }

    #[test]
    fn mixed_statuses_do_not_merge() {
        // A validation failure joined with a not-found: validation class
        // wins, and the generic 404 message stays out of the merge.
        let err = VaultError::join(vec![
            VaultError::new(ErrorKind::NoteEmptyText),
            VaultError::new(ErrorKind::NoteNotFound),
        ]);
        let processed = registry().handle(Some(&err));
        assert_eq!(processed.status, StatusCode::BAD_REQUEST);
        assert_eq!(processed.messages, vec!["Note text must not be empty".to_string()]);
    }
}
