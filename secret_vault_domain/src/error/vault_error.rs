// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! This module provides the hierarchical error system for the secret vault
//! domain. It categorizes failures, preserves cause chains across layers, and
//! supports deterministic classification by the delivery layer.
//!
//! ## Overview
//!
//! Every fallible operation in the vault returns [`VaultError`]. An error
//! value carries three things:
//!
//! - **Kind**: a machine-matchable [`ErrorKind`] naming the failure
//! - **Detail**: an optional internal message (never shown to API clients)
//! - **Causes**: zero or more predecessor errors forming a cause tree
//!
//! The cause tree supports both shapes the layered architecture produces:
//!
//! - **Single wrap**: the application layer re-maps a domain kind by wrapping
//!   it, so both the outer and the inner kind remain matchable
//! - **Multi join**: several sibling failures (for example all validation
//!   violations of one entity) travel as one error and can be merged into a
//!   single multi-message response downstream
//!
//! ## Error Classes
//!
//! Kinds group into four classes with a fixed precedence used by the HTTP
//! error registry: `Tech < Auth < Validation < Generic` (lower wins). The
//! class of a kind is policy, not identity, so it is assigned where rules are
//! registered rather than here; [`ErrorClass`] only fixes the ordering.
//!
//! ## Matching
//!
//! [`VaultError::is`] and [`VaultError::kinds`] walk the entire cause tree
//! depth-first, so a deeply wrapped cause still matches its kind. Join nodes
//! created by [`VaultError::join`] are transparent wrappers and are skipped
//! by the match predicate.
//!
//! ## Interoperability
//!
//! Foreign errors (database driver, cipher backend, token codec) are absorbed
//! at the boundary via the convenience constructors, keeping their message as
//! internal detail and their position in the cause chain intact.

use thiserror::Error;

/// Classification of error kinds used for registry precedence.
///
/// The numeric order is the precedence order: when one error tree matches
/// rules of several classes, the lowest class decides status, message
/// selection, and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorClass {
    /// Infrastructure and programming failures. Always logged, never
    /// disclosed beyond a generic message.
    Tech = 0,
    /// Authentication and authorization outcomes.
    Auth = 1,
    /// Input validation failures. Mergeable into multi-message responses.
    Validation = 2,
    /// Everything else with a stable public meaning (not found, denied).
    Generic = 3,
}

/// Machine-matchable error kinds for the whole vault.
///
/// Domain code emits the leaf kinds (top group). The application layer
/// re-maps them to resource-scoped kinds by wrapping, so delivery rules can
/// match on either level of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    // --- domain leaf kinds -------------------------------------------------
    #[error("incorrect login")]
    IncorrectLogin,
    #[error("incorrect password")]
    IncorrectPassword,
    #[error("invalid card number")]
    InvalidCardNumber,
    #[error("invalid card holder")]
    InvalidCardHolder,
    #[error("invalid card expiry month")]
    InvalidCardExpiryMonth,
    #[error("invalid card expiry year")]
    InvalidCardExpiryYear,
    #[error("invalid card cvv")]
    InvalidCardCvv,
    #[error("empty note text")]
    EmptyNote,
    #[error("empty file payload")]
    EmptyFilePayload,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user not found")]
    UserNotFound,
    #[error("secret owned by another user")]
    OwnershipViolation,

    // --- key management and envelope crypto --------------------------------
    #[error("data encryption key unavailable")]
    KeyUnavailable,
    #[error("envelope sealing failed")]
    CipherFailure,
    #[error("malformed envelope")]
    CipherMalformed,
    #[error("unsupported envelope version")]
    CipherVersion,
    #[error("envelope authentication failed")]
    CipherAuthFailed,

    // --- infrastructure ----------------------------------------------------
    #[error("database failure")]
    Database,
    #[error("serialization failure")]
    Serialization,
    #[error("internal failure")]
    Internal,

    // --- application: auth -------------------------------------------------
    #[error("invalid auth input")]
    AuthApp,
    #[error("wrong login or password")]
    AuthWrongLoginOrPassword,
    #[error("registration conflict")]
    AuthUserAlreadyExists,
    #[error("invalid access token")]
    AuthInvalidAccessToken,
    #[error("auth technical failure")]
    AuthTech,

    // --- application: credentials ------------------------------------------
    #[error("credential has incorrect login")]
    CredentialIncorrectLogin,
    #[error("credential has incorrect password")]
    CredentialIncorrectPassword,
    #[error("credential not found")]
    CredentialNotFound,
    #[error("credential access denied")]
    CredentialAccessDenied,
    #[error("credential input rejected")]
    CredentialApp,
    #[error("credential technical failure")]
    CredentialTech,

    // --- application: bank cards -------------------------------------------
    #[error("bank card number rejected")]
    BankCardInvalidNumber,
    #[error("bank card holder rejected")]
    BankCardInvalidHolder,
    #[error("bank card expiry month rejected")]
    BankCardInvalidExpiryMonth,
    #[error("bank card expiry year rejected")]
    BankCardInvalidExpiryYear,
    #[error("bank card cvv rejected")]
    BankCardInvalidCvv,
    #[error("bank card not found")]
    BankCardNotFound,
    #[error("bank card access denied")]
    BankCardAccessDenied,
    #[error("bank card input rejected")]
    BankCardApp,
    #[error("bank card technical failure")]
    BankCardTech,

    // --- application: notes ------------------------------------------------
    #[error("note text rejected")]
    NoteEmptyText,
    #[error("note not found")]
    NoteNotFound,
    #[error("note access denied")]
    NoteAccessDenied,
    #[error("note input rejected")]
    NoteApp,
    #[error("note technical failure")]
    NoteTech,

    // --- application: files ------------------------------------------------
    #[error("file payload rejected")]
    FileDataEmptyPayload,
    #[error("file not found")]
    FileDataNotFound,
    #[error("file access denied")]
    FileDataAccessDenied,
    #[error("file input rejected")]
    FileDataApp,
    #[error("file technical failure")]
    FileDataTech,

    // --- application: datasync ---------------------------------------------
    #[error("datasync input rejected")]
    DatasyncApp,
    #[error("datasync technical failure")]
    DatasyncTech,

    /// Transparent join node. Created by [`VaultError::join`]; carries no
    /// identity of its own and is skipped by the match predicate.
    #[error("multiple failures")]
    Multiple,
}

/// Domain error with a kind, optional internal detail, and a cause tree.
///
/// The error is cloneable so it can be logged and classified without
/// ownership gymnastics. Causes are stored in order; a node with exactly one
/// cause is a wrap, a [`ErrorKind::Multiple`] node with several causes is a
/// join of siblings.
#[derive(Debug, Clone)]
pub struct VaultError {
    kind: ErrorKind,
    detail: Option<String>,
    causes: Vec<VaultError>,
}

impl VaultError {
    /// Creates a leaf error of the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            detail: None,
            causes: Vec::new(),
        }
    }

    /// Creates a leaf error with internal detail.
    ///
    /// The detail is for operators and logs only; public messages come from
    /// the delivery-layer registry.
    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
            causes: Vec::new(),
        }
    }

    /// Wraps a cause under a new kind, preserving the chain.
    pub fn wrap(kind: ErrorKind, cause: VaultError) -> Self {
        Self {
            kind,
            detail: None,
            causes: vec![cause],
        }
    }

    /// Wraps a cause under a new kind with internal detail.
    pub fn wrap_with(kind: ErrorKind, detail: impl Into<String>, cause: VaultError) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
            causes: vec![cause],
        }
    }

    /// Joins sibling errors into one transparent node.
    ///
    /// A join of a single error is the error itself; joining nothing is a
    /// programming mistake and collapses to an internal failure.
    pub fn join(mut errors: Vec<VaultError>) -> Self {
        match errors.len() {
            0 => Self::with_detail(ErrorKind::Internal, "empty error join"),
            1 => errors.remove(0),
            _ => Self {
                kind: ErrorKind::Multiple,
                detail: None,
                causes: errors,
            },
        }
    }

    /// Absorbs a database driver error.
    pub fn database(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::Database, detail)
    }

    /// Absorbs a serialization error.
    pub fn serialization(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::Serialization, detail)
    }

    /// Absorbs an unexpected failure.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::Internal, detail)
    }

    /// Returns this node's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns this node's internal detail, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the direct causes of this node.
    pub fn causes(&self) -> &[VaultError] {
        &self.causes
    }

    /// Consumes the error and returns its direct causes.
    ///
    /// For a join this yields the siblings; for a wrap the single cause; for
    /// a leaf the error itself. Used by the application layer when re-mapping
    /// validation joins kind by kind.
    pub fn into_siblings(self) -> Vec<VaultError> {
        if self.causes.is_empty() || self.kind != ErrorKind::Multiple {
            vec![self]
        } else {
            self.causes
        }
    }

    /// Reports whether the kind occurs anywhere in the cause tree.
    ///
    /// The walk crosses both wraps and joins, so a deeply nested cause still
    /// matches. Join nodes themselves never match.
    pub fn is(&self, kind: ErrorKind) -> bool {
        if self.kind != ErrorKind::Multiple && self.kind == kind {
            return true;
        }
        self.causes.iter().any(|c| c.is(kind))
    }

    /// Returns every matchable kind in the tree in depth-first pre-order.
    ///
    /// Duplicates are preserved; join nodes are skipped.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        let mut out = Vec::new();
        self.collect_kinds(&mut out);
        out
    }

    fn collect_kinds(&self, out: &mut Vec<ErrorKind>) {
        if self.kind != ErrorKind::Multiple {
            out.push(self.kind);
        }
        for cause in &self.causes {
            cause.collect_kinds(out);
        }
    }
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        match self.causes.len() {
            0 => Ok(()),
            1 => write!(f, ": {}", self.causes[0]),
            _ => {
                write!(f, ": [")?;
                for (i, cause) in self.causes.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", cause)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.first().map(|c| c as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_matches_its_own_kind() {
        let err = VaultError::new(ErrorKind::IncorrectLogin);
        assert!(err.is(ErrorKind::IncorrectLogin));
        assert!(!err.is(ErrorKind::IncorrectPassword));
    }

    #[test]
    fn wrap_matches_both_levels() {
        let inner = VaultError::new(ErrorKind::IncorrectLogin);
        let outer = VaultError::wrap(ErrorKind::CredentialIncorrectLogin, inner);

        assert!(outer.is(ErrorKind::CredentialIncorrectLogin));
        assert!(outer.is(ErrorKind::IncorrectLogin));
        assert_eq!(
            outer.kinds(),
            vec![ErrorKind::CredentialIncorrectLogin, ErrorKind::IncorrectLogin]
        );
    }

    #[test]
    fn deep_wrap_still_matches() {
        let err = VaultError::wrap(
            ErrorKind::CredentialTech,
            VaultError::wrap(ErrorKind::KeyUnavailable, VaultError::database("connection reset")),
        );
        assert!(err.is(ErrorKind::Database));
        assert!(err.is(ErrorKind::KeyUnavailable));
        assert!(err.is(ErrorKind::CredentialTech));
    }

    #[test]
    fn join_is_transparent() {
        let joined = VaultError::join(vec![
            VaultError::new(ErrorKind::IncorrectLogin),
            VaultError::new(ErrorKind::IncorrectPassword),
        ]);

        assert!(joined.is(ErrorKind::IncorrectLogin));
        assert!(joined.is(ErrorKind::IncorrectPassword));
        assert!(!joined.is(ErrorKind::Multiple));
        assert_eq!(
            joined.kinds(),
            vec![ErrorKind::IncorrectLogin, ErrorKind::IncorrectPassword]
        );
    }

    #[test]
    fn join_of_one_collapses() {
        let joined = VaultError::join(vec![VaultError::new(ErrorKind::EmptyNote)]);
        assert_eq!(joined.kind(), ErrorKind::EmptyNote);
    }

    #[test]
    fn siblings_of_a_join_are_recovered() {
        let joined = VaultError::join(vec![
            VaultError::new(ErrorKind::InvalidCardNumber),
            VaultError::new(ErrorKind::InvalidCardCvv),
        ]);
        let siblings = joined.into_siblings();
        assert_eq!(siblings.len(), 2);
        assert_eq!(siblings[0].kind(), ErrorKind::InvalidCardNumber);
    }

    #[test]
    fn display_includes_chain() {
        let err = VaultError::wrap_with(
            ErrorKind::CredentialTech,
            "save failed",
            VaultError::database("disk full"),
        );
        let text = err.to_string();
        assert!(text.contains("credential technical failure"));
        assert!(text.contains("save failed"));
        assert!(text.contains("disk full"));
    }

    #[test]
    fn class_precedence_order() {
        assert!(ErrorClass::Tech < ErrorClass::Auth);
        assert!(ErrorClass::Auth < ErrorClass::Validation);
        assert!(ErrorClass::Validation < ErrorClass::Generic);
    }

    #[test]
    fn source_chain_is_exposed() {
        use std::error::Error as _;
        let err = VaultError::wrap(ErrorKind::AuthTech, VaultError::database("boom"));
        assert!(err.source().is_some());
    }
}
