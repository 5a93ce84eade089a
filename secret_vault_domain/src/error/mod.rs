// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain error module.
//!
//! Re-exports the vault error type, its machine-matchable kinds, and the
//! four-way classification used by the delivery layer.

mod vault_error;

pub use vault_error::{ErrorClass, ErrorKind, VaultError};
