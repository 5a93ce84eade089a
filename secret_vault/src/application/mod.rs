// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Application layer: orchestration services between the HTTP adapters and
//! the domain. Services validate input into entities, call one repository
//! operation, and re-map domain error kinds to application-visible kinds by
//! wrapping, never replacing.

pub mod services;
