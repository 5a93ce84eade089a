// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Management
//!
//! Standardized Unix exit codes following BSD `sysexits.h` conventions.
//!
//! ## Exit Code Conventions
//!
//! - **0**: Success
//! - **1**: General error
//! - **64-78**: Specific error conditions (BSD sysexits.h)
//!
//! The vault exits 0 on a clean drain, a config code when startup inputs
//! are unusable, and a software code for everything unexpected.

use std::fmt;

use crate::config::ConfigError;

/// Exit codes following Unix conventions (BSD sysexits.h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful termination (0)
    #[default]
    Success = 0,

    /// General error (1)
    Error = 1,

    /// Command line usage error (64)
    UsageError = 64,

    /// Data format error (65)
    /// - Missing or malformed configuration
    DataError = 65,

    /// Service unavailable (69)
    /// - Database unreachable or startup budget exceeded
    Unavailable = 69,

    /// Internal software error (70)
    Software = 70,

    /// I/O error (74)
    IoError = 74,
}

impl ExitCode {
    /// Raw process exit status.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Classifies a configuration failure.
    pub fn from_config_error(error: &ConfigError) -> Self {
        match error {
            ConfigError::InvalidValue { .. } => ExitCode::UsageError,
            _ => ExitCode::DataError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_sysexits() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::UsageError.as_i32(), 64);
        assert_eq!(ExitCode::DataError.as_i32(), 65);
        assert_eq!(ExitCode::Unavailable.as_i32(), 69);
        assert_eq!(ExitCode::Software.as_i32(), 70);
    }

    #[test]
    fn missing_secret_is_a_data_error() {
        assert_eq!(
            ExitCode::from_config_error(&ConfigError::MissingMasterSecret),
            ExitCode::DataError
        );
    }

    #[test]
    fn invalid_value_is_a_usage_error() {
        let err = ConfigError::InvalidValue {
            name: "log_level",
            reason: "unknown".into(),
        };
        assert_eq!(ExitCode::from_config_error(&err), ExitCode::UsageError);
    }
}
