// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! Flags with environment fallbacks for everything non-secret. The master
//! secret and token signing key are read from the environment only, so they
//! never appear in a process listing or shell history.
//!
//! There are no subcommands: the binary does exactly one thing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{AppConfig, ConfigError, LogLevel};

/// Environment variable carrying the key-derivation master secret.
pub const MASTER_KEY_ENV: &str = "VAULT_MASTER_KEY";
/// Environment variable carrying the token signing key.
pub const TOKEN_KEY_ENV: &str = "VAULT_TOKEN_KEY";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "secret_vault", version, about = "Multi-tenant encrypted secrets vault")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "VAULT_LISTEN_ADDR", default_value = "127.0.0.1:8443")]
    pub listen: SocketAddr,

    /// Serve TLS (requires --tls-cert and --tls-key)
    #[arg(long, env = "VAULT_TLS_ENABLED")]
    pub tls: bool,

    /// Path to the PEM certificate chain
    #[arg(long, env = "VAULT_TLS_CERT")]
    pub tls_cert: Option<PathBuf>,

    /// Path to the PEM private key
    #[arg(long, env = "VAULT_TLS_KEY")]
    pub tls_key: Option<PathBuf>,

    /// Database connection URL
    #[arg(long, env = "VAULT_DATABASE_URL", default_value = "sqlite://secret_vault.db")]
    pub database_url: String,

    /// Bearer token lifetime in hours
    #[arg(long, env = "VAULT_TOKEN_TTL_HOURS", default_value_t = 24)]
    pub token_ttl_hours: u64,

    /// Startup budget in seconds (database creation and migration)
    #[arg(long, env = "VAULT_START_TIMEOUT_SECS", default_value_t = 30)]
    pub start_timeout_secs: u64,

    /// Drain window in seconds for in-flight requests at shutdown
    #[arg(long, env = "VAULT_STOP_TIMEOUT_SECS", default_value_t = 5)]
    pub stop_timeout_secs: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "VAULT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Parses arguments, resolves secrets from the environment, and validates
/// everything into an immutable [`AppConfig`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    build_config(Cli::parse())
}

/// Separated from [`load_config`] so tests can inject arguments.
pub fn build_config(cli: Cli) -> Result<AppConfig, ConfigError> {
    let log_level: LogLevel = cli.log_level.parse()?;

    AppConfig::builder()
        .listen_addr(cli.listen)
        .tls_enabled(cli.tls)
        .tls_cert_path(cli.tls_cert)
        .tls_key_path(cli.tls_key)
        .database_url(cli.database_url)
        .master_secret(secret_from_env(MASTER_KEY_ENV))
        .token_signing_key(secret_from_env(TOKEN_KEY_ENV))
        .token_lifetime(Duration::from_secs(cli.token_ttl_hours * 3600))
        .start_timeout(Duration::from_secs(cli.start_timeout_secs))
        .stop_timeout(Duration::from_secs(cli.stop_timeout_secs))
        .log_level(log_level)
        .build()
}

fn secret_from_env(name: &str) -> Option<Vec<u8>> {
    std::env::var(name).ok().filter(|v| !v.is_empty()).map(String::into_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Cli {
        let mut argv = vec!["secret_vault"];
        argv.extend_from_slice(extra);
        Cli::parse_from(argv)
    }

    #[test]
    fn defaults_parse() {
        let cli = args(&[]);
        assert_eq!(cli.token_ttl_hours, 24);
        assert_eq!(cli.stop_timeout_secs, 5);
        assert!(!cli.tls);
    }

    #[test]
    fn bad_log_level_is_a_config_error() {
        std::env::set_var(MASTER_KEY_ENV, "m");
        std::env::set_var(TOKEN_KEY_ENV, "t");
        let err = build_config(args(&["--log-level", "loud"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "log_level", .. }));
        std::env::remove_var(MASTER_KEY_ENV);
        std::env::remove_var(TOKEN_KEY_ENV);
    }
}
