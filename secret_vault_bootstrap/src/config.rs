// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Configuration
//!
//! Bootstrap-phase configuration structure.
//!
//! ## Design Philosophy
//!
//! `AppConfig` holds **validated** configuration after:
//! 1. Command-line argument parsing
//! 2. Environment variable resolution
//! 3. Validation (secrets present, TLS material consistent)
//! 4. Default value application
//!
//! ## Immutability
//!
//! All configuration is **immutable** after creation. This ensures:
//! - Thread safety (no synchronization needed)
//! - Predictable behavior
//! - Safe sharing across async tasks
//!
//! ## Secrets
//!
//! The master secret and the token signing key are accepted from the
//! environment only, never from flags. They are held as byte vectors that
//! zeroize on drop, and the `Debug` representation redacts them.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use zeroize::Zeroizing;

/// Configuration errors surfaced during startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("master secret is missing: set VAULT_MASTER_KEY")]
    MissingMasterSecret,

    #[error("token signing key is missing: set VAULT_TOKEN_KEY")]
    MissingTokenKey,

    #[error("TLS is enabled but {0} is not set")]
    IncompleteTls(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors (default)
    #[default]
    Info,
    /// All messages including debug
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to tracing Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigError::InvalidValue {
                name: "log_level",
                reason: format!("unknown level '{}'", other),
            }),
        }
    }
}

/// TLS listener material.
#[derive(Debug, Clone)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Application configuration.
///
/// Immutable configuration structure holding all bootstrap-phase settings.
#[derive(Clone)]
pub struct AppConfig {
    listen_addr: SocketAddr,
    tls: Option<TlsConfig>,
    database_url: String,
    master_secret: Zeroizing<Vec<u8>>,
    token_signing_key: Zeroizing<Vec<u8>>,
    token_lifetime: Duration,
    start_timeout: Duration,
    stop_timeout: Duration,
    log_level: LogLevel,
}

impl AppConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    /// TLS material, when the TLS listener is enabled.
    pub fn tls(&self) -> Option<&TlsConfig> {
        self.tls.as_ref()
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Input to per-user key derivation. Process-global, read-only.
    pub fn master_secret(&self) -> &[u8] {
        &self.master_secret
    }

    /// HMAC key for bearer tokens. Process-global, read-only.
    pub fn token_signing_key(&self) -> &[u8] {
        &self.token_signing_key
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Budget for database initialization and state assembly.
    pub fn start_timeout(&self) -> Duration {
        self.start_timeout
    }

    /// Drain window for in-flight requests at shutdown.
    pub fn stop_timeout(&self) -> Duration {
        self.stop_timeout
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("listen_addr", &self.listen_addr)
            .field("tls", &self.tls)
            .field("database_url", &self.database_url)
            .field("master_secret", &"<redacted>")
            .field("token_signing_key", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .field("start_timeout", &self.start_timeout)
            .field("stop_timeout", &self.stop_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Builder for AppConfig.
#[derive(Default)]
pub struct AppConfigBuilder {
    listen_addr: Option<SocketAddr>,
    tls_enabled: bool,
    tls_cert_path: Option<PathBuf>,
    tls_key_path: Option<PathBuf>,
    database_url: Option<String>,
    master_secret: Option<Vec<u8>>,
    token_signing_key: Option<Vec<u8>>,
    token_lifetime: Option<Duration>,
    start_timeout: Option<Duration>,
    stop_timeout: Option<Duration>,
    log_level: Option<LogLevel>,
}

impl AppConfigBuilder {
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = Some(addr);
        self
    }

    pub fn tls_enabled(mut self, enabled: bool) -> Self {
        self.tls_enabled = enabled;
        self
    }

    pub fn tls_cert_path(mut self, path: Option<PathBuf>) -> Self {
        self.tls_cert_path = path;
        self
    }

    pub fn tls_key_path(mut self, path: Option<PathBuf>) -> Self {
        self.tls_key_path = path;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn master_secret(mut self, secret: Option<Vec<u8>>) -> Self {
        self.master_secret = secret;
        self
    }

    pub fn token_signing_key(mut self, key: Option<Vec<u8>>) -> Self {
        self.token_signing_key = key;
        self
    }

    pub fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    pub fn start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout = Some(timeout);
        self
    }

    pub fn stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = Some(timeout);
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// A missing master secret or token signing key is fatal; the process
    /// must not come up able to mint tokens it cannot verify tomorrow or
    /// derive keys it cannot re-derive.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let master_secret = match self.master_secret {
            Some(secret) if !secret.is_empty() => secret,
            _ => return Err(ConfigError::MissingMasterSecret),
        };
        let token_signing_key = match self.token_signing_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ConfigError::MissingTokenKey),
        };

        let tls = if self.tls_enabled {
            let cert_path = self.tls_cert_path.ok_or(ConfigError::IncompleteTls("VAULT_TLS_CERT"))?;
            let key_path = self.tls_key_path.ok_or(ConfigError::IncompleteTls("VAULT_TLS_KEY"))?;
            Some(TlsConfig { cert_path, key_path })
        } else {
            None
        };

        Ok(AppConfig {
            listen_addr: self.listen_addr.unwrap_or_else(|| "127.0.0.1:8443".parse().expect("valid default address")),
            tls,
            database_url: self.database_url.unwrap_or_else(|| "sqlite://secret_vault.db".to_string()),
            master_secret: Zeroizing::new(master_secret),
            token_signing_key: Zeroizing::new(token_signing_key),
            token_lifetime: self.token_lifetime.unwrap_or(Duration::from_secs(24 * 3600)),
            start_timeout: self.start_timeout.unwrap_or(Duration::from_secs(30)),
            stop_timeout: self.stop_timeout.unwrap_or(Duration::from_secs(5)),
            log_level: self.log_level.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AppConfigBuilder {
        AppConfig::builder()
            .master_secret(Some(b"master".to_vec()))
            .token_signing_key(Some(b"token".to_vec()))
    }

    #[test]
    fn minimal_config_builds_with_defaults() {
        let config = minimal().build().unwrap();
        assert_eq!(config.log_level(), LogLevel::Info);
        assert!(config.tls().is_none());
        assert_eq!(config.stop_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_master_secret_is_fatal() {
        let err = AppConfig::builder()
            .token_signing_key(Some(b"token".to_vec()))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingMasterSecret));
    }

    #[test]
    fn empty_token_key_is_fatal() {
        let err = minimal().token_signing_key(Some(Vec::new())).build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingTokenKey));
    }

    #[test]
    fn tls_requires_both_paths() {
        let err = minimal()
            .tls_enabled(true)
            .tls_cert_path(Some(PathBuf::from("cert.pem")))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteTls("VAULT_TLS_KEY")));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = minimal().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("master"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
