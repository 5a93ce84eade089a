// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secret Vault Bootstrap
//!
//! Process-lifecycle concerns that run before and around the application:
//!
//! - [`config`]: validated, immutable process configuration
//! - [`cli`]: command-line and environment resolution into that config
//! - [`logger`]: tracing initialization plus the pre-subscriber startup
//!   event buffer
//! - [`signals`]: the vault's two-phase signal policy (first signal drains,
//!   a second one abandons the drain)
//! - [`shutdown`]: one-shot, reason-carrying shutdown shared by the signal
//!   policy and the transport's fault path
//! - [`exit_code`]: Unix exit codes following BSD `sysexits.h`
//!
//! The crate is deliberately free of domain and web dependencies so startup
//! failures can be reported even when the application layers cannot be
//! constructed.

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod shutdown;
pub mod signals;

pub use cli::{load_config, Cli};
pub use config::{AppConfig, ConfigError, LogLevel, TlsConfig};
pub use exit_code::ExitCode;
pub use logger::{init_tracing, StartupLog};
pub use shutdown::{Shutdown, ShutdownListener, ShutdownReason};
pub use signals::{run_signal_policy, TerminationSignal};
