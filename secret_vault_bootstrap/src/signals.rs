// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Signal Policy
//!
//! The vault's two-phase reaction to termination signals:
//!
//! 1. The **first** SIGTERM/SIGINT (Ctrl+C on Windows) triggers a graceful
//!    shutdown: the transport stops accepting and in-flight requests get
//!    the configured drain window.
//! 2. A **second** signal during the drain means the operator is done
//!    waiting; the process exits immediately. Nothing is lost that a kill
//!    would not also lose: saves are single statements and the key cache is
//!    process-lifetime state by design.
//!
//! Failure to install handlers is logged and tolerated; the vault then
//! drains only via its own fault path, and an operator still has `kill -9`.

use crate::shutdown::{Shutdown, ShutdownReason};

/// Exit status for an abandoned drain (128 + SIGINT).
pub const FORCED_EXIT_CODE: i32 = 130;

/// Which termination signal arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// SIGTERM, the polite request from a supervisor.
    Terminate,
    /// SIGINT / Ctrl+C from an interactive operator.
    Interrupt,
}

impl std::fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationSignal::Terminate => f.write_str("SIGTERM"),
            TerminationSignal::Interrupt => f.write_str("SIGINT"),
        }
    }
}

/// Runs the signal policy until the process exits.
///
/// Intended to be spawned once after startup with a clone of the process
/// [`Shutdown`] handle.
#[cfg(unix)]
pub async fn run_signal_policy(shutdown: Shutdown) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "cannot install SIGTERM handler; signal-driven shutdown disabled");
            return;
        }
    };
    let mut interrupt = match signal(SignalKind::interrupt()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "cannot install SIGINT handler; signal-driven shutdown disabled");
            return;
        }
    };

    let first = tokio::select! {
        _ = terminate.recv() => TerminationSignal::Terminate,
        _ = interrupt.recv() => TerminationSignal::Interrupt,
    };
    tracing::info!(signal = %first, "termination signal received");
    shutdown.trigger(ShutdownReason::Signal);

    tokio::select! {
        _ = terminate.recv() => {}
        _ = interrupt.recv() => {}
    };
    tracing::warn!("second termination signal, abandoning the drain");
    std::process::exit(FORCED_EXIT_CODE);
}

/// Runs the signal policy until the process exits.
///
/// Windows only has Ctrl+C; the two-phase behavior is the same.
#[cfg(windows)]
pub async fn run_signal_policy(shutdown: Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot wait for Ctrl+C; signal-driven shutdown disabled");
        return;
    }
    tracing::info!(signal = %TerminationSignal::Interrupt, "termination signal received");
    shutdown.trigger(ShutdownReason::Signal);

    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("second termination signal, abandoning the drain");
        std::process::exit(FORCED_EXIT_CODE);
    }
}
