// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Startup Logging
//!
//! Two startup-phase concerns live here:
//!
//! - [`init_tracing`] installs the process-wide subscriber from the
//!   configured level, with `RUST_LOG` as an ad-hoc override.
//! - [`StartupLog`] solves the chicken-and-egg window before the subscriber
//!   exists: configuration is resolved (and its outcome worth recording)
//!   before the log level that governs the subscriber is known. Events
//!   recorded early are buffered and replayed through tracing at
//!   [`StartupLog::flush`], so decisions like "TLS off" or "fresh database
//!   created" land in the structured log instead of vanishing.
//!
//! Messages recorded here describe configuration shape only; secret values
//! never reach this type (the config's own `Debug` is redacted for the same
//! reason).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Info,
    Warn,
}

/// Buffer for startup events emitted before the subscriber is installed.
///
/// Before [`StartupLog::flush`], events accumulate; after it, they pass
/// straight through to tracing. Flushing replays the buffer in order.
pub struct StartupLog {
    buffered: Mutex<Vec<(Severity, String)>>,
    live: AtomicBool,
}

impl StartupLog {
    pub fn new() -> Self {
        Self {
            buffered: Mutex::new(Vec::new()),
            live: AtomicBool::new(false),
        }
    }

    /// Records a normal startup event.
    pub fn info(&self, message: impl Into<String>) {
        self.emit(Severity::Info, message.into());
    }

    /// Records a startup condition an operator should look at.
    pub fn warn(&self, message: impl Into<String>) {
        self.emit(Severity::Warn, message.into());
    }

    /// Number of events still waiting for the subscriber.
    pub fn pending(&self) -> usize {
        self.buffered.lock().map(|buffer| buffer.len()).unwrap_or(0)
    }

    /// Replays buffered events through tracing and switches to
    /// pass-through. Call once, right after [`init_tracing`].
    pub fn flush(&self) {
        self.live.store(true, Ordering::Release);
        let drained: Vec<_> = match self.buffered.lock() {
            Ok(mut buffer) => buffer.drain(..).collect(),
            Err(_) => return,
        };
        for (severity, message) in drained {
            forward(severity, &message);
        }
    }

    fn emit(&self, severity: Severity, message: String) {
        if self.live.load(Ordering::Acquire) {
            forward(severity, &message);
        } else if let Ok(mut buffer) = self.buffered.lock() {
            buffer.push((severity, message));
        }
    }
}

impl Default for StartupLog {
    fn default() -> Self {
        Self::new()
    }
}

fn forward(severity: Severity, message: &str) {
    match severity {
        Severity::Info => tracing::info!(target: "startup", "{}", message),
        Severity::Warn => tracing::warn!(target: "startup", "{}", message),
    }
}

/// Installs the process-wide tracing subscriber.
///
/// `RUST_LOG` overrides the configured level when set, which keeps ad-hoc
/// debugging possible without touching the vault configuration.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}
