// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Shutdown Coordination
//!
//! One-shot, reason-carrying shutdown for the vault process.
//!
//! ## Semantics
//!
//! A [`Shutdown`] handle is created once at startup with the configured
//! drain window and cloned wherever shutdown can originate (the signal
//! policy, the transport shell's failure path). The first [`Shutdown::trigger`]
//! wins and freezes the [`ShutdownReason`]; later triggers are ignored so
//! an operator signal racing a server fault still produces one coherent
//! story in the logs and one drain, not two.
//!
//! The transport awaits a [`ShutdownListener`] and, once it resolves, stops
//! accepting and gives in-flight requests the grace period before
//! force-closing. In-memory key material needs no teardown of its own: the
//! DEK cache and both process secrets are deliberately process-lifetime
//! state and vanish with the address space.

use std::time::Duration;

use tokio::sync::watch;

/// Why the vault is going down. Frozen by the first trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// An operator asked for it (SIGTERM, SIGINT, Ctrl+C).
    Signal,
    /// The transport failed and the process is bailing out.
    Fault,
}

impl std::fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownReason::Signal => f.write_str("operator signal"),
            ShutdownReason::Fault => f.write_str("transport fault"),
        }
    }
}

/// Cloneable shutdown handle.
///
/// Internally a `watch` channel over `Option<ShutdownReason>`: `None` while
/// the vault is serving, `Some(reason)` forever after the first trigger.
#[derive(Clone)]
pub struct Shutdown {
    state: watch::Sender<Option<ShutdownReason>>,
    grace_period: Duration,
}

impl Shutdown {
    /// Creates the process shutdown handle with the drain window the
    /// transport must honor.
    pub fn new(grace_period: Duration) -> Self {
        let (state, _) = watch::channel(None);
        Self { state, grace_period }
    }

    /// Subscribes a listener. Listeners created after the trigger resolve
    /// immediately.
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            state: self.state.subscribe(),
        }
    }

    /// Requests shutdown for the given reason.
    ///
    /// Only the first call takes effect; it returns whether this call was
    /// the one that initiated shutdown.
    pub fn trigger(&self, reason: ShutdownReason) -> bool {
        let mut initiated = false;
        self.state.send_if_modified(|current| {
            if current.is_none() {
                *current = Some(reason);
                initiated = true;
                true
            } else {
                false
            }
        });

        if initiated {
            tracing::info!(
                %reason,
                drain_secs = self.grace_period.as_secs(),
                "vault shutdown initiated"
            );
        }
        initiated
    }

    /// Drain window for in-flight requests.
    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// The frozen reason, if shutdown has been triggered.
    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.state.borrow()
    }

    /// Whether shutdown has been triggered.
    pub fn is_triggered(&self) -> bool {
        self.reason().is_some()
    }
}

/// Awaitable side of a [`Shutdown`] handle.
pub struct ShutdownListener {
    state: watch::Receiver<Option<ShutdownReason>>,
}

impl ShutdownListener {
    /// Resolves with the reason once shutdown is triggered.
    pub async fn triggered(mut self) -> ShutdownReason {
        loop {
            let current = *self.state.borrow_and_update();
            if let Some(reason) = current {
                return reason;
            }
            if self.state.changed().await.is_err() {
                // Every Shutdown handle is gone without a trigger; the
                // process is unwinding anyway, treat it as a fault.
                tracing::warn!("shutdown channel closed without a reason");
                return ShutdownReason::Fault;
            }
        }
    }
}
