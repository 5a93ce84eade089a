// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secret Vault Server Binary
//!
//! Startup sequence:
//!
//! 1. Resolve and validate configuration (flags + environment). A missing
//!    master secret or token signing key aborts before anything binds.
//! 2. Install the tracing subscriber and replay buffered startup events.
//! 3. Initialize the database and assemble the application state, bounded
//!    by the start timeout.
//! 4. Serve until shutdown is triggered, by the first SIGTERM/SIGINT or by
//!    a transport fault, then drain within the stop timeout. A second
//!    signal abandons the drain.
//!
//! Exits 0 on a clean drain, a `sysexits` code otherwise.

use secret_vault::infrastructure::repositories::schema;
use secret_vault::presentation::web::{build_router, AppState, Server, TlsSettings};
use secret_vault_bootstrap::{
    init_tracing, load_config, run_signal_policy, ExitCode, Shutdown, ShutdownReason, StartupLog,
};

#[tokio::main]
async fn main() {
    std::process::exit(run().await.as_i32());
}

async fn run() -> ExitCode {
    let startup = StartupLog::new();
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            // The subscriber is not up yet; stderr is all we have.
            eprintln!("configuration error: {}", e);
            return ExitCode::from_config_error(&e);
        }
    };
    startup.info(format!(
        "configuration resolved: listening on {}, database {}",
        config.listen_addr(),
        config.database_url()
    ));
    if config.tls().is_none() {
        startup.warn("TLS is disabled; serve plaintext HTTP only behind a terminating proxy");
    }

    init_tracing(config.log_level());
    startup.flush();
    tracing::info!(addr = %config.listen_addr(), tls = config.tls().is_some(), "starting secret vault");

    let startup = async {
        let pool = schema::initialize_database(config.database_url())
            .await
            .map_err(|e| format!("database initialization failed: {}", e))?;
        let lifetime = chrono::Duration::from_std(config.token_lifetime())
            .map_err(|e| format!("invalid token lifetime: {}", e))?;
        AppState::assemble(
            pool,
            config.master_secret().to_vec(),
            config.token_signing_key(),
            lifetime,
        )
        .map_err(|e| format!("state assembly failed: {}", e))
    };
    let state = match tokio::time::timeout(config.start_timeout(), startup).await {
        Ok(Ok(state)) => state,
        Ok(Err(message)) => {
            tracing::error!("{}", message);
            return ExitCode::Unavailable;
        }
        Err(_) => {
            tracing::error!(budget_secs = config.start_timeout().as_secs(), "startup budget exceeded");
            return ExitCode::Unavailable;
        }
    };

    let shutdown = Shutdown::new(config.stop_timeout());
    tokio::spawn(run_signal_policy(shutdown.clone()));

    let tls = config.tls().map(|tls| TlsSettings {
        cert_path: tls.cert_path.clone(),
        key_path: tls.key_path.clone(),
    });
    let server = Server::new(build_router(state), config.listen_addr(), tls, shutdown.grace_period());

    let listener = shutdown.listener();
    match server.run(async move { let _ = listener.triggered().await; }).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            shutdown.trigger(ShutdownReason::Fault);
            tracing::error!(error = %e, "server failed");
            ExitCode::Software
        }
    }
}
