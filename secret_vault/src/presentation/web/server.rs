// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Transport Shell
//!
//! Binds the router to a TCP listener, optionally TLS-terminated, and owns
//! graceful shutdown: when the shutdown future resolves, the listener stops
//! accepting, in-flight requests get the configured drain window, and
//! whatever is still running afterwards is force-closed.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tracing::info;

use secret_vault_domain::VaultError;

/// Certificate and key locations for the TLS listener.
#[derive(Debug, Clone)]
pub struct TlsSettings {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// The HTTP(S) server.
pub struct Server {
    app: Router,
    addr: SocketAddr,
    tls: Option<TlsSettings>,
    drain_timeout: Duration,
}

impl Server {
    pub fn new(app: Router, addr: SocketAddr, tls: Option<TlsSettings>, drain_timeout: Duration) -> Self {
        Self {
            app,
            addr,
            tls,
            drain_timeout,
        }
    }

    /// Serves until the shutdown future resolves, then drains.
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<(), VaultError> {
        let handle = Handle::new();
        {
            let handle = handle.clone();
            let drain = self.drain_timeout;
            tokio::spawn(async move {
                shutdown.await;
                info!(drain_secs = drain.as_secs(), "shutdown requested, draining connections");
                handle.graceful_shutdown(Some(drain));
            });
        }

        info!(addr = %self.addr, tls = self.tls.is_some(), "starting server");
        let service = self.app.into_make_service();

        let served = match &self.tls {
            Some(tls) => {
                let config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
                    .await
                    .map_err(|e| VaultError::internal(format!("loading TLS certificate: {}", e)))?;
                axum_server::bind_rustls(self.addr, config).handle(handle).serve(service).await
            }
            None => axum_server::bind(self.addr).handle(handle).serve(service).await,
        };

        served.map_err(|e| VaultError::internal(format!("server terminated abnormally: {}", e)))?;
        info!("server stopped");
        Ok(())
    }
}
