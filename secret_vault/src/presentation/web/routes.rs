// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Router Assembly
//!
//! The complete HTTP surface under `/api`:
//!
//! - open: health, about, swagger, register, login
//! - bearer-guarded: everything under `/api/items`
//!
//! The outer layer stack generates and propagates `X-Request-Id`, traces
//! every request, and compresses responses.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::auth::require_auth;
use super::handlers::{self, openapi::ApiDoc};
use super::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    let items = Router::new()
        .route(
            "/credentials",
            post(handlers::credentials::create).get(handlers::credentials::list),
        )
        .route(
            "/credentials/:id",
            get(handlers::credentials::get).put(handlers::credentials::update),
        )
        .route(
            "/bankcards",
            post(handlers::bank_cards::create).get(handlers::bank_cards::list),
        )
        .route(
            "/bankcards/:id",
            get(handlers::bank_cards::get).put(handlers::bank_cards::update),
        )
        .route("/notes", post(handlers::notes::create).get(handlers::notes::list))
        .route("/notes/:id", get(handlers::notes::get).put(handlers::notes::update))
        .route("/files", post(handlers::files::create).get(handlers::files::list))
        .route("/files/:id", get(handlers::files::get).put(handlers::files::update))
        .route(
            "/datasync",
            get(handlers::datasync::pull).post(handlers::datasync::push),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/about", get(handlers::health::about))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .nest("/items", items);

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/api/swagger").url("/api/swagger/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(middleware_stack)
}
