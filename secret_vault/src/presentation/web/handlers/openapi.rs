// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! OpenAPI document for the vault API.

use utoipa::OpenApi;

use crate::presentation::web::dto;
use crate::presentation::web::error::ErrorBody;

/// OpenAPI specification served under `/api/swagger`.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::web::handlers::health::health,
        crate::presentation::web::handlers::health::about,
    ),
    components(
        schemas(
            dto::RegisterRequest,
            dto::LoginRequest,
            dto::TokenResponse,
            dto::PushResponse,
            dto::CredentialPushRequest,
            dto::CredentialPayload,
            dto::BankCardPushRequest,
            dto::BankCardPayload,
            dto::NotePushRequest,
            dto::NotePayload,
            dto::FilePushRequest,
            dto::FilePayload,
            dto::DatasyncPushRequest,
            dto::DatasyncPushResponse,
            dto::DatasyncPullResponse,
            dto::HealthResponse,
            dto::AboutResponse,
            ErrorBody,
        )
    ),
    info(
        title = "Secret Vault API",
        version = "1.0.0",
        description = "Multi-tenant encrypted secrets vault. All /api/items routes require a bearer token.",
        license(name = "BSD-3-Clause")
    )
)]
pub struct ApiDoc;
