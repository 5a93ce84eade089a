// /////////////////////////////////////////////////////////////////////////////
// Secret Vault
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end scenarios against the in-process application: the full router
//! with bearer auth, the middleware-assembled repositories, and in-memory
//! SQLite underneath.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::Row;

use common::{messages, spawn_app};

// --- registration, login, and the happy path --------------------------------

#[tokio::test]
async fn register_login_create_and_read_back_a_credential() {
    let app = spawn_app().await;

    let _t1 = app.register("alice", "p@ss").await;
    let (status, body) = app.login("alice", "p@ss").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/items/credentials",
            &token,
            json!({"login": "u@e", "password": "s", "description": "d"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app.get(&format!("/api/items/credentials/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": id, "login": "u@e", "password": "s", "description": "d"})
    );
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = spawn_app().await;
    app.register("alice", "p1").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({"login": "alice", "password": "p2"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(messages(&body), vec!["User already exists"]);
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let app = spawn_app().await;
    app.register("alice", "right").await;

    let (unknown_status, unknown_body) = app.login("nobody", "whatever").await;
    let (wrong_status, wrong_body) = app.login("alice", "wrong").await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(messages(&wrong_body), vec!["Wrong login or password"]);
}

// --- token handling ----------------------------------------------------------

#[tokio::test]
async fn garbage_bearer_token_is_rejected_with_the_canonical_message() {
    let app = spawn_app().await;
    let (status, body) = app
        .request(Method::GET, "/api/items/credentials", Some("Bearer garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        messages(&body),
        vec!["Your access token is invalid or has expired. Please log in"]
    );
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let app = spawn_app().await;
    let (status, _) = app.request(Method::GET, "/api/items/notes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bare_token_without_bearer_prefix_is_accepted() {
    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (status, _) = app.request(Method::GET, "/api/items/notes", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// --- ownership ---------------------------------------------------------------

#[tokio::test]
async fn cross_user_access_is_denied_deterministically() {
    let app = spawn_app().await;
    let alice = app.register("alice", "p").await;
    let bob = app.register("bob", "p").await;

    let (_, body) = app
        .post(
            "/api/items/credentials",
            &alice,
            json!({"login": "u@e", "password": "s", "description": "d"}),
        )
        .await;
    let id = body["id"].as_str().unwrap().to_string();

    for _ in 0..3 {
        let (status, body) = app.get(&format!("/api/items/credentials/{}", id), &bob).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(messages(&body), vec!["Access to this credential is denied"]);
    }
}

#[tokio::test]
async fn cross_user_update_is_denied_and_does_not_write() {
    let app = spawn_app().await;
    let alice = app.register("alice", "p").await;
    let bob = app.register("bob", "p").await;

    let (_, body) = app
        .post(
            "/api/items/notes",
            &alice,
            json!({"note": "original", "description": ""}),
        )
        .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .put(
            &format!("/api/items/notes/{}", id),
            &bob,
            json!({"note": "hijacked", "description": ""}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get(&format!("/api/items/notes/{}", id), &alice).await;
    assert_eq!(body["note"], "original");
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (status, body) = app
        .get("/api/items/credentials/00000000-0000-4000-8000-000000000000", &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(messages(&body), vec!["Credential not found"]);

    let (status, _) = app.get("/api/items/credentials/not-a-uuid", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- validation --------------------------------------------------------------

#[tokio::test]
async fn credential_validation_failures_merge_into_one_response() {
    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (status, body) = app
        .post(
            "/api/items/credentials",
            &token,
            json!({"login": "", "password": "", "description": "d"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let got = messages(&body);
    assert_eq!(got, vec!["Invalid login", "Invalid password"]);
}

#[tokio::test]
async fn bank_card_validation_failures_merge_in_registry_order() {
    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (status, body) = app
        .post(
            "/api/items/bankcards",
            &token,
            json!({
                "number": "1234567890123456",
                "holder": "",
                "expiry_month": 13,
                "expiry_year": 2031,
                "cvv": "12",
                "description": ""
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec![
            "Invalid card number",
            "Invalid card holder",
            "Invalid card expiry month",
            "Invalid card CVV"
        ]
    );
}

// --- at-rest encryption ------------------------------------------------------

#[tokio::test]
async fn stored_rows_contain_no_plaintext() {
    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (_, body) = app
        .post(
            "/api/items/credentials",
            &token,
            json!({"login": "u@e", "password": "s3cr3t-value", "description": "d3scription"}),
        )
        .await;
    let id = body["id"].as_str().unwrap().to_string();

    let row = sqlx::query("SELECT login, password, description FROM credentials WHERE id = ?")
        .bind(&id)
        .fetch_one(&app.pool)
        .await
        .unwrap();

    for column in ["login", "password", "description"] {
        let stored: Vec<u8> = row.get(column);
        for plaintext in [b"u@e".as_slice(), b"s3cr3t-value", b"d3scription"] {
            assert!(
                !stored.windows(plaintext.len()).any(|w| w == plaintext),
                "column {} leaks plaintext",
                column
            );
        }
    }
}

#[tokio::test]
async fn same_plaintext_for_two_users_stores_different_ciphertext() {
    let app = spawn_app().await;
    let alice = app.register("alice", "p").await;
    let bob = app.register("bob", "p").await;

    for token in [&alice, &bob] {
        let (status, _) = app
            .post(
                "/api/items/notes",
                token,
                json!({"note": "identical text", "description": ""}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let rows = sqlx::query("SELECT note FROM notes").fetch_all(&app.pool).await.unwrap();
    assert_eq!(rows.len(), 2);
    let first: Vec<u8> = rows[0].get("note");
    let second: Vec<u8> = rows[1].get("note");
    assert_ne!(first, second);
}

// --- listing -----------------------------------------------------------------

#[tokio::test]
async fn empty_list_answers_204_with_no_body() {
    let app = spawn_app().await;
    let token = app.register("fresh", "p").await;

    let (status, body) = app.get("/api/items/notes", &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}

#[tokio::test]
async fn list_returns_only_the_callers_records() {
    let app = spawn_app().await;
    let alice = app.register("alice", "p").await;
    let bob = app.register("bob", "p").await;

    app.post("/api/items/notes", &alice, json!({"note": "a1", "description": ""})).await;
    app.post("/api/items/notes", &alice, json!({"note": "a2", "description": ""})).await;
    app.post("/api/items/notes", &bob, json!({"note": "b1", "description": ""})).await;

    let (status, body) = app.get("/api/items/notes", &alice).await;
    assert_eq!(status, StatusCode::OK);
    let notes: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["note"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(notes.len(), 2);
    assert!(notes.contains(&"a1".to_string()));
    assert!(!notes.contains(&"b1".to_string()));
}

// --- update ------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_fields_and_keeps_the_id() {
    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (_, body) = app
        .post(
            "/api/items/credentials",
            &token,
            json!({"login": "old", "password": "old", "description": ""}),
        )
        .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(
            &format!("/api/items/credentials/{}", id),
            &token,
            json!({"login": "new", "password": "new", "description": "updated"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], id.as_str());

    let (_, body) = app.get(&format!("/api/items/credentials/{}", id), &token).await;
    assert_eq!(body["login"], "new");
    assert_eq!(body["description"], "updated");
}

// --- files -------------------------------------------------------------------

#[tokio::test]
async fn file_payload_round_trips_through_base64() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    let app = spawn_app().await;
    let token = app.register("alice", "p").await;
    let payload_bytes: Vec<u8> = vec![0, 1, 2, 3, 250, 251, 252];

    let (status, body) = app
        .post(
            "/api/items/files",
            &token,
            json!({
                "payload": BASE64.encode(&payload_bytes),
                "storage_key": "backup.bin",
                "description": "nightly"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app.get(&format!("/api/items/files/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        BASE64.decode(body["payload"].as_str().unwrap()).unwrap(),
        payload_bytes
    );
    assert_eq!(body["storage_key"], "backup.bin");
}

#[tokio::test]
async fn invalid_base64_payload_is_a_client_error() {
    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (status, _) = app
        .post(
            "/api/items/files",
            &token,
            json!({"payload": "!!! not base64 !!!", "storage_key": "k", "description": ""}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- datasync ----------------------------------------------------------------

#[tokio::test]
async fn datasync_push_then_pull_round_trips_every_variant() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    let app = spawn_app().await;
    let token = app.register("alice", "p").await;

    let (status, body) = app
        .post(
            "/api/items/datasync",
            &token,
            json!({
                "credentials": [{"login": "u@e", "password": "s", "description": "d"}],
                "bankcards": [{
                    "number": "4539578763621486",
                    "holder": "ALICE EXAMPLE",
                    "expiry_month": 12,
                    "expiry_year": 2031,
                    "cvv": "123",
                    "description": ""
                }],
                "notes": [{"note": "n", "description": ""}],
                "files": [{"payload": BASE64.encode(b"blob"), "storage_key": "k", "description": ""}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["stored"], 4);

    let (status, body) = app.get("/api/items/datasync", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credentials"].as_array().unwrap().len(), 1);
    assert_eq!(body["bankcards"].as_array().unwrap().len(), 1);
    assert_eq!(body["notes"].as_array().unwrap().len(), 1);
    assert_eq!(body["files"].as_array().unwrap().len(), 1);
    assert_eq!(body["credentials"][0]["login"], "u@e");
    assert_eq!(body["bankcards"][0]["expiry_month"], 12);
}

#[tokio::test]
async fn datasync_pull_of_an_empty_vault_is_204() {
    let app = spawn_app().await;
    let token = app.register("fresh", "p").await;

    let (status, _) = app.get("/api/items/datasync", &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// --- open surface ------------------------------------------------------------

#[tokio::test]
async fn health_and_about_are_open() {
    let app = spawn_app().await;

    let (status, body) = app.request(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.request(Method::GET, "/api/about", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "secret-vault");
}

#[tokio::test]
async fn register_validation_failures_merge() {
    let app = spawn_app().await;
    let (status, body) = app
        .request(
            Method::POST,
            "/api/register",
            None,
            Some(json!({"login": "", "password": ""})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["Invalid login", "Invalid password"]);
}
