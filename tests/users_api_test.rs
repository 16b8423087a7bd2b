//! Integration Tests: Users API
//!
//! Exercises the account endpoints against a real database.
//!
//! Coverage:
//! - Signup (201 with echoed attributes, 422 field errors)
//! - Self-info and public profile reads
//! - Profile update validation
//! - Account deletion
//! - Search by username / full name substring
//! - Auth token issuance invariants
//!
//! Architecture:
//! - Uses testcontainers for PostgreSQL
//! - Drives the real route tree through actix_web::test

mod common;

use actix_web::test;
use common::{register_user, register_user_full, setup_test_db, test_photo_store};
use serde_json::{json, Value};

macro_rules! init_app {
    ($pool:expr, $store:expr) => {
        test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($store.clone()))
                .wrap(photogram_service::middleware::TokenAuthMiddleware)
                .configure(photogram_service::handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
#[ignore] // Run manually: cargo test --test users_api_test -- --ignored
async fn create_user_returns_201_with_echoed_email() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let user = register_user(&app, "alice@example.com", Some("alice")).await;

    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["username"], "alice");
    assert!(user["auth_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_web::test]
#[ignore]
async fn create_user_without_email_returns_field_errors() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({ "user": { "username": "noemail" } }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    let email_errors = body["errors"]["email"].as_array().expect("email errors");
    assert!(email_errors.contains(&json!("can't be blank")));
}

#[actix_web::test]
#[ignore]
async fn self_returns_token_owner() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let user = register_user(&app, "owner@example.com", Some("owner")).await;
    let token = user["auth_token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/users/self")
        .insert_header(("Authorization", token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "owner@example.com");
}

#[actix_web::test]
#[ignore]
async fn self_without_token_is_unauthorized() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/self")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
#[ignore]
async fn show_user_requires_no_auth() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let user = register_user(&app, "pub@example.com", Some("pubuser")).await;
    let id = user["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", id))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "pub@example.com");
    // The bearer credential never leaks on public profiles
    assert!(body["user"]["auth_token"].is_null());
}

#[actix_web::test]
#[ignore]
async fn update_with_malformed_email_returns_invalid() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let user = register_user(&app, "update@example.com", Some("updater")).await;
    let id = user["id"].as_str().unwrap();
    let token = user["auth_token"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{}", id))
        .insert_header(("Authorization", token))
        .set_json(json!({ "user": { "email": "invalidemail.org" } }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    let email_errors = body["errors"]["email"].as_array().expect("email errors");
    assert!(email_errors.contains(&json!("is invalid")));
}

#[actix_web::test]
#[ignore]
async fn update_changes_email_and_keeps_token() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let user = register_user(&app, "old@example.com", Some("renamer")).await;
    let id = user["id"].as_str().unwrap();
    let token = user["auth_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{}", id))
        .insert_header(("Authorization", token.clone()))
        .set_json(json!({ "user": { "email": "newemail@example.com" } }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "newemail@example.com");

    // The original token still authenticates: it was never regenerated
    let req = test::TestRequest::get()
        .uri("/api/v1/users/self")
        .insert_header(("Authorization", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
#[ignore]
async fn update_other_account_is_forbidden() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let victim = register_user(&app, "victim@example.com", Some("victim")).await;
    let attacker = register_user(&app, "attacker@example.com", Some("attacker")).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{}", victim["id"].as_str().unwrap()))
        .insert_header(("Authorization", attacker["auth_token"].as_str().unwrap()))
        .set_json(json!({ "user": { "email": "stolen@example.com" } }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
#[ignore]
async fn delete_returns_204_with_empty_body() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let user = register_user(&app, "gone@example.com", Some("goner")).await;
    let id = user["id"].as_str().unwrap();
    let token = user["auth_token"].as_str().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", id))
        .insert_header(("Authorization", token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
#[ignore]
async fn search_matches_username_and_full_name() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let searcher = register_user(&app, "searcher@example.com", Some("searcher")).await;
    register_user_full(&app, "u1@example.com", Some("xmichael_scott"), None, false).await;
    register_user_full(&app, "u2@example.com", None, Some("Michael"), false).await;
    register_user_full(&app, "u3@example.com", Some("boris_99"), None, false).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/search?query=michael")
        .insert_header(("Authorization", searcher["auth_token"].as_str().unwrap()))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
#[ignore]
async fn auth_tokens_are_unique_across_users() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let a = register_user(&app, "a@example.com", Some("user_a")).await;
    let b = register_user(&app, "b@example.com", Some("user_b")).await;

    let token_a = a["auth_token"].as_str().unwrap();
    let token_b = b["auth_token"].as_str().unwrap();
    assert_ne!(token_a, token_b);
    assert_eq!(token_a.len(), 24);
}

#[actix_web::test]
#[ignore]
async fn bearer_prefix_is_accepted() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let user = register_user(&app, "bearer@example.com", Some("bearer_fan")).await;
    let token = user["auth_token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/users/self")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
#[ignore]
async fn unknown_token_is_rejected() {
    let pool = setup_test_db().await.expect("test db");
    let store = test_photo_store();
    let app = init_app!(pool, store);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/self")
        .insert_header(("Authorization", "definitely-not-a-real-token"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
