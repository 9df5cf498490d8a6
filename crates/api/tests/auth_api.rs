//! HTTP-level integration tests for signup and signin.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, seed_user};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "new@test.com",
        "password": "hunter22hunter22",
        "name": "New User",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(!json["token"].as_str().unwrap().is_empty());
    assert_eq!(json["user"]["email"], "new@test.com");
    assert!(json["user"]["password_hash"].is_null(), "hash must not leak");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email_conflicts(pool: PgPool) {
    seed_user(&pool, "taken@test.com").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "taken@test.com",
        "password": "hunter22hunter22",
        "name": "Imposter",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_rejects_invalid_input(pool: PgPool) {
    let app = common::build_test_app(pool);

    for body in [
        serde_json::json!({ "email": "not-an-email", "password": "hunter22hunter22", "name": "A" }),
        serde_json::json!({ "email": "short@test.com", "password": "short", "name": "A" }),
        serde_json::json!({ "email": "noname@test.com", "password": "hunter22hunter22", "name": "" }),
    ] {
        let response = post_json(app.clone(), "/api/v1/auth/signup", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signin_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let signup = serde_json::json!({
        "email": "roundtrip@test.com",
        "password": "hunter22hunter22",
        "name": "Round Trip",
    });
    let response = post_json(app.clone(), "/api/v1/auth/signup", signup).await;
    assert_eq!(response.status(), StatusCode::OK);

    let signin = serde_json::json!({
        "email": "roundtrip@test.com",
        "password": "hunter22hunter22",
    });
    let response = post_json(app.clone(), "/api/v1/auth/signin", signin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["token"].as_str().unwrap();

    // The issued token opens protected routes.
    let response = get_auth(app, "/api/v1/payment/credits", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signin_wrong_password_unauthorized(pool: PgPool) {
    seed_user(&pool, "locked@test.com").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "locked@test.com",
        "password": "wrong_password_1",
    });
    let response = post_json(app, "/api/v1/auth/signin", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/payment/credits").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/payment/credits", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
