//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the exact router and middleware stack production uses, with
//! provider base URLs pointed at test doubles.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use photoforge_api::auth::jwt::{generate_token, JwtConfig};
use photoforge_api::auth::password::hash_password;
use photoforge_api::config::ServerConfig;
use photoforge_api::router::build_app_router;
use photoforge_api::state::AppState;
use photoforge_db::models::user::CreateUser;
use photoforge_db::repositories::UserRepo;
use photoforge_fal::{FalClient, FalConfig};
use photoforge_payments::{RazorpayClient, RazorpayConfig};

/// Signing secret used by the payment test double.
pub const TEST_RAZORPAY_SECRET: &str = "test_key_secret";

/// Public key id used by the payment test double.
pub const TEST_RAZORPAY_KEY_ID: &str = "rzp_test_key";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_days: 7,
        },
    }
}

/// Build the application with both providers pointed at unroutable
/// addresses. Suitable for tests that must not reach a provider at all.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_providers(pool, "http://127.0.0.1:9", "http://127.0.0.1:9")
}

/// Build the application with provider base URLs pointed at test doubles
/// (wiremock servers).
pub fn build_test_app_with_providers(pool: PgPool, fal_url: &str, razorpay_url: &str) -> Router {
    let config = test_config();

    let fal = FalClient::new(FalConfig {
        api_key: "test-fal-key".to_string(),
        queue_url: fal_url.to_string(),
        sync_url: fal_url.to_string(),
        webhook_base_url: "http://localhost:3000".to_string(),
    });
    let razorpay = RazorpayClient::new(RazorpayConfig {
        key_id: TEST_RAZORPAY_KEY_ID.to_string(),
        key_secret: TEST_RAZORPAY_SECRET.to_string(),
        api_url: razorpay_url.to_string(),
    });

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        fal: Arc::new(fal),
        razorpay: Arc::new(razorpay),
    };

    build_app_router(state, &config)
}

/// Create a user directly in the database and return (user id, bearer token).
pub async fn seed_user(pool: &PgPool, email: &str) -> (i64, String) {
    let hash = hash_password("test_password_123!").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash,
            name: "Test User".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let token =
        generate_token(user.id, email, &test_config().jwt).expect("token generation should succeed");
    (user.id, token)
}

/// POST a JSON body without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
