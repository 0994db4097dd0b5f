mod common;

use axum::http::{Method, StatusCode};
use classroom::config::RateLimitConfig;
use common::{send, setup_test_app_with_rate_limit};
use serde_json::json;
use sqlx::PgPool;

fn strict_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        auth_per_second: 60,
        auth_burst_size: 1,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_rate_limit_exceeded(pool: PgPool) {
    let app = setup_test_app_with_rate_limit(pool.clone(), strict_rate_limit_config());
    let credentials = json!({ "username": "ana@test.com", "password": "wrongpass" });

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/token",
        None,
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/auth/token", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rate_limit_only_applies_to_token_route(pool: PgPool) {
    let app = setup_test_app_with_rate_limit(pool.clone(), strict_rate_limit_config());

    for _ in 0..3 {
        let (status, _) = send(&app, Method::GET, "/api/auth/is-admin", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
