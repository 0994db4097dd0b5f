#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Local, NaiveDate};
use classroom::config::{CorsConfig, JwtConfig, ProvisioningConfig, RateLimitConfig};
use classroom::router::init_router;
use classroom::state::AppState;
use classroom_auth::create_access_token;
use classroom_core::hash_password;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestAccount {
    pub user_id: Uuid,
    pub username: String,
    pub student_id: Option<Uuid>,
    pub token: String,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Limits high enough that only the dedicated rate limit tests hit them.
pub fn relaxed_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        auth_per_second: 1,
        auth_burst_size: 1000,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_rate_limit(pool, relaxed_rate_limit_config())
}

pub fn setup_test_app_with_rate_limit(pool: PgPool, rate_limit_config: RateLimitConfig) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: jwt_config(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config,
        provisioning_config: ProvisioningConfig::default(),
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn days_from_today(days: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(days)
}

fn token_for(user_id: Uuid, username: &str, is_staff: bool) -> String {
    create_access_token(user_id, username, is_staff, &jwt_config()).unwrap()
}

async fn insert_user(pool: &PgPool, username: &str, first_name: &str, is_staff: bool) -> Uuid {
    let hashed = hash_password(TEST_PASSWORD).unwrap();
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (username, email, first_name, password, is_staff)
        VALUES ($1, $1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(first_name)
    .bind(hashed)
    .bind(is_staff)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_admin(pool: &PgPool) -> TestAccount {
    let username = generate_unique_email();
    let user_id = insert_user(pool, &username, "Admin", true).await;
    TestAccount {
        token: token_for(user_id, &username, true),
        user_id,
        username,
        student_id: None,
    }
}

/// A non-staff account with no linked student.
pub async fn create_test_user_without_student(pool: &PgPool) -> TestAccount {
    let username = generate_unique_email();
    let user_id = insert_user(pool, &username, "Orphan", false).await;
    TestAccount {
        token: token_for(user_id, &username, false),
        user_id,
        username,
        student_id: None,
    }
}

pub async fn create_test_student(pool: &PgPool, name: &str) -> TestAccount {
    let username = generate_unique_email();
    let user_id = insert_user(pool, &username, name, false).await;
    let student_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO students (user_id, name, email) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .bind(&username)
    .fetch_one(pool)
    .await
    .unwrap();

    TestAccount {
        token: token_for(user_id, &username, false),
        user_id,
        username,
        student_id: Some(student_id),
    }
}

pub async fn create_test_program(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO programs (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_section(
    pool: &PgPool,
    program_id: Uuid,
    name: &str,
    start_date: NaiveDate,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO sections (program_id, name, start_date) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(program_id)
    .bind(name)
    .bind(start_date)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn enroll(pool: &PgPool, student_id: Uuid, section_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO enrollments (student_id, section_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(student_id)
    .bind(section_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_resource(
    pool: &PgPool,
    section_id: Uuid,
    name: &str,
    pre_access: bool,
    draft: bool,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO resources (section_id, kind, name, pre_access, draft)
        VALUES ($1, 'PDF', $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(section_id)
    .bind(name)
    .bind(pre_access)
    .bind(draft)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Sends one request through the router. The client address header keeps the
/// token route's rate limiter keyed.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "10.0.0.1");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

pub fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}
