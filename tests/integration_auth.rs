mod common;

use axum::http::{Method, StatusCode};
use common::{
    TEST_PASSWORD, create_test_admin, create_test_student, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_admin(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/token",
        None,
        Some(json!({ "username": admin.username, "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["is_admin"], true);
    assert!(body.get("refresh").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_is_usable_for_student(pool: PgPool) {
    let student = create_test_student(&pool, "Ana").await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/token",
        None,
        Some(json!({ "username": student.username, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);

    let token = body["access"].as_str().unwrap();
    let (status, body) = send(&app, Method::GET, "/api/students", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_wrong_password(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/token",
        None,
        Some(json!({ "username": admin.username, "password": "wrongpass" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_unknown_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/token",
        None,
        Some(json!({ "username": "nobody@test.com", "password": "whatever" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_missing_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/token",
        None,
        Some(json!({ "username": "ana@test.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["password"][0], "This field is required.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_is_admin_anonymous(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(&app, Method::GET, "/api/auth/is-admin", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_is_admin_reflects_staff_flag(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let student = create_test_student(&pool, "Ana").await;
    let app = setup_test_app(pool.clone());

    let (status, body) =
        send(&app, Method::GET, "/api/auth/is-admin", Some(&admin.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], true);

    let (status, body) =
        send(&app, Method::GET, "/api/auth/is-admin", Some(&student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_token_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) =
        send(&app, Method::GET, "/api/auth/is-admin", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/programs", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_routes_require_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    for uri in [
        "/api/students",
        "/api/programs",
        "/api/sections",
        "/api/enrollments",
        "/api/resources",
    ] {
        let (status, _) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_of_deleted_account_rejected(pool: PgPool) {
    let student = create_test_student(&pool, "Ana").await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(student.user_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool.clone());
    let (status, body) =
        send(&app, Method::GET, "/api/students", Some(&student.token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Account no longer exists");
}
