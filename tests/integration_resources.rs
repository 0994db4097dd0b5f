mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_admin, create_test_program, create_test_resource, create_test_section,
    create_test_student, create_test_user_without_student, days_from_today, enroll, ids, send,
    setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

struct Classroom {
    section: Uuid,
    student: common::TestAccount,
    admin: common::TestAccount,
}

async fn setup_classroom(pool: &PgPool, start_in_days: i64) -> Classroom {
    let admin = create_test_admin(pool).await;
    let student = create_test_student(pool, "Ana").await;
    let program = create_test_program(pool, "Rust").await;
    let section =
        create_test_section(pool, program, "Rust A", days_from_today(start_in_days)).await;
    enroll(pool, student.student_id.unwrap(), section).await;
    Classroom {
        section,
        student,
        admin,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_draft_hidden_from_student_listing(pool: PgPool) {
    let room = setup_classroom(&pool, -30).await;
    let published = create_test_resource(&pool, room.section, "Slides", false, false).await;
    let draft = create_test_resource(&pool, room.section, "Exam", false, true).await;
    let app = setup_test_app(pool.clone());

    let (status, body) =
        send(&app, Method::GET, "/api/resources", Some(&room.student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![published.to_string()]);

    let (status, body) =
        send(&app, Method::GET, "/api/resources", Some(&room.admin.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = ids(&body);
    assert!(listed.contains(&draft.to_string()));
    assert!(listed.contains(&published.to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pre_access_visible_before_start(pool: PgPool) {
    let room = setup_classroom(&pool, 30).await;
    let early = create_test_resource(&pool, room.section, "Welcome", true, false).await;
    create_test_resource(&pool, room.section, "Week 1", false, false).await;
    create_test_resource(&pool, room.section, "Week 1 draft", true, true).await;
    let app = setup_test_app(pool.clone());

    let (status, body) =
        send(&app, Method::GET, "/api/resources", Some(&room.student.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![early.to_string()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resource_visible_on_start_date(pool: PgPool) {
    let room = setup_classroom(&pool, 0).await;
    let resource = create_test_resource(&pool, room.section, "Week 1", false, false).await;
    let app = setup_test_app(pool.clone());

    let (status, body) =
        send(&app, Method::GET, "/api/resources", Some(&room.student.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![resource.to_string()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hidden_resource_detail_forbidden(pool: PgPool) {
    let room = setup_classroom(&pool, 30).await;
    let pending = create_test_resource(&pool, room.section, "Week 1", false, false).await;
    let draft = create_test_resource(&pool, room.section, "Exam", true, true).await;
    let app = setup_test_app(pool.clone());

    for id in [pending, draft] {
        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/resources/{}", id),
            Some(&room.student.token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/resources/{}", draft),
        Some(&room.admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resource_of_other_section_not_found(pool: PgPool) {
    let room = setup_classroom(&pool, -30).await;
    let program = create_test_program(&pool, "Go").await;
    let other_section = create_test_section(&pool, program, "Go A", days_from_today(-30)).await;
    let foreign = create_test_resource(&pool, other_section, "Slides", false, false).await;
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/resources/{}", foreign),
        Some(&room.student.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
        send(&app, Method::GET, "/api/resources", Some(&room.student.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profileless_account_sees_no_resources(pool: PgPool) {
    let room = setup_classroom(&pool, -30).await;
    let resource = create_test_resource(&pool, room.section, "Slides", false, false).await;
    let orphan = create_test_user_without_student(&pool).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(&app, Method::GET, "/api/resources", Some(&orphan.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/resources/{}", resource),
        Some(&orphan.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_resource_with_label(pool: PgPool) {
    let room = setup_classroom(&pool, 0).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/resources",
        Some(&room.admin.token),
        Some(json!({ "section_id": room.section, "kind": "ZIP", "name": "Starter code" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "ZIP");
    assert_eq!(body["kind_label"], "ZIP archive");
    assert_eq!(body["section_name"], "Rust A");
    assert_eq!(body["pre_access"], false);
    assert_eq!(body["draft"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_kind_rejected(pool: PgPool) {
    let room = setup_classroom(&pool, 0).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/resources",
        Some(&room.admin.token),
        Some(json!({ "section_id": room.section, "kind": "DOCX", "name": "Notes" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "\"DOCX\" is not a valid choice");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_section_rejected(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/resources",
        Some(&admin.token),
        Some(json!({ "section_id": Uuid::new_v4(), "kind": "PDF", "name": "Notes" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["section_id"][0], "Section not found.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_publishing_draft_updates_timestamp(pool: PgPool) {
    let room = setup_classroom(&pool, -30).await;
    let draft = create_test_resource(&pool, room.section, "Exam", false, true).await;
    let app = setup_test_app(pool.clone());
    let uri = format!("/api/resources/{}", draft);

    let (_, before) = send(&app, Method::GET, &uri, Some(&room.admin.token), None).await;

    let (status, after) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&room.admin.token),
        Some(json!({ "draft": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["draft"], false);
    assert_eq!(after["created_at"], before["created_at"]);
    assert_ne!(after["updated_at"], before["updated_at"]);

    let (status, _) = send(&app, Method::GET, &uri, Some(&room.student.token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_write_resources(pool: PgPool) {
    let room = setup_classroom(&pool, -30).await;
    let resource = create_test_resource(&pool, room.section, "Slides", false, false).await;
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/resources",
        Some(&room.student.token),
        Some(json!({ "section_id": room.section, "kind": "PDF", "name": "Mine" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/resources/{}", resource),
        Some(&room.student.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
