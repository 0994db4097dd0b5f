use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use classroom_core::{AppError, ErrorResponse};
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    CreateStudentDto, ReplaceStudentDto, Student, StudentCreatedResponse, UpdateStudentDto,
};
use super::service::StudentService;
use crate::middleware::auth::Actor;
use crate::middleware::policy::{Operation, OwnerOrAdmin, authorize, authorize_object};
use crate::modules::enrollments::model::Enrollment;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a student
///
/// Provisions the student's login account with the default password and,
/// when `section_id` is given, enrolls the student in that section.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = StudentCreatedResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn create_student(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<StudentCreatedResponse>), AppError> {
    authorize::<Student, _>(&OwnerOrAdmin, &actor, Operation::Create)?;

    let student = StudentService::create(&state.db, dto, &state.provisioning_config).await?;

    Ok((
        StatusCode::CREATED,
        Json(StudentCreatedResponse {
            detail: "Student created successfully.".to_string(),
            data: student,
        }),
    ))
}

/// List students
///
/// Administrators see every student; a student sees only itself.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students visible to the caller", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_students(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<Student>>, AppError> {
    authorize::<Student, _>(&OwnerOrAdmin, &actor, Operation::Read)?;
    let students = StudentService::list(&state.db, actor.scope()).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn get_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = find_student(&state, &actor, Operation::Read, id).await?;
    Ok(Json(student))
}

/// Replace a student
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = ReplaceStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn replace_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ReplaceStudentDto>,
) -> Result<Json<Student>, AppError> {
    find_student(&state, &actor, Operation::Update, id).await?;
    let student = StudentService::update(&state.db, id, dto.into()).await?;
    Ok(Json(student))
}

/// Partially update a student
///
/// Email and name changes are mirrored onto the login account.
#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn update_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    find_student(&state, &actor, Operation::Update, id).await?;
    let student = StudentService::update(&state.db, id, dto).await?;
    Ok(Json(student))
}

/// Delete a student
///
/// Removes the login account together with the student and its enrollments.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn delete_student(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    find_student(&state, &actor, Operation::Delete, id).await?;
    StudentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a student's enrollments
#[utoipa::path(
    get,
    path = "/api/students/{id}/enrollments",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Enrollments of the student", body = Vec<Enrollment>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_student_enrollments(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let student = find_student(&state, &actor, Operation::Read, id).await?;
    let enrollments = EnrollmentService::list_for_student(&state.db, student.id).await?;
    Ok(Json(enrollments))
}

async fn find_student(
    state: &AppState,
    actor: &Actor,
    op: Operation,
    id: Uuid,
) -> Result<Student, AppError> {
    authorize::<Student, _>(&OwnerOrAdmin, actor, op)?;
    let student = StudentService::get(&state.db, actor.scope(), id).await?;
    authorize_object(&OwnerOrAdmin, actor, op, &student)?;
    Ok(student)
}
