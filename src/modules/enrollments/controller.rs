use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use classroom_core::{AppError, ErrorResponse};
use tracing::instrument;
use uuid::Uuid;

use super::model::{CreateEnrollmentDto, Enrollment};
use super::service::EnrollmentService;
use crate::middleware::auth::Actor;
use crate::middleware::policy::{Operation, OwnerOrAdmin, authorize, authorize_object};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List enrollments
///
/// Administrators see every enrollment; a student sees its own.
#[utoipa::path(
    get,
    path = "/api/enrollments",
    responses(
        (status = 200, description = "Enrollments visible to the caller", body = Vec<Enrollment>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_enrollments(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    authorize::<Enrollment, _>(&OwnerOrAdmin, &actor, Operation::Read)?;
    let enrollments = EnrollmentService::list(&state.db, actor.scope()).await?;
    Ok(Json(enrollments))
}

/// Enroll a student in a section
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Unknown student or section, or already enrolled", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    authorize::<Enrollment, _>(&OwnerOrAdmin, &actor, Operation::Create)?;
    let enrollment = EnrollmentService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment details", body = Enrollment),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = find_enrollment(&state, &actor, Operation::Read, id).await?;
    Ok(Json(enrollment))
}

/// Remove an enrollment
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    find_enrollment(&state, &actor, Operation::Delete, id).await?;
    EnrollmentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_enrollment(
    state: &AppState,
    actor: &Actor,
    op: Operation,
    id: Uuid,
) -> Result<Enrollment, AppError> {
    authorize::<Enrollment, _>(&OwnerOrAdmin, actor, op)?;
    let enrollment = EnrollmentService::get(&state.db, actor.scope(), id).await?;
    authorize_object(&OwnerOrAdmin, actor, op, &enrollment)?;
    Ok(enrollment)
}
