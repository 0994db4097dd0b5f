use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use classroom_core::{AppError, ErrorResponse};
use tracing::instrument;
use uuid::Uuid;

use super::model::{CreateSectionDto, Section, UpdateSectionDto};
use super::service::SectionService;
use crate::middleware::auth::Actor;
use crate::middleware::policy::{EnrolledStudentOrAdmin, Operation, authorize, authorize_object};
use crate::modules::enrollments::model::Enrollment;
use crate::modules::enrollments::service::EnrollmentService;
use crate::modules::resources::model::Resource;
use crate::modules::resources::service::ResourceService;
use crate::state::AppState;
use crate::utils::today;
use crate::validator::ValidatedJson;

/// List sections
///
/// Students only see the sections they are enrolled in.
#[utoipa::path(
    get,
    path = "/api/sections",
    responses(
        (status = 200, description = "Sections visible to the caller", body = Vec<Section>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_sections(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<Section>>, AppError> {
    authorize::<Section, _>(&EnrolledStudentOrAdmin, &actor, Operation::Read)?;
    let sections = SectionService::list(&state.db, actor.scope(), None).await?;
    Ok(Json(sections))
}

#[utoipa::path(
    post,
    path = "/api/sections",
    request_body = CreateSectionDto,
    responses(
        (status = 201, description = "Section created", body = Section),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn create_section(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateSectionDto>,
) -> Result<(StatusCode, Json<Section>), AppError> {
    authorize::<Section, _>(&EnrolledStudentOrAdmin, &actor, Operation::Create)?;
    let section = SectionService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    get,
    path = "/api/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section details", body = Section),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn get_section(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Section>, AppError> {
    let section = find_section(&state, &actor, Operation::Read, id).await?;
    Ok(Json(section))
}

#[utoipa::path(
    put,
    path = "/api/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    request_body = CreateSectionDto,
    responses(
        (status = 200, description = "Section replaced", body = Section),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn replace_section(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateSectionDto>,
) -> Result<Json<Section>, AppError> {
    find_section(&state, &actor, Operation::Update, id).await?;
    let section = SectionService::update(&state.db, id, dto.into()).await?;
    Ok(Json(section))
}

#[utoipa::path(
    patch,
    path = "/api/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    request_body = UpdateSectionDto,
    responses(
        (status = 200, description = "Section updated", body = Section),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn update_section(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSectionDto>,
) -> Result<Json<Section>, AppError> {
    find_section(&state, &actor, Operation::Update, id).await?;
    let section = SectionService::update(&state.db, id, dto).await?;
    Ok(Json(section))
}

#[utoipa::path(
    delete,
    path = "/api/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn delete_section(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    find_section(&state, &actor, Operation::Delete, id).await?;
    SectionService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the enrollments of a section
#[utoipa::path(
    get,
    path = "/api/sections/{id}/students",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Enrollments of the section", body = Vec<Enrollment>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_section_students(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let section = find_section(&state, &actor, Operation::Read, id).await?;
    let enrollments = EnrollmentService::list_for_section(&state.db, section.id).await?;
    Ok(Json(enrollments))
}

/// List the resources of a section
///
/// Students only see published resources whose section has started, or that
/// allow pre-access.
#[utoipa::path(
    get,
    path = "/api/sections/{id}/resources",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Resources of the section visible to the caller", body = Vec<Resource>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_section_resources(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Resource>>, AppError> {
    let section = find_section(&state, &actor, Operation::Read, id).await?;
    let resources =
        ResourceService::list(&state.db, actor.scope(), today(), Some(section.id)).await?;
    Ok(Json(resources.into_iter().map(Resource::from).collect()))
}

async fn find_section(
    state: &AppState,
    actor: &Actor,
    op: Operation,
    id: Uuid,
) -> Result<Section, AppError> {
    authorize::<Section, _>(&EnrolledStudentOrAdmin, actor, op)?;
    let section = SectionService::get(&state.db, actor.scope(), id).await?;
    authorize_object(&EnrolledStudentOrAdmin, actor, op, &section)?;
    Ok(section)
}
