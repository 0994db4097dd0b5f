use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use classroom_core::{AppError, ErrorResponse};
use tracing::instrument;
use uuid::Uuid;

use super::model::{CreateProgramDto, Program, UpdateProgramDto};
use super::service::ProgramService;
use crate::middleware::auth::Actor;
use crate::middleware::policy::{AdminOrReadOnly, Operation, authorize};
use crate::modules::sections::model::Section;
use crate::modules::sections::service::SectionService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/programs",
    responses(
        (status = 200, description = "All programs", body = Vec<Program>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_programs(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<Program>>, AppError> {
    authorize::<Program, _>(&AdminOrReadOnly, &actor, Operation::Read)?;
    let programs = ProgramService::list(&state.db).await?;
    Ok(Json(programs))
}

#[utoipa::path(
    post,
    path = "/api/programs",
    request_body = CreateProgramDto,
    responses(
        (status = 201, description = "Program created", body = Program),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn create_program(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateProgramDto>,
) -> Result<(StatusCode, Json<Program>), AppError> {
    authorize::<Program, _>(&AdminOrReadOnly, &actor, Operation::Create)?;
    let program = ProgramService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

#[utoipa::path(
    get,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program details", body = Program),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn get_program(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Program>, AppError> {
    authorize::<Program, _>(&AdminOrReadOnly, &actor, Operation::Read)?;
    let program = ProgramService::get(&state.db, id).await?;
    Ok(Json(program))
}

#[utoipa::path(
    put,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    request_body = CreateProgramDto,
    responses(
        (status = 200, description = "Program replaced", body = Program),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn replace_program(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateProgramDto>,
) -> Result<Json<Program>, AppError> {
    authorize::<Program, _>(&AdminOrReadOnly, &actor, Operation::Update)?;
    let program = ProgramService::update(&state.db, id, dto.into()).await?;
    Ok(Json(program))
}

#[utoipa::path(
    patch,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    request_body = UpdateProgramDto,
    responses(
        (status = 200, description = "Program updated", body = Program),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn update_program(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProgramDto>,
) -> Result<Json<Program>, AppError> {
    authorize::<Program, _>(&AdminOrReadOnly, &actor, Operation::Update)?;
    let program = ProgramService::update(&state.db, id, dto).await?;
    Ok(Json(program))
}

/// Delete a program
///
/// Its sections are deleted with it.
#[utoipa::path(
    delete,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 204, description = "Program deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn delete_program(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    authorize::<Program, _>(&AdminOrReadOnly, &actor, Operation::Delete)?;
    ProgramService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the sections of a program
///
/// Students only see the sections they are enrolled in.
#[utoipa::path(
    get,
    path = "/api/programs/{id}/sections",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Sections of the program visible to the caller", body = Vec<Section>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Program not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Programs"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_program_sections(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Section>>, AppError> {
    authorize::<Program, _>(&AdminOrReadOnly, &actor, Operation::Read)?;
    let program = ProgramService::get(&state.db, id).await?;
    let sections = SectionService::list(&state.db, actor.scope(), Some(program.id)).await?;
    Ok(Json(sections))
}
