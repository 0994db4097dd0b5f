use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use classroom_core::{AppError, ErrorResponse};
use tracing::instrument;
use uuid::Uuid;

use super::model::{CreateResourceDto, Resource, ResourceRecord, UpdateResourceDto};
use super::service::ResourceService;
use crate::middleware::auth::Actor;
use crate::middleware::policy::{
    EnrolledAndResourceAccessible, Operation, authorize, authorize_object,
};
use crate::state::AppState;
use crate::utils::today;
use crate::validator::ValidatedJson;

/// List resources
///
/// Students see published resources of their sections once the section has
/// started, or earlier when the resource allows pre-access.
#[utoipa::path(
    get,
    path = "/api/resources",
    responses(
        (status = 200, description = "Resources visible to the caller", body = Vec<Resource>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn list_resources(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<Resource>>, AppError> {
    let today = today();
    authorize::<ResourceRecord, _>(
        &EnrolledAndResourceAccessible { today },
        &actor,
        Operation::Read,
    )?;
    let resources = ResourceService::list(&state.db, actor.scope(), today, None).await?;
    Ok(Json(resources.into_iter().map(Resource::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/resources",
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn create_resource(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(dto): ValidatedJson<CreateResourceDto>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    authorize::<ResourceRecord, _>(
        &EnrolledAndResourceAccessible { today: today() },
        &actor,
        Operation::Create,
    )?;
    let record = ResourceService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(Resource::from(record))))
}

#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource details", body = Resource),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not yet available to students", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn get_resource(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, AppError> {
    let record = find_resource(&state, &actor, Operation::Read, id).await?;
    Ok(Json(Resource::from(record)))
}

#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    request_body = CreateResourceDto,
    responses(
        (status = 200, description = "Resource replaced", body = Resource),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn replace_resource(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateResourceDto>,
) -> Result<Json<Resource>, AppError> {
    find_resource(&state, &actor, Operation::Update, id).await?;
    let record = ResourceService::update(&state.db, id, dto.into()).await?;
    Ok(Json(Resource::from(record)))
}

#[utoipa::path(
    patch,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
#[instrument(skip(state, actor, dto), fields(actor = %actor.username))]
pub async fn update_resource(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateResourceDto>,
) -> Result<Json<Resource>, AppError> {
    find_resource(&state, &actor, Operation::Update, id).await?;
    let record = ResourceService::update(&state.db, id, dto).await?;
    Ok(Json(Resource::from(record)))
}

#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource ID")),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 404, description = "Resource not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Resources"
)]
#[instrument(skip(state, actor), fields(actor = %actor.username))]
pub async fn delete_resource(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    find_resource(&state, &actor, Operation::Delete, id).await?;
    ResourceService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_resource(
    state: &AppState,
    actor: &Actor,
    op: Operation,
    id: Uuid,
) -> Result<ResourceRecord, AppError> {
    let policy = EnrolledAndResourceAccessible { today: today() };
    authorize::<ResourceRecord, _>(&policy, actor, op)?;
    let record = ResourceService::get(&state.db, actor.scope(), id).await?;
    authorize_object(&policy, actor, op, &record)?;
    Ok(record)
}
