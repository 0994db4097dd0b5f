use axum::Json;
use axum::extract::State;
use classroom_core::{AppError, ErrorResponse};
use tracing::instrument;

use super::model::{IsAdminResponse, TokenRequest, TokenResponse};
use super::service::AuthService;
use crate::middleware::auth::Actor;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Obtain an access token
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::issue_token(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Whether the caller is an administrator
///
/// Anonymous callers get `false`; an invalid token is still rejected.
#[utoipa::path(
    get,
    path = "/api/auth/is-admin",
    responses(
        (status = 200, description = "Staff flag of the caller", body = IsAdminResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(actor))]
pub async fn is_admin(actor: Option<Actor>) -> Json<IsAdminResponse> {
    Json(IsAdminResponse {
        is_admin: actor.is_some_and(|actor| actor.is_staff),
    })
}
