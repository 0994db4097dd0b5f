use classroom_auth::create_access_token;
use classroom_config::JwtConfig;
use classroom_core::{AppError, verify_password};
use classroom_models::AccountWithPassword;
use sqlx::PgPool;
use tracing::instrument;

use crate::metrics::{track_login_failure, track_token_issued};
use crate::modules::auth::model::{TokenRequest, TokenResponse};

pub struct AuthService;

impl AuthService {
    /// Exchanges valid credentials for an access token.
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn issue_token(
        db: &PgPool,
        dto: TokenRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let account = sqlx::query_as::<_, AccountWithPassword>(
            "SELECT id, username, password, is_staff FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let Some(account) = account else {
            track_login_failure();
            return Err(AppError::unauthorized("Invalid credentials"));
        };

        if !verify_password(&dto.password, &account.password)? {
            track_login_failure();
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let access =
            create_access_token(account.id, &account.username, account.is_staff, jwt_config)?;
        track_token_issued(account.is_staff);

        Ok(TokenResponse {
            access,
            is_admin: account.is_staff,
        })
    }
}
