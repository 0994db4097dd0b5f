use sqlx::PgPool;

use crate::config::{CorsConfig, JwtConfig, ProvisioningConfig, RateLimitConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub provisioning_config: ProvisioningConfig,
}

impl AppState {
    /// Builds the state around an existing pool, reading every other setting
    /// from the environment.
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            provisioning_config: ProvisioningConfig::from_env(),
        }
    }
}
