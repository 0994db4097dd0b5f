use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_governor::GovernorLayer;

use super::controller::{is_admin, issue_token};
use crate::state::AppState;

/// The token route is rate limited per client IP.
pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let governor = Arc::new(state.rate_limit_config.auth_governor_config());

    Router::new()
        .route(
            "/token",
            post(issue_token).layer(GovernorLayer::new(governor)),
        )
        .route("/is-admin", get(is_admin))
}
