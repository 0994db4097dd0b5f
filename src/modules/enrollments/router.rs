use axum::{Router, routing::get};

use super::controller::{create_enrollment, delete_enrollment, get_enrollment, list_enrollments};
use crate::state::AppState;

/// Enrollments are immutable; there is no update route.
pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(create_enrollment))
        .route("/{id}", get(get_enrollment).delete(delete_enrollment))
}
