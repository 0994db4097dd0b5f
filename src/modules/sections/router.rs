use axum::{Router, routing::get};

use super::controller::{
    create_section, delete_section, get_section, list_section_resources, list_section_students,
    list_sections, replace_section, update_section,
};
use crate::state::AppState;

pub fn init_sections_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route(
            "/{id}",
            get(get_section)
                .put(replace_section)
                .patch(update_section)
                .delete(delete_section),
        )
        .route("/{id}/students", get(list_section_students))
        .route("/{id}/resources", get(list_section_resources))
}
