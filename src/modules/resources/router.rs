use axum::{Router, routing::get};

use super::controller::{
    create_resource, delete_resource, get_resource, list_resources, replace_resource,
    update_resource,
};
use crate::state::AppState;

pub fn init_resources_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        .route(
            "/{id}",
            get(get_resource)
                .put(replace_resource)
                .patch(update_resource)
                .delete(delete_resource),
        )
}
