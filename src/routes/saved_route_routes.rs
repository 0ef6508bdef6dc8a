use axum::{
    routing::{delete, get},
    Router,
};

use crate::controllers::saved_route_controller::*;
use crate::state::AppState;

pub fn create_saved_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_saved_routes).post(save_route))
        .route("/stats", get(get_fleet_stats))
        .route("/:id", get(get_saved_route))
        .route("/:id", delete(delete_saved_route))
}
