use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::controllers::planner_controller::*;
use crate::state::AppState;

/// Router de la sesión de planificación (montado en `/api/planner`)
pub fn create_planner_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_planner))
        .route("/stops", post(add_stop))
        .route("/stops/:id", patch(update_stop).delete(remove_stop))
        .route("/stops/:id/depot", put(set_depot))
        .route("/load/:id", post(load_saved_route))
        .route("/optimize", post(optimize_session))
}
