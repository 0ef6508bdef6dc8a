//! Router de la aplicación
//!
//! Junta los routers de cada recurso y aplica CORS y trazas HTTP.

pub mod planner_routes;
pub mod route_optimization_routes;
pub mod saved_route_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/route", route_optimization_routes::create_route_optimization_router())
        .nest("/api/saved-routes", saved_route_routes::create_saved_route_router())
        .nest("/api/planner", planner_routes::create_planner_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡API GeoRoute funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
