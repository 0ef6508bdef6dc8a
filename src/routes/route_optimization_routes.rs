//! Rutas de optimización
//!
//! Este módulo define los endpoints de cálculo de ruta y hoja de ruta.

use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::route_optimization_controller;
use crate::state::AppState;

/// Crear el router de optimización (montado en `/api/route`)
pub fn create_route_optimization_router() -> Router<AppState> {
    Router::new()
        .route("/optimize", post(route_optimization_controller::optimize_route))
        .route("/sheet", post(route_optimization_controller::route_sheet))
        .route("/health", get(route_optimization_controller::health_check))
}
