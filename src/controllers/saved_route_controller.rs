//! Controlador de rutas guardadas
//!
//! Guardar, listar, cargar y borrar rutas, más las métricas del panel de
//! gerencia.

use axum::{
    extract::{Path, State},
    response::Json,
};
use validator::Validate;

use crate::dto::route_dto::*;
use crate::models::saved_route::{FleetStats, SavedRoute, SavedRouteSummary};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::validate_stops;

/// Listar rutas guardadas (la más reciente primero)
pub async fn list_saved_routes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SavedRouteSummary>>>, AppError> {
    let routes = state.store.list().await?;
    log::info!("📚 {} rutas guardadas", routes.len());

    let summaries = routes.iter().map(SavedRouteSummary::from).collect();
    Ok(Json(ApiResponse::success(summaries)))
}

/// Obtener una ruta guardada completa, con sus paradas
pub async fn get_saved_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SavedRoute>>, AppError> {
    let route = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| not_found_error("Saved route", &id))?;

    Ok(Json(ApiResponse::success(route)))
}

/// Guardar las paradas actuales con los totales de la última optimización
pub async fn save_route(
    State(state): State<AppState>,
    Json(request): Json<SaveRouteRequest>,
) -> Result<Json<ApiResponse<SavedRoute>>, AppError> {
    request.validate()?;
    validate_stops(&request.stops)?;

    let route = SavedRoute::new(request.name.trim(), request.stops, request.route.as_ref());
    let saved = state.store.save(route).await?;

    Ok(Json(ApiResponse::success_with_message(
        saved,
        "Ruta guardada".to_string(),
    )))
}

/// Borrar una ruta guardada
pub async fn delete_saved_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if !state.store.delete(&id).await? {
        return Err(not_found_error("Saved route", &id));
    }

    Ok(Json(ApiResponse::success_with_message(
        id,
        "Ruta eliminada".to_string(),
    )))
}

/// KPIs sobre todas las rutas guardadas
pub async fn get_fleet_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FleetStats>>, AppError> {
    let routes = state.store.list().await?;
    let stats = FleetStats::from_routes(&routes);

    log::info!(
        "📊 Estadísticas: {} rutas, {:.1} km en total",
        stats.total_routes,
        stats.total_km
    );

    Ok(Json(ApiResponse::success(stats)))
}
