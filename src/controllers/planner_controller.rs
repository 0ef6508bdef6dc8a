//! Controlador de la sesión de planificación
//!
//! Mantiene una lista de paradas en el servidor (la pantalla del mapa) y
//! la optimiza a pedido. Cada cambio de paradas invalida la ruta vigente.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::dto::route_dto::*;
use crate::models::stop::StopPatch;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{validate_start_time, validate_stops};

/// Estado actual de la sesión
pub async fn get_planner(State(state): State<AppState>) -> Json<ApiResponse<PlannerSnapshot>> {
    let planner = state.planner.lock().await;
    Json(ApiResponse::success(PlannerSnapshot::from(&*planner)))
}

/// Agregar una parada; la primera de la sesión es el depósito
pub async fn add_stop(
    State(state): State<AppState>,
    Json(request): Json<AddStopRequest>,
) -> Result<Json<ApiResponse<PlannerSnapshot>>, AppError> {
    let stop = request.into_stop();
    validate_stops(std::slice::from_ref(&stop))?;

    let mut planner = state.planner.lock().await;
    let added = planner.add_stop(stop);
    log::info!("📍 Parada agregada a la sesión: {} ({})", added.id, added.address);

    Ok(Json(ApiResponse::success(PlannerSnapshot::from(&*planner))))
}

/// Editar dirección, tipo, comentario, horario o coordenadas de una parada
pub async fn update_stop(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<StopPatch>,
) -> Result<Json<ApiResponse<PlannerSnapshot>>, AppError> {
    let mut planner = state.planner.lock().await;

    // Se valida el resultado antes de tocar la sesión
    let mut candidate = planner
        .stops()
        .get(&id)
        .cloned()
        .ok_or_else(|| not_found_error("Stop", &id))?;
    patch.clone().apply(&mut candidate);
    validate_stops(std::slice::from_ref(&candidate))?;

    planner.update_stop(&id, patch)?;
    Ok(Json(ApiResponse::success(PlannerSnapshot::from(&*planner))))
}

pub async fn remove_stop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlannerSnapshot>>, AppError> {
    let mut planner = state.planner.lock().await;
    let removed = planner.remove_stop(&id)?;
    log::info!("🗑️ Parada quitada de la sesión: {}", removed.id);

    Ok(Json(ApiResponse::success(PlannerSnapshot::from(&*planner))))
}

pub async fn set_depot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlannerSnapshot>>, AppError> {
    let mut planner = state.planner.lock().await;
    planner.set_depot(&id)?;
    log::info!("🏭 Nuevo depósito de la sesión: {}", id);

    Ok(Json(ApiResponse::success(PlannerSnapshot::from(&*planner))))
}

/// Reemplazar las paradas de la sesión por las de una ruta guardada
pub async fn load_saved_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlannerSnapshot>>, AppError> {
    let saved = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| not_found_error("Saved route", &id))?;

    let mut planner = state.planner.lock().await;
    planner.load(saved.stops);
    log::info!("📂 Ruta '{}' cargada en la sesión", saved.name);

    Ok(Json(ApiResponse::success(PlannerSnapshot::from(&*planner))))
}

/// Optimizar la sesión.
///
/// El lock se mantiene durante la llamada al optimizador, así que dos
/// pedidos sobre la misma sesión se atienden de a uno.
pub async fn optimize_session(
    State(state): State<AppState>,
    Json(request): Json<PlannerOptimizeRequest>,
) -> Result<Json<ApiResponse<PlannerSnapshot>>, AppError> {
    validate_start_time(&request.start_time)?;

    let mut planner = state.planner.lock().await;
    planner
        .optimize(state.optimizer.as_ref(), &request.start_time)
        .await?;

    Ok(Json(ApiResponse::success(PlannerSnapshot::from(&*planner))))
}
