//! Controlador de optimización de rutas
//!
//! Este módulo maneja los endpoints que calculan el orden de visita con el
//! optimizador externo y arman la hoja de ruta para compartir.

use axum::{extract::State, response::Json};
use serde_json::json;

use crate::dto::route_dto::*;
use crate::models::stop_list::StopList;
use crate::services::route_planner::RoutePlanner;
use crate::services::route_sheet::{build_route_sheet, google_maps_link, share_url};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError, OptimizationError};
use crate::utils::validation::{validate_start_time, validate_stops};

/// Optimizar el orden de visita de las paradas recibidas
pub async fn optimize_route(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRouteRequest>,
) -> Result<Json<ApiResponse<OptimizeRouteResponse>>, AppError> {
    log::info!(
        "🎯 Recibida solicitud de optimización para {} paradas, salida {}",
        request.stops.len(),
        request.start_time
    );

    validate_stops(&request.stops)?;
    validate_start_time(&request.start_time)?;

    let mut planner = RoutePlanner::from_stops(request.stops);
    planner
        .optimize(state.optimizer.as_ref(), &request.start_time)
        .await?;

    let (stops, route) = planner.into_parts();
    let route = route.ok_or(OptimizationError::MissingRoute)?;

    Ok(Json(ApiResponse::success(OptimizeRouteResponse { route, stops })))
}

/// Armar la hoja de ruta en texto con el link de navegación
pub async fn route_sheet(
    Json(request): Json<RouteSheetRequest>,
) -> Result<Json<ApiResponse<RouteSheetResponse>>, AppError> {
    if request.stops.is_empty() {
        return Err(bad_request_error("No hay paradas para armar la hoja de ruta"));
    }
    validate_stops(&request.stops)?;

    let stops = StopList::from_stops(request.stops);
    let text = build_route_sheet(&stops, request.route.as_ref(), &request.start_time);

    log::info!("📋 Hoja de ruta generada ({} paradas)", stops.len());

    Ok(Json(ApiResponse::success(RouteSheetResponse {
        share_url: share_url(&text),
        maps_link: google_maps_link(&stops),
        text,
    })))
}

/// Health check del servicio de optimización
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    log::info!("🏥 Health check optimización");

    Json(json!({
        "status": "ok",
        "service": "route_optimization",
        "optimizer_configured": state.config.ors_api_key.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
