//! DTOs de la API de rutas
//!
//! Requests y responses que intercambia el frontend con este backend.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{RouteEnvelope, Stop, StopType, TimeWindow};
use crate::services::route_planner::{PlannerStatus, RoutePlanner};

pub const DEFAULT_START_TIME: &str = "08:00";

fn default_start_time() -> String {
    DEFAULT_START_TIME.to_string()
}

/// Request para optimizar las paradas actuales
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRouteRequest {
    pub stops: Vec<Stop>,
    #[serde(default = "default_start_time")]
    pub start_time: String,
}

/// Ruta calculada más las paradas con su orden de visita
#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizeRouteResponse {
    pub route: RouteEnvelope,
    pub stops: Vec<Stop>,
}

/// Request para armar la hoja de ruta en texto
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSheetRequest {
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub route: Option<RouteEnvelope>,
    #[serde(default = "default_start_time")]
    pub start_time: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSheetResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_link: Option<String>,
    pub share_url: String,
}

/// Request para guardar la ruta actual
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRouteRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub route: Option<RouteEnvelope>,
}

/// Parada nueva para la sesión de planificación; el id lo asigna el servidor
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStopRequest {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub stop_type: StopType,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
}

impl AddStopRequest {
    pub fn into_stop(self) -> Stop {
        let mut stop = Stop::at(self.lat, self.lng, self.address).with_type(self.stop_type);
        if let Some(comment) = self.comment.filter(|c| !c.trim().is_empty()) {
            stop = stop.with_comment(comment);
        }
        if let Some(window) = self.time_window.filter(TimeWindow::is_complete) {
            stop = stop.with_time_window(window);
        }
        stop
    }
}

/// Request para optimizar la sesión actual
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerOptimizeRequest {
    #[serde(default = "default_start_time")]
    pub start_time: String,
}

/// Foto de la sesión: paradas, ruta vigente y estado del ciclo
#[derive(Debug, Serialize)]
pub struct PlannerSnapshot {
    pub stops: Vec<Stop>,
    pub route: Option<RouteEnvelope>,
    pub status: PlannerStatus,
}

impl From<&RoutePlanner> for PlannerSnapshot {
    fn from(planner: &RoutePlanner) -> Self {
        Self {
            stops: planner.stops().as_slice().to_vec(),
            route: planner.route().cloned(),
            status: planner.status().clone(),
        }
    }
}

// Response genérica
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
