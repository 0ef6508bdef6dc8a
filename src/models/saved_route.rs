//! Rutas guardadas y métricas de gerencia
//!
//! Una ruta guardada es una foto de las paradas más los totales de la última
//! optimización, lo mismo que se persiste en la nube.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::route::RouteEnvelope;
use super::stop::Stop;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoute {
    pub id: String,
    pub name: String,
    /// Fecha legible ("02/01/2026")
    pub date: String,
    pub created_at: DateTime<Utc>,
    pub stops: Vec<Stop>,
    pub total_distance: f64,
    pub total_duration: f64,
    pub stop_count: usize,
}

impl SavedRoute {
    /// Arma la foto; sin ruta calculada los totales quedan en 0.
    pub fn new(name: impl Into<String>, stops: Vec<Stop>, route: Option<&RouteEnvelope>) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            date: created_at.with_timezone(&Local).format("%d/%m/%Y").to_string(),
            created_at,
            stop_count: stops.len(),
            total_distance: route.map(|r| r.distance).unwrap_or(0.0),
            total_duration: route.map(|r| r.duration).unwrap_or(0.0),
            stops,
        }
    }
}

/// Resumen liviano para listados
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRouteSummary {
    pub id: String,
    pub name: String,
    pub date: String,
    pub stop_count: usize,
    pub total_distance_km: f64,
}

impl From<&SavedRoute> for SavedRouteSummary {
    fn from(route: &SavedRoute) -> Self {
        Self {
            id: route.id.clone(),
            name: route.name.clone(),
            date: route.date.clone(),
            stop_count: route.stop_count,
            total_distance_km: route.total_distance / 1000.0,
        }
    }
}

/// KPIs del panel de gerencia
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_routes: usize,
    /// Se descuenta el depósito de cada ruta
    pub clients_visited: usize,
    pub total_km: f64,
    pub avg_km_per_route: f64,
}

impl FleetStats {
    pub fn from_routes(routes: &[SavedRoute]) -> Self {
        let total_routes = routes.len();
        let total_km = routes.iter().map(|r| r.total_distance).sum::<f64>() / 1000.0;
        let clients_visited = routes.iter().map(|r| r.stop_count.saturating_sub(1)).sum();

        Self {
            total_routes,
            clients_visited,
            total_km,
            avg_km_per_route: if total_routes > 0 {
                total_km / total_routes as f64
            } else {
                0.0
            },
        }
    }
}
