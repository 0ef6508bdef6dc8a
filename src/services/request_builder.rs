//! Construcción del request de optimización
//!
//! Traduce las paradas y la hora de salida a trabajos + un vehículo. El
//! identificador de cada trabajo es su posición (1-based) en la lista de
//! paradas que no son depósito; `JobIndex` guarda esa correspondencia para
//! poder volver de la respuesta a las paradas originales.

use crate::dto::ors_optimization_dto::*;
use crate::models::stop::Stop;
use crate::utils::errors::OptimizationError;
use crate::utils::time::to_seconds;

/// Tiempo de atención por parada (10 minutos)
pub const SERVICE_DURATION_SECS: u32 = 600;
/// Fin de la jornada del vehículo (22:00)
pub const VEHICLE_SHIFT_END_SECS: u32 = 79_200;
pub const VEHICLE_PROFILE: &str = "driving-car";
pub const VEHICLE_ID: u32 = 1;

/// Correspondencia trabajo -> parada, en el orden en que se enviaron
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobIndex {
    stop_ids: Vec<String>,
}

impl JobIndex {
    /// Parada del trabajo `job_id` (1-based); `None` si está fuera de rango
    pub fn stop_id(&self, job_id: usize) -> Option<&str> {
        job_id
            .checked_sub(1)
            .and_then(|i| self.stop_ids.get(i))
            .map(String::as_str)
    }

    pub fn job_id(&self, stop_id: &str) -> Option<usize> {
        self.stop_ids.iter().position(|id| id == stop_id).map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.stop_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_ids.is_empty()
    }
}

/// Request listo para enviar junto con lo necesario para reconciliar la respuesta
#[derive(Debug, Clone)]
pub struct PreparedOptimization {
    pub request: OrsOptimizationRequest,
    pub jobs: JobIndex,
    pub depot_id: String,
}

/// Depósito de la ruta: la parada marcada o, si ninguna lo está, la primera.
pub fn select_depot(stops: &[Stop]) -> Option<&Stop> {
    stops.iter().find(|s| s.is_depot).or_else(|| {
        let first = stops.first();
        if let Some(stop) = first {
            log::warn!("⚠️ Ninguna parada marcada como depósito, se usa la primera: {}", stop.id);
        }
        first
    })
}

/// Arma el request para el optimizador.
///
/// Se espera que el llamador tenga al menos 2 paradas; con la lista vacía
/// no hay depósito y se devuelve `NotEnoughStops`.
pub fn build_optimization_request(
    stops: &[Stop],
    start_time: &str,
) -> Result<PreparedOptimization, OptimizationError> {
    let depot = select_depot(stops).ok_or(OptimizationError::NotEnoughStops(stops.len()))?;
    let shift_start = to_seconds(start_time)?;

    let capacity = stops.len().saturating_sub(1);
    let mut jobs = Vec::with_capacity(capacity);
    let mut stop_ids: Vec<String> = Vec::with_capacity(capacity);

    for stop in stops.iter().filter(|s| s.id != depot.id) {
        let time_windows = match stop.complete_time_window() {
            Some(window) => Some(vec![[to_seconds(&window.start)?, to_seconds(&window.end)?]]),
            None => None,
        };

        jobs.push(OrsJob {
            id: stop_ids.len() + 1,
            location: stop.location(),
            service: SERVICE_DURATION_SECS,
            time_windows,
        });
        stop_ids.push(stop.id.clone());
    }

    let vehicles = vec![OrsVehicle {
        id: VEHICLE_ID,
        profile: VEHICLE_PROFILE.to_string(),
        start: depot.location(),
        end: depot.location(),
        time_window: [shift_start, VEHICLE_SHIFT_END_SECS],
    }];

    log::info!(
        "📋 Request armado: {} trabajos, depósito {} ({}), salida {}",
        jobs.len(),
        depot.id,
        depot.address,
        start_time
    );

    Ok(PreparedOptimization {
        request: OrsOptimizationRequest {
            jobs,
            vehicles,
            options: OrsOptions { g: true },
        },
        jobs: JobIndex { stop_ids },
        depot_id: depot.id.clone(),
    })
}
