//! Utilidades de validación
//!
//! Reglas que la interfaz ya impone (selector de hora, clic en el mapa)
//! pero que la API vuelve a comprobar al recibir paradas desde fuera.

use std::collections::HashSet;
use validator::{Validate, ValidationError};

use crate::models::stop::Stop;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::time::to_seconds;

/// Validación a nivel de parada: coordenadas finitas dentro de rango y
/// ventana horaria ordenada.
pub fn validate_stop_schedule(stop: &Stop) -> Result<(), ValidationError> {
    let in_range = |value: f64, limit: f64| value.is_finite() && (-limit..=limit).contains(&value);
    if !in_range(stop.lat, 90.0) || !in_range(stop.lng, 180.0) {
        let mut error = ValidationError::new("coordinates");
        error.add_param("lat".into(), &stop.lat);
        error.add_param("lng".into(), &stop.lng);
        return Err(error);
    }

    let Some(window) = stop.time_window.as_ref().filter(|w| w.is_complete()) else {
        return Ok(());
    };

    match (to_seconds(&window.start), to_seconds(&window.end)) {
        (Ok(start), Ok(end)) if start <= end => Ok(()),
        (Ok(_), Ok(_)) => {
            let mut error = ValidationError::new("time_window_order");
            error.add_param("start".into(), &window.start);
            error.add_param("end".into(), &window.end);
            Err(error)
        }
        _ => {
            let mut error = ValidationError::new("time_window_format");
            error.add_param("format".into(), &"HH:mm".to_string());
            Err(error)
        }
    }
}

/// Valida todas las paradas, que los ids no se repitan y que haya como
/// mucho un depósito marcado.
pub fn validate_stops(stops: &[Stop]) -> AppResult<()> {
    for stop in stops {
        stop.validate()?;
    }

    if stops.iter().filter(|s| s.is_depot).count() > 1 {
        return Err(validation_error("stops", "only one stop can be the depot"));
    }

    let mut seen = HashSet::with_capacity(stops.len());
    if !stops.iter().all(|s| seen.insert(s.id.as_str())) {
        return Err(validation_error("stops", "stop ids must be unique"));
    }

    Ok(())
}

/// Valida la hora de salida elegida por el usuario.
pub fn validate_start_time(start_time: &str) -> AppResult<u32> {
    Ok(to_seconds(start_time)?)
}
