//! Conversión entre horas "HH:mm" y segundos desde la medianoche
//!
//! No hay zona horaria: el optimizador trabaja con segundos del día local.

use crate::utils::errors::OptimizationError;

/// Convierte "HH:mm" a segundos desde las 00:00 (`h * 3600 + m * 60`).
///
/// Sólo se valida que ambas partes sean numéricas; "25:90" se acepta tal cual.
pub fn to_seconds(time: &str) -> Result<u32, OptimizationError> {
    let invalid = || OptimizationError::InvalidClockTime(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .ok_or_else(invalid)
}

/// Formato inverso para mostrar horas de llegada: 30600 -> "08:30".
pub fn format_day_seconds(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}
