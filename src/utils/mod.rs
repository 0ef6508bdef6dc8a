//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! horas del día y el codec de polilíneas.

pub mod errors;
pub mod polyline;
pub mod time;
pub mod validation;

pub use errors::{AppError, AppResult, OptimizationError};
