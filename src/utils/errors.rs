//! Sistema de manejo de errores
//!
//! `OptimizationError` cubre el ciclo petición/respuesta con el optimizador;
//! `AppError` es la frontera HTTP y sabe convertirse en respuesta JSON.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Mensaje por defecto cuando el optimizador rechaza sin explicar por qué.
/// La causa real más frecuente son ventanas horarias incompatibles.
pub const INFEASIBLE_HINT: &str =
    "Error de optimización (posiblemente horarios imposibles para la hora de salida)";

/// Errores del ciclo de optimización
#[derive(Error, Debug)]
pub enum OptimizationError {
    #[error("Hora inválida '{0}', se esperaba HH:mm")]
    InvalidClockTime(String),

    #[error("Se necesitan al menos 2 paradas para optimizar (hay {0})")]
    NotEnoughStops(usize),

    #[error("ORS_API_KEY no configurada")]
    MissingApiKey,

    #[error("Error de red con el optimizador: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("El optimizador respondió {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("No se pudo asignar ninguna parada: {0}")]
    Infeasible(String),

    #[error("No se encontró una ruta válida para esos horarios")]
    MissingRoute,

    #[error("Respuesta del optimizador ilegible: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Optimization error: {0}")]
    Optimization(#[from] OptimizationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl OptimizationError {
    fn status_code(&self) -> StatusCode {
        match self {
            OptimizationError::InvalidClockTime(_) | OptimizationError::NotEnoughStops(_) => {
                StatusCode::BAD_REQUEST
            }
            OptimizationError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            OptimizationError::Infeasible(_) | OptimizationError::MissingRoute => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            OptimizationError::Transport(_)
            | OptimizationError::Rejected { .. }
            | OptimizationError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            OptimizationError::InvalidClockTime(_) => "INVALID_TIME",
            OptimizationError::NotEnoughStops(_) => "NOT_ENOUGH_STOPS",
            OptimizationError::MissingApiKey => "OPTIMIZER_NOT_CONFIGURED",
            OptimizationError::Transport(_) => "OPTIMIZER_UNREACHABLE",
            OptimizationError::Rejected { .. } => "OPTIMIZER_REJECTED",
            OptimizationError::Infeasible(_) => "INFEASIBLE_ROUTE",
            OptimizationError::MissingRoute => "NO_ROUTE",
            OptimizationError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                log::warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "Validation Error",
                        "The provided data is invalid".to_string(),
                        "VALIDATION_ERROR",
                    )
                    .with_details(json!(e)),
                )
            }

            AppError::Optimization(e) => {
                log::error!("❌ Optimization error: {}", e);
                (
                    e.status_code(),
                    ErrorResponse::new("Optimization Error", e.to_string(), e.code()),
                )
            }

            AppError::NotFound(msg) => {
                log::warn!("⚠️ Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
                )
            }

            AppError::BadRequest(msg) => {
                log::warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
