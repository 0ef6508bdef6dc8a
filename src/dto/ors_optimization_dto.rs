//! DTOs para la API de optimización de openrouteservice
//!
//! Este módulo define las estructuras de datos para interactuar con
//! el endpoint `/optimization` (VROOM). Todas las posiciones van en
//! `[longitude, latitude]`.

use serde::{Deserialize, Serialize};

use crate::models::route::Step;
use crate::utils::errors::INFEASIBLE_HINT;

/// Request para enviar al optimizador
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrsOptimizationRequest {
    pub jobs: Vec<OrsJob>,
    pub vehicles: Vec<OrsVehicle>,
    pub options: OrsOptions,
}

/// Trabajo: una parada que no es el depósito
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrsJob {
    /// Posición 1-based dentro de la lista filtrada de paradas
    pub id: usize,
    pub location: [f64; 2], // [longitude, latitude]
    pub service: u32,       // segundos de atención
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_windows: Option<Vec<[u32; 2]>>,
}

/// Vehículo único, sale y vuelve al depósito
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrsVehicle {
    pub id: u32,
    pub profile: String,
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub time_window: [u32; 2],
}

/// Opciones de optimización
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrsOptions {
    /// Pedir la geometría codificada de cada ruta
    pub g: bool,
}

/// Response del optimizador
#[derive(Debug, Deserialize)]
pub struct OrsOptimizationResponse {
    /// 0 = resuelto; 1 interno, 2 entrada inválida, 3 error de ruteo
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub routes: Vec<OrsRoute>,
    #[serde(default)]
    pub unassigned: Vec<OrsUnassigned>,
}

impl OrsOptimizationResponse {
    /// Sin `code` se asume éxito
    pub fn is_solved(&self) -> bool {
        self.code.map_or(true, |code| code == 0)
    }
}

/// Ruta optimizada para un vehículo
#[derive(Debug, Deserialize)]
pub struct OrsRoute {
    #[serde(default)]
    pub distance: f64, // metros
    #[serde(default)]
    pub duration: f64, // segundos
    #[serde(default)]
    pub geometry: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Trabajo que no entró en ninguna ruta
#[derive(Debug, Deserialize)]
pub struct OrsUnassigned {
    pub id: usize,
}

/// Cuerpo de error: `{"error": {"message": ...}}` o `{"error": "..."}`
#[derive(Debug, Deserialize)]
pub struct OrsErrorPayload {
    #[serde(default)]
    pub error: serde_json::Value,
}

impl OrsErrorPayload {
    /// Mensaje legible; si el optimizador no explica nada se sugiere revisar horarios.
    pub fn message(&self) -> String {
        match &self.error {
            serde_json::Value::String(msg) if !msg.is_empty() => msg.clone(),
            serde_json::Value::Object(detail) => detail
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or(INFEASIBLE_HINT)
                .to_string(),
            _ => INFEASIBLE_HINT.to_string(),
        }
    }
}
