//! Modelo de parada
//!
//! Una parada es un punto del mapa que el usuario quiere visitar (cliente o
//! proveedor) o el depósito desde el que sale y al que vuelve el vehículo.
//! El JSON usa camelCase para ser compatible con el frontend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Categoría de la parada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StopType {
    #[default]
    #[serde(rename = "cliente")]
    Client,
    #[serde(rename = "proveedor")]
    Supplier,
}

/// Ventana horaria en formato "HH:mm"
///
/// El editor puede dejar cualquiera de los dos extremos vacío; sólo una
/// ventana completa se envía al optimizador.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.start.trim().is_empty() && !self.end.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "crate::utils::validation::validate_stop_schedule"))]
pub struct Stop {
    #[validate(length(min = 1))]
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub is_depot: bool,
    #[serde(rename = "type", default)]
    pub stop_type: StopType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    /// Orden de visita (1..N), sólo tras una optimización exitosa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Llegada estimada en segundos desde las 00:00
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<u64>,
}

impl Stop {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            address: address.into(),
            is_depot: false,
            stop_type: StopType::Client,
            comment: None,
            time_window: None,
            order: None,
            arrival: None,
        }
    }

    /// Parada nueva con identificador aleatorio (clic en el mapa o búsqueda)
    pub fn at(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().simple().to_string(), lat, lng, address)
    }

    pub fn as_depot(mut self) -> Self {
        self.is_depot = true;
        self
    }

    pub fn with_type(mut self, stop_type: StopType) -> Self {
        self.stop_type = stop_type;
        self
    }

    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Posición en la convención del optimizador: `[lng, lat]`
    pub fn location(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Ventana horaria sólo si ambos extremos están cargados
    pub fn complete_time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref().filter(|w| w.is_complete())
    }

    /// Primer tramo de la dirección ("Calle 7 1234, La Plata" -> "Calle 7 1234")
    pub fn short_address(&self) -> &str {
        self.address.split(',').next().unwrap_or_default().trim()
    }

    pub fn clear_visit(&mut self) {
        self.order = None;
        self.arrival = None;
    }
}

/// Actualización parcial de una parada
///
/// Un `comment` vacío borra el comentario; una ventana incompleta equivale
/// a no tener ventana.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPatch {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(rename = "type")]
    pub stop_type: Option<StopType>,
    pub comment: Option<String>,
    pub time_window: Option<TimeWindow>,
}

impl StopPatch {
    pub(crate) fn apply(self, stop: &mut Stop) {
        if let Some(address) = self.address {
            stop.address = address;
        }
        if let Some(lat) = self.lat {
            stop.lat = lat;
        }
        if let Some(lng) = self.lng {
            stop.lng = lng;
        }
        if let Some(stop_type) = self.stop_type {
            stop.stop_type = stop_type;
        }
        if let Some(comment) = self.comment {
            stop.comment = Some(comment).filter(|c| !c.trim().is_empty());
        }
        if let Some(window) = self.time_window {
            stop.time_window = Some(window).filter(TimeWindow::is_complete);
        }
    }
}
