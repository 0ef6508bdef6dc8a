//! Modelo de ruta optimizada
//!
//! `RouteEnvelope` es el resultado normalizado de una llamada al optimizador.
//! Cada llamada produce uno nuevo que reemplaza (nunca se mezcla con) el anterior.

use serde::{Deserialize, Deserializer, Serialize};

/// Par `[lat, lng]`, el orden que usa el mapa
pub type LatLng = [f64; 2];

/// Paso de la ruta devuelto por el optimizador
///
/// Se decodifica una sola vez en la frontera de la respuesta; los tipos que
/// no nos interesan (pausas, etc.) caen en `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Start,
    Job {
        /// Identificador 1-based del trabajo enviado, no de la parada.
        /// `None` si vino ausente o no es un entero no negativo.
        #[serde(
            default,
            deserialize_with = "lenient_job_id",
            skip_serializing_if = "Option::is_none"
        )]
        id: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arrival: Option<u64>,
    },
    End,
    #[serde(other)]
    Other,
}

impl Step {
    pub fn job(id: usize) -> Self {
        Step::Job { id: Some(id), arrival: None }
    }

    pub fn job_id(&self) -> Option<usize> {
        match self {
            Step::Job { id, .. } => *id,
            _ => None,
        }
    }
}

fn lenient_job_id<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.as_u64())
        .and_then(|id| usize::try_from(id).ok()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEnvelope {
    /// Distancia total en metros
    pub distance: f64,
    /// Duración total en segundos
    pub duration: f64,
    pub geometry: Vec<LatLng>,
    pub steps: Vec<Step>,
    /// Paradas que el optimizador dejó fuera de la ruta
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassigned_stop_ids: Vec<String>,
}

impl RouteEnvelope {
    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.duration / 60.0).round() as i64
    }

    /// Identificadores de trabajo en el orden de visita
    pub fn job_sequence(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().filter_map(Step::job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_decoding_ignores_extra_fields() {
        let steps: Vec<Step> = serde_json::from_value(json!([
            { "type": "start", "location": [-57.95, -34.92], "arrival": 28800 },
            { "type": "job", "id": 3, "location": [-57.9, -34.9], "arrival": 29400, "service": 600 },
            { "type": "break", "id": 1 },
            { "type": "end", "location": [-57.95, -34.92] }
        ]))
        .unwrap();

        assert_eq!(
            steps,
            vec![
                Step::Start,
                Step::Job { id: Some(3), arrival: Some(29_400) },
                Step::Other,
                Step::End,
            ]
        );
    }

    #[test]
    fn test_job_without_usable_id_still_decodes() {
        let steps: Vec<Step> = serde_json::from_value(json!([
            { "type": "job" },
            { "type": "job", "id": -1 },
            { "type": "job", "id": "2" },
            { "type": "job", "id": 2 }
        ]))
        .unwrap();

        assert_eq!(steps.iter().map(Step::job_id).collect::<Vec<_>>(), vec![None, None, None, Some(2)]);
    }

    #[test]
    fn test_step_serializes_tagged() {
        assert_eq!(serde_json::to_value(Step::job(2)).unwrap(), json!({ "type": "job", "id": 2 }));
        assert_eq!(serde_json::to_value(Step::Start).unwrap(), json!({ "type": "start" }));
    }

    #[test]
    fn test_envelope_summary() {
        let route = RouteEnvelope {
            distance: 12_345.0,
            duration: 1_830.0,
            geometry: vec![],
            steps: vec![Step::Start, Step::job(2), Step::job(1), Step::End],
            unassigned_stop_ids: vec![],
        };

        assert!((route.distance_km() - 12.345).abs() < 1e-9);
        assert_eq!(route.duration_minutes(), 31);
        assert_eq!(route.job_sequence().collect::<Vec<_>>(), vec![2, 1]);
    }
}
