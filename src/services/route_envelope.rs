//! Armado del `RouteEnvelope`
//!
//! Une distancia y duración del optimizador con la geometría decodificada
//! y la lista de pasos tal como vino.

use crate::dto::ors_optimization_dto::OrsOptimizationResponse;
use crate::models::route::RouteEnvelope;
use crate::services::request_builder::JobIndex;
use crate::utils::errors::{OptimizationError, INFEASIBLE_HINT};
use crate::utils::polyline::decode_polyline;

/// Convierte la respuesta cruda en el resultado que consume el frontend.
///
/// Sin `routes[0]` no hay ruta: si además hay trabajos sin asignar el
/// problema era infactible (casi siempre por horarios), si no la
/// respuesta está mal formada.
pub fn assemble_route_envelope(
    response: OrsOptimizationResponse,
    jobs: &JobIndex,
) -> Result<RouteEnvelope, OptimizationError> {
    let unassigned_stop_ids: Vec<String> = response
        .unassigned
        .iter()
        .filter_map(|u| jobs.stop_id(u.id))
        .map(str::to_string)
        .collect();

    let Some(route) = response.routes.into_iter().next() else {
        if !response.unassigned.is_empty() {
            return Err(OptimizationError::Infeasible(format!(
                "{} de {} paradas sin asignar. {}",
                response.unassigned.len(),
                jobs.len(),
                INFEASIBLE_HINT
            )));
        }
        return Err(OptimizationError::MissingRoute);
    };

    if !unassigned_stop_ids.is_empty() {
        log::warn!(
            "⚠️ El optimizador dejó {} paradas fuera de la ruta: {:?}",
            unassigned_stop_ids.len(),
            unassigned_stop_ids
        );
    }

    let geometry = route.geometry.as_deref().map(decode_polyline).unwrap_or_default();

    Ok(RouteEnvelope {
        distance: route.distance,
        duration: route.duration,
        geometry,
        steps: route.steps,
        unassigned_stop_ids,
    })
}
