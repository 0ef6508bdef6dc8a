//! Reconciliación del orden de visita
//!
//! El optimizador devuelve pasos que apuntan a trabajos (1..N), no a
//! paradas. Acá se vuelve de cada trabajo a su parada usando el mismo
//! `JobIndex` con el que se armó el request y se numera la visita según
//! la posición del paso, no según el id del trabajo.

use crate::models::route::Step;
use crate::models::stop::Stop;
use crate::services::request_builder::JobIndex;

/// Resultado de una reconciliación
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub assigned: usize,
    pub skipped: usize,
}

/// Borra el orden y la llegada de todas las paradas.
pub fn clear_visit_orders(stops: &mut [Stop]) {
    stops.iter_mut().for_each(Stop::clear_visit);
}

/// Asigna el orden de visita 1, 2, 3... siguiendo los pasos `job`.
///
/// Primero limpia cualquier orden anterior. Un paso sin id, con un id fuera
/// de rango o que no corresponde a ninguna parada se ignora sin error y no
/// consume número de orden. El depósito nunca recibe orden.
pub fn reconcile_visit_order(stops: &mut [Stop], jobs: &JobIndex, steps: &[Step]) -> ReconcileSummary {
    clear_visit_orders(stops);

    let mut summary = ReconcileSummary::default();
    let mut counter: u32 = 1;

    for step in steps {
        let Step::Job { id, arrival } = step else {
            continue;
        };

        let stop = id
            .and_then(|id| jobs.stop_id(id))
            .and_then(|stop_id| stops.iter_mut().find(|s| s.id == stop_id));

        match stop {
            Some(stop) => {
                stop.order = Some(counter);
                stop.arrival = *arrival;
                counter += 1;
                summary.assigned += 1;
            }
            None => {
                log::warn!(
                    "⚠️ Trabajo {:?} sin parada correspondiente ({} trabajos enviados), se ignora",
                    id,
                    jobs.len()
                );
                summary.skipped += 1;
            }
        }
    }

    log::debug!(
        "🔢 Orden reconciliado: {} asignadas, {} ignoradas",
        summary.assigned,
        summary.skipped
    );

    summary
}
