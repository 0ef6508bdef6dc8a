//! Sesión de planificación de una ruta
//!
//! Junta la lista de paradas, la última ruta calculada y el estado del ciclo
//! `Idle -> Requesting -> Succeeded | Failed`. `optimize` toma `&mut self`,
//! así que una misma sesión nunca tiene dos optimizaciones en vuelo.

use serde::Serialize;

use crate::models::route::RouteEnvelope;
use crate::models::stop::{Stop, StopPatch};
use crate::models::stop_list::StopList;
use crate::services::ors_optimization_service::OptimizationTransport;
use crate::services::request_builder::build_optimization_request;
use crate::services::route_envelope::assemble_route_envelope;
use crate::services::route_reconciler::reconcile_visit_order;
use crate::utils::errors::{AppResult, OptimizationError};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum PlannerStatus {
    #[default]
    Idle,
    Requesting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RoutePlanner {
    stops: StopList,
    route: Option<RouteEnvelope>,
    status: PlannerStatus,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stops(stops: Vec<Stop>) -> Self {
        Self {
            stops: StopList::from_stops(stops),
            ..Self::default()
        }
    }

    pub fn stops(&self) -> &StopList {
        &self.stops
    }

    pub fn route(&self) -> Option<&RouteEnvelope> {
        self.route.as_ref()
    }

    pub fn status(&self) -> &PlannerStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == PlannerStatus::Requesting
    }

    pub fn into_parts(self) -> (Vec<Stop>, Option<RouteEnvelope>) {
        (self.stops.into_vec(), self.route)
    }

    pub fn add_stop(&mut self, stop: Stop) -> &Stop {
        self.invalidate_route();
        self.stops.add(stop)
    }

    pub fn update_stop(&mut self, id: &str, patch: StopPatch) -> AppResult<&Stop> {
        self.invalidate_route();
        self.stops.update(id, patch)
    }

    pub fn remove_stop(&mut self, id: &str) -> AppResult<Stop> {
        self.invalidate_route();
        self.stops.remove(id)
    }

    pub fn set_depot(&mut self, id: &str) -> AppResult<()> {
        self.invalidate_route();
        self.stops.set_depot(id)
    }

    /// Reemplaza todas las paradas (carga de una ruta guardada)
    pub fn load(&mut self, stops: Vec<Stop>) {
        self.stops = StopList::from_stops(stops);
        self.invalidate_route();
    }

    /// Ejecuta un ciclo completo de optimización.
    ///
    /// Los órdenes anteriores se borran antes de llamar al optimizador. Si la
    /// llamada falla, la ruta anterior queda como estaba y el estado pasa a
    /// `Failed`. Con menos de 2 paradas no se hace nada.
    pub async fn optimize<T>(
        &mut self,
        transport: &T,
        start_time: &str,
    ) -> Result<&RouteEnvelope, OptimizationError>
    where
        T: OptimizationTransport + ?Sized,
    {
        if self.stops.len() < 2 {
            return Err(OptimizationError::NotEnoughStops(self.stops.len()));
        }

        self.stops.clear_orders();
        self.status = PlannerStatus::Requesting;

        match self.run_cycle(transport, start_time).await {
            Ok((stops, envelope)) => {
                log::info!(
                    "✅ Ruta optimizada: {:.1} km, {} min, {} pasos",
                    envelope.distance_km(),
                    envelope.duration_minutes(),
                    envelope.steps.len()
                );
                self.stops.replace(stops);
                self.status = PlannerStatus::Succeeded;
                Ok(&*self.route.insert(envelope))
            }
            Err(e) => {
                log::error!("❌ Error al optimizar la ruta: {}", e);
                self.status = PlannerStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_cycle<T>(
        &self,
        transport: &T,
        start_time: &str,
    ) -> Result<(Vec<Stop>, RouteEnvelope), OptimizationError>
    where
        T: OptimizationTransport + ?Sized,
    {
        let prepared = build_optimization_request(self.stops.as_slice(), start_time)?;
        let response = transport.submit(&prepared.request).await?;
        let envelope = assemble_route_envelope(response, &prepared.jobs)?;

        let mut stops = self.stops.as_slice().to_vec();
        reconcile_visit_order(&mut stops, &prepared.jobs, &envelope.steps);

        Ok((stops, envelope))
    }

    fn invalidate_route(&mut self) {
        self.route = None;
        self.status = PlannerStatus::Idle;
    }
}
