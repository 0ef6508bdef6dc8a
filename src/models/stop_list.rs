//! Lista de paradas de una ruta
//!
//! Mantiene el invariante de un único depósito en cuanto hay al menos una
//! parada. Toda mutación borra el orden de visita calculado: deja de
//! corresponder con la ruta.

use serde::{Deserialize, Serialize};

use super::stop::{Stop, StopPatch};
use crate::utils::errors::{not_found_error, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopList {
    stops: Vec<Stop>,
}

impl StopList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carga paradas tal cual vienen (ruta guardada, request HTTP). Si
    /// ninguna está marcada como depósito, la primera pasa a serlo.
    pub fn from_stops(mut stops: Vec<Stop>) -> Self {
        if !stops.iter().any(|s| s.is_depot) {
            if let Some(first) = stops.first_mut() {
                log::warn!("⚠️ Ninguna parada marcada como depósito, se usa la primera: {}", first.id);
                first.is_depot = true;
            }
        }
        Self { stops }
    }

    pub fn as_slice(&self) -> &[Stop] {
        &self.stops
    }

    pub(crate) fn replace(&mut self, stops: Vec<Stop>) {
        self.stops = stops;
    }

    pub fn into_vec(self) -> Vec<Stop> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id == id)
    }

    pub fn depot(&self) -> Option<&Stop> {
        self.stops.iter().find(|s| s.is_depot)
    }

    /// Agrega una parada; la primera de la lista es el depósito.
    pub fn add(&mut self, mut stop: Stop) -> &Stop {
        stop.is_depot = self.stops.is_empty();
        self.clear_orders();
        log::debug!("📍 Parada agregada: {} ({})", stop.id, stop.address);
        self.stops.push(stop);
        &self.stops[self.stops.len() - 1]
    }

    pub fn update(&mut self, id: &str, patch: StopPatch) -> AppResult<&Stop> {
        let index = self.index_of(id)?;
        patch.apply(&mut self.stops[index]);
        self.clear_orders();
        Ok(&self.stops[index])
    }

    /// Quita una parada. Si era el depósito, la primera restante pasa a serlo.
    pub fn remove(&mut self, id: &str) -> AppResult<Stop> {
        let index = self.index_of(id)?;
        let removed = self.stops.remove(index);

        if removed.is_depot {
            if let Some(first) = self.stops.first_mut() {
                log::info!("🏭 Depósito eliminado, {} pasa a ser depósito", first.id);
                first.is_depot = true;
            }
        }

        self.clear_orders();
        Ok(removed)
    }

    pub fn set_depot(&mut self, id: &str) -> AppResult<()> {
        self.index_of(id)?;
        for stop in &mut self.stops {
            stop.is_depot = stop.id == id;
        }
        self.clear_orders();
        Ok(())
    }

    pub fn clear_orders(&mut self) {
        self.stops.iter_mut().for_each(Stop::clear_visit);
    }

    /// Orden para la hoja de ruta: lo que no tiene orden (el depósito) va
    /// primero; el resto por orden de visita. Orden estable ante empates.
    pub fn sorted_by_order(&self) -> Vec<&Stop> {
        let mut sorted: Vec<&Stop> = self.stops.iter().collect();
        sorted.sort_by_key(|s| s.order.unwrap_or(0));
        sorted
    }

    fn index_of(&self, id: &str) -> AppResult<usize> {
        self.stops
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found_error("Stop", id))
    }
}
