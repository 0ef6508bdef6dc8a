//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::saved_route_repository::RouteStore;
use crate::services::ors_optimization_service::OptimizationTransport;
use crate::services::route_planner::RoutePlanner;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub optimizer: Arc<dyn OptimizationTransport>,
    pub store: Arc<dyn RouteStore>,
    /// Sesión de planificación compartida; el lock serializa las optimizaciones
    pub planner: Arc<Mutex<RoutePlanner>>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        optimizer: Arc<dyn OptimizationTransport>,
        store: Arc<dyn RouteStore>,
    ) -> Self {
        Self {
            config,
            optimizer,
            store,
            planner: Arc::new(Mutex::new(RoutePlanner::new())),
        }
    }
}
