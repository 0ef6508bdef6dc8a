//! Services module
//! 
//! Este módulo contiene la lógica de negocio del ciclo de optimización:
//! armado del request, llamada al optimizador externo, reconciliación del
//! orden de visita y exportación de la hoja de ruta.

pub mod ors_optimization_service;
pub mod request_builder;
pub mod route_envelope;
pub mod route_planner;
pub mod route_reconciler;
pub mod route_sheet;

pub use ors_optimization_service::{OptimizationTransport, OrsOptimizationService};
pub use route_planner::{PlannerStatus, RoutePlanner};
