//! Modelos de datos
//!
//! Paradas, rutas optimizadas y rutas guardadas.

pub mod route;
pub mod saved_route;
pub mod stop;
pub mod stop_list;

pub use route::{LatLng, RouteEnvelope, Step};
pub use saved_route::{FleetStats, SavedRoute, SavedRouteSummary};
pub use stop::{Stop, StopPatch, StopType, TimeWindow};
pub use stop_list::StopList;
