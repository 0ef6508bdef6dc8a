pub mod saved_route_repository;

pub use saved_route_repository::{InMemoryRouteStore, RouteStore};
