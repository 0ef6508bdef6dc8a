pub mod planner_controller;
pub mod route_optimization_controller;
pub mod saved_route_controller;
