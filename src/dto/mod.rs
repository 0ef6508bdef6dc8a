//! DTOs
//!
//! Formatos de intercambio con el optimizador externo y con el frontend.

pub mod ors_optimization_dto;
pub mod route_dto;
