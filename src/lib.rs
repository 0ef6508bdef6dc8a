//! GeoRoute: optimización del orden de visita de una ruta de reparto
//!
//! Arma el problema de ruteo a partir de las paradas, lo envía al
//! optimizador de openrouteservice y vuelve a numerar las paradas según la
//! secuencia devuelta.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
