//! Middleware del sistema
//! 
//! Este módulo contiene el middleware HTTP compartido por todos los routers.

pub mod cors;

pub use cors::*;
