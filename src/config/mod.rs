//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración
//! de los proveedores externos.

pub mod environment;

pub use environment::*;
