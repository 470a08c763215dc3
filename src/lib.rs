//! Cluster Navigation
//!
//! Capa de datos del dashboard del cluster: resolución de rutas con
//! degradación a ruta sintética o en cache, búsqueda de lugares cercanos
//! y clima, expuestos por una API HTTP.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
