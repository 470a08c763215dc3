//! Modelos de datos
//!
//! Este módulo contiene los structs del dominio de navegación y clima.

pub mod coordinate;
pub mod route;
pub mod weather;

pub use coordinate::{BoundingBox, Coordinate};
pub use route::{RouteInfo, RouteResolution, RouteSource, SearchResult};
pub use weather::WeatherData;
