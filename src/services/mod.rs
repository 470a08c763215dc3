//! Services module
//!
//! Este módulo contiene la lógica de negocio y los clientes de las APIs
//! externas (geocodificación, rutas, clima).

pub mod geocoding_service;
pub mod navigation_service;
pub mod routing_service;
pub mod weather_service;

pub use geocoding_service::{GeocodingProvider, NominatimGeocodingService};
pub use navigation_service::{NavigationService, NavigationSettings};
pub use routing_service::{OsrmRoutingService, ProviderRoute, RoutingProvider};
pub use weather_service::{OpenWeatherService, WeatherProvider, WeatherService};
