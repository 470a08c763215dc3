//! Modelo de Route
//!
//! Este módulo contiene RouteInfo (la ruta actual que muestra el cluster),
//! SearchResult (resultado de geocodificación) y el resultado tipado
//! de una resolución de ruta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use crate::utils::errors::RouteError;

/// Ruta calculada (real o sintética) hacia un destino
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub destination: String,
    pub eta: String,
    pub distance: String,
    /// Duración en segundos enteros
    pub duration: u64,
    pub polyline: Vec<Coordinate>,
    pub start_location: Coordinate,
    pub end_location: Coordinate,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Resultado de búsqueda del geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub display_name: String,
    pub coordinate: Coordinate,
    pub place_type: String,
}

/// Origen de la ruta devuelta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Live,
    Fallback,
    Cached,
    Unchanged,
}

/// Resultado de `NavigationService::resolve`
///
/// Cada variante de degradación conserva el motivo del fallo del
/// proveedor para que el llamador decida si mostrarlo.
#[derive(Debug)]
pub enum RouteResolution {
    Live(RouteInfo),
    /// La posición apenas cambió: se devuelve la ruta en cache tal cual
    Unchanged(RouteInfo),
    Fallback { route: RouteInfo, reason: RouteError },
    Cached { route: RouteInfo, reason: RouteError },
    Unavailable(RouteError),
}

impl RouteResolution {
    pub fn route(&self) -> Option<&RouteInfo> {
        match self {
            RouteResolution::Live(route)
            | RouteResolution::Unchanged(route)
            | RouteResolution::Fallback { route, .. }
            | RouteResolution::Cached { route, .. } => Some(route),
            RouteResolution::Unavailable(_) => None,
        }
    }

    pub fn into_route(self) -> Option<RouteInfo> {
        match self {
            RouteResolution::Live(route)
            | RouteResolution::Unchanged(route)
            | RouteResolution::Fallback { route, .. }
            | RouteResolution::Cached { route, .. } => Some(route),
            RouteResolution::Unavailable(_) => None,
        }
    }

    pub fn source(&self) -> Option<RouteSource> {
        match self {
            RouteResolution::Live(_) => Some(RouteSource::Live),
            RouteResolution::Unchanged(_) => Some(RouteSource::Unchanged),
            RouteResolution::Fallback { .. } => Some(RouteSource::Fallback),
            RouteResolution::Cached { .. } => Some(RouteSource::Cached),
            RouteResolution::Unavailable(_) => None,
        }
    }

    /// Motivo del fallo, si la ruta no es la real
    pub fn reason(&self) -> Option<&RouteError> {
        match self {
            RouteResolution::Live(_) | RouteResolution::Unchanged(_) => None,
            RouteResolution::Fallback { reason, .. }
            | RouteResolution::Cached { reason, .. }
            | RouteResolution::Unavailable(reason) => Some(reason),
        }
    }
}
