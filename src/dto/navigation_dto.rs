use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Coordinate, RouteInfo, RouteResolution, RouteSource, SearchResult};

// Request para calcular una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct RouteRequest {
    #[validate(length(min = 1, max = 200))]
    pub destination: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl RouteRequest {
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

// Request con la posición actual del vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct PositionRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl PositionRequest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

// Query de búsqueda; lat/lon activan la búsqueda cercana
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 200))]
    pub q: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
}

impl SearchQuery {
    pub fn position(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

// Response de una resolución de ruta
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub route: Option<RouteInfo>,
    pub source: Option<RouteSource>,
    pub reason: Option<String>,
    pub reason_code: Option<String>,
}

impl From<RouteResolution> for RouteResponse {
    fn from(resolution: RouteResolution) -> Self {
        let source = resolution.source();
        let reason = resolution.reason().map(|r| r.to_string());
        let reason_code = resolution.reason().map(|r| r.code().to_string());

        Self {
            route: resolution.into_route(),
            source,
            reason,
            reason_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub destination: Option<String>,
    pub progress: f32,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub nearby: bool,
}
