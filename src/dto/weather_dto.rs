use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Coordinate, RouteInfo, WeatherData};

// Query con coordenadas opcionales (clima y dashboard)
#[derive(Debug, Deserialize, Validate)]
pub struct LocationQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
}

impl LocationQuery {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

// Response del dashboard principal del cluster
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub weather: Option<WeatherData>,
    pub route: Option<RouteInfo>,
    pub destination: Option<String>,
    pub progress: f32,
}
