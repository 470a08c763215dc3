use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::navigation_dto::PositionRequest;
use crate::dto::weather_dto::{DashboardResponse, LocationQuery};
use crate::models::WeatherData;
use crate::services::{NavigationService, WeatherService};
use crate::utils::errors::{bad_request_error, AppError};

pub struct WeatherController {
    weather: Arc<WeatherService>,
}

impl WeatherController {
    pub fn new(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }

    pub async fn current(&self, query: LocationQuery) -> Result<ApiResponse<WeatherData>, AppError> {
        query.validate()?;
        let coordinate = query
            .coordinate()
            .ok_or_else(|| bad_request_error("lat y lon son requeridos"))?;

        self.weather
            .current_weather(coordinate)
            .await
            .map(ApiResponse::success)
            .ok_or_else(|| AppError::NotFound("Clima no disponible".to_string()))
    }

    pub async fn refresh(&self, request: PositionRequest) -> Result<ApiResponse<WeatherData>, AppError> {
        request.validate()?;

        self.weather
            .force_refresh(request.coordinate())
            .await
            .map(ApiResponse::success)
            .ok_or_else(|| AppError::NotFound("Clima no disponible".to_string()))
    }

    pub async fn clear_cache(&self) -> ApiResponse<()> {
        self.weather.clear_cache().await;
        ApiResponse::success_with_message((), "Cache de clima limpiado".to_string())
    }
}

/// Vista agregada de la pantalla principal
pub struct DashboardController {
    navigation: Arc<NavigationService>,
    weather: Arc<WeatherService>,
}

impl DashboardController {
    pub fn new(navigation: Arc<NavigationService>, weather: Arc<WeatherService>) -> Self {
        Self { navigation, weather }
    }

    pub async fn overview(&self, query: LocationQuery) -> Result<ApiResponse<DashboardResponse>, AppError> {
        query.validate()?;

        let weather = async {
            match query.coordinate() {
                Some(coordinate) => self.weather.current_weather(coordinate).await,
                None => None,
            }
        };

        let (weather, route, destination, progress) = tokio::join!(
            weather,
            self.navigation.cached_route(),
            self.navigation.current_destination(),
            self.navigation.route_progress(Utc::now()),
        );

        Ok(ApiResponse::success(DashboardResponse {
            weather,
            route,
            destination,
            progress,
        }))
    }
}
