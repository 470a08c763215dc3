use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::weather_controller::{DashboardController, WeatherController};
use crate::dto::common_dto::ApiResponse;
use crate::dto::navigation_dto::PositionRequest;
use crate::dto::weather_dto::{DashboardResponse, LocationQuery};
use crate::models::WeatherData;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_weather_router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_weather))
        .route("/refresh", post(refresh_weather))
        .route("/cache", delete(clear_weather_cache))
}

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<WeatherData>>, AppError> {
    let controller = WeatherController::new(state.weather.clone());
    let response = controller.current(query).await?;
    Ok(Json(response))
}

async fn refresh_weather(
    State(state): State<AppState>,
    Json(request): Json<PositionRequest>,
) -> Result<Json<ApiResponse<WeatherData>>, AppError> {
    let controller = WeatherController::new(state.weather.clone());
    let response = controller.refresh(request).await?;
    Ok(Json(response))
}

async fn clear_weather_cache(State(state): State<AppState>) -> Json<ApiResponse<()>> {
    let controller = WeatherController::new(state.weather.clone());
    Json(controller.clear_cache().await)
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<DashboardResponse>>, AppError> {
    let controller = DashboardController::new(state.navigation.clone(), state.weather.clone());
    let response = controller.overview(query).await?;
    Ok(Json(response))
}
