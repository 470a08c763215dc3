use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::navigation_controller::NavigationController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::navigation_dto::{
    PositionRequest, ProgressResponse, RouteRequest, RouteResponse, SearchQuery, SearchResponse,
};
use crate::models::RouteInfo;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_navigation_router() -> Router<AppState> {
    Router::new()
        .route("/route", post(resolve_route).get(current_route).delete(clear_route))
        .route("/route/update", post(update_route))
        .route("/destination", get(current_destination))
        .route("/progress", get(route_progress))
        .route("/search", get(search_locations))
}

async fn resolve_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = NavigationController::new(state.navigation.clone());
    let response = controller.resolve(request).await?;
    Ok(Json(response))
}

async fn update_route(
    State(state): State<AppState>,
    Json(request): Json<PositionRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = NavigationController::new(state.navigation.clone());
    let response = controller.update_position(request).await?;
    Ok(Json(response))
}

async fn current_route(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RouteInfo>>, AppError> {
    let controller = NavigationController::new(state.navigation.clone());
    let response = controller.current_route().await?;
    Ok(Json(response))
}

async fn clear_route(State(state): State<AppState>) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NavigationController::new(state.navigation.clone());
    let response = controller.clear_route().await?;
    Ok(Json(response))
}

async fn current_destination(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let controller = NavigationController::new(state.navigation.clone());
    let response = controller.destination().await?;
    Ok(Json(response))
}

async fn route_progress(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProgressResponse>>, AppError> {
    let controller = NavigationController::new(state.navigation.clone());
    let response = controller.progress().await?;
    Ok(Json(response))
}

async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, AppError> {
    let controller = NavigationController::new(state.navigation.clone());
    let response = controller.search(query).await?;
    Ok(Json(response))
}
