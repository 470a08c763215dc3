use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::navigation_dto::{
    PositionRequest, ProgressResponse, RouteRequest, RouteResponse, SearchQuery, SearchResponse,
};
use crate::models::{RouteInfo, RouteResolution};
use crate::services::NavigationService;
use crate::utils::errors::{bad_request_error, AppError};

pub struct NavigationController {
    service: Arc<NavigationService>,
}

impl NavigationController {
    pub fn new(service: Arc<NavigationService>) -> Self {
        Self { service }
    }

    pub async fn resolve(&self, request: RouteRequest) -> Result<ApiResponse<RouteResponse>, AppError> {
        request.validate()?;

        let destination = request.destination.trim();
        if destination.is_empty() {
            return Err(bad_request_error("El destino es requerido"));
        }

        let resolution = self.service.resolve(destination, request.start()).await;
        Ok(to_api_response(resolution))
    }

    pub async fn update_position(
        &self,
        request: PositionRequest,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        request.validate()?;

        let resolution = self.service.update_with_location(request.coordinate()).await;
        Ok(to_api_response(resolution))
    }

    pub async fn current_route(&self) -> Result<ApiResponse<RouteInfo>, AppError> {
        self.service
            .cached_route()
            .await
            .map(ApiResponse::success)
            .ok_or_else(|| AppError::NotFound("No hay ruta activa".to_string()))
    }

    pub async fn clear_route(&self) -> Result<ApiResponse<()>, AppError> {
        self.service.clear_current_route().await?;
        Ok(ApiResponse::success_with_message((), "Ruta eliminada".to_string()))
    }

    pub async fn destination(&self) -> Result<ApiResponse<String>, AppError> {
        self.service
            .current_destination()
            .await
            .map(ApiResponse::success)
            .ok_or_else(|| AppError::NotFound("No hay destino activo".to_string()))
    }

    pub async fn progress(&self) -> Result<ApiResponse<ProgressResponse>, AppError> {
        let destination = self.service.current_destination().await;
        let progress = self.service.route_progress(Utc::now()).await;

        Ok(ApiResponse::success(ProgressResponse {
            destination,
            progress,
        }))
    }

    pub async fn search(&self, query: SearchQuery) -> Result<ApiResponse<SearchResponse>, AppError> {
        query.validate()?;

        let text = query.q.trim();
        if text.is_empty() {
            return Err(bad_request_error("La búsqueda es requerida"));
        }

        let response = match query.position() {
            Some(position) => SearchResponse {
                results: self.service.search_nearby(text, position).await,
                nearby: true,
            },
            None => SearchResponse {
                results: self.service.search_locations(text).await,
                nearby: false,
            },
        };

        Ok(ApiResponse::success(response))
    }
}

/// Una resolución sin ruta no es un error HTTP: se informa el motivo
fn to_api_response(resolution: RouteResolution) -> ApiResponse<RouteResponse> {
    let has_route = resolution.route().is_some();
    let response = RouteResponse::from(resolution);

    match (has_route, response.reason.clone()) {
        (true, None) => ApiResponse::success(response),
        (true, Some(reason)) => ApiResponse::success_with_message(response, reason),
        (false, reason) => {
            let message = reason.unwrap_or_else(|| "No route available".to_string());
            ApiResponse::failure(response, message)
        }
    }
}
