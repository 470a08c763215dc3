//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Motivos por los que una resolución de ruta no produjo una ruta real
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Start location is not set")]
    UnsetStart,

    #[error("Start location ({latitude}, {longitude}) is out of range")]
    InvalidStart { latitude: f64, longitude: f64 },

    #[error("No location found for '{0}'")]
    DestinationNotFound(String),

    #[error("Geocoding failed: {0}")]
    Geocoding(String),

    #[error("Destination ({latitude}, {longitude}) is out of range")]
    InvalidDestination { latitude: f64, longitude: f64 },

    #[error("Destination is {distance_km:.1} km away (limit {limit_km:.0} km)")]
    TooFar { distance_km: f64, limit_km: f64 },

    #[error("Routing provider error: {0}")]
    Provider(String),

    #[error("No active destination")]
    NoActiveDestination,
}

impl RouteError {
    /// Solo los fallos del proveedor de rutas activan la degradación
    pub fn is_transient(&self) -> bool {
        matches!(self, RouteError::Provider(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            RouteError::UnsetStart => "UNSET_START",
            RouteError::InvalidStart { .. } => "INVALID_START",
            RouteError::DestinationNotFound(_) => "DESTINATION_NOT_FOUND",
            RouteError::Geocoding(_) => "GEOCODING_FAILED",
            RouteError::InvalidDestination { .. } => "INVALID_DESTINATION",
            RouteError::TooFar { .. } => "DESTINATION_TOO_FAR",
            RouteError::Provider(_) => "ROUTING_PROVIDER_ERROR",
            RouteError::NoActiveDestination => "NO_ACTIVE_DESTINATION",
        }
    }
}

/// Errores del almacén clave-valor
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        CacheError::Backend(e.to_string())
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                log::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                log::warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                log::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }

            AppError::Cache(e) => {
                log::error!("Cache error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Service Unavailable".to_string(),
                        message: "The route cache is not available".to_string(),
                        details: Some(json!({ "cache_error": e.to_string() })),
                        code: Some("CACHE_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
