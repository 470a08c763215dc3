//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto salvo las credenciales.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::services::NavigationSettings;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub redis_url: Option<String>,
    pub cache_key_prefix: String,
    pub nominatim_url: String,
    pub osrm_url: String,
    pub weather_api_url: String,
    pub weather_api_key: Option<String>,
    pub http_timeout_secs: u64,
    pub max_route_distance_km: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            redis_url: None,
            cache_key_prefix: "cluster_navigation".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            osrm_url: "https://router.project-osrm.org".to_string(),
            weather_api_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            weather_api_key: None,
            http_timeout_secs: 10,
            max_route_distance_km: 1000.0,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno, usando los valores por defecto
    /// para las variables ausentes
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            redis_url: optional_var("REDIS_URL"),
            cache_key_prefix: env::var("CACHE_KEY_PREFIX").unwrap_or(defaults.cache_key_prefix),
            nominatim_url: env::var("NOMINATIM_URL").unwrap_or(defaults.nominatim_url),
            osrm_url: env::var("OSRM_URL").unwrap_or(defaults.osrm_url),
            weather_api_url: env::var("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            weather_api_key: optional_var("WEATHER_API_KEY"),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            max_route_distance_km: parse_var("MAX_ROUTE_DISTANCE_KM", defaults.max_route_distance_km)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Configuración de Redis, si hay `REDIS_URL`
    pub fn cache_config(&self) -> Option<CacheConfig> {
        self.redis_url.as_ref().map(|url| CacheConfig {
            redis_url: url.clone(),
            key_prefix: self.cache_key_prefix.clone(),
        })
    }

    pub fn navigation_settings(&self) -> NavigationSettings {
        NavigationSettings {
            max_route_distance_km: self.max_route_distance_km,
            ..NavigationSettings::default()
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
