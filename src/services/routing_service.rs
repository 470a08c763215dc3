//! Servicio de rutas (OSRM)
//!
//! Este módulo maneja la comunicación con la API de rutas de OSRM y
//! decodifica la geometría `[lon, lat]` a coordenadas `(lat, lon)`.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::models::Coordinate;

/// Ruta tal como la entrega el proveedor, ya decodificada
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<Coordinate>,
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn route(&self, origin: Coordinate, destination: Coordinate) -> Result<ProviderRoute>;
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64, // metros
    duration: f64, // segundos
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>, // [lon, lat]
}

/// Decodificar la respuesta de `/route/v1`
pub fn parse_route_response(body: &str) -> Result<ProviderRoute> {
    let response: OsrmResponse =
        serde_json::from_str(body).map_err(|e| anyhow!("Failed to parse route response: {}", e))?;

    if response.code != "Ok" {
        return Err(anyhow!(
            "Routing API returned code {}: {}",
            response.code,
            response.message.unwrap_or_default()
        ));
    }

    let route = response
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or_else(|| anyhow!("No route found in success response"))?;

    let geometry = route
        .geometry
        .coordinates
        .iter()
        .map(|&[lon, lat]| Coordinate::new(lat, lon))
        .collect();

    Ok(ProviderRoute {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        geometry,
    })
}

/// Segmento `lon,lat;lon,lat` con 6 decimales
pub fn coordinates_path(origin: Coordinate, destination: Coordinate) -> String {
    format!(
        "{:.6},{:.6};{:.6},{:.6}",
        origin.longitude, origin.latitude, destination.longitude, destination.latitude
    )
}

pub struct OsrmRoutingService {
    base_url: String,
    client: Client,
}

impl OsrmRoutingService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("ClusterNavigation/1.0")
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/driving/{}?overview=full&geometries=geojson",
            self.base_url,
            coordinates_path(origin, destination)
        )
    }
}

#[async_trait]
impl RoutingProvider for OsrmRoutingService {
    async fn route(&self, origin: Coordinate, destination: Coordinate) -> Result<ProviderRoute> {
        let url = self.route_url(origin, destination);
        log::info!("📤 Requesting route: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        log::info!("📡 Routing response status: {}", status);

        if !status.is_success() {
            return Err(anyhow!("Routing API error {}: {}", status, response_text));
        }

        parse_route_response(&response_text)
    }
}
