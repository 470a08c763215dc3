use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

use crate::models::{BoundingBox, Coordinate, SearchResult};

/// Proveedor de geocodificación: texto libre -> lugares ordenados por relevancia
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn search(&self, query: &str, viewbox: Option<BoundingBox>) -> Result<Vec<SearchResult>>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    #[serde(deserialize_with = "number_or_string")]
    lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    lon: f64,
    #[serde(rename = "type", default)]
    place_type: Option<String>,
}

/// Nominatim devuelve lat/lon como strings
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Decodificar la respuesta JSON de `/search`
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse geocoding response: {}", e))?;

    Ok(places
        .into_iter()
        .map(|place| SearchResult {
            display_name: place.display_name,
            coordinate: Coordinate::new(place.lat, place.lon),
            place_type: place.place_type.unwrap_or_else(|| "place".to_string()),
        })
        .collect())
}

pub struct NominatimGeocodingService {
    base_url: String,
    client: reqwest::Client,
}

impl NominatimGeocodingService {
    pub const MAX_RESULTS: usize = 10;

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("ClusterNavigation/1.0")
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn search_url(&self, query: &str, viewbox: Option<BoundingBox>) -> String {
        let mut url = format!(
            "{}/search?q={}&format=json&limit={}",
            self.base_url,
            urlencoding::encode(query),
            Self::MAX_RESULTS
        );
        if let Some(bbox) = viewbox {
            url.push_str(&format!("&viewbox={}&bounded=1", bbox.to_viewbox()));
        }
        url
    }
}

#[async_trait]
impl GeocodingProvider for NominatimGeocodingService {
    async fn search(&self, query: &str, viewbox: Option<BoundingBox>) -> Result<Vec<SearchResult>> {
        log::info!("🗺️ Geocoding query: {}", query);

        let url = self.search_url(query, viewbox);
        log::debug!("🌐 Making request to: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Geocoding failed with status {}: {}", status, error_text);
            return Err(anyhow!("Geocoding failed: {}", status));
        }

        let body = response.text().await?;
        let results = parse_search_response(&body)?;

        log::info!("✅ Geocoding '{}' returned {} results", query, results.len());
        Ok(results)
    }
}
