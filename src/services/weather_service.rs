//! Servicio de clima
//!
//! Dos niveles de cache: memoria (10 minutos) y almacén persistente
//! (30 minutos) usado solo cuando falla el proveedor.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{KeyValueStore, TimedCache};
use crate::models::{Coordinate, WeatherData};

pub const KEY_LAST_WEATHER: &str = "last_weather";
pub const MEMORY_TTL: Duration = Duration::from_secs(10 * 60);
pub const PERSISTED_TTL: Duration = Duration::from_secs(30 * 60);

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, coordinate: Coordinate) -> Result<WeatherData>;
}

#[derive(Deserialize)]
struct OpenWeatherResponse {
    main: OpenWeatherMain,
    weather: Vec<OpenWeatherCondition>,
    wind: OpenWeatherWind,
}

#[derive(Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    humidity: u32,
}

#[derive(Deserialize)]
struct OpenWeatherCondition {
    description: String,
    icon: String,
}

#[derive(Deserialize)]
struct OpenWeatherWind {
    speed: f64,
}

pub fn parse_weather_response(body: &str) -> Result<WeatherData> {
    let response: OpenWeatherResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse weather response: {}", e))?;

    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Weather response has no conditions"))?;

    Ok(WeatherData {
        temperature: response.main.temp,
        description: condition.description,
        icon: condition.icon,
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
    })
}

pub struct OpenWeatherService {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenWeatherService {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherService {
    async fn current(&self, coordinate: Coordinate) -> Result<WeatherData> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("WEATHER_API_KEY is not configured"))?;

        log::info!(
            "🌤️ Fetching weather for ({}, {})",
            coordinate.latitude,
            coordinate.longitude
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(anyhow!("Weather API error {}: {}", status, body));
        }

        parse_weather_response(&body)
    }
}

pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn KeyValueStore>,
    memory: TimedCache<WeatherData>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            provider,
            store,
            memory: TimedCache::new("weather", MEMORY_TTL),
        }
    }

    pub async fn current_weather(&self, coordinate: Coordinate) -> Option<WeatherData> {
        if let Some(cached) = self.memory.get().await {
            log::debug!("📥 Weather served from memory: {}°C", cached.temperature);
            return Some(cached);
        }

        if !coordinate.is_in_range() || coordinate.is_unset() {
            log::warn!("⚠️ No usable location for weather: {:?}", coordinate);
            return None;
        }

        match self.provider.current(coordinate).await {
            Ok(weather) => {
                log::info!(
                    "✅ Weather received: {}°C, {}",
                    weather.temperature,
                    weather.description
                );
                self.memory.put(weather.clone()).await;
                self.persist(&weather).await;
                Some(weather)
            }
            Err(e) => {
                log::error!("❌ Error getting weather: {}", e);
                self.load_persisted().await
            }
        }
    }

    pub async fn force_refresh(&self, coordinate: Coordinate) -> Option<WeatherData> {
        self.clear_cache().await;
        self.current_weather(coordinate).await
    }

    pub async fn clear_cache(&self) {
        self.memory.clear().await;
    }

    async fn persist(&self, weather: &WeatherData) {
        let json = match serde_json::to_string(weather) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("⚠️ Could not serialize weather: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .store
            .set(KEY_LAST_WEATHER, json, Some(PERSISTED_TTL))
            .await
        {
            log::warn!("⚠️ Could not persist weather: {}", e);
        }
    }

    async fn load_persisted(&self) -> Option<WeatherData> {
        let raw = match self.store.get(KEY_LAST_WEATHER).await {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("⚠️ Weather cache read failed: {}", e);
                return None;
            }
        };
        serde_json::from_str(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeWeather {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl WeatherProvider for FakeWeather {
        async fn current(&self, _coordinate: Coordinate) -> Result<WeatherData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            Ok(WeatherData {
                temperature: 21.5,
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
                humidity: 40,
                wind_speed: 3.2,
            })
        }
    }

    fn fake(fail: bool) -> Arc<FakeWeather> {
        Arc::new(FakeWeather {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    const PARIS: Coordinate = Coordinate {
        latitude: 48.8566,
        longitude: 2.3522,
    };

    #[test]
    fn test_parse_openweather() {
        let body = r#"{
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 18.3, "feels_like": 17.9, "humidity": 55},
            "wind": {"speed": 4.1, "deg": 250}
        }"#;
        let weather = parse_weather_response(body).unwrap();
        assert_eq!(weather.temperature, 18.3);
        assert_eq!(weather.icon, "01d");
        assert_eq!(weather.humidity, 55);
        assert_eq!(weather.wind_speed, 4.1);
    }

    #[tokio::test]
    async fn test_memory_hit_skips_provider() {
        let provider = fake(false);
        let service = WeatherService::new(provider.clone(), Arc::new(MemoryStore::new()));

        assert!(service.current_weather(PARIS).await.is_some());
        assert!(service.current_weather(PARIS).await.is_some());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        service.force_refresh(PARIS).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_uses_persisted_value() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let warm = WeatherService::new(fake(false), store.clone());
        let expected = warm.current_weather(PARIS).await;

        let failing = WeatherService::new(fake(true), store);
        assert_eq!(failing.current_weather(PARIS).await, expected);
    }

    #[tokio::test]
    async fn test_failure_without_cache_is_none() {
        let service = WeatherService::new(fake(true), Arc::new(MemoryStore::new()));
        assert_eq!(service.current_weather(PARIS).await, None);
    }

    #[tokio::test]
    async fn test_unset_location_skips_provider() {
        let provider = fake(false);
        let service = WeatherService::new(provider.clone(), Arc::new(MemoryStore::new()));
        assert_eq!(service.current_weather(Coordinate::new(0.0, 0.0)).await, None);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
