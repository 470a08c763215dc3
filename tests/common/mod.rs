#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cluster_navigation::cache::{KeyValueStore, MemoryStore, NavigationCache};
use cluster_navigation::models::{BoundingBox, Coordinate, SearchResult, WeatherData};
use cluster_navigation::services::{
    GeocodingProvider, NavigationService, NavigationSettings, ProviderRoute, RoutingProvider,
    WeatherProvider, WeatherService,
};

pub fn place(name: &str, latitude: f64, longitude: f64) -> SearchResult {
    SearchResult {
        display_name: name.to_string(),
        coordinate: Coordinate::new(latitude, longitude),
        place_type: "attraction".to_string(),
    }
}

/// Geocoder con respuesta fija y contador de llamadas
pub struct FakeGeocoder {
    response: Mutex<Result<Vec<SearchResult>, String>>,
    last_viewbox: Mutex<Option<BoundingBox>>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn returning(results: Vec<SearchResult>) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(results)),
            last_viewbox: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let geocoder = Self::returning(Vec::new());
        geocoder.fail_with(message);
        geocoder
    }

    pub fn respond_with(&self, results: Vec<SearchResult>) {
        *self.response.lock().unwrap() = Ok(results);
    }

    pub fn fail_with(&self, message: &str) {
        *self.response.lock().unwrap() = Err(message.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_viewbox(&self) -> Option<BoundingBox> {
        *self.last_viewbox.lock().unwrap()
    }
}

#[async_trait]
impl GeocodingProvider for FakeGeocoder {
    async fn search(&self, _query: &str, viewbox: Option<BoundingBox>) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_viewbox.lock().unwrap() = viewbox;
        self.response.lock().unwrap().clone().map_err(|e| anyhow!(e))
    }
}

/// Proveedor de rutas con respuesta fija y contador de llamadas
pub struct FakeRouter {
    response: Mutex<Result<ProviderRoute, String>>,
    calls: AtomicUsize,
}

impl FakeRouter {
    pub fn returning(route: ProviderRoute) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(route)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(message.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn fail_with(&self, message: &str) {
        *self.response.lock().unwrap() = Err(message.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingProvider for FakeRouter {
    async fn route(&self, _origin: Coordinate, _destination: Coordinate) -> Result<ProviderRoute> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().unwrap().clone().map_err(|e| anyhow!(e))
    }
}

pub struct FakeWeather {
    response: Mutex<Result<WeatherData, String>>,
    calls: AtomicUsize,
}

impl FakeWeather {
    pub fn returning(weather: WeatherData) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(weather)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current(&self, _coordinate: Coordinate) -> Result<WeatherData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().unwrap().clone().map_err(|e| anyhow!(e))
    }
}

pub fn sunny() -> WeatherData {
    WeatherData {
        temperature: 21.5,
        description: "clear sky".to_string(),
        icon: "01d".to_string(),
        humidity: 40,
        wind_speed: 3.2,
    }
}

/// Times Square -> Brooklyn Bridge, geometría en (lat, lon)
pub fn manhattan_route() -> ProviderRoute {
    ProviderRoute {
        distance_meters: 8460.0,
        duration_seconds: 1260.4,
        geometry: vec![
            Coordinate::new(40.7580, -73.9855),
            Coordinate::new(40.7306, -73.9866),
            Coordinate::new(40.7061, -73.9969),
        ],
    }
}

pub fn times_square() -> Coordinate {
    Coordinate::new(40.7580, -73.9855)
}

pub fn brooklyn_bridge() -> SearchResult {
    place("Brooklyn Bridge, New York", 40.7061, -73.9969)
}

pub struct Harness {
    pub geocoder: Arc<FakeGeocoder>,
    pub router: Arc<FakeRouter>,
    pub store: Arc<dyn KeyValueStore>,
    pub service: NavigationService,
}

impl Harness {
    pub fn new(geocoder: Arc<FakeGeocoder>, router: Arc<FakeRouter>) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let service = NavigationService::new(
            geocoder.clone(),
            router.clone(),
            NavigationCache::new(store.clone()),
            NavigationSettings::default(),
        );

        Self {
            geocoder,
            router,
            store,
            service,
        }
    }

    /// Caché independiente sobre el mismo almacén, para sembrar o inspeccionar
    pub fn cache(&self) -> NavigationCache {
        NavigationCache::new(self.store.clone())
    }

    pub fn weather(&self, provider: Arc<FakeWeather>) -> WeatherService {
        WeatherService::new(provider, self.store.clone())
    }
}
