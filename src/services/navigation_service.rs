//! Servicio de navegación
//!
//! Resuelve un destino en texto libre a una ruta: geocodificar, validar,
//! limitar distancia, pedir la ruta, formatear y persistir. Si falla el
//! proveedor de rutas se degrada a una ruta sintética, luego a la última
//! ruta en cache y finalmente a ninguna. Un destino que no se puede
//! geocodificar nunca recibe una ruta sintética.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::NavigationCache;
use crate::models::{BoundingBox, Coordinate, RouteInfo, RouteResolution, SearchResult};
use crate::services::geocoding_service::GeocodingProvider;
use crate::services::routing_service::{ProviderRoute, RoutingProvider};
use crate::utils::errors::{CacheError, RouteError};
use crate::utils::format::{format_distance, format_duration};
use crate::utils::geo::haversine_km;

/// Parámetros de la política de rutas
#[derive(Debug, Clone)]
pub struct NavigationSettings {
    pub max_route_distance_km: f64,
    /// Por debajo de esta distancia no se recalcula la ruta
    pub reroute_threshold_m: f64,
    /// Semiancho de la caja de búsqueda cercana, en grados
    pub nearby_box_degrees: f64,
    pub fallback_distance_m: f64,
    pub fallback_duration_secs: u64,
    pub fallback_offset_degrees: f64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            max_route_distance_km: 1000.0,
            reroute_threshold_m: 100.0,
            nearby_box_degrees: 1.0,
            fallback_distance_m: 5000.0,
            fallback_duration_secs: 15 * 60,
            fallback_offset_degrees: 0.05,
        }
    }
}

pub struct NavigationService {
    geocoder: Arc<dyn GeocodingProvider>,
    router: Arc<dyn RoutingProvider>,
    cache: NavigationCache,
    settings: NavigationSettings,
}

impl NavigationService {
    pub fn new(
        geocoder: Arc<dyn GeocodingProvider>,
        router: Arc<dyn RoutingProvider>,
        cache: NavigationCache,
        settings: NavigationSettings,
    ) -> Self {
        Self {
            geocoder,
            router,
            cache,
            settings,
        }
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Ruta al destino o `None` si no hay nada que mostrar
    pub async fn resolve_route(&self, destination: &str, start: Coordinate) -> Option<RouteInfo> {
        self.resolve(destination, start).await.into_route()
    }

    /// Resolución completa, con el origen de la ruta y el motivo de cualquier degradación
    pub async fn resolve(&self, destination: &str, start: Coordinate) -> RouteResolution {
        log::info!(
            "🧭 Resolving route to '{}' from ({:.6}, {:.6})",
            destination,
            start.latitude,
            start.longitude
        );

        let target = match self.locate_destination(destination, start).await {
            Ok(target) => target,
            Err(reason) => {
                log::warn!("⚠️ Route to '{}' rejected: {}", destination, reason);
                return RouteResolution::Unavailable(reason);
            }
        };

        match self.request_route(destination, start, target).await {
            Ok(route) => {
                self.persist(&route).await;
                log::info!("✅ Route to '{}': {}, {}", destination, route.eta, route.distance);
                RouteResolution::Live(route)
            }
            Err(reason) if reason.is_transient() => self.degrade(destination, start, reason).await,
            Err(reason) => RouteResolution::Unavailable(reason),
        }
    }

    /// Recalcular el destino activo desde una nueva posición
    pub async fn update_route_with_current_location(
        &self,
        position: Coordinate,
    ) -> Option<RouteInfo> {
        self.update_with_location(position).await.into_route()
    }

    pub async fn update_with_location(&self, position: Coordinate) -> RouteResolution {
        let Some(destination) = self.cache.current_destination().await else {
            log::debug!("No active destination, nothing to update");
            return RouteResolution::Unavailable(RouteError::NoActiveDestination);
        };

        if let Some(cached) = self.cache.load_route().await {
            let moved_m = haversine_km(cached.start_location, position) * 1000.0;
            if moved_m < self.settings.reroute_threshold_m {
                log::debug!("📍 Moved {:.0} m, keeping cached route", moved_m);
                return RouteResolution::Unchanged(cached);
            }
        }

        self.resolve(&destination, position).await
    }

    /// Búsqueda ordenada por cercanía a `current`, limitada al radio máximo
    pub async fn search_nearby(&self, query: &str, current: Coordinate) -> Vec<SearchResult> {
        if let Err(reason) = validate_start(current) {
            log::warn!("⚠️ Nearby search skipped: {}", reason);
            return Vec::new();
        }

        let viewbox = BoundingBox::around(current, self.settings.nearby_box_degrees);
        let results = match self.geocoder.search(query, Some(viewbox)).await {
            Ok(results) => results,
            Err(e) => {
                log::error!("❌ Nearby search for '{}' failed: {}", query, e);
                let cached = self.cache.load_search_results().await;
                return self.rank_by_distance(cached, current);
            }
        };

        let ranked = self.rank_by_distance(results, current);
        self.persist_search_results(&ranked).await;
        ranked
    }

    /// Búsqueda sin posición conocida, en orden de relevancia
    pub async fn search_locations(&self, query: &str) -> Vec<SearchResult> {
        match self.geocoder.search(query, None).await {
            Ok(results) => {
                self.persist_search_results(&results).await;
                results
            }
            Err(e) => {
                log::error!("❌ Search for '{}' failed: {}", query, e);
                self.cache.load_search_results().await
            }
        }
    }

    pub async fn current_destination(&self) -> Option<String> {
        self.cache.current_destination().await
    }

    pub async fn cached_route(&self) -> Option<RouteInfo> {
        self.cache.load_route().await
    }

    pub async fn cached_search_results(&self) -> Vec<SearchResult> {
        self.cache.load_search_results().await
    }

    pub async fn clear_current_route(&self) -> Result<(), CacheError> {
        self.cache.clear_route().await
    }

    /// Fracción del tiempo estimado ya transcurrido, en [0, 1]
    pub async fn route_progress(&self, now: DateTime<Utc>) -> f32 {
        match self.cache.load_route().await {
            Some(route) => progress_at(&route, now),
            None => 0.0,
        }
    }

    /// Pasos 1-3: validar el origen, geocodificar y comprobar el candidato
    async fn locate_destination(
        &self,
        destination: &str,
        start: Coordinate,
    ) -> Result<Coordinate, RouteError> {
        validate_start(start)?;

        let results = self
            .geocoder
            .search(destination, None)
            .await
            .map_err(|e| RouteError::Geocoding(e.to_string()))?;

        let candidate = results
            .first()
            .ok_or_else(|| RouteError::DestinationNotFound(destination.to_string()))?
            .coordinate;

        if !candidate.is_in_range() {
            return Err(RouteError::InvalidDestination {
                latitude: candidate.latitude,
                longitude: candidate.longitude,
            });
        }

        let distance_km = haversine_km(start, candidate);
        if distance_km > self.settings.max_route_distance_km {
            return Err(RouteError::TooFar {
                distance_km,
                limit_km: self.settings.max_route_distance_km,
            });
        }

        Ok(candidate)
    }

    /// Pasos 4-6: pedir la ruta y convertirla a RouteInfo
    async fn request_route(
        &self,
        destination: &str,
        start: Coordinate,
        target: Coordinate,
    ) -> Result<RouteInfo, RouteError> {
        let provided = self
            .router
            .route(start, target)
            .await
            .map_err(|e| RouteError::Provider(e.to_string()))?;

        Ok(build_route_info(destination, start, target, provided))
    }

    async fn degrade(&self, destination: &str, start: Coordinate, reason: RouteError) -> RouteResolution {
        log::warn!("⚠️ Routing to '{}' failed: {}", destination, reason);

        if let Some(route) = self.synthesize_fallback(destination, start) {
            self.persist(&route).await;
            log::info!("🛟 Using synthetic route to '{}'", destination);
            return RouteResolution::Fallback { route, reason };
        }

        match self.cache.load_route().await {
            Some(route) => {
                log::info!("📦 Using cached route to '{}'", route.destination);
                RouteResolution::Cached { route, reason }
            }
            None => {
                log::warn!("❌ No route available for '{}'", destination);
                RouteResolution::Unavailable(reason)
            }
        }
    }

    /// Ruta recta de distancia y duración fijas; `None` si el extremo cae fuera de rango
    fn synthesize_fallback(&self, destination: &str, start: Coordinate) -> Option<RouteInfo> {
        let offset = self.settings.fallback_offset_degrees;
        let end = start.offset(offset, offset);
        if !end.is_in_range() {
            return None;
        }

        let duration = self.settings.fallback_duration_secs;
        Some(RouteInfo {
            destination: destination.to_string(),
            eta: format_duration(duration),
            distance: format_distance(self.settings.fallback_distance_m),
            duration,
            polyline: vec![start, end],
            start_location: start,
            end_location: end,
            created_at: Utc::now(),
        })
    }

    async fn persist(&self, route: &RouteInfo) {
        if let Err(e) = self.cache.save_route(route).await {
            log::warn!("⚠️ Could not persist route to '{}': {}", route.destination, e);
        }
    }

    async fn persist_search_results(&self, results: &[SearchResult]) {
        if let Err(e) = self.cache.save_search_results(results).await {
            log::warn!("⚠️ Could not persist search results: {}", e);
        }
    }

    fn rank_by_distance(&self, results: Vec<SearchResult>, origin: Coordinate) -> Vec<SearchResult> {
        let mut ranked: Vec<(f64, SearchResult)> = results
            .into_iter()
            .filter(|r| r.coordinate.is_in_range())
            .map(|r| (haversine_km(origin, r.coordinate), r))
            .filter(|(d, _)| *d <= self.settings.max_route_distance_km)
            .collect();

        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked.into_iter().map(|(_, r)| r).collect()
    }
}

fn validate_start(start: Coordinate) -> Result<(), RouteError> {
    if start.is_unset() {
        return Err(RouteError::UnsetStart);
    }
    if !start.is_in_range() {
        return Err(RouteError::InvalidStart {
            latitude: start.latitude,
            longitude: start.longitude,
        });
    }
    Ok(())
}

fn build_route_info(
    destination: &str,
    start: Coordinate,
    target: Coordinate,
    provided: ProviderRoute,
) -> RouteInfo {
    let duration = provided.duration_seconds.max(0.0) as u64;
    let end_location = provided.geometry.last().copied().unwrap_or(target);

    RouteInfo {
        destination: destination.to_string(),
        eta: format_duration(duration),
        distance: format_distance(provided.distance_meters),
        duration,
        polyline: provided.geometry,
        start_location: start,
        end_location,
        created_at: Utc::now(),
    }
}

fn progress_at(route: &RouteInfo, now: DateTime<Utc>) -> f32 {
    if route.duration == 0 {
        return 0.0;
    }
    let elapsed = (now - route.created_at).num_seconds().max(0) as f32;
    (elapsed / route.duration as f32).clamp(0.0, 1.0)
}
