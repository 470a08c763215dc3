//! Cache de navegación
//!
//! Fachada tipada sobre el almacén clave-valor para la ruta actual,
//! el destino activo y los últimos resultados de búsqueda.
//! Estas claves no caducan: solo se reemplazan o se borran explícitamente.
//! Un JSON corrupto se trata como cache miss.

use std::sync::Arc;
use tracing::{info, warn};

use super::KeyValueStore;
use crate::models::{RouteInfo, SearchResult};
use crate::utils::errors::CacheError;

pub const KEY_LAST_ROUTE: &str = "last_route";
pub const KEY_CURRENT_DESTINATION: &str = "current_destination";
pub const KEY_SEARCH_RESULTS: &str = "search_results";

#[derive(Clone)]
pub struct NavigationCache {
    store: Arc<dyn KeyValueStore>,
}

impl NavigationCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Última ruta persistida
    pub async fn load_route(&self) -> Option<RouteInfo> {
        let raw = self.read(KEY_LAST_ROUTE).await?;
        match serde_json::from_str(&raw) {
            Ok(route) => Some(route),
            Err(e) => {
                warn!("⚠️ Corrupt cached route, ignoring: {}", e);
                None
            }
        }
    }

    /// Guardar la ruta y su destino juntos para que nunca diverjan
    pub async fn save_route(&self, route: &RouteInfo) -> Result<(), CacheError> {
        let json = serde_json::to_string(route)?;
        self.store
            .set_many(&[
                (KEY_LAST_ROUTE, json),
                (KEY_CURRENT_DESTINATION, route.destination.clone()),
            ])
            .await?;
        info!("💾 Route to '{}' saved ({})", route.destination, route.eta);
        Ok(())
    }

    pub async fn current_destination(&self) -> Option<String> {
        self.read(KEY_CURRENT_DESTINATION).await
    }

    pub async fn clear_route(&self) -> Result<(), CacheError> {
        self.store
            .delete_many(&[KEY_LAST_ROUTE, KEY_CURRENT_DESTINATION])
            .await?;
        info!("🗑️ Current route cleared");
        Ok(())
    }

    pub async fn load_search_results(&self) -> Vec<SearchResult> {
        let Some(raw) = self.read(KEY_SEARCH_RESULTS).await else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(results) => results,
            Err(e) => {
                warn!("⚠️ Corrupt cached search results, ignoring: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn save_search_results(&self, results: &[SearchResult]) -> Result<(), CacheError> {
        let json = serde_json::to_string(results)?;
        self.store.set(KEY_SEARCH_RESULTS, json, None).await
    }

    /// Lectura que degrada los errores del backend a miss
    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("⚠️ Cache read failed for {}: {}", key, e);
                None
            }
        }
    }
}
