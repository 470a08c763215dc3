//! Contrato del almacén clave-valor persistente
//!
//! Los valores son strings (JSON serializado). La caducidad se pasa
//! explícitamente en cada escritura: `None` significa sin expiración.

use async_trait::async_trait;
use std::time::Duration;

use crate::utils::errors::CacheError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Escribir varias claves sin expiración de forma atómica
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Eliminar varias claves de forma atómica
    async fn delete_many(&self, keys: &[&str]) -> Result<(), CacheError>;
}
