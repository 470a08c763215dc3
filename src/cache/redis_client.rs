use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{CacheConfig, KeyValueStore};
use crate::utils::errors::CacheError;

/// Cliente Redis con connection pooling y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> anyhow::Result<Self> {
        info!("🔗 Connecting to Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis connected");

        Ok(Self { manager, config })
    }

    /// Generar clave de cache con prefijo
    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }

    /// Verificar si Redis está conectado
    pub async fn is_connected(&self) -> bool {
        let mut conn = self.manager.clone();
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) => response == "PONG",
            Err(_) => false,
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT for key: {}", full_key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("❌ Cache MISS for key: {}", full_key);
                Ok(None)
            }
            Err(e) => {
                warn!("⚠️ Error reading cache key {}: {}", full_key, e);
                Err(e.into())
            }
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        let result: RedisResult<()> = match ttl {
            Some(ttl) => conn.set_ex(&full_key, value, ttl.as_secs().max(1)).await,
            None => conn.set(&full_key, value).await,
        };

        match result {
            Ok(()) => {
                debug!("💾 Cache SET for key: {} (TTL: {:?})", full_key, ttl);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error writing cache key {}: {}", full_key, e);
                Err(e.into())
            }
        }
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            pipe.set(self.make_key(key), value).ignore();
        }

        let _: () = pipe.query_async(&mut conn).await.map_err(|e| {
            error!("❌ Error writing {} cache keys: {}", entries.len(), e);
            CacheError::from(e)
        })?;
        debug!("💾 Cache MSET ({} keys)", entries.len());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.delete_many(&[key]).await
    }

    async fn delete_many(&self, keys: &[&str]) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let full_keys: Vec<String> = keys.iter().map(|k| self.make_key(k)).collect();

        let result: RedisResult<i64> = conn.del(&full_keys).await;

        match result {
            Ok(count) => {
                debug!("🗑️ Cache DELETE for keys: {:?} (removed: {})", full_keys, count);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error deleting cache keys {:?}: {}", full_keys, e);
                Err(e.into())
            }
        }
    }
}
