//! Cache
//!
//! Este módulo contiene los sistemas de cache: el contrato clave-valor
//! persistente (Redis o memoria), la fachada de navegación y el cache
//! en memoria con caducidad.

pub mod cache_config;
pub mod memory_store;
pub mod navigation_cache;
pub mod redis_client;
pub mod store;
pub mod timed_cache;

pub use cache_config::CacheConfig;
pub use memory_store::MemoryStore;
pub use navigation_cache::NavigationCache;
pub use redis_client::RedisClient;
pub use store::KeyValueStore;
pub use timed_cache::TimedCache;
