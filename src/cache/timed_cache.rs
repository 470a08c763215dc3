//! Cache en memoria de un único valor con caducidad

use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

pub struct TimedCache<T> {
    name: &'static str,
    ttl: Duration,
    slot: RwLock<Option<(T, Instant)>>,
}

impl<T: Clone> TimedCache<T> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some((value, stored_at)) if stored_at.elapsed() < self.ttl => {
                debug!("📥 {} cache HIT", self.name);
                Some(value.clone())
            }
            _ => {
                debug!("❌ {} cache MISS (expired or empty)", self.name);
                None
            }
        }
    }

    pub async fn put(&self, value: T) {
        *self.slot.write().await = Some((value, Instant::now()));
    }

    pub async fn clear(&self) {
        *self.slot.write().await = None;
        debug!("🧹 {} cache cleared", self.name);
    }
}
