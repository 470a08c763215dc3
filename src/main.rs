use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use cluster_navigation::cache::{KeyValueStore, MemoryStore, NavigationCache, RedisClient};
use cluster_navigation::config::environment::EnvironmentConfig;
use cluster_navigation::routes::create_app_router;
use cluster_navigation::services::{
    NavigationService, NominatimGeocodingService, OpenWeatherService, OsrmRoutingService,
    WeatherService,
};
use cluster_navigation::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 Cluster Navigation - Route & Weather API");
    info!("============================================");
    info!("⚙️ Environment: {}", config.environment);

    // Inicializar almacén persistente
    let store = build_store(&config).await;

    // Proveedores externos
    let timeout = config.http_timeout();
    let geocoder = Arc::new(NominatimGeocodingService::new(&config.nominatim_url, timeout)?);
    let router = Arc::new(OsrmRoutingService::new(&config.osrm_url, timeout)?);
    let weather_provider = Arc::new(OpenWeatherService::new(
        &config.weather_api_url,
        config.weather_api_key.clone(),
        timeout,
    )?);

    if config.weather_api_key.is_none() {
        warn!("⚠️ WEATHER_API_KEY not set, weather will only be served from cache");
    }

    let navigation = Arc::new(NavigationService::new(
        geocoder,
        router,
        NavigationCache::new(store.clone()),
        config.navigation_settings(),
    ));
    let weather = Arc::new(WeatherService::new(weather_provider, store));

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(config, navigation, weather));

    info!("🌐 Server starting on http://{}", addr);
    info!("🔍 Available endpoints:");
    info!("   GET    /health");
    info!("🧭 Navigation:");
    info!("   POST   /api/navigation/route - Resolve route to destination");
    info!("   POST   /api/navigation/route/update - Update route from current position");
    info!("   GET    /api/navigation/route - Current route");
    info!("   DELETE /api/navigation/route - End journey");
    info!("   GET    /api/navigation/destination - Active destination");
    info!("   GET    /api/navigation/progress - Route progress");
    info!("   GET    /api/navigation/search?q=&lat=&lon= - Search places");
    info!("🌤️ Weather & dashboard:");
    info!("   GET    /api/weather?lat=&lon=");
    info!("   POST   /api/weather/refresh");
    info!("   DELETE /api/weather/cache");
    info!("   GET    /api/dashboard?lat=&lon=");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

/// Redis si está configurado; si no (o si falla la conexión), memoria
async fn build_store(config: &EnvironmentConfig) -> Arc<dyn KeyValueStore> {
    let Some(cache_config) = config.cache_config() else {
        info!("💾 REDIS_URL not set, using in-memory store");
        return Arc::new(MemoryStore::new());
    };

    match RedisClient::new(cache_config).await {
        Ok(client) => {
            if client.is_connected().await {
                info!("✅ Route cache backed by Redis");
            }
            Arc::new(client)
        }
        Err(e) => {
            error!("❌ Error connecting to Redis: {}", e);
            warn!("⚠️ Falling back to in-memory store, routes will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Terminate signal received, shutting down...");
        },
    }
}
