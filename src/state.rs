//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::{NavigationService, WeatherService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub navigation: Arc<NavigationService>,
    pub weather: Arc<WeatherService>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        navigation: Arc<NavigationService>,
        weather: Arc<WeatherService>,
    ) -> Self {
        Self {
            config,
            navigation,
            weather,
        }
    }
}
