use serde::{Deserialize, Serialize};

/// Clima actual mostrado en el dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// Grados Celsius
    pub temperature: f64,
    pub description: String,
    pub icon: String,
    pub humidity: u32,
    /// m/s
    pub wind_speed: f64,
}
