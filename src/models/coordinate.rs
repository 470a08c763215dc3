//! Modelo de Coordinate
//!
//! Par (latitud, longitud) usado por todo el servicio de navegación.
//! El valor (0,0) se trata como "sin posición".

use serde::{Deserialize, Serialize};

/// Posición geográfica en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Verificar que lat ∈ [-90,90] y lon ∈ [-180,180]
    pub fn is_in_range(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// (0,0) es el centinela de "posición no establecida"
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Desplazar la coordenada por un delta fijo en grados
    pub fn offset(&self, delta_latitude: f64, delta_longitude: f64) -> Self {
        Self::new(self.latitude + delta_latitude, self.longitude + delta_longitude)
    }
}

/// Caja delimitadora usada como pista para el geocoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Caja de ±`degrees` alrededor de `center`, recortada al rango válido
    pub fn around(center: Coordinate, degrees: f64) -> Self {
        Self {
            min_latitude: (center.latitude - degrees).max(-90.0),
            max_latitude: (center.latitude + degrees).min(90.0),
            min_longitude: (center.longitude - degrees).max(-180.0),
            max_longitude: (center.longitude + degrees).min(180.0),
        }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&coordinate.longitude)
    }

    /// Formato `viewbox` de Nominatim: minLon,maxLat,maxLon,minLat
    pub fn to_viewbox(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.min_longitude, self.max_latitude, self.max_longitude, self.min_latitude
        )
    }
}
