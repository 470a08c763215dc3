//! Utilidades geográficas

use crate::models::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia de gran círculo (haversine) en kilómetros
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_paris_london() {
        let paris = Coordinate::new(48.8566, 2.3522);
        let london = Coordinate::new(51.5074, -0.1278);
        let d = haversine_km(paris, london);
        assert!((d - 343.5).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_haversine_is_symmetric_and_zero_on_same_point() {
        let a = Coordinate::new(40.7128, -74.0060);
        let b = Coordinate::new(40.7306, -73.9352);
        assert_eq!(haversine_km(a, a), 0.0);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_small_offset_is_meters() {
        // ~0.0005° de latitud son ~55 m
        let a = Coordinate::new(48.0, 2.0);
        let b = Coordinate::new(48.0005, 2.0);
        let meters = haversine_km(a, b) * 1000.0;
        assert!(meters > 50.0 && meters < 60.0, "got {}", meters);
    }
}
