//! Formato legible de duración y distancia para el cluster

/// 3665 -> "1h 1 min", 65 -> "1 min", 59 -> "0 min"
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{}h {} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// 1500 -> "1.5 km", 500 -> "500 m"
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}
