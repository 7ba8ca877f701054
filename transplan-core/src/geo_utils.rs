//! Geographic helpers shared by the graph builder, the planner, and the CLI

use geo::{Distance, Haversine, Point};

const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance between two points in miles
pub fn haversine_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b) / METERS_PER_MILE
}

/// Formats a location as degrees/minutes/seconds,
/// e.g. `38d 32' 45" N, 121d 44' 17" W`
pub fn format_dms(location: Point<f64>) -> String {
    format!(
        "{}, {}",
        axis_dms(location.y(), 'N', 'S'),
        axis_dms(location.x(), 'E', 'W')
    )
}

fn axis_dms(degrees: f64, positive: char, negative: char) -> String {
    let hemisphere = if degrees < 0.0 { negative } else { positive };
    // Round at whole seconds so minute/degree carries happen automatically
    let total_seconds = (degrees.abs() * 3600.0).round() as u64;
    let d = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{d}d {m}' {s}\" {hemisphere}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let miles = haversine_miles(a, b);
        assert!((miles - 69.09).abs() < 0.05, "got {miles}");
    }

    #[test]
    fn zero_distance() {
        let p = Point::new(-121.74, 38.54);
        assert_eq!(haversine_miles(p, p), 0.0);
    }

    #[test]
    fn dms_formatting() {
        let davis = Point::new(-121.7405, 38.5449);
        assert_eq!(format_dms(davis), "38d 32' 42\" N, 121d 44' 26\" W");
    }

    #[test]
    fn dms_carries_seconds_into_minutes() {
        // 10.99999 degrees rounds to 11d 0' 0", not 10d 59' 60"
        let p = Point::new(10.999999, -10.999999);
        assert_eq!(format_dms(p), "11d 0' 0\" S, 11d 0' 0\" E");
    }
}
