//! Straight-line distance between two points on the Earth.

use crate::types::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between `a` and `b` (haversine formula).
///
/// Total over all valid coordinates; identical points yield `0.0`.
#[must_use]
pub fn great_circle_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn identical_points_are_zero_apart() {
        let p = point(60.17094, 24.92813);
        assert_close(great_circle_distance(p, p), 0.0, 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (point(60.17094, 24.92813), point(60.17594, 24.93087)),
            (point(-33.8688, 151.2093), point(40.7128, -74.0060)),
            (point(89.9, 10.0), point(-89.9, -170.0)),
        ];
        for (a, b) in pairs {
            assert_close(great_circle_distance(a, b), great_circle_distance(b, a), 1e-6);
        }
    }

    #[test]
    fn short_distance_in_helsinki() {
        let venue = point(60.17094, 24.92813);
        let user = point(60.17094, 24.93087);
        assert_close(great_circle_distance(venue, user), 151.549, 0.01);
    }

    #[test]
    fn london_to_paris() {
        let london = point(51.5074, -0.1278);
        let paris = point(48.8566, 2.3522);
        assert_close(great_circle_distance(london, paris), 343_556.06, 0.5);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference_apart() {
        let d = great_circle_distance(point(0.0, 0.0), point(0.0, 180.0));
        assert_close(d, std::f64::consts::PI * EARTH_RADIUS_M, 1e-3);
        assert!(d.is_finite());
    }
}
