//! Great-circle distance between two coordinates.
//!
//! Pure and total for in-range input; callers validate coordinates with
//! [`Coordinates::validate`](crate::types::Coordinates::validate) first.

use crate::types::Coordinates;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine surface distance between two positions, in kilometers,
/// rounded to one decimal place.
///
/// Symmetric (`distance_km(a, b) == distance_km(b, a)`) and zero for
/// coincident points.
#[must_use]
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_to_tenth(EARTH_RADIUS_KM * c)
}

fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_for_coincident_points() {
        let p = Coordinates::new(48.8566, 2.3522);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 1.0);
        // 6371 * pi / 180 = 111.19 km
        assert_eq!(distance_km(a, b), 111.2);
    }

    #[test]
    fn pole_to_pole_is_half_the_circumference() {
        let north = Coordinates::new(90.0, 0.0);
        let south = Coordinates::new(-90.0, 0.0);
        // 6371 * pi = 20015.09 km
        assert_eq!(distance_km(north, south), 20015.1);
    }

    #[test]
    fn equator_to_pole_is_a_quarter_of_the_circumference() {
        let equator = Coordinates::new(0.0, 0.0);
        let pole = Coordinates::new(90.0, 0.0);
        assert_eq!(distance_km(equator, pole), 10007.5);
    }

    #[test]
    fn result_has_at_most_one_decimal_place() {
        let a = Coordinates::new(40.7128, -74.0060);
        let b = Coordinates::new(34.0522, -118.2437);
        let d = distance_km(a, b);
        assert_eq!((d * 10.0).round() / 10.0, d);
    }

    proptest! {
        #[test]
        fn symmetric(
            lat1 in -90.0_f64..90.0,
            lon1 in -180.0_f64..180.0,
            lat2 in -90.0_f64..90.0,
            lon2 in -180.0_f64..180.0,
        ) {
            let a = Coordinates::new(lat1, lon1);
            let b = Coordinates::new(lat2, lon2);
            prop_assert_eq!(distance_km(a, b), distance_km(b, a));
        }

        #[test]
        fn non_negative_and_bounded(
            lat1 in -90.0_f64..90.0,
            lon1 in -180.0_f64..180.0,
            lat2 in -90.0_f64..90.0,
            lon2 in -180.0_f64..180.0,
        ) {
            let d = distance_km(Coordinates::new(lat1, lon1), Coordinates::new(lat2, lon2));
            prop_assert!(d >= 0.0);
            // No two surface points are further apart than half the circumference.
            prop_assert!(d <= 20015.1);
        }

        #[test]
        fn zero_at_self(lat in -90.0_f64..90.0, lon in -180.0_f64..180.0) {
            prop_assert_eq!(distance_km(Coordinates::new(lat, lon), Coordinates::new(lat, lon)), 0.0);
        }
    }
}
