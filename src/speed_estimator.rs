//! Instantaneous speed between two samples: geodesic distance over elapsed time.

use geo::{point, GeodesicDistance};

use crate::track_point::TrackSample;

const SECONDS_PER_HOUR: f64 = 3600.0;
const METERS_PER_KM: f64 = 1000.0;

/// Speed in km/h from `p1` to `p2`.
///
/// Returns 0.0 when a coordinate or a timestamp is missing and when both
/// samples share the same timestamp. Out-of-order timestamps are not
/// rejected and give a negative speed.
pub fn estimate_speed<A, B>(p1: &A, p2: &B) -> f64
where
    A: TrackSample + ?Sized,
    B: TrackSample + ?Sized,
{
    let (Some(distance), Some(hours)) = (distance_km(p1, p2), elapsed_hours(p1, p2)) else {
        return 0.0;
    };

    if hours == 0.0 {
        return 0.0;
    }

    distance / hours
}

/// Geodesic (WGS84) distance in kilometers, `None` if a coordinate is missing.
pub fn distance_km<A, B>(p1: &A, p2: &B) -> Option<f64>
where
    A: TrackSample + ?Sized,
    B: TrackSample + ?Sized,
{
    let coords = [p1.latitude(), p1.longitude(), p2.latitude(), p2.longitude()];
    if coords.iter().any(|c| !c.is_finite()) {
        return None;
    }

    let a = point!(x: p1.longitude(), y: p1.latitude());
    let b = point!(x: p2.longitude(), y: p2.latitude());
    Some(a.geodesic_distance(&b) / METERS_PER_KM)
}

/// Time from `p1` to `p2` in hours (millisecond resolution), `None` if either
/// timestamp is missing.
pub fn elapsed_hours<A, B>(p1: &A, p2: &B) -> Option<f64>
where
    A: TrackSample + ?Sized,
    B: TrackSample + ?Sized,
{
    let start = p1.timestamp()?;
    let end = p2.timestamp()?;
    let seconds = (end - start).num_milliseconds() as f64 / 1000.0;
    Some(seconds / SECONDS_PER_HOUR)
}

pub fn format_speed(speed: f64) -> String {
    format!("{:.1} km/h", speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track_point::GeoPoint;
    use assert_float_eq::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
    }

    fn at(lat: f64, lon: f64, seconds: i64) -> GeoPoint {
        GeoPoint::new(lat, lon, Some(t0() + Duration::seconds(seconds)))
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // ~110.57 km per degree at the equator on WGS84
        let d = distance_km(&at(0.0, 0.0, 0), &at(1.0, 0.0, 0)).unwrap();
        assert_float_absolute_eq!(d, 110.574, 0.01);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = at(48.137, 11.575, 0);
        let b = at(52.520, 13.405, 0);
        let ab = distance_km(&a, &b).unwrap();
        let ba = distance_km(&b, &a).unwrap();
        assert_float_absolute_eq!(ab, ba, 1e-9);
        assert!(ab > 495.0 && ab < 515.0);
    }

    #[test]
    fn test_speed_over_one_hour() {
        let a = at(0.0, 0.0, 0);
        let b = at(1.0, 0.0, 3600);
        assert_float_absolute_eq!(estimate_speed(&a, &b), 110.574, 0.01);
    }

    #[test]
    fn test_equator_step_of_a_thousandth_degree() {
        // 0.001 deg of longitude on the equator is ~111.3 m
        let a = at(0.0, 0.0, 0);
        let b = at(0.0, 0.001, 60);
        assert_float_absolute_eq!(estimate_speed(&a, &b), 6.679, 0.01);
    }

    #[test]
    fn test_identical_timestamps_give_zero() {
        let a = at(0.0, 0.0, 5);
        let b = at(10.0, 10.0, 5);
        assert_eq!(estimate_speed(&a, &b), 0.0);
    }

    #[test]
    fn test_missing_timestamp_gives_zero() {
        let a = GeoPoint::new(0.0, 0.0, None);
        let b = at(1.0, 1.0, 10);
        assert_eq!(estimate_speed(&a, &b), 0.0);
        assert_eq!(estimate_speed(&b, &a), 0.0);
        assert_eq!(elapsed_hours(&a, &b), None);
    }

    #[test]
    fn test_missing_coordinate_gives_zero() {
        let a = at(f64::NAN, 0.0, 0);
        let b = at(1.0, 1.0, 10);
        assert_eq!(estimate_speed(&a, &b), 0.0);
        assert_eq!(distance_km(&a, &b), None);
    }

    #[test]
    fn test_zero_coordinates_are_real_positions() {
        // lat/lon of exactly 0.0 is a valid fix, not a missing value
        let a = at(0.0, 0.0, 0);
        let b = at(0.0, 0.5, 2);
        assert!(estimate_speed(&a, &b) > 10_000.0);
    }

    #[test]
    fn test_out_of_order_timestamps_give_negative_speed() {
        let a = at(0.0, 0.0, 60);
        let b = at(0.0, 0.001, 0);
        assert!(estimate_speed(&a, &b) < 0.0);
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(12.345), "12.3 km/h");
        assert_eq!(format_speed(0.0), "0.0 km/h");
    }
}
