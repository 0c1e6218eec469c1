//! Track point model shared by the speed estimator and the segment filter.
//!
//! The filter works on anything that can report a position and an optional
//! timestamp, so it runs both on plain `GeoPoint`s and directly on the
//! `gpx::Waypoint`s of a parsed file (keeping elevation, name and every other
//! field untouched).

use chrono::{DateTime, Utc};
use gpx::Waypoint;

/// A position sample as seen by the speed estimator.
pub trait TrackSample {
    /// Latitude in degrees. A non-finite value means "missing".
    fn latitude(&self) -> f64;

    /// Longitude in degrees. A non-finite value means "missing".
    fn longitude(&self) -> f64;

    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, timestamp: Option<DateTime<Utc>>) -> Self {
        Self { latitude, longitude, timestamp }
    }
}

impl TrackSample for GeoPoint {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}

impl TrackSample for Waypoint {
    fn latitude(&self) -> f64 {
        self.point().y()
    }

    fn longitude(&self) -> f64 {
        self.point().x()
    }

    // gpx::Time only exposes an RFC 3339 rendering; a time that cannot be
    // rendered is treated like a missing one.
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        let time = self.time.as_ref()?;
        let formatted = time.format().ok()?;
        DateTime::parse_from_rfc3339(&formatted)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Convenience conversion used when only the geometry of a waypoint matters.
impl From<&Waypoint> for GeoPoint {
    fn from(waypoint: &Waypoint) -> Self {
        GeoPoint::new(waypoint.latitude(), waypoint.longitude(), waypoint.timestamp())
    }
}
