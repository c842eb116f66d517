//! Observer location on the earth's surface.

use crate::error::{check_altitude, check_latitude, check_longitude};
use crate::Result;
use chrono::FixedOffset;
#[cfg(feature = "serde")]
use {
    crate::Error,
    serde::{Deserialize, Serialize},
};

/// A validated geographic location.
///
/// Latitude is in [-90, +90] degrees, longitude in [-180, +180) degrees (east positive) and
/// altitude in [0, 11000) meters above sea level.
///
/// The optional observer zone is only used to decide which calendar day a bare date means
/// for locations near the date line; it never shifts computed instants.
///
/// # Example
/// ```
/// use solar_lunar::GeoLocation;
///
/// let hamburg = GeoLocation::new(53.55, 10.0, 0.0).unwrap();
/// assert_eq!(hamburg.latitude(), 53.55);
///
/// assert!(GeoLocation::new(53.55, 180.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GeoLocationRepr", into = "GeoLocationRepr")
)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
    altitude: f64,
    observer_zone: Option<FixedOffset>,
}

impl GeoLocation {
    /// Creates a location from latitude, longitude (degrees) and altitude (meters).
    ///
    /// # Errors
    /// Returns `InvalidLatitude`, `InvalidLongitude` or `InvalidAltitude` naming the first
    /// offending field.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        check_altitude(altitude)?;
        Ok(Self {
            latitude,
            longitude,
            altitude,
            observer_zone: None,
        })
    }

    /// Returns a copy carrying the given observer zone.
    #[must_use]
    pub fn with_observer_zone(mut self, zone: FixedOffset) -> Self {
        self.observer_zone = Some(zone);
        self
    }

    /// Latitude in degrees, north positive.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Altitude above sea level in meters.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// The observer zone, if any.
    #[must_use]
    pub const fn observer_zone(&self) -> Option<FixedOffset> {
        self.observer_zone
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GeoLocationRepr {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    observer_zone_seconds: Option<i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<GeoLocationRepr> for GeoLocation {
    type Error = Error;

    fn try_from(repr: GeoLocationRepr) -> Result<Self> {
        let location = Self::new(repr.latitude, repr.longitude, repr.altitude)?;
        match repr.observer_zone_seconds {
            None => Ok(location),
            Some(seconds) => FixedOffset::east_opt(seconds)
                .map(|zone| location.with_observer_zone(zone))
                .ok_or(Error::invalid_argument("observer zone offset out of range")),
        }
    }
}

#[cfg(feature = "serde")]
impl From<GeoLocation> for GeoLocationRepr {
    fn from(location: GeoLocation) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            altitude: location.altitude,
            observer_zone_seconds: location
                .observer_zone
                .map(|zone| zone.local_minus_utc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_valid_locations() {
        let location = GeoLocation::new(-33.87, 151.21, 58.0).unwrap();
        assert_eq!(location.latitude(), -33.87);
        assert_eq!(location.longitude(), 151.21);
        assert_eq!(location.altitude(), 58.0);
        assert_eq!(location.observer_zone(), None);

        assert!(GeoLocation::new(90.0, -180.0, 0.0).is_ok());
        assert!(GeoLocation::new(-90.0, 179.99, 10_999.0).is_ok());
    }

    #[test]
    fn test_each_field_is_named_in_the_error() {
        assert_eq!(
            GeoLocation::new(90.5, 0.0, 0.0),
            Err(Error::invalid_latitude(90.5))
        );
        assert_eq!(
            GeoLocation::new(0.0, 180.0, 0.0),
            Err(Error::invalid_longitude(180.0))
        );
        assert_eq!(
            GeoLocation::new(0.0, 0.0, 11_000.0),
            Err(Error::invalid_altitude(11_000.0))
        );
        assert!(GeoLocation::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 0.0, -1.0).is_err());
    }

    #[test]
    fn test_observer_zone() {
        let zone = FixedOffset::east_opt(12 * 3600).unwrap();
        let location = GeoLocation::new(-41.3, 174.8, 0.0)
            .unwrap()
            .with_observer_zone(zone);
        assert_eq!(location.observer_zone(), Some(zone));
        assert_eq!(location.longitude(), 174.8);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde_round_trip_revalidates() {
        let zone = FixedOffset::west_opt(5 * 3600).unwrap();
        let location = GeoLocation::new(40.7, -74.0, 10.0)
            .unwrap()
            .with_observer_zone(zone);
        let json = serde_json::to_string(&location).unwrap();
        let back: GeoLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, location);

        let invalid = r#"{"latitude":91.0,"longitude":0.0}"#;
        assert!(serde_json::from_str::<GeoLocation>(invalid).is_err());
    }
}
