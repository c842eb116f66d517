//! Value types shared by the position models and event queries.

use crate::error::{check_altitude, check_pressure, check_temperature};
use crate::math::normalize_degrees_0_to_360;
use crate::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Predefined elevation angles for sunrise/sunset and twilight queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    /// Standard sunrise/sunset (upper limb on the horizon, mean refraction)
    SunriseSunset,
    /// Civil twilight (sun is 6° below horizon)
    CivilTwilight,
    /// Nautical twilight (sun is 12° below horizon)
    NauticalTwilight,
    /// Astronomical twilight (sun is 18° below horizon)
    AstronomicalTwilight,
    /// Custom elevation angle
    Custom(f64),
}

impl Horizon {
    /// Gets the elevation angle in degrees for this horizon definition.
    ///
    /// Negative values indicate the sun is below the horizon.
    #[must_use]
    pub const fn elevation_angle(&self) -> f64 {
        match self {
            Self::SunriseSunset => -0.83337,
            Self::CivilTwilight => -6.0,
            Self::NauticalTwilight => -12.0,
            Self::AstronomicalTwilight => -18.0,
            Self::Custom(angle) => *angle,
        }
    }

    /// Gets the zenith angle in degrees (90° minus the elevation angle).
    #[must_use]
    pub fn zenith_angle(&self) -> f64 {
        90.0 - self.elevation_angle()
    }

    /// Creates a custom horizon with the specified elevation angle.
    ///
    /// # Errors
    /// Returns `InvalidElevationAngle` if elevation is outside -90 to +90 degrees.
    pub fn custom(elevation_degrees: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&elevation_degrees) {
            return Err(Error::invalid_elevation_angle(elevation_degrees));
        }
        Ok(Self::Custom(elevation_degrees))
    }
}

/// Atmospheric conditions for refraction correction.
///
/// Refraction lifts a body near the horizon by up to about 0.6°.
///
/// # Example
/// ```
/// # use solar_lunar::RefractionCorrection;
/// let standard = RefractionCorrection::standard();
/// assert_eq!(standard.pressure(), 1013.25);
/// assert_eq!(standard.temperature(), 15.0);
///
/// // thinner and colder air on a mountain top
/// let summit = RefractionCorrection::standard_atmosphere(3000.0).unwrap();
/// assert!(summit.pressure() < 720.0);
/// assert!((summit.temperature() + 4.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionCorrection {
    /// Atmospheric pressure in millibars (hPa)
    pressure: f64,
    /// Temperature in degrees Celsius
    temperature: f64,
}

impl RefractionCorrection {
    /// Creates a refraction correction for the given pressure (hPa) and temperature (°C).
    ///
    /// # Errors
    /// Returns `InvalidPressure` or `InvalidTemperature` for out-of-range values.
    pub fn new(pressure: f64, temperature: f64) -> Result<Self> {
        check_pressure(pressure)?;
        check_temperature(temperature)?;
        Ok(Self {
            pressure,
            temperature,
        })
    }

    /// Standard sea-level conditions: 1013.25 hPa and 15 °C.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            pressure: 1013.25,
            temperature: 15.0,
        }
    }

    /// Conditions of the ICAO standard atmosphere at the given altitude in meters.
    ///
    /// # Errors
    /// Returns `InvalidAltitude` for altitudes outside [0, 11000).
    pub fn standard_atmosphere(altitude: f64) -> Result<Self> {
        check_altitude(altitude)?;
        let (pressure, temperature) = standard_atmosphere(altitude);
        Ok(Self {
            pressure,
            temperature,
        })
    }

    /// Gets the atmospheric pressure in millibars.
    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Gets the temperature in degrees Celsius.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }
}

/// Pressure (hPa) and temperature (°C) of the troposphere in the standard atmosphere.
pub(crate) fn standard_atmosphere(altitude: f64) -> (f64, f64) {
    let pressure = 1013.25 * (1.0 - 0.0065 * altitude / 288.15).powf(5.255);
    let temperature = 15.0 - 0.0065 * altitude;
    (pressure, temperature)
}

/// Right ascension and declination, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "EquatorialRepr", into = "EquatorialRepr")
)]
pub struct EquatorialCoordinates {
    right_ascension: f64,
    declination: f64,
}

impl EquatorialCoordinates {
    /// Creates equatorial coordinates; the right ascension is normalized to [0, 360).
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-finite right ascension or a declination outside
    /// [-90, 90].
    pub fn new(right_ascension: f64, declination: f64) -> Result<Self> {
        if !right_ascension.is_finite() {
            return Err(Error::invalid_argument("right ascension must be finite"));
        }
        if !(-90.0..=90.0).contains(&declination) {
            return Err(Error::invalid_argument(
                "declination must be between -90 and 90 degrees",
            ));
        }
        Ok(Self {
            right_ascension: normalize_degrees_0_to_360(right_ascension),
            declination,
        })
    }

    /// Wraps values computed by the position models, which are normalized already.
    pub(crate) const fn from_trusted(right_ascension: f64, declination: f64) -> Self {
        Self {
            right_ascension,
            declination,
        }
    }

    /// Right ascension in degrees [0, 360).
    #[must_use]
    pub const fn right_ascension(&self) -> f64 {
        self.right_ascension
    }

    /// Right ascension in hours [0, 24).
    #[must_use]
    pub fn right_ascension_hours(&self) -> f64 {
        self.right_ascension / 15.0
    }

    /// Declination in degrees [-90, 90].
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct EquatorialRepr {
    right_ascension: f64,
    declination: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<EquatorialRepr> for EquatorialCoordinates {
    type Error = Error;

    fn try_from(repr: EquatorialRepr) -> Result<Self> {
        Self::new(repr.right_ascension, repr.declination)
    }
}

#[cfg(feature = "serde")]
impl From<EquatorialCoordinates> for EquatorialRepr {
    fn from(coordinates: EquatorialCoordinates) -> Self {
        Self {
            right_ascension: coordinates.right_ascension,
            declination: coordinates.declination,
        }
    }
}

/// Position of a body relative to the observer's horizon.
///
/// Azimuth is 0° = north, increasing clockwise; elevation is 0° on the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    azimuth: f64,
    elevation: f64,
}

impl HorizontalPosition {
    /// Creates a horizontal position; the azimuth is normalized to [0, 360).
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-finite azimuth and `InvalidElevationAngle`
    /// for an elevation outside [-90, 90].
    pub fn new(azimuth: f64, elevation: f64) -> Result<Self> {
        if !azimuth.is_finite() {
            return Err(Error::invalid_argument("azimuth must be finite"));
        }
        if !(-90.0..=90.0).contains(&elevation) {
            return Err(Error::invalid_elevation_angle(elevation));
        }
        Ok(Self {
            azimuth: normalize_degrees_0_to_360(azimuth),
            elevation,
        })
    }

    /// Azimuth in degrees [0, 360), north = 0°, east = 90°.
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Elevation above the horizon in degrees.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Zenith angle in degrees (90° minus elevation).
    #[must_use]
    pub fn zenith_angle(&self) -> f64 {
        90.0 - self.elevation
    }

    /// Whether the body's center is above the horizon.
    #[must_use]
    pub fn is_above_horizon(&self) -> bool {
        self.elevation > 0.0
    }
}

/// Sunrise, transit and sunset of one day, or the polar alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SunriseResult<T> {
    /// Regular day with distinct sunrise, transit (noon), and sunset times
    RegularDay {
        /// Time of sunrise
        sunrise: T,
        /// Time of solar transit (solar noon)
        transit: T,
        /// Time of sunset
        sunset: T,
    },
    /// Polar day: the sun stays above the requested horizon
    AllDay {
        /// Time of solar transit (closest approach to zenith)
        transit: T,
    },
    /// Polar night: the sun stays below the requested horizon
    AllNight {
        /// Time of solar transit (sun highest, though still below the horizon)
        transit: T,
    },
    /// Only one horizon crossing on this date, as on the days around the start and end
    /// of polar day or night
    Transitional {
        /// Time of sunrise, if the sun rises on this date
        sunrise: Option<T>,
        /// Time of solar transit (solar noon)
        transit: T,
        /// Time of sunset, if the sun sets on this date
        sunset: Option<T>,
    },
}

impl<T> SunriseResult<T> {
    /// Gets the transit time (solar noon) for any sunrise result.
    pub const fn transit(&self) -> &T {
        match self {
            Self::RegularDay { transit, .. }
            | Self::Transitional { transit, .. }
            | Self::AllDay { transit }
            | Self::AllNight { transit } => transit,
        }
    }

    /// Checks if this represents a regular day with sunrise and sunset.
    pub const fn is_regular_day(&self) -> bool {
        matches!(self, Self::RegularDay { .. })
    }

    /// Checks if this represents a polar day (sun never sets).
    pub const fn is_polar_day(&self) -> bool {
        matches!(self, Self::AllDay { .. })
    }

    /// Checks if this represents a polar night (sun never rises).
    pub const fn is_polar_night(&self) -> bool {
        matches!(self, Self::AllNight { .. })
    }

    /// Checks if the sun crosses the horizon only once on this date.
    pub const fn is_transitional(&self) -> bool {
        matches!(self, Self::Transitional { .. })
    }

    /// Gets the sunrise time, if the sun rises on this date.
    pub const fn sunrise(&self) -> Option<&T> {
        match self {
            Self::RegularDay { sunrise, .. } => Some(sunrise),
            Self::Transitional { sunrise, .. } => sunrise.as_ref(),
            Self::AllDay { .. } | Self::AllNight { .. } => None,
        }
    }

    /// Gets the sunset time, if the sun sets on this date.
    pub const fn sunset(&self) -> Option<&T> {
        match self {
            Self::RegularDay { sunset, .. } => Some(sunset),
            Self::Transitional { sunset, .. } => sunset.as_ref(),
            Self::AllDay { .. } | Self::AllNight { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_elevation_angles() {
        assert_eq!(Horizon::SunriseSunset.elevation_angle(), -0.83337);
        assert_eq!(Horizon::CivilTwilight.elevation_angle(), -6.0);
        assert_eq!(Horizon::NauticalTwilight.elevation_angle(), -12.0);
        assert_eq!(Horizon::AstronomicalTwilight.elevation_angle(), -18.0);
        assert_eq!(Horizon::NauticalTwilight.zenith_angle(), 102.0);

        let custom = Horizon::custom(-3.0).unwrap();
        assert_eq!(custom.elevation_angle(), -3.0);

        assert!(Horizon::custom(-95.0).is_err());
        assert!(Horizon::custom(95.0).is_err());
    }

    #[test]
    fn test_refraction_correction() {
        let custom = RefractionCorrection::new(1000.0, 20.0).unwrap();
        assert_eq!(custom.pressure(), 1000.0);
        assert_eq!(custom.temperature(), 20.0);

        assert_eq!(
            RefractionCorrection::new(-1.0, 15.0),
            Err(Error::invalid_pressure(-1.0))
        );
        assert_eq!(
            RefractionCorrection::new(1013.25, -300.0),
            Err(Error::invalid_temperature(-300.0))
        );
        assert!(RefractionCorrection::new(3000.0, 15.0).is_err());
        assert!(RefractionCorrection::new(1013.25, 150.0).is_err());
    }

    #[test]
    fn test_standard_atmosphere() {
        let sea_level = RefractionCorrection::standard_atmosphere(0.0).unwrap();
        assert_eq!(sea_level, RefractionCorrection::standard());

        let (pressure, temperature) = standard_atmosphere(5500.0);
        assert!((pressure - 505.0).abs() < 2.0);
        assert!((temperature + 20.75).abs() < 1e-9);

        assert!(RefractionCorrection::standard_atmosphere(12_000.0).is_err());
    }

    #[test]
    fn test_equatorial_coordinates() {
        let coordinates = EquatorialCoordinates::new(-15.0, 23.4).unwrap();
        assert_eq!(coordinates.right_ascension(), 345.0);
        assert_eq!(coordinates.right_ascension_hours(), 23.0);
        assert_eq!(coordinates.declination(), 23.4);

        assert!(EquatorialCoordinates::new(f64::NAN, 0.0).is_err());
        assert!(EquatorialCoordinates::new(0.0, 91.0).is_err());
    }

    #[test]
    fn test_horizontal_position() {
        let position = HorizontalPosition::new(-90.0, 30.0).unwrap();
        assert_eq!(position.azimuth(), 270.0);
        assert_eq!(position.zenith_angle(), 60.0);
        assert!(position.is_above_horizon());

        let below = HorizontalPosition::new(10.0, -0.5).unwrap();
        assert!(!below.is_above_horizon());

        assert!(HorizontalPosition::new(0.0, 91.0).is_err());
    }

    #[test]
    fn test_sunrise_result_variants() {
        let regular = SunriseResult::RegularDay {
            sunrise: 6,
            transit: 12,
            sunset: 18,
        };
        assert!(regular.is_regular_day());
        assert_eq!(regular.transit(), &12);
        assert_eq!(regular.sunrise(), Some(&6));
        assert_eq!(regular.sunset(), Some(&18));

        let polar_day = SunriseResult::AllDay { transit: 12 };
        assert!(polar_day.is_polar_day());
        assert_eq!(polar_day.sunrise(), None);

        let polar_night = SunriseResult::AllNight { transit: 12 };
        assert!(polar_night.is_polar_night());
        assert_eq!(polar_night.sunset(), None);
        assert_eq!(polar_night.transit(), &12);

        let sets_only = SunriseResult::Transitional {
            sunrise: None,
            transit: 12,
            sunset: Some(23),
        };
        assert!(sets_only.is_transitional());
        assert!(!sets_only.is_polar_night() && !sets_only.is_polar_day());
        assert_eq!(sets_only.sunrise(), None);
        assert_eq!(sets_only.sunset(), Some(&23));
    }
}
