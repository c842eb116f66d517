//! Error types for the ephemeris and event library.

use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during ephemeris and event calculations.
///
/// Events that simply do not happen (polar night, a shadow that is never cast) are not
/// errors; they are reported as `None` by the respective query.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be in the half-open range [-180, +180) degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid observer altitude (must be in the half-open range [0, 11000) meters).
    InvalidAltitude {
        /// The invalid altitude value provided.
        value: f64,
    },
    /// Invalid elevation angle for sunrise/sunset calculations.
    InvalidElevationAngle {
        /// The invalid elevation angle value provided.
        value: f64,
    },
    /// Invalid pressure value for atmospheric refraction calculations.
    InvalidPressure {
        /// The invalid pressure value provided.
        value: f64,
    },
    /// Invalid temperature value for atmospheric refraction calculations.
    InvalidTemperature {
        /// The invalid temperature value provided.
        value: f64,
    },
    /// Invalid date/time components.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// A julian day (in any time scale) outside the supported interval or not finite.
    OutOfRange {
        /// The rejected julian day value.
        value: f64,
    },
    /// Any other invalid numeric argument.
    InvalidArgument {
        /// Description of the violated constraint.
        message: &'static str,
    },
    /// No calculator is registered under the requested name.
    UnknownCalculator {
        /// The requested calculator name.
        name: String,
    },
    /// The calculator is documented not to work at the requested latitude.
    UnsupportedLatitude {
        /// Name of the calculator.
        calculator: String,
        /// The latitude outside the calculator's band.
        latitude: f64,
    },
    /// The calculator does not provide the requested auxiliary feature.
    UnsupportedFeature {
        /// Name of the calculator.
        calculator: String,
        /// Name of the requested feature.
        feature: String,
    },
    /// Numerical computation error (e.g., a non-finite intermediate value).
    ComputationError {
        /// Description of the computation error.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be at least -180° and below +180°)"
                )
            }
            Self::InvalidAltitude { value } => {
                write!(
                    f,
                    "invalid altitude {value} m (must be at least 0 m and below 11000 m)"
                )
            }
            Self::InvalidElevationAngle { value } => {
                write!(
                    f,
                    "invalid elevation angle {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidPressure { value } => {
                write!(f, "invalid pressure {value} mbar (must be positive)")
            }
            Self::InvalidTemperature { value } => {
                write!(
                    f,
                    "invalid temperature {value}°C (must be above absolute zero)"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::OutOfRange { value } => {
                write!(f, "julian day {value} is outside the supported range")
            }
            Self::InvalidArgument { message } => {
                write!(f, "invalid argument: {message}")
            }
            Self::UnknownCalculator { name } => {
                write!(f, "no calculator registered under the name \"{name}\"")
            }
            Self::UnsupportedLatitude {
                calculator,
                latitude,
            } => {
                write!(
                    f,
                    "calculator {calculator} does not support latitude {latitude}°"
                )
            }
            Self::UnsupportedFeature {
                calculator,
                feature,
            } => {
                write!(f, "calculator {calculator} does not support \"{feature}\"")
            }
            Self::ComputationError { message } => {
                write!(f, "computation error: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid altitude error.
    #[must_use]
    pub const fn invalid_altitude(value: f64) -> Self {
        Self::InvalidAltitude { value }
    }

    /// Creates an invalid elevation angle error.
    #[must_use]
    pub const fn invalid_elevation_angle(value: f64) -> Self {
        Self::InvalidElevationAngle { value }
    }

    /// Creates an invalid pressure error.
    #[must_use]
    pub const fn invalid_pressure(value: f64) -> Self {
        Self::InvalidPressure { value }
    }

    /// Creates an invalid temperature error.
    #[must_use]
    pub const fn invalid_temperature(value: f64) -> Self {
        Self::InvalidTemperature { value }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an out-of-range julian day error.
    #[must_use]
    pub const fn out_of_range(value: f64) -> Self {
        Self::OutOfRange { value }
    }

    /// Creates a generic invalid argument error.
    #[must_use]
    pub const fn invalid_argument(message: &'static str) -> Self {
        Self::InvalidArgument { message }
    }

    /// Creates an unknown calculator error.
    #[must_use]
    pub fn unknown_calculator(name: &str) -> Self {
        Self::UnknownCalculator {
            name: name.to_owned(),
        }
    }

    /// Creates an unsupported latitude error.
    #[must_use]
    pub fn unsupported_latitude(calculator: &str, latitude: f64) -> Self {
        Self::UnsupportedLatitude {
            calculator: calculator.to_owned(),
            latitude,
        }
    }

    /// Creates an unsupported feature error.
    #[must_use]
    pub fn unsupported_feature(calculator: &str, feature: &str) -> Self {
        Self::UnsupportedFeature {
            calculator: calculator.to_owned(),
            feature: feature.to_owned(),
        }
    }

    /// Creates a computation error.
    #[must_use]
    pub const fn computation_error(message: &'static str) -> Self {
        Self::ComputationError { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range [-180, +180) degrees.
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside [-180, +180).
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates altitude is within [0, 11000) meters.
///
/// # Errors
/// Returns `InvalidAltitude` for negative, too large or non-finite altitudes.
pub fn check_altitude(altitude: f64) -> Result<()> {
    if !(0.0..11_000.0).contains(&altitude) {
        return Err(Error::invalid_altitude(altitude));
    }
    Ok(())
}

/// Validates pressure is positive and reasonable for atmospheric calculations.
///
/// # Errors
/// Returns `InvalidPressure` if pressure is not between 1 and 2000 hPa.
pub fn check_pressure(pressure: f64) -> Result<()> {
    if !pressure.is_finite() || pressure <= 0.0 || pressure > 2000.0 {
        return Err(Error::invalid_pressure(pressure));
    }
    Ok(())
}

/// Validates temperature is above absolute zero and reasonable for atmospheric calculations.
///
/// # Errors
/// Returns `InvalidTemperature` if temperature is outside -273.15 to 100°C.
pub fn check_temperature(temperature: f64) -> Result<()> {
    if !(-273.15..=100.0).contains(&temperature) {
        return Err(Error::invalid_temperature(temperature));
    }
    Ok(())
}

/// Passes a computed value through if it is finite.
///
/// # Errors
/// Returns `ComputationError` if the value is NaN or infinite.
pub fn check_finite(value: f64, message: &'static str) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::computation_error(message));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_validation() {
        assert!(check_latitude(0.0).is_ok());
        assert!(check_latitude(90.0).is_ok());
        assert!(check_latitude(-90.0).is_ok());

        assert!(check_latitude(91.0).is_err());
        assert!(check_latitude(-91.0).is_err());
        assert!(check_latitude(f64::NAN).is_err());
        assert!(check_latitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_longitude_is_half_open() {
        assert!(check_longitude(-180.0).is_ok());
        assert!(check_longitude(179.999).is_ok());
        assert!(check_longitude(180.0).is_err());
        assert!(check_longitude(-181.0).is_err());
        assert!(check_longitude(f64::NAN).is_err());
    }

    #[test]
    fn test_altitude_validation() {
        assert!(check_altitude(0.0).is_ok());
        assert!(check_altitude(10_999.0).is_ok());
        assert!(check_altitude(11_000.0).is_err());
        assert!(check_altitude(-0.5).is_err());
        assert!(check_altitude(f64::NAN).is_err());
    }

    #[test]
    fn test_pressure_and_temperature_validation() {
        assert!(check_pressure(1013.25).is_ok());
        assert!(check_pressure(0.0).is_err());
        assert!(check_pressure(3000.0).is_err());
        assert!(check_pressure(f64::NAN).is_err());

        assert!(check_temperature(15.0).is_ok());
        assert!(check_temperature(-300.0).is_err());
        assert!(check_temperature(150.0).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_latitude(95.0);
        assert_eq!(
            err.to_string(),
            "invalid latitude 95° (must be between -90° and +90°)"
        );

        let err = Error::unknown_calculator("FOO");
        assert_eq!(
            err.to_string(),
            "no calculator registered under the name \"FOO\""
        );

        let err = Error::unsupported_feature("SIMPLE", "declination");
        assert_eq!(
            err.to_string(),
            "calculator SIMPLE does not support \"declination\""
        );
    }

    #[test]
    fn test_check_finite() {
        assert_eq!(check_finite(1.5, "x").unwrap(), 1.5);
        assert!(check_finite(f64::NAN, "x").is_err());
    }
}
