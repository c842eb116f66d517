//! Daily solar events for one observer.
//!
//! [`SolarTime`] binds a [`GeoLocation`] to a [`SolarCalculator`] and answers the usual
//! questions about a calendar date: sunrise, sunset, twilight, solar noon and midnight,
//! and when a shadow of a given length is cast.
//!
//! Dates are interpreted in local mean time at the observer's longitude. If the location
//! carries an observer zone, a date is first mapped to the local mean time date that
//! contains noon of that date in the zone, which keeps places near the date line on the
//! calendar day their clocks show.

use crate::calculators::{self, CalculatorRegistry, SolarCalculator, DEFAULT_CALCULATOR};
use crate::math::atan2_deg;
use crate::sun::SunPosition;
use crate::time::{posix_midnight, JulianDay, TimeScale, SECONDS_PER_DAY};
use crate::types::{Horizon, SunriseResult};
use crate::{Error, GeoLocation, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;

/// Passes of the equation-of-time correction when locating noon and midnight.
const TRANSIT_PASSES: usize = 2;

/// Sunrise, sunset and related events at one location, computed by one calculator.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use solar_lunar::{solar_time::SolarTime, GeoLocation};
///
/// let hamburg = GeoLocation::new(53.55, 10.0, 0.0).unwrap();
/// let solar_time = SolarTime::new(hamburg).unwrap();
/// let date = NaiveDate::from_ymd_opt(2016, 6, 21).unwrap();
///
/// let sunrise = solar_time.sunrise(date).unwrap().unwrap();
/// let sunset = solar_time.sunset(date).unwrap().unwrap();
/// assert_eq!(sunrise.format("%H:%M").to_string(), "02:50");
/// assert_eq!(sunset.format("%H:%M").to_string(), "19:53");
/// ```
#[derive(Debug, Clone)]
pub struct SolarTime {
    location: GeoLocation,
    calculator: Arc<dyn SolarCalculator>,
}

impl SolarTime {
    /// Creates solar time for a location using the default calculator.
    ///
    /// # Errors
    /// Returns `UnsupportedLatitude` if the default calculator does not cover the latitude.
    pub fn new(location: GeoLocation) -> Result<Self> {
        Self::with_calculator(location, DEFAULT_CALCULATOR)
    }

    /// Creates solar time using a calculator of the global registry.
    ///
    /// # Errors
    /// Returns `UnknownCalculator` if the name is not registered and `UnsupportedLatitude`
    /// if the calculator does not cover the location's latitude.
    pub fn with_calculator(location: GeoLocation, name: &str) -> Result<Self> {
        Self::with_registry(location, CalculatorRegistry::global(), name)
    }

    /// Creates solar time using a calculator from a specific registry.
    ///
    /// # Errors
    /// Same as [`SolarTime::with_calculator`].
    pub fn with_registry(
        location: GeoLocation,
        registry: &CalculatorRegistry,
        name: &str,
    ) -> Result<Self> {
        Self::from_calculator(location, registry.get(name)?)
    }

    /// Creates solar time from a calculator instance.
    ///
    /// # Errors
    /// Returns `UnsupportedLatitude` if the calculator does not cover the latitude.
    pub fn from_calculator(
        location: GeoLocation,
        calculator: Arc<dyn SolarCalculator>,
    ) -> Result<Self> {
        if !calculator.supports_latitude(location.latitude()) {
            return Err(Error::unsupported_latitude(
                calculator.name(),
                location.latitude(),
            ));
        }
        Ok(Self {
            location,
            calculator,
        })
    }

    /// The observer location.
    #[must_use]
    pub const fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// The calculator answering the queries.
    #[must_use]
    pub fn calculator(&self) -> &dyn SolarCalculator {
        self.calculator.as_ref()
    }

    /// Zenith angle of standard sunrise at this location.
    #[must_use]
    pub fn zenith_angle(&self) -> f64 {
        self.calculator
            .zenith_angle(self.location.latitude(), self.location.altitude())
    }

    /// Sunrise on a date, `None` during polar day or night.
    ///
    /// # Errors
    /// Returns an error if the event lies outside the supported time range.
    pub fn sunrise(&self, date: NaiveDate) -> Result<Option<DateTime<Utc>>> {
        self.sunrise_at(date, Horizon::SunriseSunset)
    }

    /// Sunset on a date, `None` during polar day or night.
    ///
    /// # Errors
    /// Returns an error if the event lies outside the supported time range.
    pub fn sunset(&self, date: NaiveDate) -> Result<Option<DateTime<Utc>>> {
        self.sunset_at(date, Horizon::SunriseSunset)
    }

    /// Morning crossing of a horizon, such as the start of civil twilight.
    ///
    /// [`Horizon::SunriseSunset`] uses the calculator's altitude-aware zenith angle.
    ///
    /// # Errors
    /// Returns an error if the event lies outside the supported time range.
    pub fn sunrise_at(&self, date: NaiveDate, horizon: Horizon) -> Result<Option<DateTime<Utc>>> {
        let zenith = self.horizon_zenith(horizon);
        self.crossing(date, zenith, true)
    }

    /// Evening crossing of a horizon, such as the end of civil twilight.
    ///
    /// # Errors
    /// Returns an error if the event lies outside the supported time range.
    pub fn sunset_at(&self, date: NaiveDate, horizon: Horizon) -> Result<Option<DateTime<Utc>>> {
        let zenith = self.horizon_zenith(horizon);
        self.crossing(date, zenith, false)
    }

    /// Solar noon: the upper transit of the sun.
    ///
    /// # Errors
    /// Returns an error if the instant lies outside the supported time range.
    pub fn transit(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        self.apparent_time(date, 0.5)?.to_datetime()
    }

    /// Solar midnight: the lower transit following noon of the date.
    ///
    /// # Errors
    /// Returns an error if the instant lies outside the supported time range.
    pub fn midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        self.apparent_time(date, 1.0)?.to_datetime()
    }

    /// Sunrise, noon and sunset of a date, or which polar case applies.
    ///
    /// A date with only one of sunrise and sunset is [`SunriseResult::Transitional`];
    /// [`SunriseResult::AllDay`] and [`SunriseResult::AllNight`] are returned exactly when
    /// [`SolarTime::is_midnight_sun`] or [`SolarTime::is_polar_night`] holds.
    ///
    /// # Errors
    /// Returns an error if an instant lies outside the supported time range.
    pub fn day_events(&self, date: NaiveDate) -> Result<SunriseResult<DateTime<Utc>>> {
        let transit = self.transit(date)?;
        let events = match (self.sunrise(date)?, self.sunset(date)?) {
            (Some(sunrise), Some(sunset)) => SunriseResult::RegularDay {
                sunrise,
                transit,
                sunset,
            },
            (None, None) if self.stays_up(date)? => SunriseResult::AllDay { transit },
            (None, None) => SunriseResult::AllNight { transit },
            (sunrise, sunset) => SunriseResult::Transitional {
                sunrise,
                transit,
                sunset,
            },
        };
        Ok(events)
    }

    /// Whether the sun stays below the sunrise horizon for the whole date.
    ///
    /// The calculator finds neither sunrise nor sunset on the date, and the mean of the noon
    /// and following midnight elevations lies below the horizon.
    ///
    /// # Errors
    /// Returns an error if the date lies outside the supported time range.
    pub fn is_polar_night(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.never_crosses(date)? && !self.stays_up(date)?)
    }

    /// Whether the sun stays above the sunrise horizon for the whole date.
    ///
    /// The calculator finds neither sunrise nor sunset on the date, and the mean of the noon
    /// and following midnight elevations lies above the horizon.
    ///
    /// # Errors
    /// Returns an error if the date lies outside the supported time range.
    pub fn is_midnight_sun(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.never_crosses(date)? && self.stays_up(date)?)
    }

    /// Morning instant when an object of `object_height` casts a shadow of `shadow_length`
    /// (same unit), `None` if the sun never gets that low or high.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for non-positive or non-finite lengths.
    pub fn time_of_shadow_before_noon(
        &self,
        date: NaiveDate,
        object_height: f64,
        shadow_length: f64,
    ) -> Result<Option<DateTime<Utc>>> {
        let zenith = shadow_zenith(object_height, shadow_length)?;
        self.crossing(date, zenith, true)
    }

    /// Afternoon instant when an object of `object_height` casts a shadow of
    /// `shadow_length`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for non-positive or non-finite lengths.
    pub fn time_of_shadow_after_noon(
        &self,
        date: NaiveDate,
        object_height: f64,
        shadow_length: f64,
    ) -> Result<Option<DateTime<Utc>>> {
        let zenith = shadow_zenith(object_height, shadow_length)?;
        self.crossing(date, zenith, false)
    }

    /// Equation of time in seconds at an instant.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the instant lies outside the supported range.
    pub fn equation_of_time<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Result<f64> {
        let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
        Ok(self.calculator.equation_of_time(&jd))
    }

    /// Declination of the sun in degrees at an instant.
    ///
    /// # Errors
    /// Returns `UnsupportedFeature` if the calculator has no declination.
    pub fn declination<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Result<f64> {
        let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
        calculators::declination(self.calculator.as_ref(), &jd)
    }

    fn never_crosses(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.sunrise(date)?.is_none() && self.sunset(date)?.is_none())
    }

    /// Whether the noon and midnight elevations, seen with the calculator's declination,
    /// average above the sunrise horizon. On a date without crossings this tells on which
    /// side of the horizon the sun stays.
    fn stays_up(&self, date: NaiveDate) -> Result<bool> {
        let latitude = self.location.latitude();
        let noon_declination = self.declination_at(&self.apparent_time(date, 0.5)?)?;
        let midnight_declination = self.declination_at(&self.apparent_time(date, 1.0)?)?;

        let noon = 90.0 - (latitude - noon_declination).abs();
        let midnight = (latitude + midnight_declination).abs() - 90.0;
        let horizon = 90.0 - self.zenith_angle();
        Ok(noon + midnight > 2.0 * horizon)
    }

    fn declination_at(&self, instant: &JulianDay) -> Result<f64> {
        match calculators::declination(self.calculator.as_ref(), instant) {
            Err(Error::UnsupportedFeature { .. }) => Ok(SunPosition::at(instant).declination()),
            other => other,
        }
    }

    fn horizon_zenith(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::SunriseSunset => self.zenith_angle(),
            other => other.zenith_angle(),
        }
    }

    fn crossing(
        &self,
        date: NaiveDate,
        zenith: f64,
        rising: bool,
    ) -> Result<Option<DateTime<Utc>>> {
        let date = self.local_mean_date(date);
        let (latitude, longitude) = (self.location.latitude(), self.location.longitude());
        let event = if rising {
            self.calculator.sunrise(date, latitude, longitude, zenith)
        } else {
            self.calculator.sunset(date, latitude, longitude, zenith)
        };
        event.map(|jd| jd.to_datetime()).transpose()
    }

    /// Apparent solar time `fraction` days after local mean midnight of a date, as a
    /// mean solar julian day.
    fn apparent_time(&self, date: NaiveDate, fraction: f64) -> Result<JulianDay> {
        let date = self.local_mean_date(date);
        let mean = posix_midnight(date) + fraction - self.location.longitude() / 360.0;
        let mut instant = JulianDay::mean_solar(mean)?;
        for _ in 0..TRANSIT_PASSES {
            let equation = self.calculator.equation_of_time(&instant);
            instant = JulianDay::mean_solar(mean - equation / SECONDS_PER_DAY)?;
        }
        Ok(instant)
    }

    fn local_mean_date(&self, date: NaiveDate) -> NaiveDate {
        let Some(zone) = self.location.observer_zone() else {
            return date;
        };
        let zone_noon = date.and_time(NaiveTime::MIN) + Duration::hours(12);
        let utc = zone_noon - Duration::seconds(i64::from(zone.local_minus_utc()));
        #[allow(clippy::cast_possible_truncation)]
        let offset = Duration::seconds((self.location.longitude() * 240.0).round() as i64);
        (utc + offset).date()
    }
}

fn shadow_zenith(object_height: f64, shadow_length: f64) -> Result<f64> {
    if !(object_height.is_finite() && object_height > 0.0) {
        return Err(Error::invalid_argument("object height must be positive"));
    }
    if !(shadow_length.is_finite() && shadow_length > 0.0) {
        return Err(Error::invalid_argument("shadow length must be positive"));
    }
    Ok(90.0 - atan2_deg(object_height, shadow_length))
}

/// Sunrise with the default calculator.
///
/// # Errors
/// See [`SolarTime::sunrise`].
pub fn sunrise(location: &GeoLocation, date: NaiveDate) -> Result<Option<DateTime<Utc>>> {
    SolarTime::new(*location)?.sunrise(date)
}

/// Sunset with the default calculator.
///
/// # Errors
/// See [`SolarTime::sunset`].
pub fn sunset(location: &GeoLocation, date: NaiveDate) -> Result<Option<DateTime<Utc>>> {
    SolarTime::new(*location)?.sunset(date)
}

/// Equation of time in seconds with the default calculator.
///
/// # Errors
/// Returns `UnknownCalculator` if the default calculator was not registered and
/// `OutOfRange` for instants outside the supported range.
pub fn equation_of_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<f64> {
    let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
    Ok(CalculatorRegistry::global()
        .get(DEFAULT_CALCULATOR)?
        .equation_of_time(&jd))
}
