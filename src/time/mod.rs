//! Continuous time values tagged with a time scale.
//!
//! Position models are evaluated in uniform ephemeris time (TT), sidereal rotation in mean
//! solar time (UT1), and callers think in civil UTC. [`JulianDay`] keeps the scale next to
//! the day count so the three are never mixed up silently: every change of scale goes
//! through [`JulianDay::convert`] or [`JulianDay::value_in`].

#![allow(clippy::unreadable_literal)]

mod delta_t;
pub mod leap_seconds;

pub use delta_t::DeltaT;
pub(crate) use delta_t::delta_t_days;

use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds per day (86,400)
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian day of the J2000.0 epoch (2000-01-01 12:00 TT)
pub(crate) const J2000: f64 = 2_451_545.0;

/// Days per julian century
pub(crate) const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian day of the POSIX epoch 1970-01-01 00:00 UTC
const UNIX_EPOCH: f64 = 2_440_587.5;

/// First UTC julian day covered by the leap second table (1972-01-01).
const LEAP_SECOND_ERA: f64 = 2_441_317.5;

/// Smallest supported julian day: -2000-01-01 00:00 (julian calendar).
pub const MIN: f64 = 990_557.5;

/// Largest supported julian day: 3001-01-01 00:00 (gregorian calendar).
pub const MAX: f64 = 2_817_152.5;

/// The time scale a [`JulianDay`] is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeScale {
    /// Terrestrial time, the uniform argument of the ephemeris series (JDE).
    Ephemeris,
    /// Universal time UT1, following the actual (irregular) rotation of the earth.
    MeanSolar,
    /// Civil UTC counted like POSIX time, i.e. every day has exactly 86,400 seconds.
    Posix,
}

/// A julian day number together with its time scale.
///
/// Values are immutable and always lie within [`MIN`, `MAX`] in their own scale.
///
/// # Example
/// ```
/// use solar_lunar::time::{JulianDay, TimeScale};
///
/// let utc = JulianDay::posix(2_451_545.0).unwrap();
/// let tt = utc.convert(TimeScale::Ephemeris).unwrap();
/// // TT - UTC was 64.184 s at J2000
/// assert!(((tt.value() - utc.value()) * 86_400.0 - 64.184).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "JulianDayRepr", into = "JulianDayRepr")
)]
pub struct JulianDay {
    value: f64,
    scale: TimeScale,
}

impl JulianDay {
    /// Creates a julian day in the given scale.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the value is not finite or outside [`MIN`, `MAX`].
    pub fn new(value: f64, scale: TimeScale) -> Result<Self> {
        check_julian_day(value)?;
        Ok(Self { value, scale })
    }

    /// Creates a julian ephemeris day (TT).
    ///
    /// # Errors
    /// Returns `OutOfRange` for values outside the supported range.
    pub fn ephemeris(value: f64) -> Result<Self> {
        Self::new(value, TimeScale::Ephemeris)
    }

    /// Creates a julian day in mean solar time (UT1).
    ///
    /// # Errors
    /// Returns `OutOfRange` for values outside the supported range.
    pub fn mean_solar(value: f64) -> Result<Self> {
        Self::new(value, TimeScale::MeanSolar)
    }

    /// Creates a julian day counted in civil POSIX time.
    ///
    /// # Errors
    /// Returns `OutOfRange` for values outside the supported range.
    pub fn posix(value: f64) -> Result<Self> {
        Self::new(value, TimeScale::Posix)
    }

    /// Creates a julian day from a timezone-aware chrono `DateTime`.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the instant lies outside the supported range.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>, scale: TimeScale) -> Result<Self> {
        let seconds = datetime.timestamp() as f64
            + f64::from(datetime.timestamp_subsec_nanos()) / 1e9;
        let posix = Self::posix(seconds / SECONDS_PER_DAY + UNIX_EPOCH)?;
        posix.convert(scale)
    }

    /// Creates a julian day from UTC calendar components.
    ///
    /// Dates before 1582-10-15 are read in the julian calendar, later dates in the
    /// gregorian calendar. Negative years are astronomical years (year 0 = 1 BCE).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for invalid components and `OutOfRange` for dates
    /// outside the supported range.
    ///
    /// # Example
    /// ```
    /// # use solar_lunar::time::{JulianDay, TimeScale};
    /// let jd = JulianDay::from_utc(2000, 1, 1, 12, 0, 0.0, TimeScale::Posix).unwrap();
    /// assert_eq!(jd.value(), 2_451_545.0);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        scale: TimeScale,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::invalid_datetime("day must be between 1 and 31"));
        }
        if hour > 23 {
            return Err(Error::invalid_datetime("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(Error::invalid_datetime("minute must be between 0 and 59"));
        }
        if !(0.0..60.0).contains(&second) {
            return Err(Error::invalid_datetime(
                "second must be between 0 and 59.999...",
            ));
        }
        if day > days_in_month(year, month, day)? {
            return Err(Error::invalid_datetime("day is out of range for month"));
        }

        let jd = calculate_julian_date(year, month, day, hour, minute, second);
        Self::posix(jd)?.convert(scale)
    }

    /// Gets the raw day count in this value's own scale.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Gets the time scale.
    #[must_use]
    pub const fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Gets the modified julian day (JD − 2400000.5) in this value's own scale.
    #[must_use]
    pub fn modified(&self) -> f64 {
        self.value - 2_400_000.5
    }

    /// Julian centuries since J2000.0, counted in this value's own scale.
    #[must_use]
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.value - J2000) / DAYS_PER_CENTURY
    }

    /// Julian ephemeris centuries since J2000.0, the argument of all position series.
    #[must_use]
    pub fn ephemeris_centuries(&self) -> f64 {
        (self.value_in(TimeScale::Ephemeris) - J2000) / DAYS_PER_CENTURY
    }

    /// Returns the raw day count of the same instant expressed in another scale.
    ///
    /// Unlike [`convert`](Self::convert) this does not check the supported range, which
    /// makes it usable for the last hours at either end of the interval.
    #[must_use]
    pub fn value_in(&self, scale: TimeScale) -> f64 {
        if scale == self.scale {
            return self.value;
        }
        let tt = match self.scale {
            TimeScale::Ephemeris => self.value,
            TimeScale::MeanSolar => ephemeris_from_mean_solar(self.value),
            TimeScale::Posix => ephemeris_from_posix(self.value),
        };
        match scale {
            TimeScale::Ephemeris => tt,
            TimeScale::MeanSolar => mean_solar_from_ephemeris(tt),
            TimeScale::Posix => posix_from_ephemeris(tt),
        }
    }

    /// Converts to another time scale.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the converted value leaves the supported range.
    pub fn convert(&self, scale: TimeScale) -> Result<Self> {
        Self::new(self.value_in(scale), scale)
    }

    /// Adds a (possibly negative or fractional) number of days, keeping the scale.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the result leaves the supported range.
    pub fn plus_days(&self, days: f64) -> Result<Self> {
        Self::new(self.value + days, self.scale)
    }

    /// Adds a number of seconds, keeping the scale.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the result leaves the supported range.
    pub fn plus_seconds(&self, seconds: f64) -> Result<Self> {
        self.plus_days(seconds / SECONDS_PER_DAY)
    }

    /// Converts to a UTC instant.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if chrono cannot represent the instant.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        datetime_from_posix(self.value_in(TimeScale::Posix))
    }
}

/// Validates a julian day against the supported range.
///
/// # Errors
/// Returns `OutOfRange` for non-finite values or values outside [`MIN`, `MAX`].
pub fn check_julian_day(value: f64) -> Result<()> {
    if !(MIN..=MAX).contains(&value) {
        return Err(Error::out_of_range(value));
    }
    Ok(())
}

/// Julian day (POSIX scale) of midnight UTC at the start of a calendar date.
pub(crate) fn posix_midnight(date: chrono::NaiveDate) -> f64 {
    use chrono::Datelike;

    // 1970-01-01 is day 719163 of the common era
    f64::from(date.num_days_from_ce() - 719_163) + UNIX_EPOCH
}

pub(crate) fn datetime_from_posix(posix: f64) -> Result<DateTime<Utc>> {
    let seconds = (posix - UNIX_EPOCH) * SECONDS_PER_DAY;
    if !seconds.is_finite() {
        return Err(Error::invalid_datetime("instant is not finite"));
    }
    let whole = seconds.floor();
    #[allow(clippy::cast_sign_loss)]
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
        .ok_or(Error::invalid_datetime("instant cannot be represented"))
}

fn ephemeris_from_mean_solar(ut: f64) -> f64 {
    ut + delta_t_days(ut)
}

fn mean_solar_from_ephemeris(tt: f64) -> f64 {
    let mut ut = tt - delta_t_days(tt);
    for _ in 0..2 {
        ut = tt - delta_t_days(ut);
    }
    ut
}

/// TT − UTC in days for a POSIX julian day.
///
/// Before 1972 UTC is taken to follow UT1, so the difference is ΔT.
fn tt_minus_posix(posix: f64) -> f64 {
    if posix < LEAP_SECOND_ERA {
        return delta_t_days(posix);
    }
    leap_seconds::tai_minus_utc(posix).map_or_else(
        || delta_t_days(posix),
        |tai_utc| (leap_seconds::TT_MINUS_TAI + tai_utc) / SECONDS_PER_DAY,
    )
}

fn ephemeris_from_posix(posix: f64) -> f64 {
    posix + tt_minus_posix(posix)
}

fn posix_from_ephemeris(tt: f64) -> f64 {
    let mut posix = tt - delta_t_days(tt);
    for _ in 0..3 {
        posix = tt - tt_minus_posix(posix);
    }
    posix
}

/// Calculates a julian date from calendar components (Meeus, chapter 7).
fn calculate_julian_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> f64 {
    let mut y = year;
    #[allow(clippy::cast_possible_wrap)]
    let mut m = month as i32;

    // January and February count as months 13 and 14 of the previous year
    if m < 3 {
        y -= 1;
        m += 12;
    }

    let d = f64::from(day) + (f64::from(hour) + (f64::from(minute) + second / 60.0) / 60.0) / 24.0;

    let mut jd = (365.25 * (f64::from(y) + 4716.0)).floor()
        + (30.6001 * f64::from(m + 1)).floor()
        + d
        - 1524.5;

    // gregorian correction from 1582-10-15 (JD 2299161) onwards
    if jd >= 2_299_161.0 {
        let a = (f64::from(y) / 100.0).floor();
        jd += 2.0 - a + (a / 4.0).floor();
    }

    jd
}

const fn is_gregorian_date(year: i32, month: u32, day: u32) -> bool {
    year > 1582 || (year == 1582 && (month > 10 || (month == 10 && day >= 15)))
}

const fn is_leap_year(year: i32, is_gregorian: bool) -> bool {
    if is_gregorian {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year % 4 == 0
    }
}

fn days_in_month(year: i32, month: u32, day: u32) -> Result<u32> {
    if year == 1582 && month == 10 && (5..=14).contains(&day) {
        return Err(Error::invalid_datetime(
            "dates 1582-10-05 through 1582-10-14 do not exist in the gregorian calendar",
        ));
    }

    let is_gregorian = is_gregorian_date(year, month, day);
    let days = match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year, is_gregorian) => 29,
        2 => 28,
        _ => 31,
    };
    Ok(days)
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct JulianDayRepr {
    value: f64,
    scale: TimeScale,
}

#[cfg(feature = "serde")]
impl TryFrom<JulianDayRepr> for JulianDay {
    type Error = Error;

    fn try_from(repr: JulianDayRepr) -> Result<Self> {
        Self::new(repr.value, repr.scale)
    }
}

#[cfg(feature = "serde")]
impl From<JulianDay> for JulianDayRepr {
    fn from(jd: JulianDay) -> Self {
        Self {
            value: jd.value,
            scale: jd.scale,
        }
    }
}
