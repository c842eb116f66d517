//! Equinoxes and solstices.
//!
//! The mean instants of Meeus chapter 27 seed a ±10 day bracket, inside which the moment
//! the apparent solar longitude reaches 0°, 90°, 180° or 270° is found by bisection.

#![allow(clippy::unreadable_literal)]

use crate::math::polynomial;
use crate::solver::bisect_longitude;
use crate::sun::SunPosition;
use crate::time::{JulianDay, DAYS_PER_CENTURY, J2000};
use crate::Result;
use chrono::{DateTime, Utc};

/// Mean instant polynomials (JDE) in millennia: years -1000..1000 from year 0.
#[rustfmt::skip]
const MEAN_BEFORE_1000: [[f64; 5]; 4] = [
    [1721139.29189, 365242.13740, 0.06134, 0.00111, -0.00071],
    [1721233.25401, 365241.72562, -0.05323, 0.00907, 0.00025],
    [1721325.70455, 365242.49558, -0.11677, -0.00297, 0.00074],
    [1721414.39987, 365242.88257, -0.00769, -0.00933, -0.00006],
];

/// Mean instant polynomials (JDE) in millennia: years 1000..3000 from year 2000.
#[rustfmt::skip]
const MEAN_AFTER_1000: [[f64; 5]; 4] = [
    [2451623.80984, 365242.37404, 0.05169, -0.00411, -0.00057],
    [2451716.56767, 365241.62603, 0.00325, 0.00888, -0.00030],
    [2451810.21715, 365242.01767, -0.11575, 0.00337, 0.00078],
    [2451900.05952, 365242.74049, -0.06223, -0.00823, 0.00032],
];

/// Half width of the search bracket around the mean instant, in days.
const MARGIN_DAYS: f64 = 10.0;

/// The four cardinal points of the sun's apparent path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AstronomicalSeason {
    /// Sun at apparent longitude 0°, March equinox.
    VernalEquinox,
    /// Sun at 90°, June solstice.
    SummerSolstice,
    /// Sun at 180°, September equinox.
    AutumnalEquinox,
    /// Sun at 270°, December solstice.
    WinterSolstice,
}

impl AstronomicalSeason {
    /// All four in calendar order.
    pub const ALL: [Self; 4] = [
        Self::VernalEquinox,
        Self::SummerSolstice,
        Self::AutumnalEquinox,
        Self::WinterSolstice,
    ];

    const fn index(self) -> usize {
        match self {
            Self::VernalEquinox => 0,
            Self::SummerSolstice => 1,
            Self::AutumnalEquinox => 2,
            Self::WinterSolstice => 3,
        }
    }

    /// Apparent solar longitude in degrees at which this season begins.
    #[must_use]
    pub const fn solar_longitude(self) -> f64 {
        match self {
            Self::VernalEquinox => 0.0,
            Self::SummerSolstice => 90.0,
            Self::AutumnalEquinox => 180.0,
            Self::WinterSolstice => 270.0,
        }
    }

    /// The season in progress at an instant, judged by the sun's apparent longitude.
    #[must_use]
    pub fn of(instant: &JulianDay) -> Self {
        let longitude = SunPosition::at(instant).apparent_longitude();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quadrant = (longitude / 90.0) as usize;
        Self::ALL[quadrant.min(3)]
    }

    /// Mean instant (JDE) of this season in a year, Meeus tables 27.A and 27.B.
    #[must_use]
    pub fn mean_instant(self, year: i32) -> f64 {
        let year = f64::from(year);
        if year < 1000.0 {
            polynomial(&MEAN_BEFORE_1000[self.index()], year / 1000.0)
        } else {
            polynomial(&MEAN_AFTER_1000[self.index()], (year - 2000.0) / 1000.0)
        }
    }

    /// The instant of this season in a year, in ephemeris time.
    ///
    /// # Errors
    /// Returns `OutOfRange` for years outside -2000..=3000.
    pub fn instant_in_year(self, year: i32) -> Result<JulianDay> {
        let estimate = JulianDay::ephemeris(self.mean_instant(year))?;
        let longitude = |t: f64| {
            SunPosition::from_centuries((t - J2000) / DAYS_PER_CENTURY).apparent_longitude()
        };
        let root = bisect_longitude(
            longitude,
            self.solar_longitude(),
            estimate.value() - MARGIN_DAYS,
            estimate.value() + MARGIN_DAYS,
        );
        JulianDay::ephemeris(root)
    }

    /// The instant of this season in a year, in UTC.
    ///
    /// # Errors
    /// Returns `OutOfRange` for years outside -2000..=3000.
    ///
    /// # Example
    /// ```
    /// use solar_lunar::season::AstronomicalSeason;
    ///
    /// let equinox = AstronomicalSeason::VernalEquinox.in_year(2024).unwrap();
    /// assert_eq!(equinox.format("%Y-%m-%d %H:%M").to_string(), "2024-03-20 03:06");
    /// ```
    pub fn in_year(self, year: i32) -> Result<DateTime<Utc>> {
        self.instant_in_year(year)?.to_datetime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summer_solstice_1962() {
        // Meeus example 27.a: 1962 June 21, 21h25m TD (JDE 2437837.39)
        let solstice = AstronomicalSeason::SummerSolstice.instant_in_year(1962).unwrap();
        assert!((solstice.value() - 2_437_837.3924).abs() < 0.001, "{}", solstice.value());
    }

    #[test]
    fn test_sun_longitude_at_result() {
        for season in AstronomicalSeason::ALL {
            let instant = season.instant_in_year(2024).unwrap();
            let longitude = SunPosition::at(&instant).apparent_longitude();
            let delta = crate::math::normalize_degrees_signed(longitude - season.solar_longitude());
            // one second of time is about 0.00001° of solar motion
            assert!(delta.abs() < 1e-4, "{season:?}: {longitude}");
        }
    }

    #[test]
    fn test_seasons_are_ordered() {
        for year in [-1000, 0, 1582, 2100, 3000] {
            let instants: Vec<f64> = AstronomicalSeason::ALL
                .iter()
                .map(|season| season.instant_in_year(year).unwrap().value())
                .collect();
            assert!(instants.windows(2).all(|pair| pair[0] < pair[1]), "{year}");
            // perihelion drifts, so the spring-to-winter span slowly lengthens
            let length = instants[3] - instants[0];
            assert!((273.0..278.0).contains(&length), "{year}: {length}");
        }
    }

    #[test]
    fn test_out_of_range_years() {
        assert!(AstronomicalSeason::VernalEquinox.in_year(3001).is_err());
        assert!(AstronomicalSeason::WinterSolstice.in_year(-2001).is_err());
        assert!(AstronomicalSeason::VernalEquinox.in_year(-2000).is_ok());
    }

    #[test]
    fn test_season_of_instant() {
        use crate::time::TimeScale;

        let instant = JulianDay::from_utc(2024, 8, 1, 0, 0, 0.0, TimeScale::Posix).unwrap();
        assert_eq!(AstronomicalSeason::of(&instant), AstronomicalSeason::SummerSolstice);
        let instant = JulianDay::from_utc(2024, 1, 1, 0, 0, 0.0, TimeScale::Posix).unwrap();
        assert_eq!(AstronomicalSeason::of(&instant), AstronomicalSeason::WinterSolstice);
    }
}
