//! Sunrise equation of the Almanac for Computers (Nautical Almanac Office, 1990).
//!
//! A handful of trigonometric terms give sunrise and sunset to within a couple of minutes
//! between 65°S and 65°N. Beyond that band the algorithm is undefined.

#![allow(clippy::unreadable_literal)]

use super::SolarCalculator;
use crate::math::{acos_deg, atan2_deg, cos_deg, normalize_degrees_0_to_360, sin_deg};
use crate::sun::equation_of_time_ut;
use crate::time::{posix_midnight, JulianDay, TimeScale};
use chrono::{Datelike, NaiveDate};

/// Latitude band in which the almanac formulas hold.
const LATITUDE_LIMIT: f64 = 65.0;

/// Almanac for Computers sunrise/sunset, valid within ±65° latitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCalculator;

impl SimpleCalculator {
    fn event(
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
        rising: bool,
    ) -> Option<JulianDay> {
        let longitude_hours = longitude / 15.0;
        let approximate = f64::from(date.ordinal())
            + ((if rising { 6.0 } else { 18.0 }) - longitude_hours) / 24.0;

        let mean_anomaly = 0.9856 * approximate - 3.289;
        let true_longitude = normalize_degrees_0_to_360(
            mean_anomaly
                + 1.916 * sin_deg(mean_anomaly)
                + 0.020 * sin_deg(2.0 * mean_anomaly)
                + 282.634,
        );
        let right_ascension_hours = normalize_degrees_0_to_360(atan2_deg(
            0.91764 * sin_deg(true_longitude),
            cos_deg(true_longitude),
        )) / 15.0;

        let sin_declination = 0.39782 * sin_deg(true_longitude);
        let cos_declination = sin_declination.asin().cos();
        let cos_hour_angle = (cos_deg(zenith) - sin_declination * sin_deg(latitude))
            / (cos_declination * cos_deg(latitude));
        if !(-1.0..=1.0).contains(&cos_hour_angle) {
            return None;
        }

        let hour_angle = acos_deg(cos_hour_angle);
        let hour_angle_hours = (if rising { 360.0 - hour_angle } else { hour_angle }) / 15.0;
        let local_mean_time =
            hour_angle_hours + right_ascension_hours - 0.06571 * approximate - 6.622;
        let utc_hours = local_mean_time.rem_euclid(24.0) - longitude_hours;

        JulianDay::mean_solar(posix_midnight(date) + utc_hours / 24.0).ok()
    }
}

impl SolarCalculator for SimpleCalculator {
    fn name(&self) -> &str {
        "SIMPLE"
    }

    fn sunrise(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
    ) -> Option<JulianDay> {
        Self::event(date, latitude, longitude, zenith, true)
    }

    fn sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
    ) -> Option<JulianDay> {
        Self::event(date, latitude, longitude, zenith, false)
    }

    fn equation_of_time(&self, instant: &JulianDay) -> f64 {
        equation_of_time_ut(instant.value_in(TimeScale::MeanSolar))
    }

    fn supports_latitude(&self, latitude: f64) -> bool {
        latitude.abs() <= LATITUDE_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::STANDARD_ZENITH;

    #[test]
    fn test_almanac_example() {
        // Almanac for Computers worked example: Wayne, New Jersey, 1990-06-25,
        // sunrise 05:26 local daylight time (09:26 UTC)
        let date = NaiveDate::from_ymd_opt(1990, 6, 25).unwrap();
        let rise = SimpleCalculator
            .sunrise(date, 40.9, -74.3, STANDARD_ZENITH)
            .unwrap();
        let hours = (rise.value() - posix_midnight(date)) * 24.0;
        assert!((hours - (9.0 + 26.0 / 60.0)).abs() < 2.0 / 60.0, "{hours}");
    }

    #[test]
    fn test_latitude_band() {
        assert!(SimpleCalculator.supports_latitude(65.0));
        assert!(SimpleCalculator.supports_latitude(-64.9));
        assert!(!SimpleCalculator.supports_latitude(65.1));
        assert!(!SimpleCalculator.supports_latitude(-80.0));
    }
}
