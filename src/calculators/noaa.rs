//! The NOAA solar calculator.
//!
//! Formulas of the NOAA Global Monitoring Laboratory spreadsheet, themselves a truncation of
//! Meeus chapter 25. Rise and set times are good to about a minute outside the polar regions;
//! observer altitude is not taken into account.

#![allow(clippy::unreadable_literal)]

use super::{SolarCalculator, FEATURE_DECLINATION, FEATURE_OBLIQUITY, FEATURE_SOLAR_LONGITUDE};
use crate::math::{acos_deg, asin_deg, cos_deg, normalize_degrees_0_to_360, sin_deg, tan_deg};
use crate::time::{posix_midnight, JulianDay, TimeScale, DAYS_PER_CENTURY, J2000};
use chrono::NaiveDate;

/// Re-evaluations of the sun's position at the first estimate of the event.
const PASSES: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Sun {
    apparent_longitude: f64,
    obliquity: f64,
    declination: f64,
    /// minutes
    equation_of_time: f64,
}

impl Sun {
    fn at(julian_day: f64) -> Self {
        let c = (julian_day - J2000) / DAYS_PER_CENTURY;
        let mean_longitude =
            normalize_degrees_0_to_360(280.46646 + c * (36000.76983 + c * 0.0003032));
        let mean_anomaly = 357.52911 + c * (35999.05029 - 0.0001537 * c);
        let eccentricity = 0.016708634 - c * (0.000042037 + 0.0000001267 * c);
        let center = sin_deg(mean_anomaly) * (1.914602 - c * (0.004817 + 0.000014 * c))
            + sin_deg(2.0 * mean_anomaly) * (0.019993 - 0.000101 * c)
            + sin_deg(3.0 * mean_anomaly) * 0.000289;
        let omega = 125.04 - 1934.136 * c;
        let apparent_longitude = mean_longitude + center - 0.00569 - 0.00478 * sin_deg(omega);
        let obliquity = 23.0
            + (26.0 + (21.448 - c * (46.815 + c * (0.00059 - c * 0.001813))) / 60.0) / 60.0
            + 0.00256 * cos_deg(omega);
        let declination = asin_deg(sin_deg(obliquity) * sin_deg(apparent_longitude));

        let y = tan_deg(obliquity / 2.0).powi(2);
        let (e, m, l) = (eccentricity, mean_anomaly, mean_longitude);
        let equation_of_time = (y * sin_deg(2.0 * l) - 2.0 * e * sin_deg(m)
            + 4.0 * e * y * sin_deg(m) * cos_deg(2.0 * l)
            - 0.5 * y * y * sin_deg(4.0 * l)
            - 1.25 * e * e * sin_deg(2.0 * m))
        .to_degrees()
            * 4.0;

        Self {
            apparent_longitude: normalize_degrees_0_to_360(apparent_longitude),
            obliquity,
            declination,
            equation_of_time,
        }
    }
}

/// NOAA spreadsheet sunrise/sunset.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoaaCalculator;

impl NoaaCalculator {
    fn event(
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
        rising: bool,
    ) -> Option<JulianDay> {
        let midnight = posix_midnight(date);
        let mut t = midnight + 0.5 - longitude / 360.0;
        for _ in 0..PASSES {
            let sun = Sun::at(t);
            let cos_hour_angle = cos_deg(zenith) / (cos_deg(latitude) * cos_deg(sun.declination))
                - tan_deg(latitude) * tan_deg(sun.declination);
            if !(-1.0..=1.0).contains(&cos_hour_angle) {
                return None;
            }
            let hour_angle = acos_deg(cos_hour_angle);
            let hour_angle = if rising { hour_angle } else { -hour_angle };
            let minutes = 720.0 - 4.0 * (longitude + hour_angle) - sun.equation_of_time;
            t = midnight + minutes / 1440.0;
        }
        JulianDay::mean_solar(t).ok()
    }
}

impl SolarCalculator for NoaaCalculator {
    fn name(&self) -> &str {
        "NOAA"
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
        Sun::at(instant.value_in(TimeScale::MeanSolar)).equation_of_time * 60.0
    }

    fn feature(&self, instant: &JulianDay, name: &str) -> f64 {
        let sun = Sun::at(instant.value_in(TimeScale::MeanSolar));
        match name {
            FEATURE_DECLINATION => sun.declination,
            FEATURE_SOLAR_LONGITUDE => sun.apparent_longitude,
            FEATURE_OBLIQUITY => sun.obliquity,
            _ => f64::NAN,
        }
    }
}
