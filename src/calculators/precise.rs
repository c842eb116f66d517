//! High precision sunrise and sunset from the full solar series.
//!
//! The sun's apparent position comes from [`SunPosition`]. Starting from apparent noon, the
//! event time is refined until the local hour angle matches the hour angle at which the
//! sun's center reaches the requested zenith. The default zenith accounts for the solar
//! semidiameter, refraction in the standard atmosphere at the observer's altitude, and the
//! dip of the horizon on the WGS84 spheroid.

use super::{
    SolarCalculator, FEATURE_DECLINATION, FEATURE_NUTATION, FEATURE_OBLIQUITY,
    FEATURE_RIGHT_ASCENSION, FEATURE_SOLAR_LONGITUDE,
};
use crate::horizontal::{apparent_sidereal_time_ut, geodetic_dip, SIDEREAL_RATE};
use crate::math::{acos_deg, cos_deg, normalize_degrees_signed, sin_deg};
use crate::solver::refine;
use crate::sun::{ephemeris_centuries_ut, SunPosition};
use crate::time::{posix_midnight, JulianDay, SECONDS_PER_DAY};
use crate::types::standard_atmosphere;
use chrono::NaiveDate;

/// Apparent semidiameter of the sun in degrees.
const SEMIDIAMETER: f64 = 16.0 / 60.0;

/// Refraction at the horizon in degrees for 1013.25 hPa and 15 °C.
const HORIZON_REFRACTION: f64 = 34.0 / 60.0;

const MAX_STEPS: usize = 6;

fn hour_angle(latitude: f64, declination: f64, zenith: f64) -> Option<f64> {
    let cos_hour_angle = (cos_deg(zenith) - sin_deg(latitude) * sin_deg(declination))
        / (cos_deg(latitude) * cos_deg(declination));
    (-1.0..=1.0)
        .contains(&cos_hour_angle)
        .then(|| acos_deg(cos_hour_angle))
}

/// Full-series sunrise/sunset; the default calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreciseCalculator;

impl PreciseCalculator {
    fn event(
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
        rising: bool,
    ) -> Option<JulianDay> {
        let direction = if rising { -1.0 } else { 1.0 };
        let mean_noon = posix_midnight(date) + 0.5 - longitude / 360.0;
        let sun = SunPosition::from_centuries(ephemeris_centuries_ut(mean_noon));
        let noon = mean_noon - sun.equation_of_time() / SECONDS_PER_DAY;

        let first = hour_angle(latitude, sun.declination(), zenith)?;
        let estimate = noon + direction * first / 360.0;

        let t = refine(estimate, 1.0 / SECONDS_PER_DAY, MAX_STEPS, |t| {
            let sun = SunPosition::from_centuries(ephemeris_centuries_ut(t));
            let target = direction * hour_angle(latitude, sun.declination(), zenith)?;
            let sidereal = apparent_sidereal_time_ut(t);
            let local_hour_angle =
                normalize_degrees_signed(sidereal + longitude - sun.right_ascension());
            Some(normalize_degrees_signed(target - local_hour_angle) / SIDEREAL_RATE)
        })
        .value()?;
        JulianDay::mean_solar(t).ok()
    }
}

impl SolarCalculator for PreciseCalculator {
    fn name(&self) -> &str {
        "PRECISE"
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
        SunPosition::at(instant).equation_of_time()
    }

    fn feature(&self, instant: &JulianDay, name: &str) -> f64 {
        let sun = SunPosition::at(instant);
        match name {
            FEATURE_DECLINATION => sun.declination(),
            FEATURE_RIGHT_ASCENSION => sun.right_ascension(),
            FEATURE_SOLAR_LONGITUDE => sun.apparent_longitude(),
            FEATURE_OBLIQUITY => sun.true_obliquity(),
            FEATURE_NUTATION => sun.nutation().longitude,
            _ => f64::NAN,
        }
    }

    fn geodetic_angle(&self, latitude: f64, altitude: f64) -> f64 {
        geodetic_dip(latitude, altitude)
    }

    fn zenith_angle(&self, latitude: f64, altitude: f64) -> f64 {
        let (pressure, temperature) = standard_atmosphere(altitude);
        let refraction =
            HORIZON_REFRACTION * (pressure / 1013.25) * (288.15 / (273.15 + temperature));
        90.0 + SEMIDIAMETER + refraction + self.geodetic_angle(latitude, altitude)
    }
}
