//! Sunrise and sunset after Reingold & Dershowitz, Calendrical Calculations.
//!
//! The sun's longitude uses the full periodic series with the book's approximate aberration
//! and nutation. Events are found as the moment the sun is a given angle below the
//! horizon, iterating on local apparent time. Observer altitude enters through an
//! approximate dip of the horizon.

#![allow(clippy::unreadable_literal)]

use super::{
    SolarCalculator, FEATURE_DECLINATION, FEATURE_NUTATION, FEATURE_OBLIQUITY,
    FEATURE_SOLAR_LONGITUDE,
};
use crate::math::{acos_deg, asin_deg, cos_deg, normalize_degrees_0_to_360, sin_deg, tan_deg};
use crate::nutation::mean_obliquity;
use crate::solver::refine;
use crate::sun::{ephemeris_centuries_ut, geometric_longitude};
use crate::time::{posix_midnight, JulianDay, TimeScale, SECONDS_PER_DAY};
use chrono::NaiveDate;
use std::f64::consts::TAU;

/// Mean radius of the earth in meters used for the dip.
const EARTH_RADIUS: f64 = 6.372e6;

/// Convergence of the depression loop, in days.
const TOLERANCE: f64 = 30.0 / SECONDS_PER_DAY;

const MAX_STEPS: usize = 8;

fn aberration(c: f64) -> f64 {
    0.0000974 * cos_deg(177.63 + 35999.01848 * c) - 0.005575
}

fn nutation(c: f64) -> f64 {
    let a = 124.90 - 1934.134 * c + 0.002063 * c * c;
    let b = 201.11 + 72001.5377 * c + 0.00057 * c * c;
    -0.004778 * sin_deg(a) - 0.0003667 * sin_deg(b)
}

fn solar_longitude(c: f64) -> f64 {
    normalize_degrees_0_to_360(geometric_longitude(c) + aberration(c) + nutation(c))
}

fn declination(c: f64) -> f64 {
    asin_deg(sin_deg(mean_obliquity(c)) * sin_deg(solar_longitude(c)))
}

/// Equation of time as a fraction of a day, bounded to half a day.
fn equation_of_time(ut: f64) -> f64 {
    let c = ephemeris_centuries_ut(ut);
    let lambda = 280.46645 + 36000.76983 * c + 0.0003032 * c * c;
    let anomaly = 357.52910 + 35999.05030 * c - 0.0001559 * c * c - 0.00000048 * c * c * c;
    let eccentricity = 0.016708617 - 0.000042037 * c - 0.0000001236 * c * c;
    let y = tan_deg(mean_obliquity(c) / 2.0).powi(2);
    let equation = (y * sin_deg(2.0 * lambda) - 2.0 * eccentricity * sin_deg(anomaly)
        + 4.0 * eccentricity * y * sin_deg(anomaly) * cos_deg(2.0 * lambda)
        - 0.5 * y * y * sin_deg(4.0 * lambda)
        - 1.25 * eccentricity * eccentricity * sin_deg(2.0 * anomaly))
        / TAU;
    equation.clamp(-0.5, 0.5)
}

/// Calendrical Calculations sunrise/sunset.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendricalCalculator;

impl CalendricalCalculator {
    fn event(
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
        rising: bool,
    ) -> Option<JulianDay> {
        let depression = zenith - 90.0;
        let universal = |local: f64| local - longitude / 360.0;
        let sine_offset = |local: f64| {
            let delta = declination(ephemeris_centuries_ut(universal(local)));
            tan_deg(latitude) * tan_deg(delta)
                + sin_deg(depression) / (cos_deg(delta) * cos_deg(latitude))
        };

        // local mean time at which the sun is `depression` below the horizon, near `local`
        let approximate = |local: f64| -> Option<f64> {
            let midnight = (local - 0.5).floor() + 0.5;
            let mut offset = sine_offset(local);
            if offset.abs() > 1.0 {
                let alternative = match (depression >= 0.0, rising) {
                    (true, true) => midnight,
                    (true, false) => midnight + 1.0,
                    (false, _) => midnight + 0.5,
                };
                offset = sine_offset(alternative);
            }
            if offset.abs() > 1.0 {
                return None;
            }
            let offset = (asin_deg(offset) / 360.0 + 0.5).rem_euclid(1.0) - 0.5;
            let apparent = midnight + if rising { 0.25 - offset } else { 0.75 + offset };
            Some(apparent - equation_of_time(universal(apparent)))
        };

        let start = posix_midnight(date) + if rising { 0.25 } else { 0.75 };
        let local = refine(start, TOLERANCE, MAX_STEPS, |local| {
            approximate(local).map(|next| next - local)
        })
        .value()?;
        JulianDay::mean_solar(universal(local)).ok()
    }
}

impl SolarCalculator for CalendricalCalculator {
    fn name(&self) -> &str {
        "CC"
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
        equation_of_time(instant.value_in(TimeScale::MeanSolar)) * SECONDS_PER_DAY
    }

    fn feature(&self, instant: &JulianDay, name: &str) -> f64 {
        let c = instant.ephemeris_centuries();
        match name {
            FEATURE_DECLINATION => declination(c),
            FEATURE_SOLAR_LONGITUDE => solar_longitude(c),
            FEATURE_OBLIQUITY => mean_obliquity(c),
            FEATURE_NUTATION => nutation(c),
            _ => f64::NAN,
        }
    }

    fn geodetic_angle(&self, _latitude: f64, altitude: f64) -> f64 {
        if altitude <= 0.0 {
            return 0.0;
        }
        acos_deg(EARTH_RADIUS / (EARTH_RADIUS + altitude)) + 19.0 / 3600.0 * altitude.sqrt()
    }
}
