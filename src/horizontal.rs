//! Equatorial to horizontal coordinate transform.
//!
//! Sidereal time follows Meeus (12.4) plus the equation of the equinoxes; the topocentric
//! parallax and azimuth formulas are those of the NREL solar position algorithm
//! (Reda & Andreas 2003, steps 3.10 to 3.14), applied to any body with a known equatorial
//! horizontal parallax.

#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

use crate::error::check_finite;
use crate::math::{
    acos_deg, asin_deg, atan2_deg, cos_deg, normalize_degrees_0_to_360, sin_deg, tan_deg,
};
use crate::nutation::{mean_obliquity, Nutation};
use crate::time::{delta_t_days, JulianDay, TimeScale, DAYS_PER_CENTURY, J2000};
use crate::{EquatorialCoordinates, GeoLocation, HorizontalPosition, RefractionCorrection, Result};

/// Elevation below which refraction and dip are not applied.
pub const NEAR_HORIZON: f64 = -0.83337;

/// Rotation of the earth relative to the equinox, degrees per mean solar day.
pub(crate) const SIDEREAL_RATE: f64 = 360.98564736629;

/// Ratio of polar to equatorial earth radius.
const EARTH_FLATTENING_FACTOR: f64 = 0.99664719;

/// Equatorial earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6378140.0;

/// WGS84 semi-major axis in meters.
const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening.
const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// Greenwich mean sidereal time in degrees for a julian day in mean solar time (UT1).
#[must_use]
pub fn mean_sidereal_time(ut: f64) -> f64 {
    let c = (ut - J2000) / DAYS_PER_CENTURY;
    normalize_degrees_0_to_360(
        280.46061837
            + SIDEREAL_RATE * (ut - J2000)
            + c * c * (0.000387933 - c / 38710000.0),
    )
}

/// Greenwich apparent sidereal time in degrees.
#[must_use]
pub fn apparent_sidereal_time(instant: &JulianDay) -> f64 {
    apparent_sidereal_time_ut(instant.value_in(TimeScale::MeanSolar))
}

pub(crate) fn apparent_sidereal_time_ut(ut: f64) -> f64 {
    let centuries = (ut + delta_t_days(ut) - J2000) / DAYS_PER_CENTURY;
    let nutation = Nutation::at(centuries);
    let true_obliquity = mean_obliquity(centuries) + nutation.obliquity;
    normalize_degrees_0_to_360(
        mean_sidereal_time(ut) + nutation.longitude * cos_deg(true_obliquity),
    )
}

/// Converts geocentric equatorial coordinates to the observer's horizon.
///
/// # Arguments
/// * `equatorial` - Geocentric apparent right ascension and declination
/// * `horizontal_parallax` - Equatorial horizontal parallax of the body in degrees
/// * `location` - Observer location
/// * `instant` - Time of observation (any scale)
/// * `refraction` - Atmospheric conditions, or `None` for the airless elevation
///
/// The topocentric parallax is always applied. Above [`NEAR_HORIZON`] the refraction (if
/// requested) and the geodetic dip of the observer's altitude are added.
///
/// # Errors
/// Returns `ComputationError` if the inputs produce a non-finite result.
pub fn to_horizontal(
    equatorial: &EquatorialCoordinates,
    horizontal_parallax: f64,
    location: &GeoLocation,
    instant: &JulianDay,
    refraction: Option<RefractionCorrection>,
) -> Result<HorizontalPosition> {
    let (azimuth, mut elevation) = topocentric(
        equatorial,
        horizontal_parallax,
        location,
        instant.value_in(TimeScale::MeanSolar),
    );

    if elevation > NEAR_HORIZON {
        if let Some(correction) = refraction {
            elevation += self::refraction(elevation, &correction);
        }
        elevation = (elevation + geodetic_dip(location.latitude(), location.altitude())).min(90.0);
    }

    check_finite(elevation, "elevation is not finite")?;
    HorizontalPosition::new(azimuth, elevation)
}

/// Topocentric azimuth and airless elevation (degrees) at a julian day in mean solar time.
pub(crate) fn topocentric(
    equatorial: &EquatorialCoordinates,
    horizontal_parallax: f64,
    location: &GeoLocation,
    ut: f64,
) -> (f64, f64) {
    let latitude = location.latitude();
    let altitude = location.altitude();

    let hour_angle = normalize_degrees_0_to_360(
        apparent_sidereal_time_ut(ut) + location.longitude() - equatorial.right_ascension(),
    );
    let delta = equatorial.declination();
    let sin_xi = sin_deg(horizontal_parallax);

    let u = (EARTH_FLATTENING_FACTOR * tan_deg(latitude)).atan().to_degrees();
    let y =
        EARTH_FLATTENING_FACTOR * sin_deg(u) + altitude / EARTH_RADIUS_METERS * sin_deg(latitude);
    let x = cos_deg(u) + altitude / EARTH_RADIUS_METERS * cos_deg(latitude);

    let denominator = cos_deg(delta) - x * sin_xi * cos_deg(hour_angle);
    let delta_alpha = atan2_deg(-x * sin_xi * sin_deg(hour_angle), denominator);
    let delta_prime = atan2_deg(
        (sin_deg(delta) - y * sin_xi) * cos_deg(delta_alpha),
        denominator,
    );
    let h_prime = hour_angle - delta_alpha;

    let zenith = acos_deg(
        (sin_deg(latitude) * sin_deg(delta_prime)
            + cos_deg(latitude) * cos_deg(delta_prime) * cos_deg(h_prime))
        .clamp(-1.0, 1.0),
    );
    let azimuth = normalize_degrees_0_to_360(
        180.0
            + atan2_deg(
                sin_deg(h_prime),
                cos_deg(h_prime) * sin_deg(latitude) - tan_deg(delta_prime) * cos_deg(latitude),
            ),
    );

    (azimuth, 90.0 - zenith)
}

/// Atmospheric refraction in degrees for an airless elevation (degrees).
///
/// Uses the Saemundsson-type formula of the NREL SPA, scaled by pressure and temperature.
#[must_use]
pub fn refraction(elevation: f64, correction: &RefractionCorrection) -> f64 {
    (correction.pressure() / 1010.0) * (283.0 / (273.0 + correction.temperature())) * 1.02
        / (60.0 * tan_deg(elevation + 10.3 / (elevation + 5.11)))
}

/// Dip of the horizon in degrees for an observer at the given altitude (meters).
///
/// The earth is modelled by the WGS84 spheroid's local radius of curvature at the
/// observer's latitude.
#[must_use]
pub fn geodetic_dip(latitude: f64, altitude: f64) -> f64 {
    if altitude <= 0.0 {
        return 0.0;
    }
    let e2 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);
    let sin_latitude = sin_deg(latitude);
    let radius =
        WGS84_SEMI_MAJOR_AXIS * (1.0 - e2).sqrt() / (1.0 - e2 * sin_latitude * sin_latitude);
    acos_deg(radius / (radius + altitude))
}

/// Equatorial horizontal parallax in degrees of a body at the given distance (km).
#[must_use]
pub fn horizontal_parallax_km(distance: f64) -> f64 {
    asin_deg(EARTH_RADIUS_METERS / 1000.0 / distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidereal_time_1987_april_10() {
        // Meeus example 12.a / 12.b: 13h10m46.3668s mean, 13h10m46.1351s apparent at 0h UT
        let ut = 2_446_895.5;
        let mean = mean_sidereal_time(ut);
        assert!((mean - 197.693195).abs() < 1e-5);

        let instant = JulianDay::mean_solar(ut).unwrap();
        let apparent = apparent_sidereal_time(&instant);
        let expected = (13.0 + 10.0 / 60.0 + 46.1351 / 3600.0) * 15.0;
        assert!((apparent - expected).abs() < 2e-4);
    }

    #[test]
    fn test_refraction_at_horizon() {
        let standard = RefractionCorrection::standard();
        let at_horizon = refraction(0.0, &standard);
        assert!((at_horizon - 0.4762).abs() < 0.001);

        let high = refraction(45.0, &standard);
        assert!(high > 0.0 && high < 0.02);

        let thin = RefractionCorrection::new(500.0, 15.0).unwrap();
        assert!(refraction(0.0, &thin) < at_horizon);
    }

    #[test]
    fn test_geodetic_dip() {
        assert_eq!(geodetic_dip(45.0, 0.0), 0.0);
        // geometric dip is about 1.93′·√h for h in meters
        let dip = geodetic_dip(45.0, 100.0);
        assert!((dip * 60.0 - 19.25).abs() < 0.1);
        assert!(geodetic_dip(45.0, 1000.0) > dip);
    }

    #[test]
    fn test_zenith_and_nadir() {
        let location = GeoLocation::new(0.0, 0.0, 0.0).unwrap();
        let instant = JulianDay::mean_solar(2_451_545.0).unwrap();
        let sidereal = apparent_sidereal_time(&instant);

        let overhead = EquatorialCoordinates::new(sidereal, 0.0).unwrap();
        let position = to_horizontal(&overhead, 0.0, &location, &instant, None).unwrap();
        assert!((position.elevation() - 90.0).abs() < 1e-6);

        let opposite = EquatorialCoordinates::new(sidereal + 180.0, 0.0).unwrap();
        let position = to_horizontal(&opposite, 0.0, &location, &instant, None).unwrap();
        assert!((position.elevation() + 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_azimuth_quadrants() {
        let location = GeoLocation::new(45.0, 0.0, 0.0).unwrap();
        let instant = JulianDay::mean_solar(2_451_545.0).unwrap();
        let sidereal = apparent_sidereal_time(&instant);

        // on the meridian south of the zenith
        let south = EquatorialCoordinates::new(sidereal, 0.0).unwrap();
        let position = to_horizontal(&south, 0.0, &location, &instant, None).unwrap();
        assert!((position.azimuth() - 180.0).abs() < 1e-6);
        assert!((position.elevation() - 45.0).abs() < 1e-6);

        // six hours before transit the body is in the east
        let east = EquatorialCoordinates::new(sidereal + 90.0, 0.0).unwrap();
        let position = to_horizontal(&east, 0.0, &location, &instant, None).unwrap();
        assert!((position.azimuth() - 90.0).abs() < 1e-6);
        assert!(position.elevation().abs() < 1e-6);
    }

    #[test]
    fn test_parallax_lowers_the_moon() {
        let location = GeoLocation::new(45.0, 0.0, 0.0).unwrap();
        let instant = JulianDay::mean_solar(2_451_545.0).unwrap();
        let sidereal = apparent_sidereal_time(&instant);
        let moon = EquatorialCoordinates::new(sidereal + 60.0, 10.0).unwrap();

        let geocentric = to_horizontal(&moon, 0.0, &location, &instant, None).unwrap();
        let parallax = horizontal_parallax_km(384_400.0);
        let topocentric = to_horizontal(&moon, parallax, &location, &instant, None).unwrap();
        let lowered = geocentric.elevation() - topocentric.elevation();
        assert!(lowered > 0.5 && lowered < parallax);
    }

    #[test]
    fn test_refraction_only_above_threshold() {
        let location = GeoLocation::new(45.0, 0.0, 0.0).unwrap();
        let instant = JulianDay::mean_solar(2_451_545.0).unwrap();
        let sidereal = apparent_sidereal_time(&instant);
        let standard = Some(RefractionCorrection::standard());

        let deep = EquatorialCoordinates::new(sidereal + 150.0, -20.0).unwrap();
        let airless = to_horizontal(&deep, 0.0, &location, &instant, None).unwrap();
        let refracted = to_horizontal(&deep, 0.0, &location, &instant, standard).unwrap();
        assert!(airless.elevation() < NEAR_HORIZON);
        assert_eq!(airless.elevation(), refracted.elevation());

        let high = EquatorialCoordinates::new(sidereal + 30.0, 20.0).unwrap();
        let airless = to_horizontal(&high, 0.0, &location, &instant, None).unwrap();
        let refracted = to_horizontal(&high, 0.0, &location, &instant, standard).unwrap();
        assert!(refracted.elevation() > airless.elevation());
    }
}
