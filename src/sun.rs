//! Apparent position of the sun.
//!
//! The geometric longitude comes from the 49-term series of Bretagnon & Simon
//! (Planetary Programs and Tables, 1986), good to a few arcseconds between −2000 and +3000.
//! Nutation, aberration and the conversion to equatorial coordinates follow Meeus,
//! chapters 22 and 25.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::horizontal::to_horizontal;
use crate::math::{
    asin_deg, atan2_deg, cos_deg, normalize_degrees_0_to_360, normalize_degrees_signed,
    polynomial, sin_deg,
};
use crate::nutation::{mean_obliquity, Nutation};
use crate::time::{JulianDay, TimeScale};
use crate::types::HorizontalPosition;
use crate::{EquatorialCoordinates, GeoLocation, RefractionCorrection, Result};
use chrono::{DateTime, TimeZone};

/// Amplitude, phase (degrees) and frequency (degrees per century) of each periodic term.
#[rustfmt::skip]
const LONGITUDE_TERMS: [(f64, f64, f64); 49] = [
    (403406.0, 270.54861, 0.9287892),
    (195207.0, 340.19128, 35999.1376958),
    (119433.0, 63.91854, 35999.4089666),
    (112392.0, 331.26220, 35998.7287385),
    (3891.0, 317.843, 71998.20261),
    (2819.0, 86.631, 71998.4403),
    (1721.0, 240.052, 36000.35726),
    (660.0, 310.26, 71997.4812),
    (350.0, 247.23, 32964.4678),
    (334.0, 260.87, -19.4410),
    (314.0, 297.82, 445267.1117),
    (268.0, 343.14, 45036.8840),
    (242.0, 166.79, 3.1008),
    (234.0, 81.53, 22518.4434),
    (158.0, 3.50, -19.9739),
    (132.0, 132.75, 65928.9345),
    (129.0, 182.95, 9038.0293),
    (114.0, 162.03, 3034.7684),
    (99.0, 29.8, 33718.148),
    (93.0, 266.4, 3034.448),
    (86.0, 249.2, -2280.773),
    (78.0, 157.6, 29929.992),
    (72.0, 257.8, 31556.493),
    (68.0, 185.1, 149.588),
    (64.0, 69.9, 9037.750),
    (46.0, 8.0, 107997.405),
    (38.0, 197.1, -4444.176),
    (37.0, 250.4, 151.771),
    (32.0, 65.3, 67555.316),
    (29.0, 162.7, 31556.080),
    (28.0, 341.5, -4561.540),
    (27.0, 291.6, 107996.706),
    (27.0, 98.5, 1221.655),
    (25.0, 146.7, 62894.167),
    (24.0, 110.0, 31437.369),
    (21.0, 5.2, 14578.298),
    (21.0, 342.6, -31931.757),
    (20.0, 230.9, 34777.243),
    (18.0, 256.1, 1221.999),
    (17.0, 45.3, 62894.511),
    (14.0, 242.9, -4442.039),
    (13.0, 115.2, 107997.909),
    (13.0, 151.8, 119.066),
    (13.0, 285.3, 16859.071),
    (12.0, 53.3, -4.578),
    (10.0, 126.6, 26895.292),
    (10.0, 205.7, -39.127),
    (10.0, 85.9, 12297.536),
    (10.0, 146.1, 90073.778),
];

/// Annual aberration constant in arcseconds.
const ABERRATION_CONSTANT: f64 = 20.4898;

/// Equatorial horizontal parallax of the sun at 1 AU, arcseconds.
const SOLAR_PARALLAX: f64 = 8.794;

/// Geometric (true, mean equinox of date) longitude of the sun in degrees.
pub(crate) fn geometric_longitude(centuries: f64) -> f64 {
    let c = centuries;
    let sum: f64 = LONGITUDE_TERMS
        .iter()
        .map(|&(amplitude, phase, frequency)| amplitude * sin_deg(phase + frequency * c))
        .sum();
    normalize_degrees_0_to_360(282.7771834 + 36000.76953744 * c + 0.000005729577951308232 * sum)
}

/// Earth-sun distance in AU from the equation of center (Meeus 25.5).
pub(crate) fn distance(centuries: f64) -> f64 {
    let c = centuries;
    let m = polynomial(&[357.52911, 35999.05029, -0.0001537], c);
    let e = polynomial(&[0.016708634, -0.000042037, -0.0000001267], c);
    let center = polynomial(&[1.914602, -0.004817, -0.000014], c) * sin_deg(m)
        + (0.019993 - 0.000101 * c) * sin_deg(2.0 * m)
        + 0.000289 * sin_deg(3.0 * m);
    1.000001018 * (1.0 - e * e) / (1.0 + e * cos_deg(m + center))
}

/// Apparent geocentric position of the sun at one instant.
///
/// # Example
/// ```
/// use solar_lunar::sun::SunPosition;
/// use solar_lunar::time::JulianDay;
///
/// // 1992-10-13 0h TD (Meeus example 25.b)
/// let sun = SunPosition::at(&JulianDay::ephemeris(2_448_908.5).unwrap());
/// assert!((sun.right_ascension() - 198.378178).abs() < 0.001);
/// assert!((sun.declination() + 7.783871).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    apparent_longitude: f64,
    right_ascension: f64,
    declination: f64,
    distance: f64,
    nutation: Nutation,
    mean_obliquity: f64,
    equation_of_time: f64,
}

impl SunPosition {
    /// Computes the position for an instant in any time scale.
    #[must_use]
    pub fn at(instant: &JulianDay) -> Self {
        Self::from_centuries(instant.ephemeris_centuries())
    }

    /// Computes the position for julian ephemeris centuries since J2000.0.
    pub(crate) fn from_centuries(centuries: f64) -> Self {
        let c = centuries;
        let nutation = Nutation::at(c);
        let distance = distance(c);
        let apparent_longitude = normalize_degrees_0_to_360(
            geometric_longitude(c) + nutation.longitude - ABERRATION_CONSTANT / 3600.0 / distance,
        );
        let mean_obliquity = mean_obliquity(c);
        let obliquity = mean_obliquity + nutation.obliquity;

        let right_ascension = normalize_degrees_0_to_360(atan2_deg(
            sin_deg(apparent_longitude) * cos_deg(obliquity),
            cos_deg(apparent_longitude),
        ));
        let declination = asin_deg(sin_deg(obliquity) * sin_deg(apparent_longitude));

        // Meeus 28.1 with the mean longitude of VSOP87 (Meeus 28.2), τ in millennia
        let tau = c / 10.0;
        let mean_longitude = normalize_degrees_0_to_360(polynomial(
            &[
                280.4664567,
                360007.6982779,
                0.03032028,
                1.0 / 49931.0,
                -1.0 / 15300.0,
                -1.0 / 2_000_000.0,
            ],
            tau,
        ));
        let equation_of_time = normalize_degrees_signed(
            mean_longitude - 0.0057183 - right_ascension + nutation.longitude * cos_deg(obliquity),
        ) * 240.0;

        Self {
            apparent_longitude,
            right_ascension,
            declination,
            distance,
            nutation,
            mean_obliquity,
            equation_of_time,
        }
    }

    /// Apparent ecliptic longitude in degrees [0, 360), referred to the true equinox of date.
    #[must_use]
    pub const fn apparent_longitude(&self) -> f64 {
        self.apparent_longitude
    }

    /// Apparent right ascension in degrees [0, 360).
    #[must_use]
    pub const fn right_ascension(&self) -> f64 {
        self.right_ascension
    }

    /// Apparent declination in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }

    /// Right ascension and declination as a value.
    #[must_use]
    pub const fn equatorial(&self) -> EquatorialCoordinates {
        EquatorialCoordinates::from_trusted(self.right_ascension, self.declination)
    }

    /// Distance from the earth in astronomical units.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Nutation in longitude and obliquity.
    #[must_use]
    pub const fn nutation(&self) -> Nutation {
        self.nutation
    }

    /// Mean obliquity of the ecliptic in degrees.
    #[must_use]
    pub const fn mean_obliquity(&self) -> f64 {
        self.mean_obliquity
    }

    /// True obliquity (mean obliquity plus nutation) in degrees.
    #[must_use]
    pub fn true_obliquity(&self) -> f64 {
        self.mean_obliquity + self.nutation.obliquity
    }

    /// Equation of time in seconds (apparent minus mean solar time).
    #[must_use]
    pub const fn equation_of_time(&self) -> f64 {
        self.equation_of_time
    }

    /// Equatorial horizontal parallax in degrees.
    #[must_use]
    pub fn horizontal_parallax(&self) -> f64 {
        SOLAR_PARALLAX / 3600.0 / self.distance
    }
}

/// Equation of time in seconds at an instant, from the full solar series.
///
/// Positive values mean a sundial is ahead of the clock.
#[must_use]
pub(crate) fn equation_of_time_ut(ut: f64) -> f64 {
    SunPosition::from_centuries(ephemeris_centuries_ut(ut)).equation_of_time
}

/// Julian ephemeris centuries since J2000.0 for a raw julian day in mean solar time.
pub(crate) fn ephemeris_centuries_ut(ut: f64) -> f64 {
    let tt = ut + crate::time::delta_t_days(ut);
    (tt - crate::time::J2000) / crate::time::DAYS_PER_CENTURY
}

/// Observed position of the sun: geocentric equatorial and topocentric horizontal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunObservation {
    equatorial: EquatorialCoordinates,
    horizontal: HorizontalPosition,
}

impl SunObservation {
    /// Right ascension in degrees.
    #[must_use]
    pub const fn right_ascension(&self) -> f64 {
        self.equatorial.right_ascension()
    }

    /// Declination in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.equatorial.declination()
    }

    /// Azimuth in degrees, north = 0°, clockwise.
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.horizontal.azimuth()
    }

    /// Refracted elevation above the horizon in degrees.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.horizontal.elevation()
    }

    /// Equatorial coordinates.
    #[must_use]
    pub const fn equatorial(&self) -> EquatorialCoordinates {
        self.equatorial
    }

    /// Horizontal coordinates.
    #[must_use]
    pub const fn horizontal(&self) -> HorizontalPosition {
        self.horizontal
    }
}

/// Computes where the sun is seen from a location at an instant.
///
/// Refraction uses the standard atmosphere at the location's altitude.
///
/// # Errors
/// Returns `OutOfRange` if the instant lies outside the supported range.
///
/// # Example
/// ```
/// use chrono::{DateTime, Utc};
/// use solar_lunar::{sun, GeoLocation};
///
/// let noon = "2024-06-21T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
/// let greenwich = GeoLocation::new(51.48, 0.0, 0.0).unwrap();
/// let observation = sun::position(&noon, &greenwich).unwrap();
/// assert!((observation.elevation() - 62.0).abs() < 0.2);
/// assert!((observation.azimuth() - 180.0).abs() < 2.0);
/// ```
pub fn position<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeoLocation,
) -> Result<SunObservation> {
    let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
    let sun = SunPosition::at(&jd);
    let refraction = RefractionCorrection::standard_atmosphere(location.altitude())?;
    let equatorial = sun.equatorial();
    let horizontal = to_horizontal(
        &equatorial,
        sun.horizontal_parallax(),
        location,
        &jd,
        Some(refraction),
    )?;
    Ok(SunObservation {
        equatorial,
        horizontal,
    })
}
