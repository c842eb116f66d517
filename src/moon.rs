//! Apparent position of the moon and moonrise/moonset.
//!
//! Positions follow Meeus, Astronomical Algorithms (2nd ed.), chapter 47, an abridgement of
//! the ELP-2000/82 theory by Chapront-Touzé & Chapront. The error is about 10″ in longitude
//! and 4″ in latitude near the present era and grows slowly for dates far from 2000.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::horizontal::{geodetic_dip, horizontal_parallax_km, to_horizontal, topocentric};
use crate::math::{
    acos_deg, asin_deg, atan2_deg, cos_deg, normalize_degrees_0_to_360, polynomial, sin_deg,
    tan_deg,
};
use crate::nutation::{mean_obliquity, Nutation};
use crate::solver::Parabola;
use crate::sun::SunPosition;
use crate::time::{datetime_from_posix, JulianDay, TimeScale};
use crate::types::HorizontalPosition;
use crate::{EquatorialCoordinates, Error, GeoLocation, RefractionCorrection, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Periodic terms for longitude and distance: multipliers of D, M, M', F, then the
/// longitude coefficient (1e-6 degrees) and the distance coefficient (1e-3 km).
#[rustfmt::skip]
const LONGITUDE_DISTANCE_TERMS: [([i8; 4], f64, f64); 60] = [
    ([0, 0, 1, 0], 6288774.0, -20905355.0),
    ([2, 0, -1, 0], 1274027.0, -3699111.0),
    ([2, 0, 0, 0], 658314.0, -2955968.0),
    ([0, 0, 2, 0], 213618.0, -569925.0),
    ([0, 1, 0, 0], -185116.0, 48888.0),
    ([0, 0, 0, 2], -114332.0, -3149.0),
    ([2, 0, -2, 0], 58793.0, 246158.0),
    ([2, -1, -1, 0], 57066.0, -152138.0),
    ([2, 0, 1, 0], 53322.0, -170733.0),
    ([2, -1, 0, 0], 45758.0, -204586.0),
    ([0, 1, -1, 0], -40923.0, -129620.0),
    ([1, 0, 0, 0], -34720.0, 108743.0),
    ([0, 1, 1, 0], -30383.0, 104755.0),
    ([2, 0, 0, -2], 15327.0, 10321.0),
    ([0, 0, 1, 2], -12528.0, 0.0),
    ([0, 0, 1, -2], 10980.0, 79661.0),
    ([4, 0, -1, 0], 10675.0, -34782.0),
    ([0, 0, 3, 0], 10034.0, -23210.0),
    ([4, 0, -2, 0], 8548.0, -21636.0),
    ([2, 1, -1, 0], -7888.0, 24208.0),
    ([2, 1, 0, 0], -6766.0, 30824.0),
    ([1, 0, -1, 0], -5163.0, -8379.0),
    ([1, 1, 0, 0], 4987.0, -16675.0),
    ([2, -1, 1, 0], 4036.0, -12831.0),
    ([2, 0, 2, 0], 3994.0, -10445.0),
    ([4, 0, 0, 0], 3861.0, -11650.0),
    ([2, 0, -3, 0], 3665.0, 14403.0),
    ([0, 1, -2, 0], -2689.0, -7003.0),
    ([2, 0, -1, 2], -2602.0, 0.0),
    ([2, -1, -2, 0], 2390.0, 10056.0),
    ([1, 0, 1, 0], -2348.0, 6322.0),
    ([2, -2, 0, 0], 2236.0, -9884.0),
    ([0, 1, 2, 0], -2120.0, 5751.0),
    ([0, 2, 0, 0], -2069.0, 0.0),
    ([2, -2, -1, 0], 2048.0, -4950.0),
    ([2, 0, 1, -2], -1773.0, 4130.0),
    ([2, 0, 0, 2], -1595.0, 0.0),
    ([4, -1, -1, 0], 1215.0, -3958.0),
    ([0, 0, 2, 2], -1110.0, 0.0),
    ([3, 0, -1, 0], -892.0, 3258.0),
    ([2, 1, 1, 0], -810.0, 2616.0),
    ([4, -1, -2, 0], 759.0, -1897.0),
    ([0, 2, -1, 0], -713.0, -2117.0),
    ([2, 2, -1, 0], -700.0, 2354.0),
    ([2, 1, -2, 0], 691.0, 0.0),
    ([2, -1, 0, -2], 596.0, 0.0),
    ([4, 0, 1, 0], 549.0, -1423.0),
    ([0, 0, 4, 0], 537.0, -1117.0),
    ([4, -1, 0, 0], 520.0, -1571.0),
    ([1, 0, -2, 0], -487.0, -1739.0),
    ([2, 1, 0, -2], -399.0, 0.0),
    ([0, 0, 2, -2], -381.0, -4421.0),
    ([1, 1, 1, 0], 351.0, 0.0),
    ([3, 0, -2, 0], -340.0, 0.0),
    ([4, 0, -3, 0], 330.0, 0.0),
    ([2, -1, 2, 0], 327.0, 0.0),
    ([0, 2, 1, 0], -323.0, 1165.0),
    ([1, 1, -1, 0], 299.0, 0.0),
    ([2, 0, 3, 0], 294.0, 0.0),
    ([2, 0, -1, -2], 0.0, 8752.0),
];

/// Periodic terms for latitude: multipliers of D, M, M', F, then the coefficient
/// (1e-6 degrees).
#[rustfmt::skip]
const LATITUDE_TERMS: [([i8; 4], f64); 60] = [
    ([0, 0, 0, 1], 5128122.0),
    ([0, 0, 1, 1], 280602.0),
    ([0, 0, 1, -1], 277693.0),
    ([2, 0, 0, -1], 173237.0),
    ([2, 0, -1, 1], 55413.0),
    ([2, 0, -1, -1], 46271.0),
    ([2, 0, 0, 1], 32573.0),
    ([0, 0, 2, 1], 17198.0),
    ([2, 0, 1, -1], 9266.0),
    ([0, 0, 2, -1], 8822.0),
    ([2, -1, 0, -1], 8216.0),
    ([2, 0, -2, -1], 4324.0),
    ([2, 0, 1, 1], 4200.0),
    ([2, 1, 0, -1], -3359.0),
    ([2, -1, -1, 1], 2463.0),
    ([2, -1, 0, 1], 2211.0),
    ([2, -1, -1, -1], 2065.0),
    ([0, 1, -1, -1], -1870.0),
    ([4, 0, -1, -1], 1828.0),
    ([0, 1, 0, 1], -1794.0),
    ([0, 0, 0, 3], -1749.0),
    ([0, 1, -1, 1], -1565.0),
    ([1, 0, 0, 1], -1491.0),
    ([0, 1, 1, 1], -1475.0),
    ([0, 1, 1, -1], -1410.0),
    ([0, 1, 0, -1], -1344.0),
    ([1, 0, 0, -1], -1335.0),
    ([0, 0, 3, 1], 1107.0),
    ([4, 0, 0, -1], 1021.0),
    ([4, 0, -1, 1], 833.0),
    ([0, 0, 1, -3], 777.0),
    ([4, 0, -2, 1], 671.0),
    ([2, 0, 0, -3], 607.0),
    ([2, 0, 2, -1], 596.0),
    ([2, -1, 1, -1], 491.0),
    ([2, 0, -2, 1], -451.0),
    ([0, 0, 3, -1], 439.0),
    ([2, 0, 2, 1], 422.0),
    ([2, 0, -3, -1], 421.0),
    ([2, 1, -1, 1], -366.0),
    ([2, 1, 0, 1], -351.0),
    ([4, 0, 0, 1], 331.0),
    ([2, -1, 1, 1], 315.0),
    ([2, -2, 0, -1], 302.0),
    ([0, 0, 1, 3], -283.0),
    ([2, 1, 1, -1], -229.0),
    ([1, 1, 0, -1], 223.0),
    ([1, 1, 0, 1], 223.0),
    ([0, 1, -2, -1], -220.0),
    ([2, 1, -1, -1], -220.0),
    ([1, 0, 1, 1], -185.0),
    ([2, -1, -2, -1], 181.0),
    ([0, 1, 2, 1], -177.0),
    ([4, 0, -2, -1], 176.0),
    ([4, -1, -1, -1], 166.0),
    ([1, 0, 1, -1], -164.0),
    ([4, 0, 1, -1], 132.0),
    ([1, 0, -1, -1], -119.0),
    ([4, -1, 0, -1], 115.0),
    ([2, -2, 0, 1], 107.0),
];

/// Mean radius of the moon in km.
const MOON_RADIUS_KM: f64 = 1737.4;

/// Mean refraction at the horizon in degrees (34′).
const HORIZON_REFRACTION: f64 = 34.0 / 60.0;

/// Kilometres per astronomical unit.
const KM_PER_AU: f64 = 149_597_870.7;

/// Geocentric position of the moon at one instant.
///
/// # Example
/// ```
/// use solar_lunar::moon::MoonPosition;
/// use solar_lunar::time::JulianDay;
///
/// // 1992-04-12 0h TD (Meeus example 47.a)
/// let moon = MoonPosition::at(&JulianDay::ephemeris(2_448_724.5).unwrap());
/// assert!((moon.right_ascension() - 134.688470).abs() < 1e-4);
/// assert!((moon.declination() - 13.768368).abs() < 1e-4);
/// assert!((moon.distance() - 368_409.7).abs() < 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    centuries: f64,
    longitude: f64,
    latitude: f64,
    distance: f64,
    right_ascension: f64,
    declination: f64,
}

impl MoonPosition {
    /// Computes the position for an instant in any time scale.
    #[must_use]
    pub fn at(instant: &JulianDay) -> Self {
        Self::from_centuries(instant.ephemeris_centuries())
    }

    pub(crate) fn from_centuries(centuries: f64) -> Self {
        let c = centuries;
        let mean_longitude = normalize_degrees_0_to_360(polynomial(
            &[218.3164477, 481267.88123421, -0.0015786, 1.0 / 538841.0, -1.0 / 65194000.0],
            c,
        ));
        let elongation = normalize_degrees_0_to_360(polynomial(
            &[297.8501921, 445267.1114034, -0.0018819, 1.0 / 545868.0, -1.0 / 113065000.0],
            c,
        ));
        let sun_anomaly = normalize_degrees_0_to_360(polynomial(
            &[357.5291092, 35999.0502909, -0.0001536, 1.0 / 24490000.0],
            c,
        ));
        let moon_anomaly = normalize_degrees_0_to_360(polynomial(
            &[134.9633964, 477198.8675055, 0.0087414, 1.0 / 69699.0, -1.0 / 14712000.0],
            c,
        ));
        let argument_of_latitude = normalize_degrees_0_to_360(polynomial(
            &[93.2720950, 483202.0175233, -0.0036539, -1.0 / 3526000.0, 1.0 / 863310000.0],
            c,
        ));
        let a1 = normalize_degrees_0_to_360(119.75 + 131.849 * c);
        let a2 = normalize_degrees_0_to_360(53.09 + 479264.290 * c);
        let a3 = normalize_degrees_0_to_360(313.45 + 481266.484 * c);
        // decreasing eccentricity of the earth's orbit
        let e = polynomial(&[1.0, -0.002516, -0.0000074], c);

        let arguments = [elongation, sun_anomaly, moon_anomaly, argument_of_latitude];
        let angle = |multipliers: &[i8; 4]| -> f64 {
            multipliers
                .iter()
                .zip(arguments)
                .map(|(&m, argument)| f64::from(m) * argument)
                .sum()
        };
        let eccentricity = |sun_multiplier: i8| e.powi(i32::from(sun_multiplier.abs()));

        let (mut sum_l, mut sum_r) = (0.0, 0.0);
        for (multipliers, l, r) in &LONGITUDE_DISTANCE_TERMS {
            let factor = eccentricity(multipliers[1]);
            let theta = angle(multipliers);
            sum_l += l * factor * sin_deg(theta);
            sum_r += r * factor * cos_deg(theta);
        }
        let mut sum_b: f64 = LATITUDE_TERMS
            .iter()
            .map(|(multipliers, b)| b * eccentricity(multipliers[1]) * sin_deg(angle(multipliers)))
            .sum();

        sum_l += 3958.0 * sin_deg(a1)
            + 1962.0 * sin_deg(mean_longitude - argument_of_latitude)
            + 318.0 * sin_deg(a2);
        sum_b += -2235.0 * sin_deg(mean_longitude)
            + 382.0 * sin_deg(a3)
            + 175.0 * sin_deg(a1 - argument_of_latitude)
            + 175.0 * sin_deg(a1 + argument_of_latitude)
            + 127.0 * sin_deg(mean_longitude - moon_anomaly)
            - 115.0 * sin_deg(mean_longitude + moon_anomaly);

        let nutation = Nutation::at(c);
        let longitude =
            normalize_degrees_0_to_360(mean_longitude + sum_l / 1e6 + nutation.longitude);
        let latitude = sum_b / 1e6;
        let distance = 385000.56 + sum_r / 1000.0;

        let obliquity = mean_obliquity(c) + nutation.obliquity;
        let right_ascension = normalize_degrees_0_to_360(atan2_deg(
            sin_deg(longitude) * cos_deg(obliquity) - tan_deg(latitude) * sin_deg(obliquity),
            cos_deg(longitude),
        ));
        let declination = asin_deg(
            sin_deg(latitude) * cos_deg(obliquity)
                + cos_deg(latitude) * sin_deg(obliquity) * sin_deg(longitude),
        );

        Self {
            centuries,
            longitude,
            latitude,
            distance,
            right_ascension,
            declination,
        }
    }

    /// Apparent ecliptic longitude in degrees [0, 360), including nutation.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Ecliptic latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Distance between the centers of earth and moon in km.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
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

    /// Equatorial horizontal parallax in degrees.
    #[must_use]
    pub fn horizontal_parallax(&self) -> f64 {
        horizontal_parallax_km(self.distance)
    }

    /// Geocentric angular semidiameter in degrees.
    #[must_use]
    pub fn semidiameter(&self) -> f64 {
        asin_deg(MOON_RADIUS_KM / self.distance)
    }

    /// Illuminated fraction of the disk in [0, 1] (Meeus 48.1 to 48.3).
    #[must_use]
    pub fn illuminated_fraction(&self) -> f64 {
        let sun = SunPosition::from_centuries(self.centuries);
        let sun_distance = sun.distance() * KM_PER_AU;
        let cos_elongation =
            cos_deg(self.latitude) * cos_deg(self.longitude - sun.apparent_longitude());
        let elongation = acos_deg(cos_elongation.clamp(-1.0, 1.0));
        let phase_angle = atan2_deg(
            sun_distance * sin_deg(elongation),
            self.distance - sun_distance * cos_elongation,
        );
        (1.0 + cos_deg(phase_angle)) / 2.0
    }
}

/// Observed position of the moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonObservation {
    equatorial: EquatorialCoordinates,
    horizontal: HorizontalPosition,
    distance: f64,
}

impl MoonObservation {
    /// Geocentric right ascension in degrees.
    #[must_use]
    pub const fn right_ascension(&self) -> f64 {
        self.equatorial.right_ascension()
    }

    /// Geocentric declination in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.equatorial.declination()
    }

    /// Topocentric azimuth in degrees, north = 0°, clockwise.
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.horizontal.azimuth()
    }

    /// Topocentric refracted elevation in degrees.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.horizontal.elevation()
    }

    /// Distance between the centers of earth and moon in km.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Horizontal coordinates.
    #[must_use]
    pub const fn horizontal(&self) -> HorizontalPosition {
        self.horizontal
    }
}

/// Computes where the moon is seen from a location at an instant.
///
/// # Errors
/// Returns `OutOfRange` if the instant lies outside the supported range.
pub fn position<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    location: &GeoLocation,
) -> Result<MoonObservation> {
    let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
    let moon = MoonPosition::at(&jd);
    let refraction = RefractionCorrection::standard_atmosphere(location.altitude())?;
    let equatorial = moon.equatorial();
    let horizontal = to_horizontal(
        &equatorial,
        moon.horizontal_parallax(),
        location,
        &jd,
        Some(refraction),
    )?;
    Ok(MoonObservation {
        equatorial,
        horizontal,
        distance: moon.distance(),
    })
}

/// Moonrise and moonset within one civil day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moonlight {
    moonrise: Option<DateTime<Utc>>,
    moonset: Option<DateTime<Utc>>,
    up_at_start: bool,
}

impl Moonlight {
    /// Moonrise, if the moon rises during the day.
    #[must_use]
    pub const fn moonrise(&self) -> Option<DateTime<Utc>> {
        self.moonrise
    }

    /// Moonset, if the moon sets during the day.
    #[must_use]
    pub const fn moonset(&self) -> Option<DateTime<Utc>> {
        self.moonset
    }

    /// Whether the moon stays above the horizon the whole day.
    #[must_use]
    pub const fn is_up_all_day(&self) -> bool {
        self.moonrise.is_none() && self.moonset.is_none() && self.up_at_start
    }

    /// Whether the moon stays below the horizon the whole day.
    #[must_use]
    pub const fn is_down_all_day(&self) -> bool {
        self.moonrise.is_none() && self.moonset.is_none() && !self.up_at_start
    }
}

/// Finds moonrise and moonset on a calendar day of the given time zone.
///
/// The day is scanned in two-hour windows (centred at hours 1, 3, 5, ... after local
/// midnight, the last one at hour 25) by fitting a parabola through the altitudes at the
/// window's start, middle and end. Events after the end of the civil day (23, 24 or 25
/// hours long around daylight saving changes) are dropped. Moonrise and moonset refer to
/// the upper limb touching the horizon under mean refraction, lowered by the dip for the
/// observer's altitude.
///
/// # Errors
/// Returns `InvalidDateTime` if the day has no representable midnight in `zone`, and
/// `OutOfRange` near the ends of the supported range.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, NaiveDate};
/// use solar_lunar::{moon, GeoLocation};
///
/// let zone = FixedOffset::east_opt(3600).unwrap();
/// let berlin = GeoLocation::new(52.52, 13.40, 34.0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let moonlight = moon::lunar_time(&berlin, date, &zone).unwrap();
/// assert!(moonlight.moonrise().is_some() || moonlight.moonset().is_some());
/// ```
pub fn lunar_time<Tz: TimeZone>(
    location: &GeoLocation,
    date: NaiveDate,
    zone: &Tz,
) -> Result<Moonlight> {
    let start = start_of_day(zone, date)?;
    let next = date
        .succ_opt()
        .ok_or(Error::invalid_datetime("date has no successor"))?;
    let length_hours = (start_of_day(zone, next)? - start.clone()).num_seconds() as f64 / 3600.0;
    let start_posix = JulianDay::from_datetime(&start, TimeScale::Posix)?.value();
    let dip = geodetic_dip(location.latitude(), location.altitude());

    // elevation of the moon's center above the rise/set altitude, hours after midnight
    let altitude = |hour: f64| -> Result<f64> {
        let jd = JulianDay::posix(start_posix + hour / 24.0)?;
        let moon = MoonPosition::at(&jd);
        let (_, elevation) = topocentric(
            &moon.equatorial(),
            moon.horizontal_parallax(),
            location,
            jd.value_in(TimeScale::MeanSolar),
        );
        let target = -(HORIZON_REFRACTION + moon.semidiameter()) - dip;
        Ok(elevation - target)
    };

    let mut hour = 1.0;
    let mut y_minus = altitude(0.0)?;
    let up_at_start = y_minus > 0.0;
    let (mut rise, mut set): (Option<f64>, Option<f64>) = (None, None);

    while hour <= 25.0 {
        let y_zero = altitude(hour)?;
        let y_plus = altitude(hour + 1.0)?;
        let parabola = Parabola::through(y_minus, y_zero, y_plus);
        let (_, extremum) = parabola.vertex();

        match parabola.roots() {
            (Some(root), None) => {
                if y_minus < 0.0 {
                    rise.get_or_insert(hour + root);
                } else {
                    set.get_or_insert(hour + root);
                }
            }
            (Some(first), Some(second)) => {
                if extremum < 0.0 {
                    rise.get_or_insert(hour + second);
                    set.get_or_insert(hour + first);
                } else {
                    rise.get_or_insert(hour + first);
                    set.get_or_insert(hour + second);
                }
            }
            _ => {}
        }

        if rise.is_some() && set.is_some() {
            break;
        }
        y_minus = y_plus;
        hour += 2.0;
    }

    let to_instant = |hour: Option<f64>| -> Result<Option<DateTime<Utc>>> {
        hour.filter(|&h| h < length_hours)
            .map(|h| datetime_from_posix(start_posix + h / 24.0))
            .transpose()
    };

    Ok(Moonlight {
        moonrise: to_instant(rise)?,
        moonset: to_instant(set)?,
        up_at_start,
    })
}

/// First instant of a calendar day in a zone, skipping a midnight lost to a clock change.
fn start_of_day<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> Result<DateTime<Tz>> {
    (0..=3)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| zone.from_local_datetime(&local).earliest())
        .ok_or(Error::invalid_datetime("day has no representable start in this zone"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_1992_april_12() {
        // Meeus example 47.a
        let jd = JulianDay::ephemeris(2_448_724.5).unwrap();
        let moon = MoonPosition::at(&jd);
        assert!((moon.longitude() - 133.167265).abs() < 1e-5);
        assert!((moon.latitude() + 3.229126).abs() < 1e-5);
        assert!((moon.distance() - 368_409.7).abs() < 0.1);
        assert!((moon.right_ascension() - 134.688470).abs() < 1e-5);
        assert!((moon.declination() - 13.768368).abs() < 1e-5);
        assert!((moon.horizontal_parallax() - 0.991990).abs() < 1e-5);
    }

    #[test]
    fn test_illuminated_fraction_1992_april_12() {
        // Meeus example 48.a: k = 0.6786
        let jd = JulianDay::ephemeris(2_448_724.5).unwrap();
        let moon = MoonPosition::at(&jd);
        assert!((moon.illuminated_fraction() - 0.6786).abs() < 1e-3);
    }

    #[test]
    fn test_full_and_new_moon_illumination() {
        // full moon 2024-02-24 12:30 UTC, new moon 2024-01-11 11:57 UTC
        let full = JulianDay::from_utc(2024, 2, 24, 12, 30, 0.0, TimeScale::Posix).unwrap();
        let new = JulianDay::from_utc(2024, 1, 11, 11, 57, 0.0, TimeScale::Posix).unwrap();
        assert!(MoonPosition::at(&full).illuminated_fraction() > 0.99);
        assert!(MoonPosition::at(&new).illuminated_fraction() < 0.01);
    }

    #[test]
    fn test_semidiameter_range() {
        for day in 0..60 {
            let jd = JulianDay::ephemeris(2_460_310.5 + f64::from(day) * 0.5).unwrap();
            let moon = MoonPosition::at(&jd);
            assert!(moon.distance() > 356_000.0 && moon.distance() < 407_000.0);
            let semidiameter = moon.semidiameter() * 60.0;
            assert!(semidiameter > 14.6 && semidiameter < 16.8);
        }
    }

    #[test]
    fn test_start_of_day_in_fixed_zone() {
        let zone = chrono::FixedOffset::west_opt(5 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let start = start_of_day(&zone, date).unwrap();
        assert_eq!(start.with_timezone(&Utc).to_rfc3339(), "2024-03-10T05:00:00+00:00");
    }
}
