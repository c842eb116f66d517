//! Moon phases and lunar apsides.
//!
//! Phase instants come straight from the closed-form lunation series of Meeus chapter 49:
//! a mean phase plus periodic terms in the sun's and moon's anomalies and the moon's
//! argument of latitude, plus fourteen planetary terms. Perigee and apogee start from the
//! mean anomalistic month of chapter 50 and are refined against the full lunar distance.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::math::{cos_deg, polynomial, sin_deg};
use crate::moon::MoonPosition;
use crate::solver::bisect;
use crate::time::{JulianDay, TimeScale, DAYS_PER_CENTURY, J2000};
use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Mean synodic month in days.
const SYNODIC_MONTH: f64 = 29.530588861;

/// Mean new moon of lunation 0 (JDE).
const LUNATION_EPOCH: f64 = 2451550.09766;

/// Mean anomalistic month in days.
const ANOMALISTIC_MONTH: f64 = 27.55454989;

/// Mean perigee of apsis cycle 0 (JDE).
const APSIS_EPOCH: f64 = 2451534.6698;

/// Half width of the apsis search bracket in days.
const APSIS_MARGIN_DAYS: f64 = 5.0;

/// Lunations inspected when stepping to the neighbour of an instant.
const MAX_STEPS: usize = 4;

/// Coefficient, power of E, and multipliers of M, M′ and F.
type PhaseTerm = (f64, i32, i8, i8, i8);

#[rustfmt::skip]
const NEW_MOON_TERMS: [PhaseTerm; 24] = [
    (-0.40720, 0, 0, 1, 0), (0.17241, 1, 1, 0, 0), (0.01608, 0, 0, 2, 0),
    (0.01039, 0, 0, 0, 2), (0.00739, 1, -1, 1, 0), (-0.00514, 1, 1, 1, 0),
    (0.00208, 2, 2, 0, 0), (-0.00111, 0, 0, 1, -2), (-0.00057, 0, 0, 1, 2),
    (0.00056, 1, 1, 2, 0), (-0.00042, 0, 0, 3, 0), (0.00042, 1, 1, 0, 2),
    (0.00038, 1, 1, 0, -2), (-0.00024, 1, -1, 2, 0), (-0.00007, 0, 2, 1, 0),
    (0.00004, 0, 0, 2, -2), (0.00004, 0, 3, 0, 0), (0.00003, 0, 1, 1, -2),
    (0.00003, 0, 0, 2, 2), (-0.00003, 0, 1, 1, 2), (0.00003, 0, -1, 1, 2),
    (-0.00002, 0, -1, 1, -2), (-0.00002, 0, 1, 3, 0), (0.00002, 0, 0, 4, 0),
];

#[rustfmt::skip]
const FULL_MOON_TERMS: [PhaseTerm; 24] = [
    (-0.40614, 0, 0, 1, 0), (0.17302, 1, 1, 0, 0), (0.01614, 0, 0, 2, 0),
    (0.01043, 0, 0, 0, 2), (0.00734, 1, -1, 1, 0), (-0.00515, 1, 1, 1, 0),
    (0.00209, 2, 2, 0, 0), (-0.00111, 0, 0, 1, -2), (-0.00057, 0, 0, 1, 2),
    (0.00056, 1, 1, 2, 0), (-0.00042, 0, 0, 3, 0), (0.00042, 1, 1, 0, 2),
    (0.00038, 1, 1, 0, -2), (-0.00024, 1, -1, 2, 0), (-0.00007, 0, 2, 1, 0),
    (0.00004, 0, 0, 2, -2), (0.00004, 0, 3, 0, 0), (0.00003, 0, 1, 1, -2),
    (0.00003, 0, 0, 2, 2), (-0.00003, 0, 1, 1, 2), (0.00003, 0, -1, 1, 2),
    (-0.00002, 0, -1, 1, -2), (-0.00002, 0, 1, 3, 0), (0.00002, 0, 0, 4, 0),
];

#[rustfmt::skip]
const QUARTER_TERMS: [PhaseTerm; 24] = [
    (-0.62801, 0, 0, 1, 0), (0.17172, 1, 1, 0, 0), (-0.01183, 1, 1, 1, 0),
    (0.00862, 0, 0, 2, 0), (0.00804, 0, 0, 0, 2), (0.00454, 1, -1, 1, 0),
    (0.00204, 2, 2, 0, 0), (-0.00180, 0, 0, 1, -2), (-0.00070, 0, 0, 1, 2),
    (-0.00040, 0, 0, 3, 0), (-0.00034, 1, -1, 2, 0), (0.00032, 1, 1, 0, 2),
    (0.00032, 1, 1, 0, -2), (-0.00028, 2, 2, 1, 0), (0.00027, 1, 1, 2, 0),
    (-0.00005, 0, -1, 1, -2), (0.00004, 0, 0, 2, 2), (-0.00004, 0, 1, 1, 2),
    (0.00004, 0, -2, 1, 0), (0.00003, 0, 1, 1, -2), (0.00003, 0, 3, 0, 0),
    (0.00002, 0, 0, 2, -2), (0.00002, 0, -1, 1, 2), (-0.00002, 0, 1, 3, 0),
];

/// Planetary arguments A1..A14: constant, rate per lunation, amplitude in days.
/// A1 additionally carries -0.009173 T².
#[rustfmt::skip]
const PLANETARY_TERMS: [(f64, f64, f64); 14] = [
    (299.77, 0.107408, 0.000325), (251.88, 0.016321, 0.000165),
    (251.83, 26.651886, 0.000164), (349.42, 36.412478, 0.000126),
    (84.66, 18.206239, 0.000110), (141.74, 53.303771, 0.000062),
    (207.14, 2.453732, 0.000060), (154.84, 7.306860, 0.000056),
    (34.52, 27.261239, 0.000047), (207.19, 0.121824, 0.000042),
    (291.34, 1.844379, 0.000040), (161.72, 24.198154, 0.000037),
    (239.56, 25.513099, 0.000035), (331.55, 3.592518, 0.000023),
];

/// The four principal phases of the moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoonPhase {
    /// Sun and moon in conjunction.
    New,
    /// Moon 90° east of the sun.
    FirstQuarter,
    /// Sun and moon in opposition.
    Full,
    /// Moon 90° west of the sun.
    LastQuarter,
}

impl MoonPhase {
    /// All phases in the order they occur during a lunation.
    pub const ALL: [Self; 4] = [Self::New, Self::FirstQuarter, Self::Full, Self::LastQuarter];

    /// Fraction of a lunation after new moon at which this phase occurs.
    #[must_use]
    pub const fn lunation_offset(self) -> f64 {
        match self {
            Self::New => 0.0,
            Self::FirstQuarter => 0.25,
            Self::Full => 0.5,
            Self::LastQuarter => 0.75,
        }
    }

    /// Instant (ephemeris time) of this phase in lunation `n`, where lunation 0 begins
    /// with the new moon of 2000-01-06.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the phase falls outside the supported time range.
    pub fn instant_at_lunation(self, n: i64) -> Result<JulianDay> {
        #[allow(clippy::cast_precision_loss)]
        let k = n as f64 + self.lunation_offset();
        JulianDay::ephemeris(self.ephemeris_day(k))
    }

    /// Instant (UTC) of this phase in lunation `n`.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the phase falls outside the supported time range.
    ///
    /// # Example
    /// ```
    /// use solar_lunar::phase::MoonPhase;
    ///
    /// let new_moon = MoonPhase::New.at_lunation(0).unwrap();
    /// assert_eq!(new_moon.format("%Y-%m-%d %H:%M").to_string(), "2000-01-06 18:13");
    /// ```
    pub fn at_lunation(self, n: i64) -> Result<DateTime<Utc>> {
        self.instant_at_lunation(n)?.to_datetime()
    }

    /// First occurrence of this phase strictly after an instant.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the instant or the result lies outside the supported range.
    pub fn after<Tz: TimeZone>(self, instant: &DateTime<Tz>) -> Result<DateTime<Utc>> {
        let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
        self.instant_after(&jd)?.to_datetime()
    }

    /// Last occurrence of this phase strictly before an instant.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the instant or the result lies outside the supported range.
    pub fn before<Tz: TimeZone>(self, instant: &DateTime<Tz>) -> Result<DateTime<Utc>> {
        let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
        self.instant_before(&jd)?.to_datetime()
    }

    /// First occurrence of this phase strictly after an instant, in ephemeris time.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the result lies outside the supported range.
    pub fn instant_after(self, instant: &JulianDay) -> Result<JulianDay> {
        let tt = instant.value_in(TimeScale::Ephemeris);
        let mut n = mean_lunation(tt) - 1;
        for _ in 0..MAX_STEPS {
            let candidate = self.instant_at_lunation(n)?;
            if candidate.value() > tt {
                return Ok(candidate);
            }
            n += 1;
        }
        Err(Error::computation_error("moon phase search did not advance"))
    }

    /// Last occurrence of this phase strictly before an instant, in ephemeris time.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the result lies outside the supported range.
    pub fn instant_before(self, instant: &JulianDay) -> Result<JulianDay> {
        let tt = instant.value_in(TimeScale::Ephemeris);
        let mut n = mean_lunation(tt) + 1;
        for _ in 0..MAX_STEPS {
            let candidate = self.instant_at_lunation(n)?;
            if candidate.value() < tt {
                return Ok(candidate);
            }
            n -= 1;
        }
        Err(Error::computation_error("moon phase search did not advance"))
    }

    fn terms(self) -> &'static [PhaseTerm; 24] {
        match self {
            Self::New => &NEW_MOON_TERMS,
            Self::Full => &FULL_MOON_TERMS,
            Self::FirstQuarter | Self::LastQuarter => &QUARTER_TERMS,
        }
    }

    /// JDE of the phase at (fractional) lunation number `k`, Meeus 49.1 plus corrections.
    fn ephemeris_day(self, k: f64) -> f64 {
        let t = k / 1236.85;
        let mean = LUNATION_EPOCH
            + SYNODIC_MONTH * k
            + t * t * polynomial(&[0.00015437, -0.000000150, 0.00000000073], t);

        let e = polynomial(&[1.0, -0.002516, -0.0000074], t);
        let m = 2.5534 + 29.10535670 * k + t * t * polynomial(&[-0.0000014, -0.00000011], t);
        let mp = 201.5643
            + 385.81693528 * k
            + t * t * polynomial(&[0.0107582, 0.00001238, -0.000000058], t);
        let f = 160.7108
            + 390.67050284 * k
            + t * t * polynomial(&[-0.0016118, -0.00000227, 0.000000011], t);
        let omega = 124.7746 - 1.56375588 * k + t * t * polynomial(&[0.0020672, 0.00000215], t);

        let mut correction = -0.00017 * sin_deg(omega);
        for &(coefficient, e_power, m_mult, mp_mult, f_mult) in self.terms() {
            let angle = f64::from(m_mult) * m + f64::from(mp_mult) * mp + f64::from(f_mult) * f;
            correction += coefficient * e.powi(e_power) * sin_deg(angle);
        }

        let w = 0.00306 - 0.00038 * e * cos_deg(m) + 0.00026 * cos_deg(mp)
            - 0.00002 * cos_deg(mp - m)
            + 0.00002 * cos_deg(mp + m)
            + 0.00002 * cos_deg(2.0 * f);
        match self {
            Self::FirstQuarter => correction += w,
            Self::LastQuarter => correction -= w,
            Self::New | Self::Full => {}
        }

        for (index, &(constant, rate, amplitude)) in PLANETARY_TERMS.iter().enumerate() {
            let mut argument = constant + rate * k;
            if index == 0 {
                argument -= 0.009173 * t * t;
            }
            correction += amplitude * sin_deg(argument);
        }

        mean + correction
    }
}

fn mean_lunation(tt: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let n = ((tt - LUNATION_EPOCH) / SYNODIC_MONTH).floor() as i64;
    n
}

/// Number of the lunation in progress at an instant: the index of the latest new moon at
/// or before it.
///
/// # Errors
/// Returns `OutOfRange` if the neighbouring new moons fall outside the supported range.
pub fn lunation_index(instant: &JulianDay) -> Result<i64> {
    let tt = instant.value_in(TimeScale::Ephemeris);
    let mut n = mean_lunation(tt) + 1;
    for _ in 0..MAX_STEPS {
        if MoonPhase::New.instant_at_lunation(n)?.value() <= tt {
            return Ok(n);
        }
        n -= 1;
    }
    Err(Error::computation_error("lunation search did not advance"))
}

/// Closest or farthest point of the moon's orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LunarApsis {
    /// Closest approach to the earth.
    Perigee,
    /// Greatest distance from the earth.
    Apogee,
}

impl LunarApsis {
    /// JDE of the mean apsis in anomalistic cycle `k` (Meeus 50.1).
    fn mean_instant(self, k: i64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let k = k as f64
            + match self {
                Self::Perigee => 0.0,
                Self::Apogee => 0.5,
            };
        let t = k / 1325.55;
        APSIS_EPOCH
            + ANOMALISTIC_MONTH * k
            + t * t * polynomial(&[-0.0006691, -0.000001098, 0.0000000052], t)
    }

    /// Whether the moon has passed this apsis at `tt`: receding after perigee, approaching
    /// after apogee.
    fn has_passed(self, tt: f64) -> bool {
        const STEP: f64 = 1.0 / 1440.0;
        let distance =
            |t: f64| MoonPosition::from_centuries((t - J2000) / DAYS_PER_CENTURY).distance();
        let change = distance(tt + STEP) - distance(tt - STEP);
        match self {
            Self::Perigee => change > 0.0,
            Self::Apogee => change < 0.0,
        }
    }

    /// First occurrence of this apsis at or after an instant, in ephemeris time.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the result lies outside the supported range.
    pub fn instant_after(self, instant: &JulianDay) -> Result<JulianDay> {
        let tt = instant.value_in(TimeScale::Ephemeris);
        #[allow(clippy::cast_possible_truncation)]
        let mut k = ((tt - APSIS_EPOCH) / ANOMALISTIC_MONTH).floor() as i64 - 1;
        for _ in 0..MAX_STEPS {
            let estimate = self.mean_instant(k);
            let found = bisect(
                estimate - APSIS_MARGIN_DAYS,
                estimate + APSIS_MARGIN_DAYS,
                |t| self.has_passed(t),
            );
            if found >= tt {
                return JulianDay::ephemeris(found);
            }
            k += 1;
        }
        Err(Error::computation_error("apsis search did not advance"))
    }

    /// First occurrence of this apsis at or after an instant.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the instant or the result lies outside the supported range.
    ///
    /// # Example
    /// ```
    /// use chrono::{DateTime, Utc};
    /// use solar_lunar::phase::LunarApsis;
    ///
    /// let start = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    /// let perigee = LunarApsis::Perigee.after(&start).unwrap();
    /// assert_eq!(perigee.format("%Y-%m-%d").to_string(), "2024-01-13");
    /// ```
    pub fn after<Tz: TimeZone>(self, instant: &DateTime<Tz>) -> Result<DateTime<Utc>> {
        let jd = JulianDay::from_datetime(instant, TimeScale::Posix)?;
        self.instant_after(&jd)?.to_datetime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_moon_1977_february() {
        // Meeus example 49.a: k = -283, JDE 2443192.65118
        let new_moon = MoonPhase::New.instant_at_lunation(-283).unwrap();
        assert!((new_moon.value() - 2_443_192.65118).abs() < 1e-5);
    }

    #[test]
    fn test_last_quarter_2044_january() {
        // Meeus example 49.b: k = 544.75, JDE 2467636.49186
        let quarter = MoonPhase::LastQuarter.instant_at_lunation(544).unwrap();
        assert!((quarter.value() - 2_467_636.49186).abs() < 1e-5);
    }

    #[test]
    fn test_phases_within_lunation_are_ordered() {
        for n in [-20_000, -1, 0, 1, 297, 12_000] {
            let instants: Vec<f64> = MoonPhase::ALL
                .iter()
                .map(|phase| phase.instant_at_lunation(n).unwrap().value())
                .collect();
            for pair in instants.windows(2) {
                let gap = pair[1] - pair[0];
                assert!(gap > 6.0 && gap < 9.0, "lunation {n}: {gap}");
            }
        }
    }

    #[test]
    fn test_after_and_before_bracket_instant() {
        let instant = JulianDay::from_utc(2024, 3, 1, 0, 0, 0.0, TimeScale::Posix).unwrap();
        for phase in MoonPhase::ALL {
            let after = phase.instant_after(&instant).unwrap();
            let before = phase.instant_before(&instant).unwrap();
            let tt = instant.value_in(TimeScale::Ephemeris);
            assert!(before.value() < tt && tt < after.value());
            assert!((after.value() - before.value() - SYNODIC_MONTH).abs() < 0.6);
        }
    }

    #[test]
    fn test_lunation_index() {
        let new_moon = MoonPhase::New.instant_at_lunation(297).unwrap();
        assert_eq!(lunation_index(&new_moon).unwrap(), 297);
        assert_eq!(lunation_index(&new_moon.plus_seconds(-60.0).unwrap()).unwrap(), 296);
        assert_eq!(lunation_index(&new_moon.plus_days(20.0).unwrap()).unwrap(), 297);
    }

    #[test]
    fn test_apogee_1988_october() {
        // Meeus example 50.a: apogee 1988 October 7 at 20h30m TD, JDE 2447442.3543
        let start = JulianDay::ephemeris(2_447_430.0).unwrap();
        let apogee = LunarApsis::Apogee.instant_after(&start).unwrap();
        assert!((apogee.value() - 2_447_442.3543).abs() < 0.003, "{}", apogee.value());
        let distance = MoonPosition::at(&apogee).distance();
        assert!((distance - 405_970.0).abs() < 30.0, "{distance}");
    }

    #[test]
    fn test_perigee_is_local_minimum() {
        let start = JulianDay::ephemeris(2_451_545.0).unwrap();
        let perigee = LunarApsis::Perigee.instant_after(&start).unwrap();
        let distance = |jd: &JulianDay| MoonPosition::at(jd).distance();
        let nearest = distance(&perigee);
        assert!(nearest < distance(&perigee.plus_days(-0.5).unwrap()));
        assert!(nearest < distance(&perigee.plus_days(0.5).unwrap()));
        assert!(perigee.value() >= start.value());
        assert!((nearest - 359_361.7).abs() < 1.0);
    }
}
