//! Zodiac sections along the ecliptic and the times the sun or moon crosses them.
//!
//! Two divisions are provided:
//! * [`Sign`]: the twelve tropical signs of 30° each, counted from the equinox of date;
//! * [`Zodiac`]: the thirteen IAU constellations the ecliptic passes through, with
//!   boundary longitudes fixed at J2000.0 and carried to the equinox of date by the
//!   IAU 2006 general precession in longitude.
//!
//! Neither body ever moves backwards in geocentric longitude, so the next crossing of a
//! boundary lies one mean-motion estimate ahead and is pinned down by bisection.

#![allow(clippy::unreadable_literal)]

use crate::math::{normalize_degrees_0_to_360, polynomial};
use crate::moon::MoonPosition;
use crate::solver::bisect_longitude;
use crate::sun::SunPosition;
use crate::time::{JulianDay, TimeScale, DAYS_PER_CENTURY, J2000};
use crate::Result;
use chrono::{DateTime, TimeZone, Utc};

/// A body whose crossings can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    /// The sun.
    Sun,
    /// The moon.
    Moon,
}

impl CelestialBody {
    /// Apparent geocentric ecliptic longitude in degrees, equinox of date.
    #[must_use]
    pub fn ecliptic_longitude(self, instant: &JulianDay) -> f64 {
        self.longitude_at(instant.ephemeris_centuries())
    }

    fn longitude_at(self, centuries: f64) -> f64 {
        match self {
            Self::Sun => SunPosition::from_centuries(centuries).apparent_longitude(),
            Self::Moon => MoonPosition::from_centuries(centuries).longitude(),
        }
    }

    /// Mean motion in degrees per day.
    const fn mean_motion(self) -> f64 {
        match self {
            Self::Sun => 0.985647,
            Self::Moon => 13.176358,
        }
    }

    /// Half width of the bracket around the mean-motion estimate, in days.
    const fn margin_days(self) -> f64 {
        match self {
            Self::Sun => 15.0,
            Self::Moon => 4.0,
        }
    }
}

/// Whether a crossing enters or leaves a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacEvent {
    /// The body crosses the section's starting boundary.
    Entry,
    /// The body crosses the section's ending boundary.
    Exit,
}

/// A span of ecliptic longitude.
pub trait ZodiacSection: Copy {
    /// Longitude where the section begins, in the section's reference frame.
    fn start(self) -> f64;

    /// Longitude where the section ends, in the section's reference frame.
    fn end(self) -> f64;

    /// Offset in degrees from the reference frame to the equinox of date.
    fn frame_offset(_centuries: f64) -> f64 {
        0.0
    }
}

/// IAU 2006 general precession in longitude p_A, in degrees, for julian centuries since
/// J2000.0 (Capitaine, Wallace & Chapront 2003).
#[must_use]
pub fn general_precession(centuries: f64) -> f64 {
    polynomial(
        &[0.0, 5028.796195, 1.1054348, 0.00007964, -0.000023857, -0.0000000383],
        centuries,
    ) / 3600.0
}

/// Ecliptic constellations with J2000.0 entry longitudes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zodiac {
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpius,
    Ophiuchus,
    Sagittarius,
    Capricornus,
    Aquarius,
}

/// Constellations in ecliptic order, starting with the one containing the equinox.
const CONSTELLATIONS: [(Zodiac, f64); 13] = [
    (Zodiac::Pisces, 351.57),
    (Zodiac::Aries, 28.69),
    (Zodiac::Taurus, 53.42),
    (Zodiac::Gemini, 90.14),
    (Zodiac::Cancer, 118.26),
    (Zodiac::Leo, 138.18),
    (Zodiac::Virgo, 174.15),
    (Zodiac::Libra, 218.02),
    (Zodiac::Scorpius, 241.02),
    (Zodiac::Ophiuchus, 247.97),
    (Zodiac::Sagittarius, 266.30),
    (Zodiac::Capricornus, 299.70),
    (Zodiac::Aquarius, 327.88),
];

impl Zodiac {
    /// All thirteen in ecliptic order.
    pub const ALL: [Self; 13] = [
        Self::Pisces,
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpius,
        Self::Ophiuchus,
        Self::Sagittarius,
        Self::Capricornus,
        Self::Aquarius,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// The constellation containing a body's position at an instant.
    #[must_use]
    pub fn of(body: CelestialBody, instant: &JulianDay) -> Self {
        let centuries = instant.ephemeris_centuries();
        let offset = Self::frame_offset(centuries);
        let longitude = normalize_degrees_0_to_360(body.longitude_at(centuries) - offset);
        Self::ALL
            .into_iter()
            .find(|section| contains(*section, longitude))
            .unwrap_or(Self::Pisces)
    }
}

impl ZodiacSection for Zodiac {
    fn start(self) -> f64 {
        CONSTELLATIONS[self.index()].1
    }

    fn end(self) -> f64 {
        CONSTELLATIONS[(self.index() + 1) % CONSTELLATIONS.len()].1
    }

    fn frame_offset(centuries: f64) -> f64 {
        general_precession(centuries)
    }
}

/// Tropical signs of 30° each, Aries beginning at the vernal equinox.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    /// All twelve in order from the vernal equinox.
    pub const ALL: [Self; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    /// The sign containing a body's position at an instant.
    #[must_use]
    pub fn of(body: CelestialBody, instant: &JulianDay) -> Self {
        let longitude = body.ecliptic_longitude(instant);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (longitude / 30.0) as usize;
        Self::ALL[index.min(11)]
    }
}

impl ZodiacSection for Sign {
    fn start(self) -> f64 {
        30.0 * (self as usize) as f64
    }

    fn end(self) -> f64 {
        normalize_degrees_0_to_360(self.start() + 30.0)
    }
}

fn contains<S: ZodiacSection>(section: S, longitude: f64) -> bool {
    let width = normalize_degrees_0_to_360(section.end() - section.start());
    normalize_degrees_0_to_360(longitude - section.start()) < width
}

/// First instant (ephemeris time) after `search_start` at which `body` enters or leaves
/// `section`.
///
/// # Errors
/// Returns `OutOfRange` if the crossing falls outside the supported time range.
pub fn crossing_instant<S: ZodiacSection>(
    body: CelestialBody,
    section: S,
    event: ZodiacEvent,
    search_start: &JulianDay,
) -> Result<JulianDay> {
    let boundary = match event {
        ZodiacEvent::Entry => section.start(),
        ZodiacEvent::Exit => section.end(),
    };
    let longitude = |tt: f64| {
        let centuries = (tt - J2000) / DAYS_PER_CENTURY;
        body.longitude_at(centuries) - S::frame_offset(centuries)
    };

    let start = search_start.value_in(TimeScale::Ephemeris);
    let to_go = normalize_degrees_0_to_360(boundary - longitude(start));
    let estimate = start + to_go / body.mean_motion();
    let lo = (estimate - body.margin_days()).max(start);
    let hi = estimate + body.margin_days();
    JulianDay::ephemeris(bisect_longitude(longitude, boundary, lo, hi))
}

/// First time after `search_start` at which `body` enters or leaves `section`.
///
/// # Errors
/// Returns `OutOfRange` if the start or the crossing falls outside the supported range.
///
/// # Example
/// ```
/// use chrono::{DateTime, Utc};
/// use solar_lunar::zodiac::{crossing, CelestialBody, Sign, ZodiacEvent};
///
/// // the sun enters tropical Aries at the March equinox
/// let start = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
/// let entry = crossing(CelestialBody::Sun, Sign::Aries, ZodiacEvent::Entry, &start).unwrap();
/// assert_eq!(entry.format("%Y-%m-%d %H:%M").to_string(), "2024-03-20 03:06");
/// ```
pub fn crossing<S: ZodiacSection, Tz: TimeZone>(
    body: CelestialBody,
    section: S,
    event: ZodiacEvent,
    search_start: &DateTime<Tz>,
) -> Result<DateTime<Utc>> {
    let start = JulianDay::from_datetime(search_start, TimeScale::Posix)?;
    crossing_instant(body, section, event, &start)?.to_datetime()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(year: i32, month: u32, day: u32) -> JulianDay {
        JulianDay::from_utc(year, month, day, 0, 0, 0.0, TimeScale::Posix).unwrap()
    }

    #[test]
    fn test_general_precession() {
        assert_eq!(general_precession(0.0), 0.0);
        assert!((general_precession(1.0) * 3600.0 - 5029.90).abs() < 0.01);
        assert!(general_precession(-1.0) < 0.0);
    }

    #[test]
    fn test_sections_cover_the_ecliptic() {
        let total: f64 = Zodiac::ALL
            .iter()
            .map(|section| normalize_degrees_0_to_360(section.end() - section.start()))
            .sum();
        assert!((total - 360.0).abs() < 1e-9);
        assert_eq!(Sign::Pisces.end(), 0.0);
        assert!(contains(Zodiac::Pisces, 0.0));
        assert!(contains(Zodiac::Ophiuchus, 250.0));
        assert!(!contains(Zodiac::Scorpius, 250.0));
    }

    #[test]
    fn test_sign_and_constellation_of_sun() {
        let june = utc(2024, 6, 1);
        assert_eq!(Sign::of(CelestialBody::Sun, &june), Sign::Gemini);
        assert_eq!(Zodiac::of(CelestialBody::Sun, &june), Zodiac::Taurus);

        let december = utc(2024, 12, 5);
        assert_eq!(Sign::of(CelestialBody::Sun, &december), Sign::Sagittarius);
        assert_eq!(Zodiac::of(CelestialBody::Sun, &december), Zodiac::Ophiuchus);
    }

    #[test]
    fn test_sun_enters_pisces_constellation() {
        // J2000 boundary 351.57° plus 0.335° of precession
        let entry = crossing_instant(
            CelestialBody::Sun,
            Zodiac::Pisces,
            ZodiacEvent::Entry,
            &utc(2024, 1, 1),
        )
        .unwrap();
        let expected = JulianDay::from_utc(2024, 3, 12, 0, 7, 12.0, TimeScale::Posix).unwrap();
        assert!((entry.value_in(TimeScale::Posix) - expected.value()).abs() < 2.0 / 1440.0);
    }

    #[test]
    fn test_exit_is_next_entry() {
        let start = utc(2024, 11, 1);
        let exit = crossing_instant(
            CelestialBody::Sun,
            Zodiac::Ophiuchus,
            ZodiacEvent::Exit,
            &start,
        )
        .unwrap();
        let entry = crossing_instant(
            CelestialBody::Sun,
            Zodiac::Sagittarius,
            ZodiacEvent::Entry,
            &start,
        )
        .unwrap();
        assert_eq!(exit, entry);
        let expected = JulianDay::from_utc(2024, 12, 18, 2, 19, 10.0, TimeScale::Posix).unwrap();
        assert!((exit.value_in(TimeScale::Posix) - expected.value()).abs() < 2.0 / 1440.0);
    }

    #[test]
    fn test_moon_enters_every_sign_within_a_month() {
        let start = utc(2024, 1, 1);
        for sign in Sign::ALL {
            let entry =
                crossing_instant(CelestialBody::Moon, sign, ZodiacEvent::Entry, &start).unwrap();
            let days = entry.value() - start.value_in(TimeScale::Ephemeris);
            assert!(days > 0.0 && days < 27.4, "{sign:?}: {days}");
            let longitude = CelestialBody::Moon.ecliptic_longitude(&entry);
            let delta = crate::math::normalize_degrees_signed(longitude - sign.start());
            assert!(delta.abs() < 1e-3, "{sign:?}: {longitude}");
        }
    }

    #[test]
    fn test_crossing_lies_after_start_when_on_boundary() {
        let leo_entry = |after: &JulianDay| {
            crossing_instant(CelestialBody::Moon, Sign::Leo, ZodiacEvent::Entry, after).unwrap()
        };
        let start = leo_entry(&utc(2024, 5, 1)).plus_seconds(60.0).unwrap();
        let next = leo_entry(&start);
        let days = next.value() - start.value();
        assert!((days - 27.32).abs() < 0.5, "{days}");
    }
}
