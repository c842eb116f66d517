//! # Solar and Lunar Events
//!
//! Positions of the sun and moon, and the events derived from them, for any place on earth
//! between the years -2000 and 3000.
//!
//! The crate combines:
//! - **Position models**: the 49-term Bretagnon-Simon series for the sun and the Meeus
//!   chapter 47 series for the moon, both with IAU 1980 nutation;
//! - **Time scales**: julian days tagged as ephemeris time (TT), mean solar time (UT1) or
//!   civil POSIX time, with ΔT after Espenak & Meeus and the leap second table;
//! - **Calculators**: four interchangeable sunrise/sunset algorithms of increasing
//!   precision, looked up by name in a [`CalculatorRegistry`];
//! - **Event searches**: sunrise, sunset and twilight, solar noon, shadow lengths,
//!   moonrise and moonset, equinoxes and solstices, moon phases, perigee and apogee, and
//!   zodiac crossings.
//!
//! Events that do not happen (polar night, a moon that never sets) are reported as `None`
//! or as a dedicated variant, never as an error.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the value types. Deserialization validates
//!   its input exactly like the constructors do.
//!
//! ## Quick Start
//!
//! ### Sunrise and Sunset
//! ```rust
//! use chrono::NaiveDate;
//! use solar_lunar::{GeoLocation, SolarTime, SunriseResult};
//!
//! let vienna = GeoLocation::new(48.21, 16.37, 190.0).unwrap();
//! let solar_time = SolarTime::new(vienna).unwrap();
//! let date = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
//!
//! match solar_time.day_events(date).unwrap() {
//!     SunriseResult::RegularDay { sunrise, transit, sunset } => {
//!         println!("Sunrise: {sunrise}");
//!         println!("Solar noon: {transit}");
//!         println!("Sunset: {sunset}");
//!     }
//!     _ => println!("No sunrise/sunset (polar day/night)"),
//! }
//! ```
//!
//! ### Sun and Moon Position
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use solar_lunar::{moon, sun, GeoLocation};
//!
//! let datetime = "2026-06-21T12:00:00+02:00".parse::<DateTime<FixedOffset>>().unwrap();
//! let vienna = GeoLocation::new(48.21, 16.37, 190.0).unwrap();
//!
//! let sun = sun::position(&datetime, &vienna).unwrap();
//! println!("Sun azimuth {:.3}°, elevation {:.3}°", sun.azimuth(), sun.elevation());
//!
//! let moon = moon::position(&datetime, &vienna).unwrap();
//! println!("Moon {:.0} km away", moon.distance());
//! ```
//!
//! ### Seasons and Moon Phases
//! ```rust
//! use solar_lunar::{AstronomicalSeason, MoonPhase};
//!
//! let solstice = AstronomicalSeason::SummerSolstice.in_year(2026).unwrap();
//! let full_moon = MoonPhase::Full.after(&solstice).unwrap();
//! assert!(full_moon > solstice);
//! ```
//!
//! ## Coordinate System
//!
//! - **Azimuth**: 0° = North, measured clockwise (0° to 360°)
//! - **Elevation angle**: 0° = horizon, 90° = directly overhead (-90° to +90°)
//! - **Zenith angle**: 90° minus the elevation angle
//! - **Ecliptic longitude**: measured from the true equinox of date
//!
//! ## References
//!
//! - Meeus, J. (1998). Astronomical Algorithms, 2nd edition. Willmann-Bell.
//! - Reingold, E. M.; Dershowitz, N. (2018). Calendrical Calculations, 4th edition.
//!   Cambridge University Press.
//! - Bretagnon, P.; Simon, J.-L. (1986). Planetary Programs and Tables from -4000 to +2800.
//! - Espenak, F.; Meeus, J. (2006). Five Millennium Canon of Solar Eclipses: -1999 to +3000.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
    clippy::suboptimal_flops,
)]

// Public API exports
pub use crate::calculators::{CalculatorRegistry, SolarCalculator};
pub use crate::error::{Error, Result};
pub use crate::location::GeoLocation;
pub use crate::moon::{MoonPosition, Moonlight};
pub use crate::phase::{LunarApsis, MoonPhase};
pub use crate::season::AstronomicalSeason;
pub use crate::solar_time::SolarTime;
pub use crate::sun::SunPosition;
pub use crate::time::{JulianDay, TimeScale};
pub use crate::types::{
    EquatorialCoordinates, Horizon, HorizontalPosition, RefractionCorrection, SunriseResult,
};

// Position models
pub mod moon;
pub mod nutation;
pub mod sun;

// Event searches
pub mod phase;
pub mod season;
pub mod solar_time;
pub mod zodiac;

// Core modules
pub mod calculators;
pub mod error;
pub mod horizontal;
pub mod location;
pub mod solver;
pub mod time;
pub mod types;

// Internal modules
mod math;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    #[test]
    fn test_positions_independent_of_input_zone() {
        let datetime_fixed = "2023-06-21T12:00:00-07:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap();
        let datetime_utc = Utc.with_ymd_and_hms(2023, 6, 21, 19, 0, 0).unwrap();
        let location = GeoLocation::new(37.7749, -122.4194, 0.0).unwrap();

        let sun1 = sun::position(&datetime_fixed, &location).unwrap();
        let sun2 = sun::position(&datetime_utc, &location).unwrap();
        assert!((sun1.azimuth() - sun2.azimuth()).abs() < 1e-10);
        assert!((sun1.elevation() - sun2.elevation()).abs() < 1e-10);
        assert!((0.0..360.0).contains(&sun1.azimuth()));
        assert!((-90.0..=90.0).contains(&sun1.elevation()));

        let moon1 = moon::position(&datetime_fixed, &location).unwrap();
        let moon2 = moon::position(&datetime_utc, &location).unwrap();
        assert!((moon1.azimuth() - moon2.azimuth()).abs() < 1e-10);
        assert!((moon1.distance() - moon2.distance()).abs() < 1e-6);
    }

    #[test]
    fn test_global_registry_resolves_default() {
        let calculator = CalculatorRegistry::global()
            .get(calculators::DEFAULT_CALCULATOR)
            .unwrap();
        assert_eq!(calculator.name(), "PRECISE");
    }
}
