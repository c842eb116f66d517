//! Pluggable sunrise/sunset algorithms.
//!
//! A [`SolarCalculator`] answers "when does the sun's center cross a given zenith angle on
//! this date" plus a few auxiliary quantities. Four algorithms of increasing fidelity are
//! built in and registered in a [`CalculatorRegistry`] under their names:
//!
//! | Name        | Algorithm                                   | Scope                     |
//! |-------------|---------------------------------------------|---------------------------|
//! | `SIMPLE`    | Almanac for Computers (1990)                | latitudes within ±65°     |
//! | `NOAA`      | NOAA solar calculator spreadsheet           | about 1 min, no altitude  |
//! | `CC`        | Calendrical Calculations (Reingold/Dershowitz) | altitude by approximate dip |
//! | `PRECISE`   | full solar series, iterated hour angle      | default                   |
//!
//! Third parties add their own algorithm by implementing the trait and registering it.

use crate::time::JulianDay;
use crate::{Error, Result};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

mod calendrical;
mod noaa;
mod precise;
mod simple;

pub use calendrical::CalendricalCalculator;
pub use noaa::NoaaCalculator;
pub use precise::PreciseCalculator;
pub use simple::SimpleCalculator;

/// Name of the calculator used when none is requested.
pub const DEFAULT_CALCULATOR: &str = "PRECISE";

/// Apparent declination of the sun in degrees.
pub const FEATURE_DECLINATION: &str = "declination";
/// Apparent right ascension of the sun in degrees.
pub const FEATURE_RIGHT_ASCENSION: &str = "right-ascension";
/// Apparent ecliptic longitude of the sun in degrees.
pub const FEATURE_SOLAR_LONGITUDE: &str = "solar-longitude";
/// True obliquity of the ecliptic in degrees.
pub const FEATURE_OBLIQUITY: &str = "obliquity";
/// Nutation in longitude in degrees.
pub const FEATURE_NUTATION: &str = "nutation";

/// Zenith angle of the sun's center at standard sunrise: 90° plus 16′ semidiameter and
/// 34′ refraction.
pub const STANDARD_ZENITH: f64 = 90.0 + 50.0 / 60.0;

/// A sunrise/sunset algorithm.
///
/// Times are returned as julian days in mean solar time (UT). `None` means the sun does not
/// reach the requested zenith angle on that date.
pub trait SolarCalculator: Send + Sync + fmt::Debug {
    /// Unique registry name.
    fn name(&self) -> &str;

    /// Sunrise on the given UTC date, when the sun's center rises through `zenith` degrees.
    fn sunrise(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
    ) -> Option<JulianDay>;

    /// Sunset on the given UTC date, when the sun's center sets through `zenith` degrees.
    fn sunset(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        zenith: f64,
    ) -> Option<JulianDay>;

    /// Equation of time in seconds (apparent minus mean solar time).
    fn equation_of_time(&self, instant: &JulianDay) -> f64;

    /// Named auxiliary quantity, `NaN` if this calculator does not provide it.
    fn feature(&self, _instant: &JulianDay, _name: &str) -> f64 {
        f64::NAN
    }

    /// Correction in degrees to the zenith angle for an observer at `altitude` meters.
    fn geodetic_angle(&self, _latitude: f64, _altitude: f64) -> f64 {
        0.0
    }

    /// Zenith angle of standard sunrise/sunset for an observer location.
    fn zenith_angle(&self, latitude: f64, altitude: f64) -> f64 {
        STANDARD_ZENITH + self.geodetic_angle(latitude, altitude)
    }

    /// Whether the algorithm is documented to work at this latitude.
    fn supports_latitude(&self, _latitude: f64) -> bool {
        true
    }
}

/// Declination of the sun in degrees as computed by a calculator.
///
/// # Errors
/// Returns `UnsupportedFeature` if the calculator does not provide a declination.
pub fn declination(calculator: &dyn SolarCalculator, instant: &JulianDay) -> Result<f64> {
    let value = calculator.feature(instant, FEATURE_DECLINATION);
    if value.is_nan() {
        return Err(Error::unsupported_feature(
            calculator.name(),
            FEATURE_DECLINATION,
        ));
    }
    Ok(value)
}

/// Named calculators, safe for concurrent lookup and registration.
///
/// Registration is insert-if-absent: the first calculator registered under a name stays,
/// later registrations under the same name are rejected.
///
/// # Example
/// ```
/// use solar_lunar::calculators::CalculatorRegistry;
///
/// let registry = CalculatorRegistry::with_builtins();
/// assert_eq!(registry.names(), ["CC", "NOAA", "PRECISE", "SIMPLE"]);
/// assert!(registry.get("NOAA").is_ok());
/// assert!(registry.get("MAYA").is_err());
/// ```
pub struct CalculatorRegistry {
    calculators: RwLock<HashMap<String, Arc<dyn SolarCalculator>>>,
}

impl CalculatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculators: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry holding the four built-in calculators.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(SimpleCalculator));
        registry.register(Arc::new(NoaaCalculator));
        registry.register(Arc::new(CalendricalCalculator));
        registry.register(Arc::new(PreciseCalculator));
        registry
    }

    /// The process-wide registry, populated with the built-ins on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<CalculatorRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Registers a calculator under its name unless the name is taken.
    ///
    /// Returns `true` if the calculator was added.
    pub fn register(&self, calculator: Arc<dyn SolarCalculator>) -> bool {
        let name = calculator.name().to_owned();
        let mut calculators = self
            .calculators
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if calculators.contains_key(&name) {
            debug!("calculator {name} already registered, keeping the first one");
            return false;
        }
        debug!("registering calculator {name}");
        calculators.insert(name, calculator);
        true
    }

    /// Looks up a calculator by name.
    ///
    /// # Errors
    /// Returns `UnknownCalculator` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn SolarCalculator>> {
        self.calculators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unknown_calculator(name))
    }

    /// Whether a calculator is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.calculators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .calculators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}
