//! Registering third-party calculators.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use solar_lunar::calculators::{self, CalculatorRegistry, SolarCalculator};
use solar_lunar::time::{JulianDay, TimeScale};
use solar_lunar::{Error, GeoLocation, SolarTime};
use std::sync::Arc;
use std::thread;

/// Sun up from 06:00 to 18:00 local mean time, every day, everywhere.
#[derive(Debug)]
struct EquinoxForever;

impl EquinoxForever {
    fn local_mean_hour(date: NaiveDate, longitude: f64, hour: f64) -> Option<JulianDay> {
        let (year, month, day) = (date.year(), date.month(), date.day());
        let midnight = JulianDay::from_utc(year, month, day, 0, 0, 0.0, TimeScale::Posix)
            .and_then(|posix| JulianDay::mean_solar(posix.value()))
            .ok()?;
        midnight.plus_days((hour - longitude / 15.0) / 24.0).ok()
    }
}

impl SolarCalculator for EquinoxForever {
    fn name(&self) -> &str {
        "EQUINOX"
    }

    fn sunrise(
        &self,
        date: NaiveDate,
        _latitude: f64,
        longitude: f64,
        _zenith: f64,
    ) -> Option<JulianDay> {
        Self::local_mean_hour(date, longitude, 6.0)
    }

    fn sunset(
        &self,
        date: NaiveDate,
        _latitude: f64,
        longitude: f64,
        _zenith: f64,
    ) -> Option<JulianDay> {
        Self::local_mean_hour(date, longitude, 18.0)
    }

    fn equation_of_time(&self, _instant: &JulianDay) -> f64 {
        0.0
    }

    fn supports_latitude(&self, latitude: f64) -> bool {
        latitude.abs() < 45.0
    }
}

#[test]
fn test_custom_calculator_drives_solar_time() -> Result<(), Box<dyn std::error::Error>> {
    let registry = CalculatorRegistry::with_builtins();
    assert!(registry.register(Arc::new(EquinoxForever)));
    assert!(registry.names().contains(&"EQUINOX".to_string()));

    let greenwich = GeoLocation::new(30.0, 0.0, 0.0)?;
    let solar_time = SolarTime::with_registry(greenwich, &registry, "EQUINOX")?;
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let sunrise = solar_time.sunrise(date)?.ok_or("no sunrise")?;
    let sunset = solar_time.sunset(date)?.ok_or("no sunset")?;
    let transit = solar_time.transit(date)?;
    // UT1 and UTC differ by the modelled ΔT error, a few seconds at most
    assert_near(&sunrise, &Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap());
    assert_near(&sunset, &Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap());
    assert_near(&transit, &Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    Ok(())
}

fn assert_near(actual: &DateTime<Utc>, expected: &DateTime<Utc>) {
    let error = (*actual - *expected).num_seconds().abs();
    assert!(error < 30, "{actual} vs {expected}");
}

#[test]
fn test_custom_calculator_limits() -> Result<(), Box<dyn std::error::Error>> {
    let registry = CalculatorRegistry::new();
    registry.register(Arc::new(EquinoxForever));

    let oslo = GeoLocation::new(59.91, 10.75, 0.0)?;
    let result = SolarTime::with_registry(oslo, &registry, "EQUINOX");
    assert!(matches!(result, Err(Error::UnsupportedLatitude { .. })));

    let cairo = GeoLocation::new(30.04, 31.24, 0.0)?;
    let solar_time = SolarTime::with_registry(cairo, &registry, "EQUINOX")?;
    let instant = JulianDay::from_utc(2024, 5, 1, 12, 0, 0.0, TimeScale::Posix)?;
    let declination = calculators::declination(solar_time.calculator(), &instant);
    assert!(matches!(declination, Err(Error::UnsupportedFeature { .. })));

    assert!(matches!(
        SolarTime::with_registry(cairo, &registry, "PRECISE"),
        Err(Error::UnknownCalculator { .. })
    ));
    Ok(())
}

#[test]
fn test_concurrent_registration_keeps_first() {
    let registry = CalculatorRegistry::with_builtins();

    let added: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let added = registry.register(Arc::new(EquinoxForever));
                    assert!(registry.get("PRECISE").is_ok());
                    usize::from(added)
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).sum()
    });

    assert_eq!(added, 1);
    assert_eq!(registry.names(), ["CC", "EQUINOX", "NOAA", "PRECISE", "SIMPLE"]);
}
