//! Serialized values pass through the same checks as constructed ones.

#![cfg(feature = "serde")]

use solar_lunar::time::{JulianDay, TimeScale};
use solar_lunar::{AstronomicalSeason, EquatorialCoordinates, GeoLocation, LunarApsis, MoonPhase};

#[test]
fn test_location_json() -> Result<(), serde_json::Error> {
    let location: GeoLocation = serde_json::from_str(r#"{"latitude": 48.21, "longitude": 16.37}"#)?;
    assert_eq!(location.altitude(), 0.0);
    assert_eq!(location.observer_zone(), None);

    let zoned: GeoLocation = serde_json::from_str(
        r#"{"latitude": -13.83, "longitude": -171.76, "altitude": 2.0,
            "observer_zone_seconds": 46800}"#,
    )?;
    assert_eq!(zoned.observer_zone().map(|zone| zone.local_minus_utc()), Some(46_800));
    assert_eq!(serde_json::from_str::<GeoLocation>(&serde_json::to_string(&zoned)?)?, zoned);

    for invalid in [
        r#"{"latitude": 90.5, "longitude": 0.0}"#,
        r#"{"latitude": 0.0, "longitude": -181.0}"#,
        r#"{"latitude": 0.0, "longitude": 0.0, "observer_zone_seconds": 90000}"#,
    ] {
        assert!(serde_json::from_str::<GeoLocation>(invalid).is_err(), "{invalid}");
    }
    Ok(())
}

#[test]
fn test_julian_day_json() -> Result<(), serde_json::Error> {
    let jd = JulianDay::new(2_451_545.0, TimeScale::Ephemeris).unwrap();
    let json = serde_json::to_string(&jd)?;
    assert_eq!(serde_json::from_str::<JulianDay>(&json)?, jd);

    // year 3001 is outside the supported range
    let invalid = r#"{"value": 2817330.5, "scale": "Posix"}"#;
    assert!(serde_json::from_str::<JulianDay>(invalid).is_err());
    Ok(())
}

#[test]
fn test_equatorial_json() -> Result<(), serde_json::Error> {
    let coordinates: EquatorialCoordinates =
        serde_json::from_str(r#"{"right_ascension": 370.0, "declination": -12.5}"#)?;
    assert!((coordinates.right_ascension() - 10.0).abs() < 1e-12);
    let beyond_pole = r#"{"right_ascension": 0.0, "declination": 91.0}"#;
    assert!(serde_json::from_str::<EquatorialCoordinates>(beyond_pole).is_err());
    Ok(())
}

#[test]
fn test_event_kinds_json() -> Result<(), serde_json::Error> {
    assert_eq!(serde_json::to_string(&MoonPhase::FirstQuarter)?, r#""FirstQuarter""#);
    assert_eq!(serde_json::from_str::<LunarApsis>(r#""Apogee""#)?, LunarApsis::Apogee);
    assert_eq!(
        serde_json::from_str::<AstronomicalSeason>(r#""WinterSolstice""#)?,
        AstronomicalSeason::WinterSolstice
    );
    assert!(serde_json::from_str::<MoonPhase>(r#""Gibbous""#).is_err());
    Ok(())
}
