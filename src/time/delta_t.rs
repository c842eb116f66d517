//! ΔT (TT − UT1) estimation.
//!
//! Polynomial fits by Espenak & Meeus (updated 2014), see
//! <https://www.eclipsewise.com/help/deltatpoly2014.html>. Outside −500..+3000 the
//! long-term parabola of Morrison & Stephenson is used, which keeps the full supported
//! range (−2000..+3000) and a few days beyond it well defined.

#![allow(clippy::unreadable_literal)]

use super::{JulianDay, TimeScale, J2000, SECONDS_PER_DAY};
use crate::math::polynomial;
use crate::{Error, Result};

/// One piece of the fit: valid for years below `until`, evaluated at
/// `(year - origin) / scale`.
struct FitSegment {
    until: f64,
    origin: f64,
    scale: f64,
    coefficients: &'static [f64],
}

#[rustfmt::skip]
const FIT: [FitSegment; 13] = [
    FitSegment { until: 500.0, origin: 0.0, scale: 100.0, coefficients: &[
        10583.6, -1014.41, 33.78311, -5.952053, -0.1798452, 0.022174192, 0.0090316521,
    ] },
    FitSegment { until: 1600.0, origin: 1000.0, scale: 100.0, coefficients: &[
        1574.2, -556.01, 71.23472, 0.319781, -0.8503463, -0.005050998, 0.0083572073,
    ] },
    FitSegment { until: 1700.0, origin: 1600.0, scale: 1.0, coefficients: &[
        120.0, -0.9808, -0.01532, 1.0 / 7129.0,
    ] },
    FitSegment { until: 1800.0, origin: 1700.0, scale: 1.0, coefficients: &[
        8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0,
    ] },
    FitSegment { until: 1860.0, origin: 1800.0, scale: 1.0, coefficients: &[
        13.72, -0.332447, 0.0068612, 0.0041116, -0.00037436, 0.0000121272, -0.0000001699,
        0.000000000875,
    ] },
    FitSegment { until: 1900.0, origin: 1860.0, scale: 1.0, coefficients: &[
        7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233_174.0,
    ] },
    FitSegment { until: 1920.0, origin: 1900.0, scale: 1.0, coefficients: &[
        -2.79, 1.494119, -0.0598939, 0.0061966, -0.000197,
    ] },
    FitSegment { until: 1941.0, origin: 1920.0, scale: 1.0, coefficients: &[
        21.20, 0.84493, -0.076100, 0.0020936,
    ] },
    FitSegment { until: 1961.0, origin: 1950.0, scale: 1.0, coefficients: &[
        29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0,
    ] },
    FitSegment { until: 1986.0, origin: 1975.0, scale: 1.0, coefficients: &[
        45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0,
    ] },
    FitSegment { until: 2005.0, origin: 2000.0, scale: 1.0, coefficients: &[
        63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599,
    ] },
    FitSegment { until: 2015.0, origin: 2005.0, scale: 1.0, coefficients: &[
        64.69, 0.2930,
    ] },
    FitSegment { until: 3000.0, origin: 2015.0, scale: 1.0, coefficients: &[
        67.62, 0.3645, 0.0039755,
    ] },
];

/// First year covered by the polynomial fit.
const FIT_START: f64 = -500.0;

/// ΔT (TT − UT1) in seconds.
///
/// ΔT follows the irregular and slowing rotation of the earth. It is what separates the
/// ephemeris and mean solar scales of a [`JulianDay`].
pub struct DeltaT;

impl DeltaT {
    /// Estimates ΔT in seconds for a decimal year (2024.5 is mid-2024).
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the year is not finite.
    ///
    /// # Example
    /// ```
    /// # use solar_lunar::time::DeltaT;
    /// let delta_t = DeltaT::estimate(2024.0).unwrap();
    /// assert!(delta_t > 60.0 && delta_t < 80.0);
    /// ```
    pub fn estimate(decimal_year: f64) -> Result<f64> {
        if !decimal_year.is_finite() {
            return Err(Error::invalid_datetime("year must be finite"));
        }
        Ok(seconds(decimal_year))
    }

    /// ΔT in seconds at an instant given in any time scale.
    ///
    /// # Example
    /// ```
    /// # use solar_lunar::time::{DeltaT, JulianDay, TimeScale};
    /// let utc = JulianDay::from_utc(2000, 1, 1, 12, 0, 0.0, TimeScale::Posix).unwrap();
    /// let ut1 = utc.convert(TimeScale::MeanSolar).unwrap();
    /// let tt = utc.convert(TimeScale::Ephemeris).unwrap();
    /// let elapsed = (tt.value() - ut1.value()) * 86_400.0;
    /// assert!((elapsed - DeltaT::at(&utc)).abs() < 1e-3);
    /// ```
    #[must_use]
    pub fn at(instant: &JulianDay) -> f64 {
        seconds(decimal_year(instant.value_in(TimeScale::MeanSolar)))
    }
}

/// Decimal year of a julian day, in julian years from J2000.0.
pub(crate) fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

/// ΔT in days at the given julian day (any scale; the difference is far below the fit error).
pub(crate) fn delta_t_days(jd: f64) -> f64 {
    seconds(decimal_year(jd)) / SECONDS_PER_DAY
}

/// Morrison & Stephenson long-term parabola.
fn long_term_parabola(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    polynomial(&[-20.0, 0.0, 32.0], u)
}

pub(crate) fn seconds(year: f64) -> f64 {
    if year < FIT_START {
        return long_term_parabola(year);
    }
    FIT.iter()
        .find(|segment| year < segment.until)
        .map_or_else(
            || long_term_parabola(year),
            |segment| polynomial(segment.coefficients, (year - segment.origin) / segment.scale),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_t_modern_estimates() {
        let delta_t_2000 = DeltaT::estimate(2000.0).unwrap();
        let delta_t_2020 = DeltaT::estimate(2020.0).unwrap();

        assert!(delta_t_2000 > 60.0 && delta_t_2000 < 70.0);
        assert!(delta_t_2020 > 65.0 && delta_t_2020 < 75.0);
        assert!(delta_t_2020 > delta_t_2000);
    }

    #[test]
    fn test_delta_t_historical_estimates() {
        assert!(DeltaT::estimate(1900.0).unwrap() < 0.0);
        let delta_t_1950 = DeltaT::estimate(1950.0).unwrap();
        assert!(delta_t_1950 > 25.0 && delta_t_1950 < 35.0);
    }

    #[test]
    fn test_delta_t_covers_whole_supported_range() {
        // about 13 hours at -2000
        let ancient = DeltaT::estimate(-2000.0).unwrap();
        assert!(ancient > 40_000.0 && ancient < 50_000.0);

        let at_3000 = DeltaT::estimate(3000.0).unwrap();
        let beyond = DeltaT::estimate(3000.5).unwrap();
        assert!(beyond > 4000.0);
        assert!((beyond - at_3000).abs() < 300.0);

        assert!(DeltaT::estimate(f64::NAN).is_err());
    }

    #[test]
    fn test_delta_t_at_instant() {
        let utc = JulianDay::from_utc(2024, 6, 15, 0, 0, 0.0, TimeScale::Posix).unwrap();
        let seconds = DeltaT::at(&utc);
        let by_year = DeltaT::estimate(2024.45).unwrap();
        assert!((seconds - by_year).abs() < 0.05, "{seconds} vs {by_year}");

        // the same instant in another scale gives the same value
        let tt = utc.convert(TimeScale::Ephemeris).unwrap();
        assert!((DeltaT::at(&tt) - seconds).abs() < 1e-6);

        let ut1 = utc.value_in(TimeScale::MeanSolar);
        let elapsed = (tt.value() - ut1) * SECONDS_PER_DAY;
        assert!((elapsed - seconds).abs() < 1e-3);
    }

    #[test]
    fn test_fit_segments_are_contiguous() {
        assert!(FIT.windows(2).all(|pair| pair[0].until < pair[1].until));
        for segment in &FIT[..FIT.len() - 1] {
            let below = seconds(segment.until - 1e-6);
            let above = seconds(segment.until);
            assert!((below - above).abs() < 2.0, "{}: {below} vs {above}", segment.until);
        }
    }

    #[test]
    fn test_delta_t_days_at_j2000() {
        let days = delta_t_days(J2000);
        assert!((days * SECONDS_PER_DAY - 63.86).abs() < 0.01);
    }
}
