//! Leap second table (TAI − UTC) since the introduction of integral leap seconds.

/// Modified julian days at which a new TAI − UTC offset took effect.
///
/// The first entry (1972-01-01) carries an offset of 10 s; each later entry adds one second.
const LEAP_SECOND_MJD: [u32; 28] = [
    41317, // 1972-01-01
    41499, // 1972-07-01
    41683, // 1973-01-01
    42048, // 1974-01-01
    42413, // 1975-01-01
    42778, // 1976-01-01
    43144, // 1977-01-01
    43509, // 1978-01-01
    43874, // 1979-01-01
    44239, // 1980-01-01
    44786, // 1981-07-01
    45151, // 1982-07-01
    45516, // 1983-07-01
    46247, // 1985-07-01
    47161, // 1988-01-01
    47892, // 1990-01-01
    48257, // 1991-01-01
    48804, // 1992-07-01
    49169, // 1993-07-01
    49534, // 1994-07-01
    50083, // 1996-01-01
    50630, // 1997-07-01
    51179, // 1999-01-01
    53736, // 2006-01-01
    54832, // 2009-01-01
    56109, // 2012-07-01
    57204, // 2015-07-01
    57754, // 2017-01-01
];

const INITIAL_OFFSET: f64 = 10.0;
const MJD_OFFSET: f64 = 2_400_000.5;

/// Offset between TT and TAI in seconds.
pub const TT_MINUS_TAI: f64 = 32.184;

/// Returns TAI − UTC in seconds for a UTC julian day, or `None` before 1972-01-01.
///
/// # Example
/// ```
/// # use solar_lunar::time::leap_seconds::tai_minus_utc;
/// assert_eq!(tai_minus_utc(2_451_544.5), Some(32.0)); // 2000-01-01
/// assert_eq!(tai_minus_utc(2_440_587.5), None);       // 1970-01-01
/// ```
#[must_use]
pub fn tai_minus_utc(utc_julian_day: f64) -> Option<f64> {
    let mjd = utc_julian_day - MJD_OFFSET;
    let passed = LEAP_SECOND_MJD
        .iter()
        .take_while(|&&start| mjd >= f64::from(start))
        .count();
    (passed > 0).then(|| INITIAL_OFFSET + (passed - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_at_table_edges() {
        assert_eq!(tai_minus_utc(2_441_317.5 - 1e-6), None);
        assert_eq!(tai_minus_utc(2_441_317.5), Some(10.0));
        // 2016-12-31 23:00 and 2017-01-01 00:00
        assert_eq!(tai_minus_utc(2_457_754.5 - 1.0 / 24.0), Some(36.0));
        assert_eq!(tai_minus_utc(2_457_754.5), Some(37.0));
        assert_eq!(tai_minus_utc(2_460_000.5), Some(37.0));
    }

    #[test]
    fn test_table_is_sorted() {
        assert!(LEAP_SECOND_MJD.windows(2).all(|w| w[0] < w[1]));
    }
}
