//! Nutation and obliquity of the ecliptic.
//!
//! IAU 1980 theory of nutation as tabulated in Meeus, Astronomical Algorithms (2nd ed.),
//! table 22.A, together with the IAU mean obliquity (equation 22.2).

#![allow(clippy::unreadable_literal)]

use crate::math::{cos_deg, polynomial, sin_deg};

/// One periodic term: multipliers of D, M, M', F, Ω followed by the Δψ coefficient, its
/// rate per century, the Δε coefficient and its rate, all in units of 0.0001″.
type NutationTerm = ([i8; 5], f64, f64, f64, f64);

#[rustfmt::skip]
const NUTATION_TERMS: [NutationTerm; 63] = [
    ([0, 0, 0, 0, 1], -171996.0, -174.2, 92025.0, 8.9),
    ([-2, 0, 0, 2, 2], -13187.0, -1.6, 5736.0, -3.1),
    ([0, 0, 0, 2, 2], -2274.0, -0.2, 977.0, -0.5),
    ([0, 0, 0, 0, 2], 2062.0, 0.2, -895.0, 0.5),
    ([0, 1, 0, 0, 0], 1426.0, -3.4, 54.0, -0.1),
    ([0, 0, 1, 0, 0], 712.0, 0.1, -7.0, 0.0),
    ([-2, 1, 0, 2, 2], -517.0, 1.2, 224.0, -0.6),
    ([0, 0, 0, 2, 1], -386.0, -0.4, 200.0, 0.0),
    ([0, 0, 1, 2, 2], -301.0, 0.0, 129.0, -0.1),
    ([-2, -1, 0, 2, 2], 217.0, -0.5, -95.0, 0.3),
    ([-2, 0, 1, 0, 0], -158.0, 0.0, 0.0, 0.0),
    ([-2, 0, 0, 2, 1], 129.0, 0.1, -70.0, 0.0),
    ([0, 0, -1, 2, 2], 123.0, 0.0, -53.0, 0.0),
    ([2, 0, 0, 0, 0], 63.0, 0.0, 0.0, 0.0),
    ([0, 0, 1, 0, 1], 63.0, 0.1, -33.0, 0.0),
    ([2, 0, -1, 2, 2], -59.0, 0.0, 26.0, 0.0),
    ([0, 0, -1, 0, 1], -58.0, -0.1, 32.0, 0.0),
    ([0, 0, 1, 2, 1], -51.0, 0.0, 27.0, 0.0),
    ([-2, 0, 2, 0, 0], 48.0, 0.0, 0.0, 0.0),
    ([0, 0, -2, 2, 1], 46.0, 0.0, -24.0, 0.0),
    ([2, 0, 0, 2, 2], -38.0, 0.0, 16.0, 0.0),
    ([0, 0, 2, 2, 2], -31.0, 0.0, 13.0, 0.0),
    ([0, 0, 2, 0, 0], 29.0, 0.0, 0.0, 0.0),
    ([-2, 0, 1, 2, 2], 29.0, 0.0, -12.0, 0.0),
    ([0, 0, 0, 2, 0], 26.0, 0.0, 0.0, 0.0),
    ([-2, 0, 0, 2, 0], -22.0, 0.0, 0.0, 0.0),
    ([0, 0, -1, 2, 1], 21.0, 0.0, -10.0, 0.0),
    ([0, 2, 0, 0, 0], 17.0, -0.1, 0.0, 0.0),
    ([2, 0, -1, 0, 1], 16.0, 0.0, -8.0, 0.0),
    ([-2, 2, 0, 2, 2], -16.0, 0.1, 7.0, 0.0),
    ([0, 1, 0, 0, 1], -15.0, 0.0, 9.0, 0.0),
    ([-2, 0, 1, 0, 1], -13.0, 0.0, 7.0, 0.0),
    ([0, -1, 0, 0, 1], -12.0, 0.0, 6.0, 0.0),
    ([0, 0, 2, -2, 0], 11.0, 0.0, 0.0, 0.0),
    ([2, 0, -1, 2, 1], -10.0, 0.0, 5.0, 0.0),
    ([2, 0, 1, 2, 2], -8.0, 0.0, 3.0, 0.0),
    ([0, 1, 0, 2, 2], 7.0, 0.0, -3.0, 0.0),
    ([-2, 1, 1, 0, 0], -7.0, 0.0, 0.0, 0.0),
    ([0, -1, 0, 2, 2], -7.0, 0.0, 3.0, 0.0),
    ([2, 0, 0, 2, 1], -7.0, 0.0, 3.0, 0.0),
    ([2, 0, 1, 0, 0], 6.0, 0.0, 0.0, 0.0),
    ([-2, 0, 2, 2, 2], 6.0, 0.0, -3.0, 0.0),
    ([-2, 0, 1, 2, 1], 6.0, 0.0, -3.0, 0.0),
    ([2, 0, -2, 0, 1], -6.0, 0.0, 3.0, 0.0),
    ([2, 0, 0, 0, 1], -6.0, 0.0, 3.0, 0.0),
    ([0, -1, 1, 0, 0], 5.0, 0.0, 0.0, 0.0),
    ([-2, -1, 0, 2, 1], -5.0, 0.0, 3.0, 0.0),
    ([-2, 0, 0, 0, 1], -5.0, 0.0, 3.0, 0.0),
    ([0, 0, 2, 2, 1], -5.0, 0.0, 3.0, 0.0),
    ([-2, 0, 2, 0, 1], 4.0, 0.0, 0.0, 0.0),
    ([-2, 1, 0, 2, 1], 4.0, 0.0, 0.0, 0.0),
    ([0, 0, 1, -2, 0], 4.0, 0.0, 0.0, 0.0),
    ([-1, 0, 1, 0, 0], -4.0, 0.0, 0.0, 0.0),
    ([-2, 1, 0, 0, 0], -4.0, 0.0, 0.0, 0.0),
    ([1, 0, 0, 0, 0], -4.0, 0.0, 0.0, 0.0),
    ([0, 0, 1, 2, 0], 3.0, 0.0, 0.0, 0.0),
    ([0, 0, -2, 2, 2], -3.0, 0.0, 0.0, 0.0),
    ([-1, -1, 1, 0, 0], -3.0, 0.0, 0.0, 0.0),
    ([0, 1, 1, 0, 0], -3.0, 0.0, 0.0, 0.0),
    ([0, -1, 1, 2, 2], -3.0, 0.0, 0.0, 0.0),
    ([2, -1, -1, 2, 2], -3.0, 0.0, 0.0, 0.0),
    ([0, 0, 3, 2, 2], -3.0, 0.0, 0.0, 0.0),
    ([2, -1, 0, 2, 2], -3.0, 0.0, 0.0, 0.0),
];

/// 0.0001″ expressed in degrees.
const TERM_UNIT_DEGREES: f64 = 1.0 / 36_000_000.0;

/// Nutation in longitude and obliquity, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in longitude Δψ
    pub longitude: f64,
    /// Nutation in obliquity Δε
    pub obliquity: f64,
}

impl Nutation {
    /// Evaluates the nutation for julian ephemeris centuries since J2000.0.
    #[must_use]
    pub fn at(centuries: f64) -> Self {
        let c = centuries;
        let arguments = [
            polynomial(&[297.85036, 445267.111480, -0.0019142, 1.0 / 189474.0], c),
            polynomial(&[357.52772, 35999.050340, -0.0001603, -1.0 / 300000.0], c),
            polynomial(&[134.96298, 477198.867398, 0.0086972, 1.0 / 56250.0], c),
            polynomial(&[93.27191, 483202.017538, -0.0036825, 1.0 / 327270.0], c),
            polynomial(&[125.04452, -1934.136261, 0.0020708, 1.0 / 450000.0], c),
        ];

        let (mut longitude, mut obliquity) = (0.0, 0.0);
        for (multipliers, psi, psi_rate, epsilon, epsilon_rate) in &NUTATION_TERMS {
            let angle: f64 = multipliers
                .iter()
                .zip(arguments)
                .map(|(&m, argument)| f64::from(m) * argument)
                .sum();
            longitude += psi_rate.mul_add(c, *psi) * sin_deg(angle);
            obliquity += epsilon_rate.mul_add(c, *epsilon) * cos_deg(angle);
        }

        Self {
            longitude: longitude * TERM_UNIT_DEGREES,
            obliquity: obliquity * TERM_UNIT_DEGREES,
        }
    }
}

/// Mean obliquity of the ecliptic in degrees (IAU, Meeus 22.2).
#[must_use]
pub fn mean_obliquity(centuries: f64) -> f64 {
    let c = centuries;
    23.0 + 26.0 / 60.0 + polynomial(&[21.448, -46.8150, -0.00059, 0.001813], c) / 3600.0
}
