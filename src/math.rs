//! Angle arithmetic shared by the position models and solvers.
//!
//! All series work in degrees; the helpers below convert at the trigonometric boundary so
//! the model code reads like the published tables.

#![allow(clippy::many_single_char_names)]

/// Normalizes an angle in degrees to the range [0, 360).
pub fn normalize_degrees_0_to_360(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// Normalizes an angle in degrees to the range (-180, 180].
pub fn normalize_degrees_signed(degrees: f64) -> f64 {
    let normalized = normalize_degrees_0_to_360(degrees);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Computes a polynomial using Horner's method for numerical stability.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}

/// Sine of an angle in degrees.
#[inline]
pub fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle in degrees.
#[inline]
pub fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Tangent of an angle in degrees.
#[inline]
pub fn tan_deg(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Arcsine in degrees.
#[inline]
pub fn asin_deg(x: f64) -> f64 {
    x.asin().to_degrees()
}

/// Arccosine in degrees.
#[inline]
pub fn acos_deg(x: f64) -> f64 {
    x.acos().to_degrees()
}

/// Two-argument arctangent in degrees.
#[inline]
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}
