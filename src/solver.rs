//! Root finding for event times.
//!
//! Every event query goes through one of three bounded procedures:
//! * [`refine`]: fixed-point refinement of an estimate (sunrise/sunset),
//! * [`bisect`] / [`bisect_longitude`]: interval halving inside a known bracket (seasons,
//!   apsides, zodiac crossings),
//! * [`Parabola`]: three-point interpolation for scanning a day in two-hour windows
//!   (moonrise/moonset).
//!
//! All loops have a fixed step cap, so degenerate input ends the search instead of spinning.

use crate::math::normalize_degrees_0_to_360;
use crate::time::SECONDS_PER_DAY;
use log::{trace, warn};

/// Width in seconds below which a bracket counts as converged.
pub const TOLERANCE_SECONDS: f64 = 1.0;

/// Upper bound on interval halvings; 64 halvings shrink any supported bracket below 1 ns.
pub const MAX_BISECTIONS: u32 = 64;

/// Terminal state of a fixed-point refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refinement {
    /// The refinement settled on this value.
    Converged(f64),
    /// A step reported that the event does not occur.
    NeverOccurs,
}

impl Refinement {
    /// The converged value, if any.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Converged(value) => Some(value),
            Self::NeverOccurs => None,
        }
    }
}

/// Refines an estimate by repeatedly applying a correction.
///
/// `correction` returns the amount to add to the current value, or `None` if the event
/// turns out not to exist. The refinement stops as soon as a correction is smaller than
/// `tolerance`, when a correction is no smaller than the previous one (no improvement), or
/// after `max_steps` corrections.
pub fn refine<F>(estimate: f64, tolerance: f64, max_steps: usize, mut correction: F) -> Refinement
where
    F: FnMut(f64) -> Option<f64>,
{
    let mut value = estimate;
    let mut previous = f64::INFINITY;
    for step in 0..max_steps {
        let Some(delta) = correction(value) else {
            trace!("refinement step {step}: event does not occur");
            return Refinement::NeverOccurs;
        };
        if !delta.is_finite() {
            return Refinement::NeverOccurs;
        }
        if delta.abs() >= previous {
            trace!("refinement step {step}: correction {delta} does not improve, stopping");
            return Refinement::Converged(value);
        }
        value += delta;
        trace!("refinement step {step}: value {value}, correction {delta}");
        if delta.abs() < tolerance {
            return Refinement::Converged(value);
        }
        previous = delta.abs();
    }
    warn!("refinement stopped after {max_steps} steps without reaching tolerance {tolerance}");
    Refinement::Converged(value)
}

/// Halves `[lo, hi]` (julian days) until it is narrower than [`TOLERANCE_SECONDS`].
///
/// `is_after` must be `false` before the sought instant and `true` after it. Returns the
/// midpoint of the final bracket.
pub fn bisect<F>(mut lo: f64, mut hi: f64, mut is_after: F) -> f64
where
    F: FnMut(f64) -> bool,
{
    let tolerance = TOLERANCE_SECONDS / SECONDS_PER_DAY;
    for _ in 0..MAX_BISECTIONS {
        if hi - lo < tolerance {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if is_after(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Finds when the angle `f` (degrees, increasing) passes `target` inside `[lo, hi]`.
///
/// The difference `f(mid) - target` is reduced into [0, 360); a value below 180 means the
/// target has already been passed. This keeps the search correct across the 360°/0° wrap.
pub fn bisect_longitude<F>(mut f: F, target: f64, lo: f64, hi: f64) -> f64
where
    F: FnMut(f64) -> f64,
{
    bisect(lo, hi, |t| normalize_degrees_0_to_360(f(t) - target) < 180.0)
}

/// The parabola through three equidistant samples at x = -1, 0, +1.
///
/// Follows the QUAD routine of Montenbruck & Pfleger, Astronomy on the Personal Computer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parabola {
    a: f64,
    b: f64,
    c: f64,
}

impl Parabola {
    /// Fits the parabola through `(-1, y_minus)`, `(0, y_zero)` and `(1, y_plus)`.
    #[must_use]
    pub fn through(y_minus: f64, y_zero: f64, y_plus: f64) -> Self {
        Self {
            a: 0.5 * (y_plus + y_minus) - y_zero,
            b: 0.5 * (y_plus - y_minus),
            c: y_zero,
        }
    }

    /// Evaluates the parabola at `x`.
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    /// Position and value of the extremum; a straight line reports its value at x = 0.
    #[must_use]
    pub fn vertex(&self) -> (f64, f64) {
        if self.a == 0.0 {
            return (0.0, self.c);
        }
        let x = -self.b / (2.0 * self.a);
        (x, self.at(x))
    }

    /// Zero crossings inside [-1, 1], in ascending order.
    #[must_use]
    pub fn roots(&self) -> (Option<f64>, Option<f64>) {
        let inside = |x: f64| (-1.0..=1.0).contains(&x).then_some(x);

        if self.a.abs() < f64::EPSILON {
            if self.b == 0.0 {
                return (None, None);
            }
            return (inside(-self.c / self.b), None);
        }

        let discriminant = self.b * self.b - 4.0 * self.a * self.c;
        if discriminant < 0.0 {
            return (None, None);
        }
        let (vertex, _) = self.vertex();
        let half_width = 0.5 * discriminant.sqrt() / self.a.abs();
        match (inside(vertex - half_width), inside(vertex + half_width)) {
            (None, second) => (second, None),
            pair => pair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bisect_finds_threshold() {
        let root = bisect(0.0, 10.0, |t| t > std::f64::consts::PI);
        assert!((root - std::f64::consts::PI).abs() < 1.0 / SECONDS_PER_DAY);
    }

    #[test]
    fn test_bisect_longitude_across_wrap() {
        // 1° per day starting at 350°; crosses 0° at day 10
        let angle = |t: f64| normalize_degrees_0_to_360(350.0 + t);
        let root = bisect_longitude(angle, 0.0, 0.0, 20.0);
        assert!((root - 10.0).abs() < 1.0 / SECONDS_PER_DAY);

        let root = bisect_longitude(angle, 355.0, 0.0, 20.0);
        assert!((root - 5.0).abs() < 1.0 / SECONDS_PER_DAY);
    }

    #[test]
    fn test_bisect_terminates_on_degenerate_bracket() {
        let mut calls = 0;
        let root = bisect(0.0, 1.0e6, |_| {
            calls += 1;
            false
        });
        assert!(calls <= MAX_BISECTIONS);
        assert!(root > 0.0);
    }

    #[test]
    fn test_refine_converges() {
        // Newton steps for sqrt(2)
        let result = refine(1.0, 1e-12, 10, |x| Some((2.0 - x * x) / (2.0 * x)));
        let value = result.value().unwrap();
        assert!((value - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_refine_never_occurs() {
        assert_eq!(refine(0.0, 1e-6, 5, |_| None), Refinement::NeverOccurs);
        assert_eq!(refine(0.0, 1e-6, 5, |_| Some(f64::NAN)), Refinement::NeverOccurs);
    }

    #[test]
    fn test_refine_stops_without_improvement() {
        // corrections alternate in sign and never shrink
        let mut steps = 0;
        let result = refine(0.0, 1e-6, 100, |x| {
            steps += 1;
            Some(if x > 0.0 { -2.0 } else { 1.0 })
        });
        assert_eq!(result, Refinement::Converged(1.0));
        assert_eq!(steps, 2);
    }

    #[test]
    fn test_refine_step_cap() {
        let mut steps = 0;
        let result = refine(0.0, 1e-9, 4, |_| {
            steps += 1;
            Some(0.5_f64.powi(steps))
        });
        assert_eq!(steps, 4);
        assert!((result.value().unwrap() - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_parabola_two_roots() {
        // y = x^2 - 0.25
        let parabola = Parabola::through(0.75, -0.25, 0.75);
        assert_eq!(parabola.vertex(), (0.0, -0.25));
        let (first, second) = parabola.roots();
        assert!((first.unwrap() + 0.5).abs() < 1e-12);
        assert!((second.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_parabola_single_root_in_window() {
        // y = (x - 0.5)(x + 3), only x = 0.5 lies inside [-1, 1]
        let f = |x: f64| (x - 0.5) * (x + 3.0);
        let parabola = Parabola::through(f(-1.0), f(0.0), f(1.0));
        let (first, second) = parabola.roots();
        assert!((first.unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(second, None);
    }

    #[test]
    fn test_parabola_linear_and_empty() {
        let line = Parabola::through(-1.0, 0.0, 1.0);
        assert_eq!(line.roots(), (Some(0.0), None));

        let above = Parabola::through(1.0, 0.5, 1.0);
        assert_eq!(above.roots(), (None, None));

        let flat = Parabola::through(1.0, 1.0, 1.0);
        assert_eq!(flat.roots(), (None, None));
    }
}
