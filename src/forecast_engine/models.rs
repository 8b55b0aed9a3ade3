//! Arps decline-curve family
//!
//! Pure vectorized rate functions: given initial rate qi, decline rate di
//! and elapsed days, return the instantaneous rate at each offset. No
//! I/O, no state. Non-positive decline inputs fall back to a constant-qi
//! curve rather than erroring — shut-in and freshly-started wells produce
//! such parameters routinely.

/// Elapsed-day to decline-time conversion (12 months / 365 days)
pub const MONTHS_PER_DAY: f64 = 12.0 / 365.0;

/// Tolerance for classifying the b-exponent
///
/// b values arrive as floating point from user records, so the harmonic
/// (b = 1) and exponential (b = 0) special cases are matched within a
/// tolerance, never by exact comparison.
pub const B_EPSILON: f64 = 1e-3;

/// Exponential decline: q(t) = qi * exp(-di * (12/365) * t)
///
/// di ≤ 0 yields a constant-qi curve (documented policy for
/// non-declining or invalid input, not an error).
#[must_use]
pub fn arps_exponential(qi: f64, di: f64, elapsed_days: &[f64]) -> Vec<f64> {
    if di <= 0.0 {
        return vec![qi; elapsed_days.len()];
    }
    elapsed_days
        .iter()
        .map(|&t| qi * (-di * MONTHS_PER_DAY * t).exp())
        .collect()
}

/// Hyperbolic decline: q(t) = qi / (1 + b*di*(12/365)*t)^(1/b)
///
/// Valid for b > 0 and di > 0; otherwise falls back to constant qi.
#[must_use]
pub fn arps_hyperbolic(qi: f64, di: f64, b: f64, elapsed_days: &[f64]) -> Vec<f64> {
    if b <= 0.0 || di <= 0.0 {
        return vec![qi; elapsed_days.len()];
    }
    elapsed_days
        .iter()
        .map(|&t| qi / (1.0 + b * di * MONTHS_PER_DAY * t).powf(1.0 / b))
        .collect()
}

/// Harmonic decline (b = 1): q(t) = qi / (1 + di*(12/365)*t)
#[must_use]
pub fn arps_harmonic(qi: f64, di: f64, elapsed_days: &[f64]) -> Vec<f64> {
    if di <= 0.0 {
        return vec![qi; elapsed_days.len()];
    }
    elapsed_days
        .iter()
        .map(|&t| qi / (1.0 + di * MONTHS_PER_DAY * t))
        .collect()
}

/// Dispatch on the b-exponent: harmonic near b=1, exponential near b=0,
/// hyperbolic otherwise
#[must_use]
pub fn arps_rate(qi: f64, di: f64, b: f64, elapsed_days: &[f64]) -> Vec<f64> {
    if (b - 1.0).abs() < B_EPSILON {
        arps_harmonic(qi, di, elapsed_days)
    } else if b < B_EPSILON {
        arps_exponential(qi, di, elapsed_days)
    } else {
        arps_hyperbolic(qi, di, b, elapsed_days)
    }
}
