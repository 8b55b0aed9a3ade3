//! Derived forecast quantities: effective decline rate and water cut

use tracing::debug;

use crate::types::AdjustmentFactors;

/// Effective decline rate from a base rate and adjustment factors
///
/// `effective = base * (1 + Dip) * (1 + Dir)`. Commutative in the two
/// adjustments; both default to 0. Always recomputed from the current
/// factor values on each forecast run — never cached.
#[must_use]
pub fn effective_decline_rate(base_rate: f64, factors: &AdjustmentFactors) -> f64 {
    base_rate * (1.0 + factors.platform_adjustment) * (1.0 + factors.reservoir_field_adjustment)
}

/// Water cut in percent from oil and liquid rates
///
/// `WC = (liq - oil) / liq * 100`, clamped to [0, 100]; 0 when the
/// liquid rate is zero. Oil exceeding liquid is inconsistent input data;
/// the design tolerates it by clamping to 0, but it is logged for
/// diagnostics.
#[must_use]
pub fn water_cut(oil_rate: f64, liquid_rate: f64) -> f64 {
    if liquid_rate <= 0.0 {
        return 0.0;
    }
    let raw = (liquid_rate - oil_rate) / liquid_rate * 100.0;
    if raw < 0.0 {
        debug!(
            oil_rate,
            liquid_rate, "oil rate exceeds liquid rate, clamping water cut to 0"
        );
    }
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_rate_with_no_adjustments_is_base() {
        let rate = effective_decline_rate(0.2, &AdjustmentFactors::default());
        assert!((rate - 0.2).abs() < 1e-12);
    }

    #[test]
    fn effective_rate_is_commutative_in_adjustments() {
        let a = AdjustmentFactors {
            platform_adjustment: 0.1,
            reservoir_field_adjustment: -0.05,
        };
        let b = AdjustmentFactors {
            platform_adjustment: -0.05,
            reservoir_field_adjustment: 0.1,
        };
        assert!((effective_decline_rate(0.3, &a) - effective_decline_rate(0.3, &b)).abs() < 1e-12);
        assert!((effective_decline_rate(0.3, &a) - 0.3 * 1.1 * 0.95).abs() < 1e-12);
    }

    #[test]
    fn water_cut_in_range_for_consistent_rates() {
        assert!((water_cut(40.0, 100.0) - 60.0).abs() < 1e-12);
        assert_eq!(water_cut(100.0, 100.0), 0.0);
        assert_eq!(water_cut(0.0, 100.0), 100.0);
    }

    #[test]
    fn water_cut_zero_liquid_is_zero() {
        assert_eq!(water_cut(10.0, 0.0), 0.0);
        assert_eq!(water_cut(0.0, 0.0), 0.0);
    }

    #[test]
    fn water_cut_clamps_inconsistent_input_to_zero() {
        // oil > liquid would be negative before clamping
        assert_eq!(water_cut(120.0, 100.0), 0.0);
    }
}
