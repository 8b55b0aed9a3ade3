//! Decline-curve input parameters

use serde::{Deserialize, Serialize};

/// Arps decline parameters for one well or one intervention
///
/// Immutable input to a forecast run. Rates are in t/day, decline rates
/// in 1/year, b-exponents dimensionless. Loaded from a well record or an
/// intervention record by the caller and never mutated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeclineParameters {
    pub initial_oil_rate: f64,
    pub initial_liquid_rate: f64,
    pub decline_rate_oil: f64,
    pub decline_rate_liquid: f64,
    pub b_exponent_oil: f64,
    pub b_exponent_liquid: f64,
}

impl DeclineParameters {
    /// Same parameters with both initial rates replaced
    ///
    /// Used by the orchestrator to start a plain forecast from the last
    /// actual rates instead of the stored initial rates.
    #[must_use]
    pub fn with_initial_rates(&self, oil_rate: f64, liquid_rate: f64) -> Self {
        Self {
            initial_oil_rate: oil_rate,
            initial_liquid_rate: liquid_rate,
            ..*self
        }
    }

    /// Same parameters with both decline rates replaced
    #[must_use]
    pub fn with_decline_rates(&self, oil: f64, liquid: f64) -> Self {
        Self {
            decline_rate_oil: oil,
            decline_rate_liquid: liquid,
            ..*self
        }
    }
}

/// Multiplicative decline-rate adjustment factors
///
/// `platform_adjustment` (Dip) applies at platform level,
/// `reservoir_field_adjustment` (Dir) at reservoir+field level. Both
/// default to 0 (no adjustment). The effective decline rate
/// `base * (1 + dip) * (1 + dir)` is recomputed on every forecast run
/// from the current stored values — it is never cached as a source of
/// truth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdjustmentFactors {
    #[serde(default)]
    pub platform_adjustment: f64,
    #[serde(default)]
    pub reservoir_field_adjustment: f64,
}
