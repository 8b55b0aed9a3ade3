//! Forecast Engine
//!
//! Deterministic decline-curve math for production forecasting. All
//! calculations here are pure — no I/O, no shared state — so the same
//! inputs always yield bit-identical forecast point sequences.
//!
//! - `models` — Arps exponential/hyperbolic/harmonic rate functions
//! - `calendar` — monthly billing-period construction
//! - `metrics` — effective decline rate and water cut
//! - `run_forecast()` — one well, one date range, one parameter set

pub mod calendar;
pub mod metrics;
pub mod models;

pub use calendar::{build_periods, MonthlyPeriod};
pub use metrics::{effective_decline_rate, water_cut};
pub use models::{
    arps_exponential, arps_harmonic, arps_hyperbolic, arps_rate, B_EPSILON, MONTHS_PER_DAY,
};

use chrono::NaiveDate;

use crate::types::{DeclineParameters, ForecastPoint, MonthlyFactorTable};

/// Which decline curve to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveMode {
    /// Ignore b-exponents and always decline exponentially. Used for
    /// baseline / no-intervention forecasts.
    ForceExponential,
    /// Full Arps dispatch on the b-exponent. Used for intervention
    /// forecasts, which are typically hyperbolic.
    ArpsDispatch,
}

/// Which K-factor column corrects period volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorColumn {
    /// K_oil for oil, K_liq for liquid
    Plain,
    /// K_intervention for both phases
    Intervention,
}

/// Known last-actual rates for ratio anchoring
///
/// When supplied, each phase's curve is scaled by `anchor / q(t0)` so
/// the first forecast point passes through the last actual rate. This is
/// the continuity correction for intervention curves whose qi does not
/// match current production; one rule, applied identically on every
/// path that anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateAnchor {
    pub oil_rate: f64,
    pub liquid_rate: f64,
}

/// Scale a rate vector so its first element equals `target`
///
/// No-op when the curve starts at zero (nothing to anchor against).
fn anchor_rates(rates: &mut [f64], target: f64) {
    let Some(&first) = rates.first() else { return };
    if first <= 0.0 {
        return;
    }
    let scale = target / first;
    for rate in rates.iter_mut() {
        *rate *= scale;
    }
}

/// Produce a forecast point sequence for one well over one date range
///
/// Builds monthly periods, evaluates oil and liquid rates at each
/// period start, optionally ratio-anchors the curves, floors rates at
/// zero, and converts rate × K-factor × days into per-period volumes.
///
/// Degenerate ranges return an empty sequence; zero-production inputs
/// return zero-rate points. Neither is an error — input validation
/// belongs to the orchestrator.
#[must_use]
pub fn run_forecast(
    start_date: NaiveDate,
    end_date: NaiveDate,
    parameters: &DeclineParameters,
    factor_table: &MonthlyFactorTable,
    mode: CurveMode,
    column: FactorColumn,
    anchor: Option<RateAnchor>,
) -> Vec<ForecastPoint> {
    let periods = build_periods(start_date, end_date);
    if periods.is_empty() {
        return Vec::new();
    }

    let elapsed: Vec<f64> = periods.iter().map(|p| p.elapsed_days).collect();

    let (mut oil_rates, mut liquid_rates) = match mode {
        CurveMode::ForceExponential => (
            arps_exponential(
                parameters.initial_oil_rate,
                parameters.decline_rate_oil,
                &elapsed,
            ),
            arps_exponential(
                parameters.initial_liquid_rate,
                parameters.decline_rate_liquid,
                &elapsed,
            ),
        ),
        CurveMode::ArpsDispatch => (
            arps_rate(
                parameters.initial_oil_rate,
                parameters.decline_rate_oil,
                parameters.b_exponent_oil,
                &elapsed,
            ),
            arps_rate(
                parameters.initial_liquid_rate,
                parameters.decline_rate_liquid,
                parameters.b_exponent_liquid,
                &elapsed,
            ),
        ),
    };

    if let Some(anchor) = anchor {
        anchor_rates(&mut oil_rates, anchor.oil_rate);
        anchor_rates(&mut liquid_rates, anchor.liquid_rate);
    }

    periods
        .iter()
        .zip(oil_rates.iter().zip(&liquid_rates))
        .map(|(period, (&oil, &liquid))| {
            // Decline artifacts below zero are floored, not errors
            let oil_rate = oil.max(0.0);
            let liquid_rate = liquid.max(0.0);

            let factors = factor_table.get(period.month_index);
            let (k_oil, k_liquid) = match column {
                FactorColumn::Plain => (factors.k_oil, factors.k_liquid),
                FactorColumn::Intervention => (factors.k_intervention, factors.k_intervention),
            };
            let days = f64::from(period.days_in_period);

            ForecastPoint {
                period_start_date: period.start,
                days_in_period: period.days_in_period,
                oil_rate,
                liquid_rate,
                cumulative_oil: oil_rate * k_oil * days,
                cumulative_liquid: liquid_rate * k_liquid * days,
                water_cut: water_cut(oil_rate, liquid_rate),
            }
        })
        .collect()
}
