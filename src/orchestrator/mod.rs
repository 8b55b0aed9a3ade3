//! Intervention-Aware Forecast Orchestrator
//!
//! Decides, per well, whether to run a plain forecast, an
//! intervention-parameterized forecast, or a time-sliced blend of both,
//! based on a snapshot of the well's interventions. The decision is an
//! explicit match over `InterventionSituation`, recomputed fresh on
//! every invocation — no state machine is persisted.
//!
//! Every invocation is deterministic and idempotent for a fixed snapshot
//! of history, interventions and factors.

pub mod batch;

pub use batch::{run_batch, BatchReport, WellOutcome};

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::ForecastError;
use crate::forecast_engine::{
    effective_decline_rate, run_forecast, CurveMode, FactorColumn, RateAnchor,
};
use crate::storage::VersionArchiver;
use crate::types::{
    ForecastPoint, Intervention, InterventionStatus, MonthlyFactorTable, ProductionRecord,
    WellSnapshot,
};

/// The intervention picture for one well and one forecast run
///
/// Computed once per invocation from the non-cancelled interventions, so
/// strategy selection stays an exhaustive match instead of chained
/// conditionals.
#[derive(Debug, Clone, PartialEq)]
pub enum InterventionSituation {
    NoInterventions,
    /// At least one Done and no Plan: the Done with the LATEST planning
    /// date drives the forecast
    DoneOnly { done: Intervention },
    /// At least one Plan and no Done: the Plan with the EARLIEST
    /// planning date takes effect first and supersedes later plans
    PlanOnly { plan: Intervention },
    /// Both present: blend around the earliest Plan
    PlanAndDone { plan: Intervention },
}

/// Classify a well's intervention snapshot
///
/// Cancelled interventions are dropped first; a mixed set whose Plans
/// all turn out Cancelled therefore degrades to `DoneOnly` — the
/// contradiction guard for the blended strategy.
#[must_use]
pub fn classify_interventions(interventions: &[Intervention]) -> InterventionSituation {
    let latest_done = interventions
        .iter()
        .filter(|i| i.status == InterventionStatus::Done)
        .max_by_key(|i| i.planning_date)
        .cloned();
    let earliest_plan = interventions
        .iter()
        .filter(|i| i.status == InterventionStatus::Plan)
        .min_by_key(|i| i.planning_date)
        .cloned();

    match (latest_done, earliest_plan) {
        (None, None) => InterventionSituation::NoInterventions,
        (Some(done), None) => InterventionSituation::DoneOnly { done },
        (None, Some(plan)) => InterventionSituation::PlanOnly { plan },
        (Some(_), Some(plan)) => InterventionSituation::PlanAndDone { plan },
    }
}

/// Result of one orchestrated forecast run for one well
#[derive(Debug, Clone)]
pub struct WellForecast {
    pub well_id: String,
    /// FIFO slot the run was persisted to
    pub version_number: u32,
    pub points: Vec<ForecastPoint>,
    /// Whether a version-0 base case was persisted alongside
    pub base_case_persisted: bool,
}

/// Orchestrates forecast strategy selection, execution and persistence
pub struct ForecastOrchestrator {
    archiver: Arc<VersionArchiver>,
}

impl ForecastOrchestrator {
    #[must_use]
    pub fn new(archiver: Arc<VersionArchiver>) -> Self {
        Self { archiver }
    }

    /// Run one well's forecast to `end_date` and persist the result
    ///
    /// The forecast starts at the last actual production date. Invalid
    /// input (no production, non-positive base decline, inverted range)
    /// surfaces as a typed error; degenerate-but-valid states (shut-in
    /// rates, sub-month range) produce empty or zero forecasts instead.
    pub fn run_well(
        &self,
        snapshot: &WellSnapshot,
        end_date: NaiveDate,
        factor_table: &MonthlyFactorTable,
        created_at: DateTime<Utc>,
    ) -> Result<WellForecast, ForecastError> {
        let last_actual = last_actual_record(snapshot)?;
        let start_date = last_actual.date;
        if end_date <= start_date {
            return Err(ForecastError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        let situation = classify_interventions(&snapshot.interventions);
        debug!(well_id = %snapshot.well_id, ?situation, %start_date, %end_date, "classified intervention situation");

        let (points, base_case_persisted) = match situation {
            InterventionSituation::NoInterventions => {
                let points =
                    self.plain_forecast(snapshot, &last_actual, start_date, end_date, factor_table)?;
                (points, false)
            }
            InterventionSituation::DoneOnly { done } => {
                // The intervention curve's qi rarely matches current
                // production exactly; ratio-anchor it through the last
                // actual rates.
                let points = run_forecast(
                    start_date,
                    end_date,
                    &done.parameters,
                    factor_table,
                    CurveMode::ArpsDispatch,
                    FactorColumn::Intervention,
                    Some(RateAnchor {
                        oil_rate: last_actual.oil_rate,
                        liquid_rate: last_actual.liquid_rate,
                    }),
                );
                (points, false)
            }
            InterventionSituation::PlanOnly { plan }
            | InterventionSituation::PlanAndDone { plan } => {
                let points = self.blended_forecast(
                    snapshot,
                    &last_actual,
                    start_date,
                    end_date,
                    &plan,
                    factor_table,
                    created_at,
                )?;
                (points, true)
            }
        };

        let version_number =
            self.archiver
                .persist_run(&snapshot.well_id, points.clone(), created_at)?;
        info!(
            well_id = %snapshot.well_id,
            version = version_number,
            points = points.len(),
            "forecast persisted"
        );

        Ok(WellForecast {
            well_id: snapshot.well_id.clone(),
            version_number,
            points,
            base_case_persisted,
        })
    }

    /// Plain exponential forecast from the last actual rates, using the
    /// effective (adjusted) decline rates and the K_oil/K_liq columns
    fn plain_forecast(
        &self,
        snapshot: &WellSnapshot,
        last_actual: &ProductionRecord,
        start_date: NaiveDate,
        end_date: NaiveDate,
        factor_table: &MonthlyFactorTable,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        let effective_oil =
            effective_decline_rate(snapshot.parameters.decline_rate_oil, &snapshot.adjustments);
        let effective_liquid = effective_decline_rate(
            snapshot.parameters.decline_rate_liquid,
            &snapshot.adjustments,
        );

        // A producing phase with a non-positive decline rate is a
        // user-correctable input error, not a silent constant forecast
        if last_actual.oil_rate > 0.0 && effective_oil <= 0.0 {
            return Err(ForecastError::InvalidDeclineRate {
                well_id: snapshot.well_id.clone(),
                rate: effective_oil,
            });
        }
        if last_actual.liquid_rate > 0.0 && effective_liquid <= 0.0 {
            return Err(ForecastError::InvalidDeclineRate {
                well_id: snapshot.well_id.clone(),
                rate: effective_liquid,
            });
        }

        let parameters = snapshot
            .parameters
            .with_initial_rates(last_actual.oil_rate, last_actual.liquid_rate)
            .with_decline_rates(effective_oil, effective_liquid);

        Ok(run_forecast(
            start_date,
            end_date,
            &parameters,
            factor_table,
            CurveMode::ForceExponential,
            FactorColumn::Plain,
            None,
        ))
    }

    /// Two-stage blend for a planned intervention
    ///
    /// The full-range plain forecast is the do-nothing counterfactual,
    /// persisted as version 0. The intervention curve starts at the
    /// planning date with the plan's own parameters; the merged result
    /// keeps base-case points strictly before the planning date and
    /// intervention points from it onward. A Plan dated before the
    /// forecast start (stale planning data) takes effect immediately —
    /// the merged output never contains periods before the last actual
    /// date.
    #[allow(clippy::too_many_arguments)]
    fn blended_forecast(
        &self,
        snapshot: &WellSnapshot,
        last_actual: &ProductionRecord,
        start_date: NaiveDate,
        end_date: NaiveDate,
        plan: &Intervention,
        factor_table: &MonthlyFactorTable,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        let base_case =
            self.plain_forecast(snapshot, last_actual, start_date, end_date, factor_table)?;
        self.archiver
            .persist_base_case(&snapshot.well_id, base_case.clone(), created_at)?;

        let intervention_start = plan.planning_date.max(start_date);
        let intervention_points = run_forecast(
            intervention_start,
            end_date,
            &plan.parameters,
            factor_table,
            CurveMode::ArpsDispatch,
            FactorColumn::Intervention,
            None,
        );

        let mut merged: Vec<ForecastPoint> = base_case
            .into_iter()
            .filter(|p| p.period_start_date < intervention_start)
            .chain(intervention_points)
            .collect();
        merged.sort_by_key(|p| p.period_start_date);
        Ok(merged)
    }
}

/// Latest actual production record, sorted defensively
///
/// The history reader does not guarantee ordering, so the snapshot is
/// sorted by date here before the last record is taken.
fn last_actual_record(snapshot: &WellSnapshot) -> Result<ProductionRecord, ForecastError> {
    let mut history = snapshot.history.clone();
    history.sort_by_key(|record| record.date);

    let last = history
        .last()
        .copied()
        .ok_or_else(|| ForecastError::NoProductionData {
            well_id: snapshot.well_id.clone(),
        })?;

    if last.oil_rate <= 0.0 && last.liquid_rate <= 0.0 {
        return Err(ForecastError::NoProductionData {
            well_id: snapshot.well_id.clone(),
        });
    }
    Ok(last)
}
