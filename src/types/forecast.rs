//! Forecast outputs and orchestrator input snapshot

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AdjustmentFactors, DeclineParameters, Intervention, ProductionRecord};

/// One forecast output record for one monthly period
///
/// `cumulative_oil` / `cumulative_liquid` are the volumes produced within
/// this period (rate × K-factor × days), not running totals. Produced
/// only by the forecast engine; immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period_start_date: NaiveDate,
    pub days_in_period: u32,
    pub oil_rate: f64,
    pub liquid_rate: f64,
    pub cumulative_oil: f64,
    pub cumulative_liquid: f64,
    /// Water cut in percent, clamped to 0–100
    pub water_cut: f64,
}

/// What a stored version represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastKind {
    /// Historical production re-persisted alongside forecasts
    Actual,
    /// A user-triggered forecast run (FIFO slots 1..MAX)
    Forecast,
    /// The no-intervention counterfactual, always version 0
    BaseCase,
}

/// Version number reserved for the base-case forecast, exempt from FIFO
pub const BASE_CASE_VERSION: u32 = 0;

/// A named, ordered collection of forecast points with metadata
///
/// Created by a forecast run, superseded by eviction or explicit
/// deletion, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastVersion {
    pub well_id: String,
    pub version_number: u32,
    pub created_at: DateTime<Utc>,
    pub kind: ForecastKind,
    pub points: Vec<ForecastPoint>,
}

/// Per-well input snapshot for the orchestrator
///
/// Everything the orchestrator needs for one well, assembled by the
/// caller from well/intervention records and the production history
/// reader. History need not be pre-sorted; the orchestrator sorts
/// defensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellSnapshot {
    pub well_id: String,
    pub parameters: DeclineParameters,
    #[serde(default)]
    pub adjustments: AdjustmentFactors,
    pub history: Vec<ProductionRecord>,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
}
