//! Error taxonomy for the forecasting core
//!
//! Numeric edge cases (rate → 0, division by zero in water cut, negative
//! decline artifacts) are guarded inline in the engine and never surface
//! here. Only user-correctable input errors and persistence failures are
//! typed; callers map them to user-visible messages.

use chrono::NaiveDate;
use thiserror::Error;

use crate::storage::StorageError;

/// Failures surfaced by the forecast orchestrator
#[derive(Debug, Error)]
pub enum ForecastError {
    /// History is empty or the last actual oil and liquid rates are both zero
    #[error("no production data for well {well_id}")]
    NoProductionData { well_id: String },

    /// Base decline rate is zero or negative on the plain-forecast path
    #[error("invalid decline rate {rate} for well {well_id}")]
    InvalidDeclineRate { well_id: String, rate: f64 },

    /// Forecast end date is not after the forecast start date
    #[error("invalid date range: {start} to {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Version persistence failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}
