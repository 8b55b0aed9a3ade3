//! Shared data structures for decline-curve production forecasting
//!
//! This module defines the core types for the forecast pipeline:
//! - Decline inputs: DeclineParameters, AdjustmentFactors
//! - Correction factors: MonthlyFactors, MonthlyFactorTable
//! - History: ProductionRecord
//! - Interventions: Intervention, InterventionStatus
//! - Outputs: ForecastPoint, ForecastVersion, ForecastKind
//! - Orchestrator input: WellSnapshot

mod decline;
mod forecast;
mod intervention;
mod production;

pub use decline::*;
pub use forecast::*;
pub use intervention::*;
pub use production::*;
