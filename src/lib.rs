//! Decline Curve Analysis forecasting engine
//!
//! Turns well/intervention parameters and historical production into
//! month-by-month rate and cumulative-production forecasts, with
//! version-controlled persistence and intervention-aware blending.
//!
//! ## Architecture
//!
//! - **Forecast Engine**: pure Arps decline math over monthly periods
//! - **Orchestrator**: per-well strategy selection from the intervention
//!   snapshot (plain / intervention / time-sliced blend)
//! - **Storage**: FIFO-versioned persistence behind a pluggable trait
//!
//! The crate is a library with no network or CLI surface. Callers feed
//! it history, interventions and monthly correction factors from their
//! own readers, and consume `ForecastPoint` sequences back.

pub mod config;
pub mod error;
pub mod forecast_engine;
pub mod orchestrator;
pub mod storage;
pub mod types;

// Re-export configuration
pub use config::EngineConfig;

// Re-export commonly used types
pub use types::{
    AdjustmentFactors, DeclineParameters, ForecastKind, ForecastPoint, ForecastVersion,
    Intervention, InterventionStatus, MonthlyFactorTable, MonthlyFactors, ProductionRecord,
    WellSnapshot, BASE_CASE_VERSION,
};

// Re-export the engine surface
pub use forecast_engine::{run_forecast, CurveMode, FactorColumn, RateAnchor};

// Re-export orchestration
pub use orchestrator::{
    classify_interventions, run_batch, BatchReport, ForecastOrchestrator, InterventionSituation,
    WellForecast, WellOutcome,
};

// Re-export storage
pub use storage::{
    InMemoryVersionStore, SledVersionStore, StorageError, VersionArchiver, VersionStore,
};

// Re-export errors
pub use error::ForecastError;
