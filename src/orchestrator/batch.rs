//! Batch forecasting across many wells
//!
//! Wells are independent, so the batch fans out over a rayon thread
//! pool. The only shared state is the read-only factor table and the
//! archiver, which already serializes slot assignment per well.
//!
//! Cancellation is cooperative and checked per well, never mid-well: a
//! cancelled batch keeps every version persisted for wells that already
//! completed — no rollback of finished work.

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::ForecastOrchestrator;
use crate::error::ForecastError;
use crate::types::{MonthlyFactorTable, WellSnapshot};

/// Per-well result of a batch run
#[derive(Debug)]
pub enum WellOutcome {
    Completed {
        well_id: String,
        version_number: u32,
        point_count: usize,
    },
    /// Batch was cancelled before this well started
    Skipped { well_id: String },
    Failed {
        well_id: String,
        error: ForecastError,
    },
}

/// Summary of a batch forecast run, in input well order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<WellOutcome>,
}

impl BatchReport {
    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, WellOutcome::Completed { .. }))
            .count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, WellOutcome::Skipped { .. }))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, WellOutcome::Failed { .. }))
            .count()
    }
}

/// Forecast a set of wells to `end_date`, persisting each result
///
/// Each well's forecast is independent and runs in parallel; outcomes
/// come back in input order regardless of completion order.
pub fn run_batch(
    orchestrator: &ForecastOrchestrator,
    wells: &[WellSnapshot],
    end_date: NaiveDate,
    factor_table: &MonthlyFactorTable,
    created_at: DateTime<Utc>,
    cancel_token: &CancellationToken,
) -> BatchReport {
    info!(wells = wells.len(), %end_date, "starting batch forecast");

    let outcomes: Vec<WellOutcome> = wells
        .par_iter()
        .map(|snapshot| {
            if cancel_token.is_cancelled() {
                return WellOutcome::Skipped {
                    well_id: snapshot.well_id.clone(),
                };
            }
            match orchestrator.run_well(snapshot, end_date, factor_table, created_at) {
                Ok(forecast) => WellOutcome::Completed {
                    well_id: forecast.well_id,
                    version_number: forecast.version_number,
                    point_count: forecast.points.len(),
                },
                Err(error) => {
                    warn!(well_id = %snapshot.well_id, %error, "well forecast failed");
                    WellOutcome::Failed {
                        well_id: snapshot.well_id.clone(),
                        error,
                    }
                }
            }
        })
        .collect();

    let report = BatchReport { outcomes };
    info!(
        completed = report.completed(),
        failed = report.failed(),
        skipped = report.skipped(),
        "batch forecast finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryVersionStore, VersionArchiver};
    use crate::types::{DeclineParameters, ProductionRecord};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn snapshot(well_id: &str, oil_rate: f64) -> WellSnapshot {
        WellSnapshot {
            well_id: well_id.to_string(),
            parameters: DeclineParameters {
                initial_oil_rate: oil_rate,
                initial_liquid_rate: oil_rate * 2.0,
                decline_rate_oil: 0.2,
                decline_rate_liquid: 0.2,
                b_exponent_oil: 0.0,
                b_exponent_liquid: 0.0,
            },
            adjustments: Default::default(),
            history: vec![ProductionRecord {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                oil_rate,
                liquid_rate: oil_rate * 2.0,
            }],
            interventions: Vec::new(),
        }
    }

    #[test]
    fn batch_reports_outcomes_in_input_order() {
        let archiver = Arc::new(VersionArchiver::new(
            Arc::new(InMemoryVersionStore::new()),
            3,
        ));
        let orchestrator = ForecastOrchestrator::new(archiver);

        let wells = vec![
            snapshot("A", 100.0),
            // Empty history → NoProductionData
            WellSnapshot {
                history: Vec::new(),
                ..snapshot("B", 100.0)
            },
            snapshot("C", 80.0),
        ];

        let report = run_batch(
            &orchestrator,
            &wells,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            &MonthlyFactorTable::default(),
            Utc.timestamp_opt(1_000, 0).single().unwrap(),
            &CancellationToken::new(),
        );

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.completed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            &report.outcomes[1],
            WellOutcome::Failed { well_id, .. } if well_id == "B"
        ));
    }

    /// Store that cancels the batch token on its first write, so
    /// cancellation lands while the batch is in flight
    struct CancelOnWriteStore {
        inner: InMemoryVersionStore,
        token: CancellationToken,
    }

    impl crate::storage::VersionStore for CancelOnWriteStore {
        fn write_version(
            &self,
            version: &crate::types::ForecastVersion,
        ) -> Result<(), crate::storage::StorageError> {
            self.token.cancel();
            self.inner.write_version(version)
        }

        fn read_version(
            &self,
            well_id: &str,
            version_number: u32,
        ) -> Result<Option<crate::types::ForecastVersion>, crate::storage::StorageError> {
            self.inner.read_version(well_id, version_number)
        }

        fn delete_version(
            &self,
            well_id: &str,
            version_number: u32,
        ) -> Result<(), crate::storage::StorageError> {
            self.inner.delete_version(well_id, version_number)
        }

        fn version_slots(
            &self,
            well_id: &str,
        ) -> Result<Vec<(u32, DateTime<Utc>)>, crate::storage::StorageError> {
            self.inner.version_slots(well_id)
        }

        fn backend_name(&self) -> &'static str {
            "CancelOnWrite"
        }
    }

    #[test]
    fn mid_batch_cancellation_preserves_completed_versions() {
        use crate::storage::VersionStore;

        let token = CancellationToken::new();
        let store = Arc::new(CancelOnWriteStore {
            inner: InMemoryVersionStore::new(),
            token: token.clone(),
        });
        let archiver = Arc::new(VersionArchiver::new(store.clone(), 3));
        let orchestrator = ForecastOrchestrator::new(archiver);

        let wells: Vec<WellSnapshot> = (0..24)
            .map(|i| snapshot(&format!("W-{i:02}"), 100.0))
            .collect();

        let report = run_batch(
            &orchestrator,
            &wells,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            &MonthlyFactorTable::default(),
            Utc.timestamp_opt(1_000, 0).single().unwrap(),
            &token,
        );

        // The first write cancelled the token mid-batch
        assert!(token.is_cancelled());
        assert_eq!(report.failed(), 0);
        assert!(report.completed() >= 1);
        assert_eq!(report.completed() + report.skipped(), wells.len());

        // Every completed well's version survived the cancellation...
        for outcome in &report.outcomes {
            match outcome {
                WellOutcome::Completed {
                    well_id,
                    version_number,
                    ..
                } => {
                    assert!(store
                        .read_version(well_id, *version_number)
                        .unwrap()
                        .is_some());
                }
                // ...and skipped wells never got one
                WellOutcome::Skipped { well_id } => {
                    assert!(store.read_version(well_id, 1).unwrap().is_none());
                }
                WellOutcome::Failed { well_id, .. } => {
                    panic!("unexpected failure for {well_id}");
                }
            }
        }
    }

    #[test]
    fn cancelled_batch_skips_all_wells() {
        let archiver = Arc::new(VersionArchiver::new(
            Arc::new(InMemoryVersionStore::new()),
            3,
        ));
        let orchestrator = ForecastOrchestrator::new(archiver);
        let token = CancellationToken::new();
        token.cancel();

        let report = run_batch(
            &orchestrator,
            &[snapshot("A", 100.0), snapshot("B", 90.0)],
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            &MonthlyFactorTable::default(),
            Utc.timestamp_opt(1_000, 0).single().unwrap(),
            &token,
        );

        assert_eq!(report.skipped(), 2);
        assert_eq!(report.completed(), 0);
    }
}
