//! Version store integration tests against the sled backend
//!
//! Exercises FIFO slot assignment, eviction and base-case preservation
//! through the same archiver path the orchestrator uses.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use dca_engine::{
    DeclineParameters, ForecastKind, ForecastOrchestrator, InterventionStatus, Intervention,
    MonthlyFactorTable, ProductionRecord, SledVersionStore, VersionArchiver, VersionStore,
    WellSnapshot,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

fn snapshot(oil_rate: f64) -> WellSnapshot {
    WellSnapshot {
        well_id: "F-7".to_string(),
        parameters: DeclineParameters {
            initial_oil_rate: oil_rate,
            initial_liquid_rate: oil_rate * 2.5,
            decline_rate_oil: 0.25,
            decline_rate_liquid: 0.2,
            b_exponent_oil: 0.0,
            b_exponent_liquid: 0.0,
        },
        adjustments: Default::default(),
        history: vec![ProductionRecord {
            date: date(2024, 6, 1),
            oil_rate,
            liquid_rate: oil_rate * 2.5,
        }],
        interventions: Vec::new(),
    }
}

#[test]
fn fifo_eviction_reuses_oldest_slot_and_clears_its_points() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SledVersionStore::open(dir.path()).unwrap());
    let archiver = Arc::new(VersionArchiver::new(store.clone(), 3));
    let orchestrator = ForecastOrchestrator::new(archiver);
    let factors = MonthlyFactorTable::default();

    // Three runs fill slots 1..3; creation times make slot 2 the oldest
    let creation_times = [ts(300), ts(100), ts(200)];
    let mut slots = Vec::new();
    for (run, created_at) in creation_times.iter().enumerate() {
        let forecast = orchestrator
            .run_well(
                &snapshot(100.0 - run as f64),
                date(2024, 9, 1),
                &factors,
                *created_at,
            )
            .unwrap();
        slots.push(forecast.version_number);
    }
    assert_eq!(slots, vec![1, 2, 3]);

    // Fourth run evicts slot 2 (oldest by creation), not slot 1
    let fourth = orchestrator
        .run_well(&snapshot(42.0), date(2024, 9, 1), &factors, ts(400))
        .unwrap();
    assert_eq!(fourth.version_number, 2);

    // The slot now holds only the new run's points
    let reloaded = store.read_version("F-7", 2).unwrap().unwrap();
    assert_eq!(reloaded.created_at, ts(400));
    assert_eq!(reloaded.points, fourth.points);
    assert!((reloaded.points[0].oil_rate - 42.0).abs() < 1e-9);

    // Other slots are untouched
    assert_eq!(store.read_version("F-7", 1).unwrap().unwrap().created_at, ts(300));
    assert_eq!(store.read_version("F-7", 3).unwrap().unwrap().created_at, ts(200));
}

#[test]
fn base_case_version_zero_survives_eviction_churn() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SledVersionStore::open(dir.path()).unwrap());
    let archiver = Arc::new(VersionArchiver::new(store.clone(), 3));
    let orchestrator = ForecastOrchestrator::new(archiver);
    let factors = MonthlyFactorTable::default();

    let mut planned = snapshot(100.0);
    planned.interventions = vec![Intervention::new(
        "F-7",
        "2024-08-01",
        InterventionStatus::Plan,
        DeclineParameters {
            initial_oil_rate: 180.0,
            initial_liquid_rate: 400.0,
            decline_rate_oil: 0.5,
            decline_rate_liquid: 0.45,
            b_exponent_oil: 0.8,
            b_exponent_liquid: 0.8,
        },
        "GTM",
    )
    .unwrap()];

    // Blended run writes version 0 once...
    orchestrator
        .run_well(&planned, date(2024, 11, 1), &factors, ts(10))
        .unwrap();
    let base = store.read_version("F-7", 0).unwrap().unwrap();
    assert_eq!(base.kind, ForecastKind::BaseCase);

    // ...and plain runs churning through the FIFO never touch it
    for run in 0..6 {
        orchestrator
            .run_well(&snapshot(90.0), date(2024, 9, 1), &factors, ts(100 + run))
            .unwrap();
    }
    let base_after = store.read_version("F-7", 0).unwrap().unwrap();
    assert_eq!(base_after.created_at, ts(10));
    assert_eq!(base_after.points, base.points);
}

#[test]
fn versions_survive_store_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let points;
    {
        let store = Arc::new(SledVersionStore::open(dir.path()).unwrap());
        let archiver = Arc::new(VersionArchiver::new(store, 3));
        let orchestrator = ForecastOrchestrator::new(archiver);
        points = orchestrator
            .run_well(
                &snapshot(75.0),
                date(2024, 9, 1),
                &MonthlyFactorTable::default(),
                ts(50),
            )
            .unwrap()
            .points;
    }

    let reopened = SledVersionStore::open(dir.path()).unwrap();
    let version = reopened.read_version("F-7", 1).unwrap().unwrap();
    assert_eq!(version.points, points);
    assert_eq!(version.kind, ForecastKind::Forecast);
}
