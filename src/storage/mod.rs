//! Version persistence for forecast runs
//!
//! A `VersionStore` trait abstracts the persistence backend so the
//! orchestrator never touches a database directly:
//! - `InMemoryVersionStore` — RwLock-backed store for tests and minimal
//!   deployments
//! - `SledVersionStore` — durable sled backend
//!
//! `VersionArchiver` layers the FIFO slot policy on top of a store and
//! serializes the choose-evict-write sequence per well, so two
//! concurrent runs for the same well cannot pick the same evicted slot.

mod memory;
mod sled_store;
pub mod slots;

pub use memory::InMemoryVersionStore;
pub use sled_store::SledVersionStore;
pub use slots::{select_slot, SlotDecision};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::types::{ForecastKind, ForecastPoint, ForecastVersion, BASE_CASE_VERSION};

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Trait for pluggable version persistence backends
///
/// Implementations must be thread-safe (Send + Sync) for shared access
/// across batch worker threads.
pub trait VersionStore: Send + Sync {
    /// Write a complete forecast version (all points at once)
    fn write_version(&self, version: &ForecastVersion) -> Result<(), StorageError>;

    /// Read one version, if present
    fn read_version(
        &self,
        well_id: &str,
        version_number: u32,
    ) -> Result<Option<ForecastVersion>, StorageError>;

    /// Delete all points of one version
    fn delete_version(&self, well_id: &str, version_number: u32) -> Result<(), StorageError>;

    /// (version, min created_at) pairs for a well, versions ≥ 1 only
    fn version_slots(&self, well_id: &str) -> Result<Vec<(u32, DateTime<Utc>)>, StorageError>;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// FIFO slot policy over a `VersionStore`
///
/// Eviction ordering guarantee: the old version is deleted fully before
/// the new one is inserted. If the insert then fails the slot is left
/// empty, which readers must treat as "forecast absent", never as
/// corrupted data.
pub struct VersionArchiver {
    store: Arc<dyn VersionStore>,
    max_slots: u32,
    // Per-well serialization of the choose-evict-write sequence
    well_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl VersionArchiver {
    pub fn new(store: Arc<dyn VersionStore>, max_slots: u32) -> Self {
        info!(
            backend = store.backend_name(),
            max_slots, "version archiver ready"
        );
        Self {
            store,
            max_slots,
            well_locks: Mutex::new(HashMap::new()),
        }
    }

    fn well_lock(&self, well_id: &str) -> Result<Arc<Mutex<()>>, StorageError> {
        let mut locks = self
            .well_locks
            .lock()
            .map_err(|e| StorageError::Storage(e.to_string()))?;
        Ok(locks
            .entry(well_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    /// Persist a user-triggered forecast run into a FIFO slot
    ///
    /// Returns the slot number the run was written to.
    pub fn persist_run(
        &self,
        well_id: &str,
        points: Vec<ForecastPoint>,
        created_at: DateTime<Utc>,
    ) -> Result<u32, StorageError> {
        let lock = self.well_lock(well_id)?;
        let _guard = lock
            .lock()
            .map_err(|e| StorageError::Storage(e.to_string()))?;

        let occupied = self.store.version_slots(well_id)?;
        let decision = select_slot(&occupied, self.max_slots);
        if decision.evicts {
            info!(
                well_id,
                version = decision.version,
                "evicting oldest forecast version"
            );
            self.store.delete_version(well_id, decision.version)?;
        }
        debug!(well_id, version = decision.version, points = points.len(), "persisting forecast run");

        self.store.write_version(&ForecastVersion {
            well_id: well_id.to_string(),
            version_number: decision.version,
            created_at,
            kind: ForecastKind::Forecast,
            points,
        })?;
        Ok(decision.version)
    }

    /// Persist the base-case (no-intervention) forecast as version 0
    ///
    /// Version 0 is out-of-band: it is overwritten on every blended run
    /// and never participates in FIFO eviction.
    pub fn persist_base_case(
        &self,
        well_id: &str,
        points: Vec<ForecastPoint>,
        created_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let lock = self.well_lock(well_id)?;
        let _guard = lock
            .lock()
            .map_err(|e| StorageError::Storage(e.to_string()))?;

        self.store.delete_version(well_id, BASE_CASE_VERSION)?;
        self.store.write_version(&ForecastVersion {
            well_id: well_id.to_string(),
            version_number: BASE_CASE_VERSION,
            created_at,
            kind: ForecastKind::BaseCase,
            points,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn VersionStore> {
        &self.store
    }

    #[must_use]
    pub const fn max_slots(&self) -> u32 {
        self.max_slots
    }
}
