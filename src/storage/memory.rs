//! In-memory version store for testing and minimal deployments
//!
//! Thread-safe via `RwLock`. Not durable — data lost on restart.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::{StorageError, VersionStore};
use crate::types::ForecastVersion;

#[derive(Default)]
pub struct InMemoryVersionStore {
    versions: RwLock<HashMap<(String, u32), ForecastVersion>>,
}

impl InMemoryVersionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored versions across all wells
    pub fn len(&self) -> usize {
        self.versions.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VersionStore for InMemoryVersionStore {
    fn write_version(&self, version: &ForecastVersion) -> Result<(), StorageError> {
        let mut map = self
            .versions
            .write()
            .map_err(|e| StorageError::Storage(e.to_string()))?;
        map.insert(
            (version.well_id.clone(), version.version_number),
            version.clone(),
        );
        Ok(())
    }

    fn read_version(
        &self,
        well_id: &str,
        version_number: u32,
    ) -> Result<Option<ForecastVersion>, StorageError> {
        let map = self
            .versions
            .read()
            .map_err(|e| StorageError::Storage(e.to_string()))?;
        Ok(map.get(&(well_id.to_string(), version_number)).cloned())
    }

    fn delete_version(&self, well_id: &str, version_number: u32) -> Result<(), StorageError> {
        let mut map = self
            .versions
            .write()
            .map_err(|e| StorageError::Storage(e.to_string()))?;
        map.remove(&(well_id.to_string(), version_number));
        Ok(())
    }

    fn version_slots(&self, well_id: &str) -> Result<Vec<(u32, DateTime<Utc>)>, StorageError> {
        let map = self
            .versions
            .read()
            .map_err(|e| StorageError::Storage(e.to_string()))?;
        let mut slots: Vec<(u32, DateTime<Utc>)> = map
            .values()
            .filter(|v| v.well_id == well_id && v.version_number >= 1)
            .map(|v| (v.version_number, v.created_at))
            .collect();
        slots.sort_unstable_by_key(|(version, _)| *version);
        Ok(slots)
    }

    fn backend_name(&self) -> &'static str {
        "InMemory"
    }
}
