//! Durable version store backed by sled
//!
//! Key layout: `{well_id}\0{version:010}` so one well's versions form a
//! contiguous, ordered key range scannable by prefix. Values are
//! JSON-serialized `ForecastVersion` records.
//!
//! Writes are not flushed individually; sled's background flushing is
//! sufficient since a lost trailing write just means "forecast absent
//! for that slot", which callers already tolerate.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{StorageError, VersionStore};
use crate::types::ForecastVersion;

#[derive(Clone)]
pub struct SledVersionStore {
    db: Arc<sled::Db>,
}

impl SledVersionStore {
    /// Open or create the version store at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        info!(versions = db.len(), "sled version store opened");
        Ok(Self { db: Arc::new(db) })
    }

    fn key(well_id: &str, version_number: u32) -> Vec<u8> {
        let mut key = well_id.as_bytes().to_vec();
        key.push(0);
        key.extend_from_slice(format!("{version_number:010}").as_bytes());
        key
    }

    fn well_prefix(well_id: &str) -> Vec<u8> {
        let mut prefix = well_id.as_bytes().to_vec();
        prefix.push(0);
        prefix
    }
}

impl VersionStore for SledVersionStore {
    fn write_version(&self, version: &ForecastVersion) -> Result<(), StorageError> {
        let key = Self::key(&version.well_id, version.version_number);
        let value = serde_json::to_vec(version)?;
        self.db.insert(key, value)?;
        Ok(())
    }

    fn read_version(
        &self,
        well_id: &str,
        version_number: u32,
    ) -> Result<Option<ForecastVersion>, StorageError> {
        let key = Self::key(well_id, version_number);
        match self.db.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn delete_version(&self, well_id: &str, version_number: u32) -> Result<(), StorageError> {
        let key = Self::key(well_id, version_number);
        self.db.remove(key)?;
        Ok(())
    }

    fn version_slots(&self, well_id: &str) -> Result<Vec<(u32, DateTime<Utc>)>, StorageError> {
        let mut slots = Vec::new();
        for item in self.db.scan_prefix(Self::well_prefix(well_id)) {
            let (_key, value) = item?;
            match serde_json::from_slice::<ForecastVersion>(&value) {
                Ok(version) if version.version_number >= 1 => {
                    slots.push((version.version_number, version.created_at));
                }
                Ok(_) => {} // base case, not a FIFO slot
                Err(err) => {
                    // An unreadable record must not block slot assignment
                    warn!(well_id, %err, "skipping undecodable version record");
                }
            }
        }
        Ok(slots)
    }

    fn backend_name(&self) -> &'static str {
        "Sled"
    }
}
