//! FIFO slot selection for forecast versions
//!
//! Pure decision logic over (version, earliest-creation-timestamp) pairs,
//! kept free of any database concern so it can be unit-tested in
//! isolation. The archiver applies the decision as delete-then-insert.

use chrono::{DateTime, Utc};

/// Outcome of choosing a version slot for a new forecast run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDecision {
    /// Slot number the new forecast will occupy
    pub version: u32,
    /// Whether an existing version must be deleted first
    pub evicts: bool,
}

/// Choose a version slot given the occupied slots for a well
///
/// `occupied` holds (version, min created_at) pairs for versions ≥ 1;
/// version 0 is the base-case slot and never participates. If any slot
/// in 1..=max is free, the lowest free slot is taken. Otherwise the slot
/// with the oldest creation timestamp is evicted and its NUMBER is
/// reused — overwrite-in-place by slot number, not by age rank.
#[must_use]
pub fn select_slot(occupied: &[(u32, DateTime<Utc>)], max_slots: u32) -> SlotDecision {
    for candidate in 1..=max_slots {
        if !occupied.iter().any(|(version, _)| *version == candidate) {
            return SlotDecision {
                version: candidate,
                evicts: false,
            };
        }
    }

    // All slots in use: evict the oldest by creation time
    let oldest = occupied
        .iter()
        .filter(|(version, _)| (1..=max_slots).contains(version))
        .min_by_key(|(version, created_at)| (*created_at, *version));

    match oldest {
        Some((version, _)) => SlotDecision {
            version: *version,
            evicts: true,
        },
        // Unreachable with max_slots >= 1, but degrade to slot 1
        None => SlotDecision {
            version: 1,
            evicts: false,
        },
    }
}
