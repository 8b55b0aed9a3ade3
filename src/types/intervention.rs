//! Well intervention records and lifecycle status

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DeclineParameters;

/// Lifecycle status of an intervention
///
/// Transitions (Plan → Done, Plan → Cancelled) are driven externally;
/// the orchestrator only reads a snapshot of the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterventionStatus {
    Plan,
    Done,
    Cancelled,
}

/// A planned or executed well intervention
///
/// Carries its own decline parameters: after an intervention the well is
/// expected to follow the intervention curve, not the base well decline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub well_id: String,
    pub planning_date: NaiveDate,
    pub status: InterventionStatus,
    pub parameters: DeclineParameters,
    /// Free-form intervention type tag (e.g. "GTM", "sidetrack")
    pub kind: String,
}

impl Intervention {
    /// Build an intervention from a raw reader record
    ///
    /// This is the boundary constructor for intervention readers:
    /// `raw_planning_date` arrives as an ISO date or datetime string and
    /// goes through [`Self::parse_planning_date`]. Returns `None` when
    /// the date cannot be parsed.
    pub fn new(
        well_id: impl Into<String>,
        raw_planning_date: &str,
        status: InterventionStatus,
        parameters: DeclineParameters,
        kind: impl Into<String>,
    ) -> Option<Self> {
        Some(Self {
            well_id: well_id.into(),
            planning_date: Self::parse_planning_date(raw_planning_date)?,
            status,
            parameters,
            kind: kind.into(),
        })
    }

    /// Parse a planning date from an ISO datetime string
    ///
    /// Upstream readers hand over strings like "2024-08-01T00:00:00";
    /// only the leading `YYYY-MM-DD` is meaningful, so the input is
    /// truncated to 10 characters before parsing.
    pub fn parse_planning_date(raw: &str) -> Option<NaiveDate> {
        let prefix: String = raw.chars().take(10).collect();
        NaiveDate::parse_from_str(&prefix, "%Y-%m-%d").ok()
    }
}
