//! Historical production samples and monthly correction factors

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical production sample for a well
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: NaiveDate,
    pub oil_rate: f64,
    pub liquid_rate: f64,
}

/// Cumulative-volume correction factors for one calendar month
///
/// Dimensionless uptime/efficiency multipliers applied to rate × days
/// when computing period volumes. All default to 1.0 (no correction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFactors {
    #[serde(default = "default_factor")]
    pub k_oil: f64,
    #[serde(default = "default_factor")]
    pub k_liquid: f64,
    #[serde(default = "default_factor")]
    pub k_intervention: f64,
    #[serde(default = "default_factor")]
    pub k_injection: f64,
}

const fn default_factor() -> f64 {
    1.0
}

impl Default for MonthlyFactors {
    fn default() -> Self {
        Self {
            k_oil: 1.0,
            k_liquid: 1.0,
            k_intervention: 1.0,
            k_injection: 1.0,
        }
    }
}

/// Month-of-year (1–12) to correction-factor mapping
///
/// Loaded once by the caller and passed by reference into the forecast
/// engine and the orchestrator, so a whole batch shares one read-only
/// table. Months absent from the mapping resolve to all-1.0 factors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyFactorTable {
    factors: HashMap<u32, MonthlyFactors>,
}

impl MonthlyFactorTable {
    /// Build a table from (month, factors) records, e.g. rows from a
    /// factor reader. Months outside 1–12 are ignored.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (u32, MonthlyFactors)>,
    {
        let factors = records
            .into_iter()
            .filter(|(month, _)| (1..=12).contains(month))
            .collect();
        Self { factors }
    }

    /// Factors for a calendar month, defaulting absent months to 1.0
    #[must_use]
    pub fn get(&self, month: u32) -> MonthlyFactors {
        self.factors.get(&month).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_month_defaults_to_unit_factors() {
        let table = MonthlyFactorTable::default();
        let factors = table.get(7);
        assert_eq!(factors.k_oil, 1.0);
        assert_eq!(factors.k_intervention, 1.0);
    }

    #[test]
    fn out_of_range_months_are_dropped() {
        let table = MonthlyFactorTable::from_records(vec![
            (3, MonthlyFactors { k_oil: 0.9, ..Default::default() }),
            (13, MonthlyFactors { k_oil: 0.5, ..Default::default() }),
            (0, MonthlyFactors { k_oil: 0.5, ..Default::default() }),
        ]);
        assert_eq!(table.get(3).k_oil, 0.9);
        assert_eq!(table.get(13).k_oil, 1.0);
    }
}
