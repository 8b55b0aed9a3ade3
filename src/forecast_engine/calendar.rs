//! Monthly billing-period construction
//!
//! Converts a forecast date range into discrete periods aligned to
//! calendar month boundaries. A start date that is not the 1st produces
//! an explicit stub period from the start date to the next month start,
//! so forecasts can begin mid-month without shifting the grid.

use chrono::{Datelike, NaiveDate};

/// One monthly forecast period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPeriod {
    /// First day of the period
    pub start: NaiveDate,
    /// Days from the range start to this period's start; rates are
    /// evaluated at period START, so the first period evaluates at t=0
    /// and its rate matches the curve's initial rate exactly. This is a
    /// modeling convention (not mid-period evaluation), pinned by tests.
    pub elapsed_days: f64,
    pub days_in_period: u32,
    /// Calendar month (1–12) of the period start, keys the factor table
    pub month_index: u32,
}

/// First day of the month after `date`
fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Build monthly periods covering [start_date, end_date]
///
/// Boundaries are the start date itself plus every month-first up to and
/// including `end_date`. N boundaries produce N−1 periods. Fewer than 2
/// boundaries (end before start, or a degenerate same-month range) means
/// no forecast is producible and an empty set is returned — a policy,
/// not an error.
#[must_use]
pub fn build_periods(start_date: NaiveDate, end_date: NaiveDate) -> Vec<MonthlyPeriod> {
    if end_date <= start_date {
        return Vec::new();
    }

    // The start date is always the first boundary; when it is not the
    // 1st this creates the stub period [start_date, first month start)
    let mut boundaries = vec![start_date];
    let mut cursor = next_month_start(start_date);
    while let Some(boundary) = cursor {
        if boundary > end_date {
            break;
        }
        boundaries.push(boundary);
        cursor = next_month_start(boundary);
    }

    if boundaries.len() < 2 {
        return Vec::new();
    }

    boundaries
        .windows(2)
        .map(|pair| MonthlyPeriod {
            start: pair[0],
            elapsed_days: (pair[0] - start_date).num_days() as f64,
            days_in_period: (pair[1] - pair[0]).num_days() as u32,
            month_index: pair[0].month(),
        })
        .collect()
}
