//! Report and dashboard aggregation
//!
//! Everything here works on result sets that are already in memory: the
//! day-wise counts of a report request, or the prescriptions of the
//! current month.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BusiestDay, DateRange, DayCount, Prescription};
use crate::utils::dates::{format_date, month_range};

/// Totals shown above the day-wise chart.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub days: usize,
    pub total: u64,
    /// Rounded to one decimal place.
    pub average_per_day: f64,
    pub busiest: BusiestDay,
}

impl ReportSummary {
    /// `"0"` for an empty report, otherwise one decimal place (`"4.0"`).
    pub fn average_display(&self) -> String {
        if self.days == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.average_per_day)
        }
    }

    /// Percentage of the report total that falls on one day.
    ///
    /// # Arguments
    ///
    /// * `count` - The prescription count of a single day in the report
    ///
    /// # Returns
    ///
    /// The share in percent, rounded to one decimal place, or `0.0` when the
    /// report has no prescriptions.
    pub fn share(&self, count: u64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round_to_tenth(count as f64 / self.total as f64 * 100.0)
    }
}

/// Rounds to one decimal place from the exact binary value of `value`.
///
/// Only values sitting exactly on a half (`x.x5` representable in binary,
/// i.e. a multiple of 0.25) round up; every other value rounds to the
/// nearest tenth of its stored value, so `0.15` (stored just below) gives
/// `0.1`.
fn round_to_tenth(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Aggregates an ordered list of day counts.
///
/// The busiest day only changes on a strictly greater count: ties keep the
/// first occurrence, and a report with no prescriptions at all keeps the
/// empty default.
pub fn summarize(counts: &[DayCount]) -> ReportSummary {
    let total: u64 = counts.iter().map(|entry| entry.prescription_count).sum();

    let average_per_day = if counts.is_empty() {
        0.0
    } else {
        round_to_tenth(total as f64 / counts.len() as f64)
    };

    let busiest = counts
        .iter()
        .fold(BusiestDay::default(), |busiest, entry| {
            if entry.prescription_count > busiest.count {
                BusiestDay {
                    day: entry.day.clone(),
                    count: entry.prescription_count,
                }
            } else {
                busiest
            }
        });

    log::debug!(
        "Summarized {} day(s): total={}, busiest={:?}",
        counts.len(),
        total,
        busiest
    );

    ReportSummary {
        days: counts.len(),
        total,
        average_per_day,
        busiest,
    }
}

/// Counts prescriptions per calendar day within `range`.
///
/// Days without prescriptions are left out. Entries come back in ascending
/// date order, labelled `YYYY-MM-DD`.
pub fn day_wise_counts(prescriptions: &[Prescription], range: &DateRange) -> Vec<DayCount> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for prescription in prescriptions
        .iter()
        .filter(|p| range.contains(p.prescription_date))
    {
        *per_day.entry(prescription.prescription_date).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .map(|(day, count)| DayCount::new(format_date(day), count))
        .collect()
}

/// Headline numbers and the most recent records for the dashboard.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub this_month: usize,
    pub today: usize,
    pub recent: Vec<Prescription>,
}

impl DashboardStats {
    /// `recent` holds at most `recent_limit` records, newest prescription
    /// date first; records sharing a date keep their input order.
    pub fn compute(prescriptions: &[Prescription], today: NaiveDate, recent_limit: usize) -> Self {
        let month = month_range(today);

        let mut recent: Vec<Prescription> = prescriptions.to_vec();
        recent.sort_by(|a, b| b.prescription_date.cmp(&a.prescription_date));
        recent.truncate(recent_limit);

        Self {
            total: prescriptions.len(),
            this_month: prescriptions
                .iter()
                .filter(|p| month.contains(p.prescription_date))
                .count(),
            today: prescriptions
                .iter()
                .filter(|p| p.prescription_date == today)
                .count(),
            recent,
        }
    }
}
