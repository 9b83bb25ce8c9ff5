//! Command-line front end
//!
//! Parses the `clinic-records` arguments into a [`Command`] and renders its
//! output as plain text. Rendering is separate from I/O, so the views can be
//! checked without a snapshot on disk.

use chrono::NaiveDate;
use thiserror::Error;

use crate::filter::{filter_prescriptions, within_range};
use crate::models::{DateRange, Prescription};
use crate::reports::{day_wise_counts, summarize, DashboardStats};
use crate::utils::dates::{display_date, last_day_of_month, month_range, parse_date};

pub const HELP: &str = "\
Available commands:
  list [--from YYYY-MM-DD] [--to YYYY-MM-DD] [search...]
                         List prescriptions in a date range (default: this month),
                         filtered by patient name or diagnosis.
  report [start [end]]   Day-wise prescription counts (dates as YYYY-MM-DD, default: this month).
  dashboard              Totals for this month and today, with the most recent prescriptions.
  help                   Display this help information.";

const MAX_BAR_WIDTH: u64 = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("Missing value for {0}")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { range: DateRange, search: String },
    Report { range: DateRange },
    Dashboard,
    Help,
}

impl Command {
    /// Parses the arguments after the program name. Dates default to the
    /// month of `today`.
    pub fn parse<I>(args: I, today: NaiveDate) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(name) = args.next() else {
            return Ok(Command::Help);
        };

        match name.to_lowercase().as_str() {
            "list" => {
                let mut start = None;
                let mut end = None;
                let mut terms = Vec::new();
                while let Some(arg) = args.next() {
                    match arg.as_str() {
                        "--from" => start = Some(parse_arg_date(&flag_value(&mut args, &arg)?)?),
                        "--to" => end = Some(parse_arg_date(&flag_value(&mut args, &arg)?)?),
                        _ => terms.push(arg),
                    }
                }
                Ok(Command::List {
                    range: resolve_range(start, end, today)?,
                    search: terms.join(" "),
                })
            }
            "report" => {
                let start = args.next().map(|raw| parse_arg_date(&raw)).transpose()?;
                let end = args.next().map(|raw| parse_arg_date(&raw)).transpose()?;
                no_more_args(args)?;
                Ok(Command::Report {
                    range: resolve_range(start, end, today)?,
                })
            }
            "dashboard" => no_more_args(args).map(|_| Command::Dashboard),
            "help" | "--help" | "-h" => Ok(Command::Help),
            _ => Err(CommandError::Unknown(name)),
        }
    }

    /// Renders the command's output over the loaded prescriptions.
    pub fn render(&self, prescriptions: &[Prescription], today: NaiveDate, recent_limit: usize) -> String {
        match self {
            Command::List { range, search } => render_list(prescriptions, range, search),
            Command::Report { range } => render_report(prescriptions, range),
            Command::Dashboard => render_dashboard(prescriptions, today, recent_limit),
            Command::Help => HELP.to_string(),
        }
    }
}

fn parse_arg_date(raw: &str) -> Result<NaiveDate, CommandError> {
    parse_date(raw).ok_or_else(|| CommandError::InvalidDate(raw.to_string()))
}

/// Fills missing bounds from the month of `today`. A start date alone
/// extends the end to at least the last day of the start's month.
fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateRange, CommandError> {
    let default_range = month_range(today);
    let start = start.unwrap_or(default_range.start_date);
    let end = end.unwrap_or_else(|| default_range.end_date.max(last_day_of_month(start)));
    if start > end {
        return Err(CommandError::InvalidRange { start, end });
    }
    Ok(DateRange::new(start, end))
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CommandError> {
    args.next()
        .ok_or_else(|| CommandError::MissingValue(flag.to_string()))
}

fn no_more_args(mut args: impl Iterator<Item = String>) -> Result<(), CommandError> {
    match args.next() {
        Some(extra) => Err(CommandError::UnexpectedArgument(extra)),
        None => Ok(()),
    }
}

fn render_prescription(out: &mut String, prescription: &Prescription) {
    out.push_str(&format!(
        "#{}  {}  {} ({}, {})\n",
        prescription.id,
        display_date(prescription.prescription_date),
        prescription.patient_name,
        prescription.patient_age,
        prescription.patient_gender
    ));
    if let Some(diagnosis) = prescription.diagnosis.as_deref() {
        out.push_str(&format!("    Diagnosis: {}\n", diagnosis));
    }
    if let Some(medicines) = prescription.medicines.as_deref() {
        out.push_str(&format!("    Medicines: {}\n", medicines));
    }
    if let Some(next_visit) = prescription.next_visit_date {
        out.push_str(&format!("    Next visit: {}\n", display_date(next_visit)));
    }
}

fn render_list(prescriptions: &[Prescription], range: &DateRange, search: &str) -> String {
    let found = filter_prescriptions(within_range(prescriptions, range), search);

    let mut out = format!(
        "{} Prescription(s) Found from {} to {}\n",
        found.len(),
        display_date(range.start_date),
        display_date(range.end_date)
    );
    if found.is_empty() {
        out.push_str(if search.trim().is_empty() {
            "No prescriptions in this date range\n"
        } else {
            "Try adjusting your search or date range\n"
        });
    }
    for prescription in found {
        out.push('\n');
        render_prescription(&mut out, prescription);
    }
    out
}

fn render_report(prescriptions: &[Prescription], range: &DateRange) -> String {
    let counts = day_wise_counts(prescriptions, range);
    let summary = summarize(&counts);

    let mut out = format!(
        "Prescriptions from {} to {}\n\n",
        display_date(range.start_date),
        display_date(range.end_date)
    );

    let scale = summary.busiest.count.max(MAX_BAR_WIDTH);
    for entry in &counts {
        let bar = (entry.prescription_count * MAX_BAR_WIDTH).div_ceil(scale);
        out.push_str(&format!(
            "{}  {:<width$} {:>5}  {:>5.1}%\n",
            entry.day,
            "#".repeat(bar as usize),
            entry.prescription_count,
            summary.share(entry.prescription_count),
            width = MAX_BAR_WIDTH as usize
        ));
    }
    if counts.is_empty() {
        out.push_str("No prescriptions in this date range\n");
    } else {
        out.push_str(&format!(
            "{:<10}  {:<width$} {:>5}   100%\n",
            "Total",
            "",
            summary.total,
            width = MAX_BAR_WIDTH as usize
        ));
    }

    let busiest = if summary.busiest.day.is_empty() {
        "-".to_string()
    } else {
        format!("{} ({})", summary.busiest.day, summary.busiest.count)
    };
    out.push_str(&format!(
        "\nTotal prescriptions: {}\nAverage per day: {}\nBusiest day: {}\n",
        summary.total,
        summary.average_display(),
        busiest
    ));
    out
}

fn render_dashboard(prescriptions: &[Prescription], today: NaiveDate, recent_limit: usize) -> String {
    let stats = DashboardStats::compute(prescriptions, today, recent_limit);

    let mut out = format!(
        "Total prescriptions: {}\nThis month: {}\nToday: {}\n",
        stats.total, stats.this_month, stats.today
    );
    if !stats.recent.is_empty() {
        out.push_str("\nRecent prescriptions:\n");
        for prescription in &stats.recent {
            out.push('\n');
            render_prescription(&mut out, prescription);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn prescription(id: i64, name: &str, diagnosis: Option<&str>, day: NaiveDate) -> Prescription {
        Prescription {
            id,
            prescription_date: day,
            patient_name: name.to_string(),
            patient_age: 34,
            patient_gender: Gender::Female,
            diagnosis: diagnosis.map(str::to_string),
            medicines: None,
            next_visit_date: None,
            created_by_username: None,
            created_by_full_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_parse_defaults() {
        let today = date(2024, 2, 10);
        assert_eq!(Command::parse(args(&[]), today), Ok(Command::Help));
        assert_eq!(Command::parse(args(&["DASHBOARD"]), today), Ok(Command::Dashboard));
        assert_eq!(
            Command::parse(args(&["report"]), today),
            Ok(Command::Report {
                range: DateRange::new(date(2024, 2, 1), date(2024, 2, 29))
            })
        );
        assert_eq!(
            Command::parse(args(&["list", "seasonal", "flu"]), today),
            Ok(Command::List {
                range: DateRange::new(date(2024, 2, 1), date(2024, 2, 29)),
                search: "seasonal flu".to_string()
            })
        );
    }

    #[test]
    fn test_parse_list_range() {
        let today = date(2024, 2, 10);
        assert_eq!(
            Command::parse(
                args(&["list", "--from", "2024-01-01", "flu", "--to", "2024-01-15"]),
                today
            ),
            Ok(Command::List {
                range: DateRange::new(date(2024, 1, 1), date(2024, 1, 15)),
                search: "flu".to_string()
            })
        );
        assert_eq!(
            Command::parse(args(&["list", "--from", "2024-03-05"]), today),
            Ok(Command::List {
                range: DateRange::new(date(2024, 3, 5), date(2024, 3, 31)),
                search: String::new()
            })
        );
        assert_eq!(
            Command::parse(args(&["list", "--to", "2024-02-20"]), today),
            Ok(Command::List {
                range: DateRange::new(date(2024, 2, 1), date(2024, 2, 20)),
                search: String::new()
            })
        );
    }

    #[test]
    fn test_parse_list_range_errors() {
        let today = date(2024, 2, 10);
        assert_eq!(
            Command::parse(
                args(&["list", "--from", "2024-02-10", "--to", "2024-02-01"]),
                today
            ),
            Err(CommandError::InvalidRange {
                start: date(2024, 2, 10),
                end: date(2024, 2, 1)
            })
        );
        assert_eq!(
            Command::parse(args(&["list", "--from", "10/02/2024"]), today),
            Err(CommandError::InvalidDate("10/02/2024".to_string()))
        );
        assert_eq!(
            Command::parse(args(&["list", "alice", "--to"]), today),
            Err(CommandError::MissingValue("--to".to_string()))
        );
    }

    #[test]
    fn test_parse_report_range() {
        let today = date(2024, 2, 10);
        assert_eq!(
            Command::parse(args(&["report", "2024-01-01", "2024-01-15"]), today),
            Ok(Command::Report {
                range: DateRange::new(date(2024, 1, 1), date(2024, 1, 15))
            })
        );
        assert_eq!(
            Command::parse(args(&["report", "2024-03-05"]), today),
            Ok(Command::Report {
                range: DateRange::new(date(2024, 3, 5), date(2024, 3, 31))
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        let today = date(2024, 2, 10);
        assert_eq!(
            Command::parse(args(&["order"]), today),
            Err(CommandError::Unknown("order".to_string()))
        );
        assert_eq!(
            Command::parse(args(&["report", "01/02/2024"]), today),
            Err(CommandError::InvalidDate("01/02/2024".to_string()))
        );
        assert_eq!(
            Command::parse(args(&["report", "2024-02-10", "2024-02-01"]), today),
            Err(CommandError::InvalidRange {
                start: date(2024, 2, 10),
                end: date(2024, 2, 1)
            })
        );
        assert_eq!(
            Command::parse(args(&["dashboard", "now"]), today),
            Err(CommandError::UnexpectedArgument("now".to_string()))
        );
    }

    #[test]
    fn test_render_list_filters_current_month() {
        let today = date(2024, 1, 20);
        let prescriptions = vec![
            prescription(1, "Alice", Some("flu"), date(2024, 1, 5)),
            prescription(2, "Bob", None, date(2024, 1, 6)),
            prescription(3, "Alan", None, date(2023, 12, 30)),
        ];

        let out = Command::parse(args(&["list", "al"]), today)
            .unwrap()
            .render(&prescriptions, today, 5);
        assert!(out.starts_with("1 Prescription(s) Found from 1 Jan 2024 to 31 Jan 2024\n"));
        assert!(out.contains("#1  5 Jan 2024  Alice (34, FEMALE)"));
        assert!(out.contains("Diagnosis: flu"));
        assert!(!out.contains("Alan"));
    }

    #[test]
    fn test_render_list_custom_range() {
        let today = date(2024, 1, 20);
        let prescriptions = vec![
            prescription(1, "Alice", Some("flu"), date(2024, 1, 5)),
            prescription(2, "Bob", None, date(2024, 1, 6)),
            prescription(3, "Alan", None, date(2023, 12, 30)),
        ];

        let out = Command::List {
            range: DateRange::new(date(2023, 12, 1), date(2024, 1, 5)),
            search: "al".to_string(),
        }
        .render(&prescriptions, today, 5);
        assert!(out.starts_with("2 Prescription(s) Found from 1 Dec 2023 to 5 Jan 2024\n"));
        let alice = out.find("Alice").unwrap();
        let alan = out.find("Alan").unwrap();
        assert!(alice < alan);

        let out = Command::List {
            range: DateRange::new(date(2023, 11, 1), date(2023, 11, 30)),
            search: String::new(),
        }
        .render(&prescriptions, today, 5);
        assert!(out.contains("No prescriptions in this date range"));
    }

    #[test]
    fn test_render_report_summary() {
        let prescriptions = vec![
            prescription(1, "A", None, date(2024, 1, 1)),
            prescription(2, "B", None, date(2024, 1, 2)),
            prescription(3, "C", None, date(2024, 1, 2)),
        ];
        let out = Command::Report {
            range: DateRange::new(date(2024, 1, 1), date(2024, 1, 31)),
        }
        .render(&prescriptions, date(2024, 1, 31), 5);

        assert!(out.contains("Prescriptions from 1 Jan 2024 to 31 Jan 2024"));
        assert!(out.contains("Total prescriptions: 3"));
        assert!(out.contains("Average per day: 1.5"));
        assert!(out.contains("Busiest day: 2024-01-02 (2)"));
    }

    #[test]
    fn test_render_report_shares() {
        let prescriptions = vec![
            prescription(1, "A", None, date(2024, 1, 1)),
            prescription(2, "B", None, date(2024, 1, 2)),
            prescription(3, "C", None, date(2024, 1, 2)),
            prescription(4, "D", None, date(2024, 1, 2)),
        ];
        let out = Command::Report {
            range: DateRange::new(date(2024, 1, 1), date(2024, 1, 31)),
        }
        .render(&prescriptions, date(2024, 1, 31), 5);

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with("2024-01-01  #"));
        assert!(lines[2].ends_with("1   25.0%"));
        assert!(lines[3].ends_with("3   75.0%"));
        assert!(lines[4].starts_with("Total"));
        assert!(lines[4].ends_with("4   100%"));
    }

    #[test]
    fn test_render_empty_report() {
        let out = Command::Report {
            range: DateRange::new(date(2024, 1, 1), date(2024, 1, 31)),
        }
        .render(&[], date(2024, 1, 31), 5);
        assert!(out.contains("No prescriptions in this date range"));
        assert!(!out.contains("100%"));
        assert!(out.contains("Average per day: 0\n"));
        assert!(out.contains("Busiest day: -"));
    }

    #[test]
    fn test_render_dashboard() {
        let today = date(2024, 1, 6);
        let prescriptions = vec![
            prescription(1, "Alice", None, date(2024, 1, 5)),
            prescription(2, "Bob", None, date(2024, 1, 6)),
        ];
        let out = Command::Dashboard.render(&prescriptions, today, 1);
        assert!(out.starts_with("Total prescriptions: 2\nThis month: 2\nToday: 1\n"));
        assert!(out.contains("Bob"));
        assert!(!out.contains("Alice"));
    }
}
