//! Ledger command - reallocate flights to a substitute airport.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use super::{OutputFormat, parse_dated_code, print_json};
use crate::domain::{AirportCode, FlightRecord};
use crate::ledger::{FlightCode, ScheduleLedger, SharedLedger};

/// Arguments for the ledger command.
#[derive(Debug, Args)]
pub struct LedgerArgs {
    /// Airport that reallocated flights move to.
    #[arg(long)]
    pub substitute: AirportCode,

    /// Flight to reallocate, as `DATE:CARRIER-NUMBER`. Repeatable.
    #[arg(long, value_parser = parse_dated_code)]
    pub reallocate: Vec<(NaiveDate, String)>,

    /// Flight to check, as `DATE:CARRIER-NUMBER`. Repeatable.
    #[arg(long, value_parser = parse_dated_code)]
    pub check: Vec<(NaiveDate, String)>,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub date: NaiveDate,
    pub flight: String,
    /// Loaded and not reallocated.
    pub available: bool,
    pub origin: Option<AirportCode>,
}

#[derive(Debug, Serialize)]
pub struct LedgerReport {
    pub substitute: AirportCode,
    pub flights: usize,
    pub reallocated: usize,
    pub checks: Vec<CheckResult>,
}

/// Apply the reallocations in order, then run every check concurrently.
pub async fn run(args: &LedgerArgs, records: &[FlightRecord]) -> Result<LedgerReport> {
    let ledger = ScheduleLedger::load(records, args.substitute);
    let flights = ledger.len();
    let shared = SharedLedger::new(ledger);

    for (date, code) in &args.reallocate {
        shared.reallocate(*date, code, args.substitute).await;
    }

    let handles: Vec<_> = args
        .check
        .iter()
        .cloned()
        .map(|(date, flight)| {
            let shared = shared.clone();
            tokio::spawn(async move {
                let available = shared.check(date, &flight).await;
                let origin = match FlightCode::parse(&flight).schedule_key(date) {
                    Some(key) => shared.current_origin(&key).await,
                    None => None,
                };
                CheckResult {
                    date,
                    flight,
                    available,
                    origin,
                }
            })
        })
        .collect();

    let mut checks = Vec::with_capacity(handles.len());
    for handle in handles {
        checks.push(handle.await.context("ledger check task failed")?);
    }

    Ok(LedgerReport {
        substitute: args.substitute,
        flights,
        reallocated: shared.reallocated_count().await,
        checks,
    })
}

/// Execute the ledger command.
///
/// # Errors
///
/// Returns an error if a check task fails or JSON output fails.
pub async fn execute(args: LedgerArgs, records: &[FlightRecord], format: OutputFormat) -> Result<()> {
    let report = run(&args, records).await?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!(
                "{} flights loaded, {} reallocated to {}",
                report.flights, report.reallocated, report.substitute
            );
            for check in &report.checks {
                let status = if check.available {
                    "available"
                } else {
                    "unavailable"
                };
                match check.origin {
                    Some(origin) => {
                        println!("  {} {}: {status} (from {origin})", check.date, check.flight)
                    }
                    None => println!("  {} {}: {status} (not scheduled)", check.date, check.flight),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarrierCode;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 1, 1).unwrap()
    }

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn records() -> Vec<FlightRecord> {
        let ua = CarrierCode::parse("UA").unwrap();
        vec![
            FlightRecord::new(date(), ua, 1545, code("EWR"), code("IAH"), 1400),
            FlightRecord::new(date(), ua, 1714, code("LGA"), code("IAH"), 1416),
        ]
    }

    #[tokio::test]
    async fn reallocate_then_check() {
        let args = LedgerArgs {
            substitute: code("ECI"),
            reallocate: vec![(date(), "UA-1545".to_string())],
            check: vec![
                (date(), "UA-1545".to_string()),
                (date(), "UA-1714".to_string()),
                (date(), "UA-9999".to_string()),
            ],
        };

        let report = run(&args, &records()).await.unwrap();
        assert_eq!(report.flights, 2);
        assert_eq!(report.reallocated, 1);

        let summary: Vec<_> = report
            .checks
            .iter()
            .map(|c| (c.flight.as_str(), c.available, c.origin))
            .collect();
        assert_eq!(summary, vec![
            ("UA-1545", false, Some(code("ECI"))),
            ("UA-1714", true, Some(code("LGA"))),
            ("UA-9999", false, None),
        ]);
    }

    #[tokio::test]
    async fn parses_repeated_flags() {
        use crate::cli::{Cli, Commands};
        use clap::Parser;

        let cli = Cli::parse_from([
            "flight-engine",
            "flights.csv",
            "ledger",
            "--substitute",
            "ECI",
            "--reallocate",
            "2013-01-01:UA-1545",
            "--reallocate",
            "2013-01-02:AA-1",
            "--check",
            "2013-01-01:UA-1545",
        ]);
        let Commands::Ledger(args) = cli.command else {
            panic!("expected ledger");
        };
        assert_eq!(args.reallocate.len(), 2);
        assert_eq!(args.check.len(), 1);

        let report = run(&args, &records()).await.unwrap();
        // the second reallocation names a flight that was never loaded
        assert_eq!(report.reallocated, 2);
        assert!(!report.checks[0].available);
    }
}
