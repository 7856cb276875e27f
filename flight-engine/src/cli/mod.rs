//! Command-line interface.
//!
//! ## Commands
//!
//! - `flight-engine <CSV> reach` - airports reachable from one airport
//! - `flight-engine <CSV> plan` - longest chain of flights in a window
//! - `flight-engine <CSV> ledger` - reallocate flights and check them
//! - `flight-engine <CSV> rebalance` - runway-proportional departure targets

pub mod ledger;
pub mod plan;
pub mod reach;
pub mod rebalance;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::domain::AirportCode;

/// Flight schedule analysis.
#[derive(Debug, Parser)]
#[command(name = "flight-engine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is unset (e.g. `debug`, `flight_engine=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Flights CSV in the `nycflights13` layout.
    pub flights: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Airports reachable from one airport.
    Reach(reach::ReachArgs),
    /// Longest chain of back-to-back flights in a time window.
    Plan(plan::PlanArgs),
    /// Reallocate flights to a substitute airport and check them.
    Ledger(ledger::LedgerArgs),
    /// Spread departures across airports by runway count.
    Rebalance(rebalance::RebalanceArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// Print `report` as pretty JSON.
fn print_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Parse `DATE:CODE`, e.g. `2013-01-01:UA-1545`.
pub fn parse_dated_code(s: &str) -> Result<(NaiveDate, String), String> {
    let (date, code) = s
        .split_once(':')
        .ok_or_else(|| format!("expected DATE:CODE, got '{s}'"))?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{date}': {e}"))?;
    Ok((date, code.trim().to_string()))
}

/// Parse `AIRPORT=RUNWAYS`, e.g. `EWR=3`.
pub fn parse_runways(s: &str) -> Result<(AirportCode, u32), String> {
    let (airport, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected AIRPORT=RUNWAYS, got '{s}'"))?;
    let airport = AirportCode::parse(airport.trim()).map_err(|e| e.to_string())?;
    let count = count
        .trim()
        .parse()
        .map_err(|e| format!("invalid runway count '{count}': {e}"))?;
    Ok((airport, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_before_and_after_subcommand() {
        let cli = Cli::parse_from([
            "flight-engine",
            "--format",
            "json",
            "flights.csv",
            "reach",
            "--from",
            "EWR",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.flights, PathBuf::from("flights.csv"));
        match cli.command {
            Commands::Reach(args) => {
                assert_eq!(args.from.as_str(), "EWR");
                assert_eq!(args.hops, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn plan_flags() {
        let cli = Cli::parse_from([
            "flight-engine",
            "flights.csv",
            "plan",
            "--start",
            "2013-06-01T05:00",
            "--airports",
            "EWR,JFK",
            "--beam-width",
            "50",
            "--sequential",
        ]);

        let Commands::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        let config = args.config().unwrap();
        assert_eq!(config.start.to_string(), "2013-06-01 05:00:00");
        assert_eq!(config.end.to_string(), "2013-12-31 23:59:00");
        assert_eq!(config.start_airports.len(), 2);
        assert_eq!(config.beam_width, 50);
        assert!(!config.parallel_expansion);
    }

    #[test]
    fn invalid_airport_rejected() {
        let result =
            Cli::try_parse_from(["flight-engine", "flights.csv", "reach", "--from", "ewr"]);
        assert!(result.is_err());
    }

    #[test]
    fn dated_codes() {
        let (date, code) = parse_dated_code("2013-01-01:UA-1545").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2013, 1, 1).unwrap());
        assert_eq!(code, "UA-1545");

        assert!(parse_dated_code("UA-1545").is_err());
        assert!(parse_dated_code("2013-13-01:UA-1").is_err());
    }

    #[test]
    fn runway_entries() {
        let (airport, count) = parse_runways("EWR=3").unwrap();
        assert_eq!(airport.as_str(), "EWR");
        assert_eq!(count, 3);

        assert!(parse_runways("EWR").is_err());
        assert!(parse_runways("EWR=three").is_err());
    }
}
