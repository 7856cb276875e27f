//! Plan command - longest chain of flights in a time window.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::{OutputFormat, print_json};
use crate::domain::{AirportCode, FlightRecord, parse_instant};
use crate::index::TemporalFlightIndex;
use crate::planner::{PlanError, PlanOutcome, Planner, PlannerConfig};

/// Arguments for the plan command.
///
/// Anything left unset falls back to [`PlannerConfig::default`].
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Window start, e.g. `2013-01-01T05:00`.
    #[arg(long, value_parser = parse_instant)]
    pub start: Option<NaiveDateTime>,

    /// Window end. No flight may land after it.
    #[arg(long, value_parser = parse_instant)]
    pub end: Option<NaiveDateTime>,

    /// Comma-separated starting airports.
    #[arg(long, value_delimiter = ',')]
    pub airports: Option<Vec<AirportCode>>,

    /// Itineraries kept per iteration.
    #[arg(long)]
    pub beam_width: Option<usize>,

    /// Departures considered per itinerary.
    #[arg(long)]
    pub max_candidates: Option<usize>,

    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Stop once more than this many flights are chained.
    #[arg(long)]
    pub ceiling: Option<usize>,

    /// Give up after this many seconds and report the best so far.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Expand itineraries on one thread.
    #[arg(long)]
    pub sequential: bool,
}

impl PlanArgs {
    /// Planner configuration with these arguments applied over the defaults.
    pub fn config(&self) -> Result<PlannerConfig, PlanError> {
        let mut config = PlannerConfig::default();

        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        if let Some(airports) = &self.airports {
            config.start_airports = airports.clone();
        }
        if let Some(width) = self.beam_width {
            config.beam_width = width;
        }
        if let Some(candidates) = self.max_candidates {
            config.max_candidates_per_state = candidates;
        }
        if let Some(iterations) = self.max_iterations {
            config.max_iterations = iterations;
        }
        if let Some(ceiling) = self.ceiling {
            config.flights_ceiling = ceiling;
        }
        config.time_budget = self.timeout_secs.map(Duration::from_secs);
        config.parallel_expansion = !self.sequential;

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub start_airports: Vec<AirportCode>,
    pub indexed_flights: usize,
    #[serde(flatten)]
    pub outcome: PlanOutcome,
}

/// Execute the plan command.
///
/// The search is CPU-bound, so it runs on the blocking pool.
///
/// # Errors
///
/// Returns an error if the arguments do not form a valid configuration or
/// the search task fails.
pub async fn execute(args: PlanArgs, records: Vec<FlightRecord>, format: OutputFormat) -> Result<()> {
    let config = args.config()?;

    let report = tokio::task::spawn_blocking(move || -> Result<PlanReport, PlanError> {
        let index = TemporalFlightIndex::build_within(&records, config.start);
        info!(
            flights = index.len(),
            airports = config.start_airports.len(),
            beam_width = config.beam_width,
            "Starting beam search"
        );

        let outcome = Planner::new(&index, &config).run()?;
        Ok(PlanReport {
            start: config.start,
            end: config.end,
            start_airports: config.start_airports,
            indexed_flights: index.len(),
            outcome,
        })
    })
    .await
    .context("planner task failed")??;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!(
                "Best: {} flights between {} and {}",
                report.outcome.best_flights, report.start, report.end
            );
            if let Some(state) = &report.outcome.best_state {
                println!("  ends at {} at {}", state.airport, state.time);
            }
            println!(
                "  {} iterations, {} itineraries expanded, stopped: {:?}",
                report.outcome.iterations,
                report.outcome.states_expanded,
                report.outcome.stop_reason
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    fn plan_args(extra: &[&str]) -> PlanArgs {
        let mut argv = vec!["flight-engine", "flights.csv", "plan"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Plan(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn defaults_when_unset() {
        let config = plan_args(&[]).config().unwrap();
        let defaults = PlannerConfig::default();

        assert_eq!(config.start, defaults.start);
        assert_eq!(config.end, defaults.end);
        assert_eq!(config.start_airports, defaults.start_airports);
        assert_eq!(config.beam_width, defaults.beam_width);
        assert!(config.parallel_expansion);
        assert!(config.time_budget.is_none());
    }

    #[test]
    fn overrides_apply() {
        let config = plan_args(&[
            "--end",
            "2013-01-02 05:00",
            "--max-candidates",
            "5",
            "--max-iterations",
            "100",
            "--ceiling",
            "10",
            "--timeout-secs",
            "30",
        ])
        .config()
        .unwrap();

        assert_eq!(config.end.to_string(), "2013-01-02 05:00:00");
        assert_eq!(config.max_candidates_per_state, 5);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.flights_ceiling, 10);
        assert_eq!(config.time_budget, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_beam_width_rejected() {
        let result = plan_args(&["--beam-width", "0"]).config();
        assert!(matches!(result, Err(PlanError::InvalidConfig(_))));
    }
}
