//! Rebalance command - runway-proportional departure targets.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use clap::Args;

use super::{OutputFormat, parse_runways, print_json};
use crate::domain::{AirportCode, FlightRecord};
use crate::ledger::{RebalancePlan, plan_rebalance};

/// Arguments for the rebalance command.
#[derive(Debug, Args)]
pub struct RebalanceArgs {
    /// Airport receiving departures.
    #[arg(long)]
    pub substitute: AirportCode,

    /// Runway counts as `AIRPORT=N`, comma-separated. Donors give up
    /// departures in the order listed.
    #[arg(long, value_delimiter = ',', value_parser = parse_runways, required = true)]
    pub runways: Vec<(AirportCode, u32)>,
}

/// Departures per airport listed in `args.runways`, in listed order.
///
/// Flights from airports without a runway entry are not counted.
pub fn departure_counts(args: &RebalanceArgs, records: &[FlightRecord]) -> Vec<(AirportCode, u64)> {
    let mut counts: HashMap<AirportCode, u64> = HashMap::new();
    for record in records {
        *counts.entry(record.origin()).or_default() += 1;
    }

    args.runways
        .iter()
        .map(|(airport, _)| (*airport, counts.get(airport).copied().unwrap_or(0)))
        .collect()
}

/// Execute the rebalance command.
///
/// # Errors
///
/// Returns an error if the runway table is unusable or JSON output fails.
pub fn execute(args: &RebalanceArgs, records: &[FlightRecord], format: OutputFormat) -> Result<()> {
    let departures = departure_counts(args, records);
    let runways: BTreeMap<AirportCode, u32> = args.runways.iter().copied().collect();
    let plan: RebalancePlan = plan_rebalance(&departures, &runways, args.substitute)?;

    match format {
        OutputFormat::Json => print_json(&plan)?,
        OutputFormat::Text => {
            println!("Targets:");
            for (airport, count) in &departures {
                let target = plan.targets.get(airport).copied().unwrap_or(0);
                println!("  {airport}: {count} -> {target}");
            }
            if !departures.iter().any(|(a, _)| *a == args.substitute) {
                let target = plan.targets.get(&args.substitute).copied().unwrap_or(0);
                println!("  {}: 0 -> {target}", args.substitute);
            }
            for (airport, moved) in &plan.moved_from {
                println!("Move {moved} from {airport} to {}", args.substitute);
            }
            println!("Total moved: {}", plan.total_moved);
            if plan.unmet > 0 {
                println!("Unmet: {}", plan.unmet);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::CarrierCode;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn departures_from(origin: &str, count: u32) -> Vec<FlightRecord> {
        let date = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        let carrier = CarrierCode::parse("B6").unwrap();
        (0..count)
            .map(|n| FlightRecord::new(date, carrier, n, code(origin), code("BOS"), 187))
            .collect()
    }

    #[test]
    fn counts_follow_runway_order() {
        let mut records = departures_from("JFK", 4);
        records.extend(departures_from("EWR", 3));
        records.extend(departures_from("ORD", 9));

        let args = RebalanceArgs {
            substitute: code("ECI"),
            runways: vec![(code("EWR"), 3), (code("JFK"), 4), (code("ECI"), 4)],
        };

        assert_eq!(departure_counts(&args, &records), vec![
            (code("EWR"), 3),
            (code("JFK"), 4),
            (code("ECI"), 0),
        ]);
    }

    #[test]
    fn missing_substitute_runways_is_an_error() {
        let args = RebalanceArgs {
            substitute: code("ECI"),
            runways: vec![(code("EWR"), 3)],
        };
        let result = execute(&args, &departures_from("EWR", 2), OutputFormat::Json);
        assert!(result.is_err());
    }
}
