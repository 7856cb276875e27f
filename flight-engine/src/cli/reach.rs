//! Reach command - airports reachable from one airport.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{OutputFormat, print_json};
use crate::domain::{AirportCode, FlightRecord};
use crate::graph::ReachabilityGraph;

/// Arguments for the reach command.
#[derive(Debug, Args)]
pub struct ReachArgs {
    /// Airport to start from.
    #[arg(long)]
    pub from: AirportCode,

    /// Report airports at each exact hop distance up to this many.
    #[arg(long, default_value = "2")]
    pub hops: usize,
}

#[derive(Debug, Serialize)]
pub struct ReachReport {
    pub from: AirportCode,
    pub known: bool,
    pub direct: BTreeSet<AirportCode>,
    pub union_of_neighbors: BTreeSet<AirportCode>,
    pub at_distance: BTreeMap<usize, BTreeSet<AirportCode>>,
    pub not_directly_served: usize,
}

impl ReachReport {
    pub fn new(graph: &ReachabilityGraph, args: &ReachArgs) -> Self {
        let at_distance = (1..=args.hops)
            .map(|k| (k, graph.vertices_at_exact_distance(&args.from, k)))
            .collect();

        Self {
            from: args.from,
            known: graph.contains(&args.from),
            direct: graph.neighbors(&args.from),
            union_of_neighbors: graph.neighbors_via_union_of_neighbors(&args.from),
            at_distance,
            not_directly_served: graph.not_directly_served_from(&args.from).len(),
        }
    }
}

/// Execute the reach command.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn execute(args: &ReachArgs, records: &[FlightRecord], format: OutputFormat) -> Result<()> {
    let graph = ReachabilityGraph::build(records);
    let report = ReachReport::new(&graph, args);

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            if !report.known {
                println!("{} does not appear in the schedule", report.from);
                return Ok(());
            }

            println!(
                "{}: {} airports in the network, {} served directly",
                report.from,
                graph.vertex_count(),
                report.direct.len()
            );
            println!(
                "  neighbours of neighbours: {}",
                join(&report.union_of_neighbors)
            );
            for (k, airports) in &report.at_distance {
                println!("  exactly {k} hop(s): {}", join(airports));
            }
            println!("  not served directly: {}", report.not_directly_served);
        }
    }

    Ok(())
}

fn join(airports: &BTreeSet<AirportCode>) -> String {
    if airports.is_empty() {
        return "(none)".to_string();
    }
    airports
        .iter()
        .map(AirportCode::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
