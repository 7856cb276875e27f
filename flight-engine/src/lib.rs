//! Flight schedule analysis engine.
//!
//! Answers questions over a year of scheduled flights: "which airports can
//! be reached from here in N hops?", "how many flights can be chained back
//! to back in this window?", and "which flights have been moved to the
//! substitute airport?"

pub mod cli;
pub mod domain;
pub mod graph;
pub mod index;
pub mod ingest;
pub mod ledger;
pub mod planner;
