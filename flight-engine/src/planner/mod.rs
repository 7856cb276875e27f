//! Maximum-flights planner using beam search.
//!
//! This module answers: "starting at one of these airports at this time, how
//! many flights can be chained back to back before the window closes?"
//!
//! The search space grows exponentially with the number of departures per
//! airport, so the planner keeps only the best `beam_width` itineraries per
//! step. The answer is a lower bound whose quality depends on the beam width
//! and the per-state candidate limit.

mod beam;
mod cancel;
mod config;

pub use beam::{ItineraryState, PlanError, PlanOutcome, Planner, StopReason};
pub use cancel::CancelToken;
pub use config::{
    DEFAULT_BEAM_WIDTH, DEFAULT_FLIGHTS_CEILING, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_ITERATIONS,
    PlannerConfig,
};
