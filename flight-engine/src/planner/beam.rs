//! Beam search for the longest chain of flights in a time window.
//!
//! An itinerary is a position (airport, time) plus the number of flights
//! taken to get there. Each iteration replaces every itinerary with one
//! successor per eligible departure, then keeps the `beam_width` best by
//! (flights taken desc, time asc). Itineraries that arrive earlier keep more
//! room to extend, hence the tie-break.
//!
//! There is no deduplication: two beam entries may sit at the same airport
//! and time, and the same flight may appear in several itineraries. The
//! result is a lower bound on the true maximum.

use std::time::Instant;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use super::cancel::CancelToken;
use super::config::PlannerConfig;
use crate::domain::AirportCode;
use crate::index::{TemporalFlightIndex, TimedFlight};

/// Error from planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Configuration cannot drive a search
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(&'static str),
}

/// A point in the search: where we are, when, and how many flights so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItineraryState {
    pub airport: AirportCode,
    pub time: NaiveDateTime,
    pub flights_taken: usize,
}

impl ItineraryState {
    fn start(airport: AirportCode, time: NaiveDateTime) -> Self {
        Self {
            airport,
            time,
            flights_taken: 0,
        }
    }

    /// The state after taking `flight` from here.
    fn take(&self, flight: &TimedFlight) -> Self {
        Self {
            airport: flight.destination,
            time: flight.arrival,
            flights_taken: self.flights_taken + 1,
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No itinerary could take another flight
    Exhausted,
    /// `max_iterations` reached
    IterationCap,
    /// Best count exceeded `flights_ceiling`
    CeilingReached,
    /// The cancel token fired
    Cancelled,
    /// The time budget ran out
    DeadlineElapsed,
}

/// Result of a planner run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOutcome {
    /// Most flights chained by any itinerary seen.
    pub best_flights: usize,

    /// Leading itinerary of the beam that first reached `best_flights`.
    pub best_state: Option<ItineraryState>,

    /// Iterations performed.
    pub iterations: usize,

    /// Itineraries expanded over the whole run.
    pub states_expanded: usize,

    pub stop_reason: StopReason,
}

/// Beam-search planner over a temporal flight index.
pub struct Planner<'a> {
    index: &'a TemporalFlightIndex,
    config: &'a PlannerConfig,
    cancel: CancelToken,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(index: &'a TemporalFlightIndex, config: &'a PlannerConfig) -> Self {
        Self {
            index,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Use `cancel` to stop the run from elsewhere.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the search and return only the best flight count.
    pub fn best_flights(&self) -> Result<usize, PlanError> {
        self.run().map(|outcome| outcome.best_flights)
    }

    /// Run the search.
    pub fn run(&self) -> Result<PlanOutcome, PlanError> {
        self.config.validate()?;

        let deadline = self.config.time_budget.map(|budget| Instant::now() + budget);

        let mut beam: Vec<ItineraryState> = self
            .config
            .start_airports
            .iter()
            .map(|&airport| ItineraryState::start(airport, self.config.start))
            .collect();

        let mut best_flights = 0;
        let mut best_state = None;
        let mut iterations = 0;
        let mut states_expanded = 0;

        let stop_reason = loop {
            if iterations >= self.config.max_iterations {
                break StopReason::IterationCap;
            }
            if self.cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break StopReason::DeadlineElapsed;
            }

            iterations += 1;
            states_expanded += beam.len();

            let mut candidates = self.expand(&beam);
            if candidates.is_empty() {
                break StopReason::Exhausted;
            }

            // Stable, so equal itineraries keep the order they were generated in.
            candidates.sort_by(|a, b| {
                b.flights_taken
                    .cmp(&a.flights_taken)
                    .then_with(|| a.time.cmp(&b.time))
            });
            candidates.truncate(self.config.beam_width);

            let leader = candidates[0];
            if leader.flights_taken > best_flights {
                best_flights = leader.flights_taken;
                best_state = Some(leader);
            }
            beam = candidates;

            trace!(
                iteration = iterations,
                beam = beam.len(),
                best = best_flights,
                leader_time = %leader.time,
                "Beam iteration"
            );

            if best_flights > self.config.flights_ceiling {
                break StopReason::CeilingReached;
            }
        };

        debug!(
            best_flights,
            iterations,
            states_expanded,
            ?stop_reason,
            "Beam search complete"
        );

        Ok(PlanOutcome {
            best_flights,
            best_state,
            iterations,
            states_expanded,
            stop_reason,
        })
    }

    /// Successors of every beam entry, concatenated in beam order.
    fn expand(&self, beam: &[ItineraryState]) -> Vec<ItineraryState> {
        if self.config.parallel_expansion && beam.len() > 1 {
            beam.par_iter()
                .flat_map_iter(|state| self.successors(state))
                .collect()
        } else {
            beam.iter().flat_map(|state| self.successors(state)).collect()
        }
    }

    /// Up to `max_candidates_per_state` itineraries one flight on from `state`.
    fn successors(&self, state: &ItineraryState) -> Vec<ItineraryState> {
        let end = self.config.end;
        self.index
            .query(&state.airport, state.time)
            .iter()
            // arrival >= departure, so nothing past this point can land in time
            .take_while(|f| f.departure <= end)
            .filter(|f| f.arrival <= end)
            .take(self.config.max_candidates_per_state)
            .map(|f| state.take(f))
            .collect()
    }
}

#[cfg(test)]
#[path = "beam_tests.rs"]
mod tests;
