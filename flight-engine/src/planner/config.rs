//! Configuration for the beam-search planner.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use super::beam::PlanError;
use crate::domain::AirportCode;

/// Default beam width: itineraries kept between iterations.
pub const DEFAULT_BEAM_WIDTH: usize = 200;

/// Default number of departures expanded per itinerary per iteration.
pub const DEFAULT_MAX_CANDIDATES: usize = 30;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Default early-stop ceiling on the best flight count.
pub const DEFAULT_FLIGHTS_CEILING: usize = 2_000;

/// Configuration parameters for one planner run.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Instant every itinerary starts at.
    pub start: NaiveDateTime,

    /// No flight may arrive after this instant.
    pub end: NaiveDateTime,

    /// Airports an itinerary may start from.
    pub start_airports: Vec<AirportCode>,

    /// Number of itineraries kept after each iteration (K).
    pub beam_width: usize,

    /// Departures considered per itinerary per iteration (M).
    /// Flights that would land after `end` do not count toward this limit.
    pub max_candidates_per_state: usize,

    /// Hard cap on iterations.
    pub max_iterations: usize,

    /// Stop once the best flight count exceeds this.
    pub flights_ceiling: usize,

    /// Expand itineraries on the rayon pool.
    pub parallel_expansion: bool,

    /// Wall-clock budget for the run. `None` means unbounded.
    pub time_budget: Option<Duration>,
}

impl PlannerConfig {
    /// Create a configuration for the given window with default tuning.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, start_airports: Vec<AirportCode>) -> Self {
        Self {
            start,
            end,
            start_airports,
            ..Self::default()
        }
    }

    /// Check the tuning parameters can drive a search.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.beam_width == 0 {
            return Err(PlanError::InvalidConfig("beam width must be at least 1"));
        }
        if self.max_candidates_per_state == 0 {
            return Err(PlanError::InvalidConfig(
                "candidates per state must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    /// The 2013 New York window: from 1 January 05:00 to the last minute of
    /// the year, starting at EWR, LGA and JFK.
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2013, 1, 1)
            .and_then(|d| d.and_hms_opt(5, 0, 0))
            .unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2013, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 0))
            .unwrap_or_default();
        let start_airports = ["EWR", "LGA", "JFK"]
            .iter()
            .filter_map(|s| AirportCode::parse(s).ok())
            .collect();

        Self {
            start,
            end,
            start_airports,
            beam_width: DEFAULT_BEAM_WIDTH,
            max_candidates_per_state: DEFAULT_MAX_CANDIDATES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            flights_ceiling: DEFAULT_FLIGHTS_CEILING,
            parallel_expansion: true,
            time_budget: None,
        }
    }
}
