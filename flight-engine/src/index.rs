//! Temporal flight index for departure-time range queries.
//!
//! Flights are grouped by origin airport and sorted by departure instant, so
//! "which flights leave X at or after t?" is a binary search followed by a
//! slice borrow. The beam planner asks this once per state per iteration.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::domain::{AirportCode, FlightRecord, ScheduleKey};

/// The time-resolved projection of a [`FlightRecord`] kept by the index.
///
/// `position` is the record's offset in the slice the index was built from,
/// so callers can get back to the full record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimedFlight {
    pub key: ScheduleKey,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub position: usize,
}

impl TimedFlight {
    /// Project a record, if both of its instants are known.
    fn from_record(position: usize, record: &FlightRecord) -> Option<Self> {
        let (departure, arrival) = record.times().resolved()?;
        Some(Self {
            key: record.schedule_key(),
            origin: record.origin(),
            destination: record.destination(),
            departure,
            arrival,
            position,
        })
    }
}

/// Flights grouped by origin, each group sorted ascending by departure.
///
/// Read-only after construction and safe to share between threads.
#[derive(Debug, Default)]
pub struct TemporalFlightIndex {
    by_origin: HashMap<AirportCode, Vec<TimedFlight>>,
    skipped: usize,
    len: usize,
}

impl TemporalFlightIndex {
    /// Build the index from every record with resolvable timestamps.
    ///
    /// Records missing a departure or arrival are left out and counted in
    /// [`skipped`](Self::skipped). Sorting is stable: flights departing at
    /// the same instant keep their input order.
    pub fn build(records: &[FlightRecord]) -> Self {
        Self::build_filtered(records, |_| true)
    }

    /// Build the index keeping only flights departing at or after `earliest`.
    pub fn build_within(records: &[FlightRecord], earliest: NaiveDateTime) -> Self {
        Self::build_filtered(records, |flight| flight.departure >= earliest)
    }

    fn build_filtered(records: &[FlightRecord], keep: impl Fn(&TimedFlight) -> bool) -> Self {
        let mut by_origin: HashMap<AirportCode, Vec<TimedFlight>> = HashMap::new();
        let mut skipped = 0;
        let mut len = 0;

        for (position, record) in records.iter().enumerate() {
            let Some(flight) = TimedFlight::from_record(position, record) else {
                skipped += 1;
                continue;
            };
            if !keep(&flight) {
                continue;
            }
            by_origin.entry(flight.origin).or_default().push(flight);
            len += 1;
        }

        for flights in by_origin.values_mut() {
            flights.sort_by_key(|f| f.departure);
        }

        debug!(
            origins = by_origin.len(),
            indexed = len,
            skipped,
            "Built temporal flight index"
        );

        Self {
            by_origin,
            skipped,
            len,
        }
    }

    /// Flights from `origin` departing at or after `after`, ascending.
    ///
    /// The result is a suffix of [`flights_from`](Self::flights_from). An
    /// unknown origin yields an empty slice.
    pub fn query(&self, origin: &AirportCode, after: NaiveDateTime) -> &[TimedFlight] {
        let flights = self.flights_from(origin);
        let start = flights.partition_point(|f| f.departure < after);
        &flights[start..]
    }

    /// All indexed flights from `origin`, ascending by departure.
    pub fn flights_from(&self, origin: &AirportCode) -> &[TimedFlight] {
        self.by_origin
            .get(origin)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Origins with at least one indexed flight.
    pub fn origins(&self) -> impl Iterator<Item = &AirportCode> {
        self.by_origin.keys()
    }

    /// Number of indexed flights.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of records left out for missing timestamps.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
