//! Flight records and their schedule identity.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::airport::AirportCode;
use super::carrier::CarrierCode;
use super::time::FlightTimes;

/// Identity of one scheduled flight instance: (date, carrier, flight number).
///
/// Two records with the same key describe the same scheduled flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScheduleKey {
    pub date: NaiveDate,
    pub carrier: CarrierCode,
    pub flight_number: u32,
}

impl ScheduleKey {
    /// Create a new schedule key.
    pub fn new(date: NaiveDate, carrier: CarrierCode, flight_number: u32) -> Self {
        Self {
            date,
            carrier,
            flight_number,
        }
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.date, self.carrier, self.flight_number)
    }
}

/// One scheduled flight.
///
/// Records are immutable once built. Reallocation to another airport is
/// tracked by [`ScheduleLedger`](crate::ledger::ScheduleLedger), never by
/// rewriting the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRecord {
    date: NaiveDate,
    carrier: CarrierCode,
    flight_number: u32,
    origin: AirportCode,
    destination: AirportCode,
    distance: u32,
    tail_number: Option<String>,
    times: FlightTimes,
}

impl FlightRecord {
    /// Create a record with no timestamps.
    pub fn new(
        date: NaiveDate,
        carrier: CarrierCode,
        flight_number: u32,
        origin: AirportCode,
        destination: AirportCode,
        distance: u32,
    ) -> Self {
        Self {
            date,
            carrier,
            flight_number,
            origin,
            destination,
            distance,
            tail_number: None,
            times: FlightTimes::default(),
        }
    }

    /// Attach derived departure/arrival instants.
    pub fn with_times(mut self, times: FlightTimes) -> Self {
        self.times = times;
        self
    }

    /// Attach derived times computed from raw `hhmm` schedule fields.
    pub fn with_schedule(
        self,
        dep_time: Option<u32>,
        arr_time: Option<u32>,
        air_time_mins: Option<u32>,
    ) -> Self {
        let times = FlightTimes::derive(self.date, dep_time, arr_time, air_time_mins);
        self.with_times(times)
    }

    /// Attach the aircraft tail number.
    pub fn with_tail_number(mut self, tail_number: impl Into<String>) -> Self {
        self.tail_number = Some(tail_number.into());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn carrier(&self) -> CarrierCode {
        self.carrier
    }

    pub fn flight_number(&self) -> u32 {
        self.flight_number
    }

    /// Origin airport as scheduled (before any reallocation).
    pub fn origin(&self) -> AirportCode {
        self.origin
    }

    pub fn destination(&self) -> AirportCode {
        self.destination
    }

    /// Great-circle distance in miles.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn tail_number(&self) -> Option<&str> {
        self.tail_number.as_deref()
    }

    pub fn times(&self) -> FlightTimes {
        self.times
    }

    pub fn departure(&self) -> Option<NaiveDateTime> {
        self.times.departure()
    }

    pub fn arrival(&self) -> Option<NaiveDateTime> {
        self.times.arrival()
    }

    /// The key identifying this scheduled flight.
    pub fn schedule_key(&self) -> ScheduleKey {
        ScheduleKey::new(self.date, self.carrier, self.flight_number)
    }
}

impl fmt::Display for FlightRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}->{} ({} mi)",
            self.date, self.carrier, self.flight_number, self.origin, self.destination, self.distance
        )?;
        if let Some((dep, arr)) = self.times.resolved() {
            write!(f, " {} -> {}", dep.format("%H:%M"), arr.format("%H:%M"))?;
        }
        Ok(())
    }
}
