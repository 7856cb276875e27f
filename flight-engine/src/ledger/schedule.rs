//! Composite-keyed ledger of reallocated flights.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::code::FlightCode;
use crate::domain::{AirportCode, FlightRecord, ScheduleKey};

#[derive(Debug, Clone)]
struct LedgerEntry {
    record: FlightRecord,
    /// Origin after reallocation. The record itself is never rewritten.
    origin_override: Option<AirportCode>,
}

/// Tracks which scheduled flights have been moved to a substitute airport.
///
/// Nothing here fails: unknown flights, reallocated flights and malformed
/// flight codes all come back as `false` from [`check`](Self::check).
///
/// Mutation goes through `&mut self`, so a single owner is the writer. Wrap
/// the ledger in [`SharedLedger`](super::SharedLedger) to use it from
/// several tasks.
#[derive(Debug, Clone)]
pub struct ScheduleLedger {
    substitute: AirportCode,
    entries: HashMap<ScheduleKey, LedgerEntry>,
    reallocated: HashSet<ScheduleKey>,
}

impl ScheduleLedger {
    /// Index `records` by schedule key.
    ///
    /// Records already departing from `substitute` count as reallocated. When
    /// two records share a key the later one wins.
    pub fn load(records: &[FlightRecord], substitute: AirportCode) -> Self {
        let mut entries = HashMap::with_capacity(records.len());
        let mut reallocated = HashSet::new();

        for record in records {
            let key = record.schedule_key();
            if record.origin() == substitute {
                reallocated.insert(key);
            }
            entries.insert(
                key,
                LedgerEntry {
                    record: record.clone(),
                    origin_override: None,
                },
            );
        }

        debug!(
            flights = entries.len(),
            pre_reallocated = reallocated.len(),
            substitute = %substitute,
            "Loaded schedule ledger"
        );

        Self {
            substitute,
            entries,
            reallocated,
        }
    }

    /// Mark the flight `flight_code` on `date` as moved to `substitute`.
    ///
    /// The key is marked even if no such flight was loaded. A carrier part
    /// that is not a valid carrier code names no representable flight, so
    /// nothing is marked.
    pub fn reallocate(&mut self, date: NaiveDate, flight_code: &str, substitute: AirportCode) {
        let code = FlightCode::parse(flight_code);
        match code.schedule_key(date) {
            Some(key) => self.reallocate_key(key, substitute),
            None => debug!(code = %code, %date, "Ignoring reallocation of unrepresentable flight"),
        }
    }

    /// Mark `key` as moved to `substitute`.
    pub fn reallocate_key(&mut self, key: ScheduleKey, substitute: AirportCode) {
        self.reallocated.insert(key);
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.origin_override = Some(substitute);
        }
        trace!(key = %key, substitute = %substitute, "Reallocated flight");
    }

    /// True only if the flight is known and has not been reallocated.
    pub fn check(&self, date: NaiveDate, flight_code: &str) -> bool {
        FlightCode::parse(flight_code)
            .schedule_key(date)
            .is_some_and(|key| self.check_key(&key))
    }

    /// Key-based form of [`check`](Self::check).
    pub fn check_key(&self, key: &ScheduleKey) -> bool {
        self.entries.contains_key(key) && !self.reallocated.contains(key)
    }

    pub fn is_reallocated(&self, key: &ScheduleKey) -> bool {
        self.reallocated.contains(key)
    }

    /// Origin the flight departs from now, taking reallocation into account.
    pub fn current_origin(&self, key: &ScheduleKey) -> Option<AirportCode> {
        self.entries
            .get(key)
            .map(|e| e.origin_override.unwrap_or(e.record.origin()))
    }

    /// The loaded record for `key`, as originally scheduled.
    pub fn record(&self, key: &ScheduleKey) -> Option<&FlightRecord> {
        self.entries.get(key).map(|e| &e.record)
    }

    /// The substitute airport the ledger was loaded with.
    pub fn substitute(&self) -> AirportCode {
        self.substitute
    }

    /// Number of keys marked reallocated, including unknown ones.
    pub fn reallocated_count(&self) -> usize {
        self.reallocated.len()
    }

    /// Number of distinct scheduled flights loaded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
