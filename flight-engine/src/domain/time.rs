//! Flight time handling.
//!
//! Schedules record local clock times as `hhmm` integers (`517` is 05:17).
//! Out-of-range values such as `2400` are clamped to the last minute of the
//! day. This module turns those into date-aware instants and handles flights
//! that land after midnight.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Error returned when parsing an invalid instant string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid instant '{input}': {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

/// Convert an `hhmm` clock value to a time of day.
///
/// Out-of-range components are clamped rather than rejected: hours into
/// 0-23 and minutes into 0-59. In particular `2400` becomes 23:59.
///
/// # Examples
///
/// ```
/// use flight_engine::domain::clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(clock_time(517), NaiveTime::from_hms_opt(5, 17, 0).unwrap());
/// assert_eq!(clock_time(2400), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
/// ```
pub fn clock_time(hhmm: u32) -> NaiveTime {
    let hour = (hhmm / 100).min(23);
    let minute = (hhmm % 100).min(59);
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Derived departure and arrival instants of one flight.
///
/// When both are present, `arrival >= departure`. Both constructors
/// uphold this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FlightTimes {
    departure: Option<NaiveDateTime>,
    arrival: Option<NaiveDateTime>,
}

impl FlightTimes {
    /// Times from known instants.
    ///
    /// Fails if both are given and the arrival precedes the departure.
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_engine::domain::FlightTimes;
    /// use chrono::NaiveDate;
    ///
    /// let dep = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap().and_hms_opt(6, 40, 0).unwrap();
    /// let arr = dep - chrono::Duration::minutes(40);
    ///
    /// assert!(FlightTimes::new(Some(dep), Some(dep)).is_ok());
    /// assert!(FlightTimes::new(Some(dep), Some(arr)).is_err());
    /// ```
    pub fn new(
        departure: Option<NaiveDateTime>,
        arrival: Option<NaiveDateTime>,
    ) -> Result<Self, TimeError> {
        if let (Some(dep), Some(arr)) = (departure, arrival) {
            if arr < dep {
                return Err(TimeError {
                    input: format!("{dep} -> {arr}"),
                    reason: "arrival precedes departure",
                });
            }
        }
        Ok(Self { departure, arrival })
    }

    /// Derive instants from the raw schedule fields of a flight.
    ///
    /// * departure = `date` + `dep_time`
    /// * arrival = departure + `air_time` minutes, when both are known
    /// * otherwise arrival = `date` + `arr_time`, moved to the next day if it
    ///   would precede the departure
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_engine::domain::FlightTimes;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    ///
    /// // Red-eye without air time: arrival rolls to the next day
    /// let times = FlightTimes::derive(date, Some(2330), Some(115), None);
    /// assert_eq!(times.arrival().unwrap().date(), date.succ_opt().unwrap());
    /// ```
    pub fn derive(
        date: NaiveDate,
        dep_time: Option<u32>,
        arr_time: Option<u32>,
        air_time_mins: Option<u32>,
    ) -> Self {
        let departure = dep_time.map(|hhmm| date.and_time(clock_time(hhmm)));

        let arrival = match (departure, air_time_mins, arr_time) {
            (Some(dep), Some(air), _) => dep.checked_add_signed(Duration::minutes(air.into())),
            (dep, _, Some(hhmm)) => {
                let naive = date.and_time(clock_time(hhmm));
                match dep {
                    Some(dep) if naive < dep => naive.checked_add_signed(Duration::days(1)),
                    _ => Some(naive),
                }
            }
            _ => None,
        };

        Self { departure, arrival }
    }

    pub fn departure(&self) -> Option<NaiveDateTime> {
        self.departure
    }

    pub fn arrival(&self) -> Option<NaiveDateTime> {
        self.arrival
    }

    /// Both instants, if the flight can take part in time-sensitive search.
    pub fn resolved(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.departure?, self.arrival?))
    }

    /// Flight duration, if both instants are known.
    pub fn duration(&self) -> Option<Duration> {
        self.resolved().map(|(dep, arr)| arr - dep)
    }
}

/// Parse an instant written as `YYYY-MM-DDTHH:MM` (a space also works in
/// place of the `T`, and seconds are optional).
///
/// # Examples
///
/// ```
/// use flight_engine::domain::parse_instant;
///
/// let t = parse_instant("2013-01-01T05:00").unwrap();
/// assert_eq!(t.to_string(), "2013-01-01 05:00:00");
/// assert!(parse_instant("2013-13-01T05:00").is_err());
/// ```
pub fn parse_instant(s: &str) -> Result<NaiveDateTime, TimeError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    let trimmed = s.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TimeError {
            input: s.to_string(),
            reason: "expected YYYY-MM-DDTHH:MM",
        })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Derived arrival never precedes departure.
        #[test]
        fn arrival_not_before_departure(
            dep in 0u32..2400,
            arr in 0u32..2400,
            air in proptest::option::of(0u32..900),
        ) {
            let date = NaiveDate::from_ymd_opt(2013, 6, 15).unwrap();
            let times = FlightTimes::derive(date, Some(dep), Some(arr), air);
            let (d, a) = times.resolved().unwrap();
            prop_assert!(a >= d);
        }
    }
}
