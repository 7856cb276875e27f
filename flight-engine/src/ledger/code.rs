//! Flight code strings of the form `CARRIER-NUMBER`.

use std::fmt;

use chrono::NaiveDate;

use crate::domain::{CarrierCode, ScheduleKey};

/// A parsed `CARRIER-NUMBER` flight code such as `AA-401`.
///
/// Parsing never fails. Input without a `-` is taken as a bare carrier with
/// flight number 0, and a number that does not parse also becomes 0.
///
/// # Examples
///
/// ```
/// use flight_engine::ledger::FlightCode;
///
/// let code = FlightCode::parse("AA-401");
/// assert_eq!(code.carrier(), "AA");
/// assert_eq!(code.number(), 401);
///
/// let bare = FlightCode::parse("B6");
/// assert_eq!(bare.carrier(), "B6");
/// assert_eq!(bare.number(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightCode {
    carrier: String,
    number: u32,
}

impl FlightCode {
    /// Parse a flight code, falling back as described on the type.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.split_once('-') {
            Some((carrier, rest)) => {
                // Anything after a second separator is ignored ("AA-401-X").
                let number = rest.split('-').next().unwrap_or_default();
                Self {
                    carrier: carrier.to_string(),
                    number: number.trim().parse().unwrap_or(0),
                }
            }
            None => Self {
                carrier: s.to_string(),
                number: 0,
            },
        }
    }

    /// Build a code from an already-validated carrier.
    pub fn new(carrier: CarrierCode, number: u32) -> Self {
        Self {
            carrier: carrier.as_str().to_string(),
            number,
        }
    }

    /// The carrier part, as written.
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// The schedule key on `date`, if the carrier part is a valid carrier.
    pub fn schedule_key(&self, date: NaiveDate) -> Option<ScheduleKey> {
        let carrier = CarrierCode::parse(&self.carrier).ok()?;
        Some(ScheduleKey::new(date, carrier, self.number))
    }
}

impl fmt::Display for FlightCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.carrier, self.number)
    }
}
