//! Domain types for the flight engine.
//!
//! This module contains the validated value types shared by every analysis
//! component. Codes enforce their format at construction time, so code that
//! receives them can trust their validity.

mod airport;
mod carrier;
mod flight;
mod time;

pub use airport::{AirportCode, InvalidAirportCode};
pub use carrier::{CarrierCode, InvalidCarrierCode};
pub use flight::{FlightRecord, ScheduleKey};
pub use time::{FlightTimes, TimeError, clock_time, parse_instant};
