//! Reallocation of scheduled flights to a substitute airport.
//!
//! [`ScheduleLedger`] answers "is this scheduled flight still operating from
//! its original airport?". [`plan_rebalance`] works out how many departures
//! have to move when the substitute opens.

mod code;
mod rebalance;
mod schedule;
mod shared;

pub use code::FlightCode;
pub use rebalance::{RebalanceError, RebalancePlan, plan_rebalance};
pub use schedule::ScheduleLedger;
pub use shared::SharedLedger;
