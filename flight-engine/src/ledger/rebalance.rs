//! Runway-proportional redistribution of departures.
//!
//! When a substitute airport opens, departures are spread across all airports
//! in proportion to their runway counts. The substitute's share is filled by
//! taking surplus departures from existing airports, in the order given.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::AirportCode;

/// Error from rebalance planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RebalanceError {
    /// A departure airport or the substitute has no runway entry
    #[error("no runway count for {0}")]
    MissingRunways(AirportCode),

    /// Zero runways cannot receive a proportional share
    #[error("airport {0} has zero runways")]
    ZeroRunways(AirportCode),
}

/// Outcome of rebalance planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebalancePlan {
    /// Target departures per airport, substitute included.
    pub targets: BTreeMap<AirportCode, u64>,

    /// Departures moved to the substitute from each donor, in donor order.
    pub moved_from: Vec<(AirportCode, u64)>,

    /// Total departures moved to the substitute.
    pub total_moved: u64,

    /// Part of the substitute's target no donor had surplus for.
    pub unmet: u64,
}

/// Plan the move of departures to `substitute`.
///
/// * `departures` - current departure counts, in donor order. The substitute
///   may appear with its current count; it is never a donor.
/// * `runways` - runway count of every airport, substitute included.
///
/// Targets are `runways * total / total_runways`, rounded half up, with the
/// substitute absorbing the rounding difference so targets sum to the total.
pub fn plan_rebalance(
    departures: &[(AirportCode, u64)],
    runways: &BTreeMap<AirportCode, u32>,
    substitute: AirportCode,
) -> Result<RebalancePlan, RebalanceError> {
    for (airport, _) in departures {
        if !runways.contains_key(airport) {
            return Err(RebalanceError::MissingRunways(*airport));
        }
    }
    if !runways.contains_key(&substitute) {
        return Err(RebalanceError::MissingRunways(substitute));
    }
    if let Some((airport, _)) = runways.iter().find(|&(_, &n)| n == 0) {
        return Err(RebalanceError::ZeroRunways(*airport));
    }

    let total: u64 = departures.iter().map(|(_, n)| n).sum();
    let total_runways: u64 = runways.values().map(|&n| u64::from(n)).sum();
    let per_runway = total as f64 / total_runways as f64;

    let mut targets: BTreeMap<AirportCode, u64> = runways
        .iter()
        .map(|(&airport, &n)| (airport, (f64::from(n) * per_runway).round() as u64))
        .collect();

    let allocated: u64 = targets.values().sum();
    let diff = total as i64 - allocated as i64;
    if let Some(target) = targets.get_mut(&substitute) {
        *target = target.saturating_add_signed(diff);
    }

    let substitute_target = targets.get(&substitute).copied().unwrap_or(0);
    let substitute_current = departures
        .iter()
        .find(|(airport, _)| *airport == substitute)
        .map(|(_, n)| *n)
        .unwrap_or(0);
    let mut needed = substitute_target.saturating_sub(substitute_current);

    let mut moved_from = Vec::new();
    let mut total_moved = 0;
    for &(airport, count) in departures {
        if airport == substitute || needed == 0 {
            continue;
        }
        let target = targets.get(&airport).copied().unwrap_or(0);
        let take = count.saturating_sub(target).min(needed);
        if take > 0 {
            moved_from.push((airport, take));
            total_moved += take;
            needed -= take;
        }
    }

    debug!(total, total_moved, unmet = needed, "Planned rebalance");

    Ok(RebalancePlan {
        targets,
        moved_from,
        total_moved,
        unmet: needed,
    })
}
