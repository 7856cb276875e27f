//! Thread-safe ledger handle.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::schedule::ScheduleLedger;
use crate::domain::{AirportCode, ScheduleKey};

/// A cloneable handle to one [`ScheduleLedger`] shared between tasks.
///
/// Reallocations take the write lock and checks take the read lock, so a
/// check never observes a half-applied reallocation.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<ScheduleLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: ScheduleLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// See [`ScheduleLedger::reallocate`].
    pub async fn reallocate(&self, date: NaiveDate, flight_code: &str, substitute: AirportCode) {
        let mut guard = self.inner.write().await;
        guard.reallocate(date, flight_code, substitute);
    }

    /// See [`ScheduleLedger::check`].
    pub async fn check(&self, date: NaiveDate, flight_code: &str) -> bool {
        let guard = self.inner.read().await;
        guard.check(date, flight_code)
    }

    pub async fn current_origin(&self, key: &ScheduleKey) -> Option<AirportCode> {
        let guard = self.inner.read().await;
        guard.current_origin(key)
    }

    pub async fn reallocated_count(&self) -> usize {
        let guard = self.inner.read().await;
        guard.reallocated_count()
    }
}
