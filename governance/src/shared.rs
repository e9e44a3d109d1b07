//! Single-writer handle over the whole DAO.
//!
//! The coordinator, staking ledger and token ledger are mutated as one unit:
//! each operation runs to completion under one lock, so no caller ever sees a
//! vote counted before its stake was locked.

use crate::engine::GovernanceDao;
use crate::error::GovernanceError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub struct SharedDao {
    inner: Arc<Mutex<GovernanceDao>>,
}

impl SharedDao {
    pub fn new(dao: GovernanceDao) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dao)),
        }
    }

    /// Run one state-changing operation under the global lock. Rejections
    /// are logged with the operation name and returned unchanged.
    pub fn execute<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut GovernanceDao) -> Result<T, GovernanceError>,
    ) -> Result<T, GovernanceError> {
        let mut dao = self.lock();
        let result = f(&mut dao);
        if let Err(err) = &result {
            tracing::warn!(operation, %err, "operation rejected");
        }
        result
    }

    /// Run a read under the global lock.
    pub fn read<T>(&self, f: impl FnOnce(&GovernanceDao) -> T) -> T {
        f(&self.lock())
    }

    // Every operation validates before it writes, so a panicking listener
    // cannot leave the DAO half-updated; keep serving after a poison.
    fn lock(&self) -> MutexGuard<'_, GovernanceDao> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
