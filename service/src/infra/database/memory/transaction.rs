//! [`Transaction`] client definition.

use common::operations::Commit;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracerr::Traced;

use crate::infra::{database, Database};

use super::Memory;

/// Transactional client of the [`Memory`] database.
///
/// Write operations apply to the committed records right away; what the
/// [`Transaction`] holds is the per-contract locks acquired via the
/// [`Lock`] operation. [`Commit`] releases them, and so does dropping the
/// [`Transaction`] when an operation fails mid-way, leaving already
/// persisted records in place for an idempotent retry.
///
/// [`Lock`]: common::operations::Lock
#[derive(Debug)]
pub struct Transaction {
    /// [`Memory`] database this [`Transaction`] operates upon.
    pub(super) db: Memory,

    /// Guards of the locks acquired by this [`Transaction`].
    pub(super) guards: Mutex<Vec<OwnedMutexGuard<()>>>,
}

impl Transaction {
    /// Creates a new [`Transaction`] upon the provided [`Memory`] database.
    pub(super) fn new(db: Memory) -> Self {
        Self {
            db,
            guards: Mutex::new(Vec::new()),
        }
    }
}

impl Database<Commit> for Transaction {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.guards.lock().await.clear();
        Ok(())
    }
}
