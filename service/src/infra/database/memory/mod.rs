//! In-memory [`Database`] implementation.
//!
//! Backs the record-store boundary with plain collections: committed records
//! live under a read-write lock, and a per-[`Contract`] mutex registry backs
//! the [`Lock`] operation, serializing status decisions against the same
//! [`Contract`].
//!
//! [`Lock`]: common::operations::Lock

mod impls;
pub mod transaction;

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use common::operations::Transact;
use derive_more::{Display, Error as StdError};
use tokio::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracerr::Traced;

use crate::{
    domain::{contract, payment, Contract, Payment},
    infra::{database, Database},
};

pub use self::transaction::Transaction;

/// In-memory [`Database`].
///
/// Cheaply clonable handle to the shared storage.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Inner representation of this [`Memory`] database.
    inner: Arc<Inner>,
}

/// Inner representation of the [`Memory`] database.
#[derive(Debug, Default)]
struct Inner {
    /// Committed records.
    state: RwLock<State>,

    /// Per-[`Contract`] mutexes backing the [`Lock`] operation.
    ///
    /// [`Lock`]: common::operations::Lock
    locks: Mutex<HashMap<contract::Id, Arc<Mutex<()>>>>,
}

/// Committed records of the [`Memory`] database.
#[derive(Debug, Default)]
struct State {
    /// Stored [`Contract`]s, by ID.
    contracts: BTreeMap<contract::Id, Contract>,

    /// Stored [`Payment`]s, by ID.
    payments: BTreeMap<payment::Id, Payment>,

    /// Last [`contract::Id`] assigned on insertion.
    last_contract_id: i64,

    /// Last [`payment::Id`] assigned on insertion.
    last_payment_id: i64,
}

impl Memory {
    /// Acquires a shared read access to the committed records.
    async fn read(&self) -> RwLockReadGuard<'_, State> {
        self.inner.state.read().await
    }

    /// Acquires an exclusive write access to the committed records.
    async fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.state.write().await
    }

    /// Returns the mutex guarding the [`Contract`] with the provided ID,
    /// registering it on first use.
    async fn contract_mutex(&self, id: contract::Id) -> Arc<Mutex<()>> {
        self.inner.locks.lock().await.entry(id).or_default().clone()
    }
}

impl Database<Transact> for Memory {
    type Ok = Transaction;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Transaction::new(self.clone()))
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Contract`] referenced by the operation does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),
}
