//! [`Command`] for recording a [`Payment`] against a [`Contract`].

use common::{
    date::InvalidRangeError,
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Amount, Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contract, payment, Contract, Payment},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for recording a [`Payment`] against a [`Contract`].
#[derive(Clone, Copy, Debug)]
pub struct RecordPayment {
    /// ID of the [`Contract`] to record the [`Payment`] against.
    pub contract_id: contract::Id,

    /// [`Amount`] being paid (must be strictly positive).
    pub amount: Amount,
}

impl<Db> Command<RecordPayment> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Contract, contract::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<payment::New>,
            Ok = Payment,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::payment::Total, contract::Id>>,
            Ok = read::payment::Total,
            Err = Traced<database::Error>,
        > + Database<
            Update<contract::StatusChange>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordPayment {
            contract_id,
            amount,
        } = cmd;

        if !amount.is_positive() {
            return Err(tracerr::new!(E::InvalidAmount(amount)));
        }

        let contract = self
            .database()
            .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())?;
        if contract.status == contract::Status::Completed {
            return Err(tracerr::new!(E::ContractAlreadyCompleted(
                contract_id
            )));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent payments deciding the status of the same
        // `Contract` upon a stale paid-to-date.
        tx.execute(Lock(By::new(contract.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let contract = tx
            .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(contract_id))
            .map_err(tracerr::wrap!())?;
        if contract.status == contract::Status::Completed {
            return Err(tracerr::new!(E::ContractAlreadyCompleted(
                contract_id
            )));
        }

        let today = Date::today();

        let payment = tx
            .execute(Insert(payment::New {
                contract_id: contract.id,
                paid_on: today.coerce(),
                amount,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let paid = tx
            .execute(Select(By::<read::payment::Total, _>::new(contract.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let status = contract
            .next_status(paid.into(), today)
            .map_err(|e| tracerr::new!(E::InvalidRange(e)))?;

        // Re-persisting an unchanged status is a no-op, so this step stays
        // retryable once the `Payment` is persisted.
        tx.execute(Update(contract::StatusChange {
            contract_id: contract.id,
            status,
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))
        .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if status != contract.status {
            log::debug!(
                "`Contract(id: {})` transitioned to `{status}`",
                contract.id,
            );
        }

        Ok(payment)
    }
}

/// Error of [`RecordPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Contract`] is already paid off fully.
    #[display("`Contract(id: {_0})` is already completed")]
    ContractAlreadyCompleted(#[error(not(source))] contract::Id),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Provided [`Amount`] is not strictly positive.
    #[display("payment amount of `{_0}` is not positive")]
    InvalidAmount(#[error(not(source))] Amount),

    /// [`Contract`] span is invalid, so its total obligation cannot be
    /// derived.
    #[display("cannot derive the `Contract` total: {_0}")]
    InvalidRange(InvalidRangeError),
}
