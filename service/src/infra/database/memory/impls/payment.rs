//! [`Payment`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Amount,
};
use tracerr::Traced;

use crate::{
    domain::{contract, payment, Payment},
    infra::{
        database::{
            self,
            memory::{Error, Memory, Transaction},
        },
        Database,
    },
    read,
};

impl Database<Insert<payment::New>> for Transaction {
    type Ok = Payment;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<payment::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.db.write().await;

        // A `Payment` cannot exist without its `Contract`.
        if !state.contracts.contains_key(&new.contract_id) {
            return Err(tracerr::new!(database::Error::from(
                Error::ContractNotExists(new.contract_id),
            )));
        }

        state.last_payment_id += 1;
        let payment = Payment {
            id: state.last_payment_id.into(),
            contract_id: new.contract_id,
            paid_on: new.paid_on,
            amount: new.amount,
        };
        _ = state.payments.insert(payment.id, payment);

        Ok(payment)
    }
}

impl Database<Select<By<read::payment::Total, contract::Id>>> for Memory {
    type Ok = read::payment::Total;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::payment::Total, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .read()
            .await
            .payments
            .values()
            .filter(|p| p.contract_id == id)
            .map(|p| p.amount)
            .sum::<Amount>()
            .into())
    }
}

impl Database<Select<By<read::payment::Total, contract::Id>>> for Transaction {
    type Ok = read::payment::Total;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        select: Select<By<read::payment::Total, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.db.execute(select).await
    }
}
