//! [`Contract`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{contract, Contract},
    infra::{
        database::{
            self,
            memory::{Error, Memory, Transaction},
        },
        Database,
    },
    read::contract::search,
};

impl Database<Select<By<Option<Contract>, contract::Id>>> for Memory {
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.read().await.contracts.get(&by.into_inner()).cloned())
    }
}

impl Database<Select<By<Option<Contract>, contract::Id>>> for Transaction {
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        select: Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.db.execute(select).await
    }
}

impl Database<Insert<contract::New>> for Memory {
    type Ok = Contract;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<contract::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let contract::New {
            tenant,
            property,
            monthly_rent,
            starts_on,
            ends_on,
        } = new;

        let mut state = self.write().await;
        state.last_contract_id += 1;
        let contract = Contract {
            id: state.last_contract_id.into(),
            tenant,
            property,
            monthly_rent,
            starts_on,
            ends_on,
            status: contract::Status::Active,
        };
        _ = state.contracts.insert(contract.id, contract.clone());

        Ok(contract)
    }
}

impl Database<Select<By<Vec<Contract>, search::Selector>>> for Memory {
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, search::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        let clauses = selector.clauses();

        let mut contracts = self
            .read()
            .await
            .contracts
            .values()
            .filter(|&c| clauses.iter().all(|is_match| is_match(c)))
            .cloned()
            .collect::<Vec<_>>();
        // Stable, so equal start dates stay in the insertion (ID) order.
        contracts.sort_by(|a, b| b.starts_on.cmp(&a.starts_on));

        Ok(contracts)
    }
}

impl Database<Update<contract::StatusChange>> for Transaction {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(change): Update<contract::StatusChange>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.db.write().await;
        state
            .contracts
            .get_mut(&change.contract_id)
            .ok_or_else(|| {
                tracerr::new!(database::Error::from(Error::ContractNotExists(
                    change.contract_id,
                )))
            })?
            .status = change.status;
        Ok(())
    }
}

impl Database<Lock<By<Contract, contract::Id>>> for Transaction {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Contract, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mutex = self.db.contract_mutex(by.into_inner()).await;
        let guard = mutex.lock_owned().await;
        self.guards.lock().await.push(guard);
        Ok(())
    }
}
