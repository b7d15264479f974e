//! Report-related [`Database`] implementations.

use std::{collections::BTreeMap, ops::RangeInclusive};

use common::{
    operations::{By, Select},
    Amount,
};
use tracerr::Traced;

use crate::{
    domain::contract,
    infra::{
        database::{self, memory::Memory},
        Database,
    },
    read,
};

impl
    Database<
        Select<
            By<
                Vec<read::report::FinishedContract>,
                RangeInclusive<contract::StartDate>,
            >,
        >,
    > for Memory
{
    type Ok = Vec<read::report::FinishedContract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Vec<read::report::FinishedContract>,
                RangeInclusive<contract::StartDate>,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let range = by.into_inner();
        Ok(self
            .read()
            .await
            .contracts
            .values()
            .filter(|c| {
                c.status == contract::Status::Completed
                    && range.contains(&c.starts_on)
            })
            .map(|c| read::report::FinishedContract {
                property: c.property,
                monthly_rent: c.monthly_rent,
                starts_on: c.starts_on,
                ends_on: c.ends_on,
            })
            .collect())
    }
}

impl Database<Select<By<Vec<read::report::UnfinishedContract>, ()>>>
    for Memory
{
    type Ok = Vec<read::report::UnfinishedContract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<read::report::UnfinishedContract>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.read().await;

        // Payment-driven: a `Contract` with no `Payment`s yields no row.
        let mut paid = BTreeMap::<contract::Id, Amount>::new();
        for p in state.payments.values() {
            *paid.entry(p.contract_id).or_insert(Amount::ZERO) += p.amount;
        }

        Ok(paid
            .into_iter()
            .filter_map(|(id, total)| {
                let c = state.contracts.get(&id)?;
                (c.status != contract::Status::Completed).then(|| {
                    read::report::UnfinishedContract {
                        contract_id: id,
                        monthly_rent: c.monthly_rent,
                        starts_on: c.starts_on,
                        ends_on: c.ends_on,
                        paid: total.into(),
                    }
                })
            })
            .collect())
    }
}
