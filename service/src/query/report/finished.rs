//! [`Finished`] contracts summary definition.

use std::ops::RangeInclusive;

use common::{
    date::InvalidRangeError,
    operations::{By, Select},
    Amount, Date,
};
use derive_more::{Display, Error, From};
use itertools::Itertools as _;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Contract;
use crate::{
    domain::contract,
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] to summarize the fully paid [`Contract`]s started within a
/// period, grouped by the kind of the rented property.
///
/// Groups with no matching [`Contract`]s yield no rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Finished {
    /// Start of the period (inclusive).
    pub start: Date,

    /// End of the period (inclusive).
    pub end: Date,
}

/// Row in the output of the [`Finished`] [`Query`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Row {
    /// Kind of the rented property this row groups.
    pub property: contract::PropertyKind,

    /// Number of [`Contract`]s in the group.
    pub contracts: u64,

    /// Total revenue of the group: the sum of the full total obligations of
    /// its [`Contract`]s (not of the partial payments).
    pub revenue: Amount,
}

impl<Db> Query<Finished> for Service<Db>
where
    Db: Database<
        Select<
            By<
                Vec<read::report::FinishedContract>,
                RangeInclusive<contract::StartDate>,
            >,
        >,
        Ok = Vec<read::report::FinishedContract>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Row>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Finished { start, end }: Finished,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let range = RangeInclusive::new(start.coerce(), end.coerce());

        let sources = self
            .database()
            .execute(Select(
                By::<Vec<read::report::FinishedContract>, _>::new(range),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut rows = sources
            .into_iter()
            .into_group_map_by(|source| source.property)
            .into_iter()
            .map(|(property, group)| {
                let contracts =
                    u64::try_from(group.len()).expect("infallible");
                let revenue = group
                    .iter()
                    .map(read::report::FinishedContract::revenue)
                    .sum::<Result<Amount, _>>()
                    .map_err(|e| tracerr::new!(E::InvalidRange(e)))?;

                Ok(Row {
                    property,
                    contracts,
                    revenue,
                })
            })
            .collect::<Result<Vec<_>, Traced<E>>>()?;
        rows.sort_unstable_by_key(|row| row.property);

        Ok(rows)
    }
}

/// Error of [`Finished`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Stored [`Contract`] span is invalid, so its total obligation cannot
    /// be derived.
    #[display("cannot derive a `Contract` total: {_0}")]
    InvalidRange(InvalidRangeError),
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::{operations::Insert, Amount, Date};

    use crate::{
        command::RecordPayment,
        domain::contract,
        infra::{Database as _, Memory},
        Config, Query as _, Service,
    };

    use super::{Finished, Row};

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    async fn seed(
        service: &Service<Memory>,
        db: &Memory,
        property: contract::PropertyKind,
        rent: &str,
        years_from_today: (i32, i32),
        paid: Option<&str>,
    ) -> contract::Id {
        let (from, to) = years_from_today;
        let created = db
            .execute(Insert(contract::New {
                tenant: contract::TenantName::new("Mateo").unwrap(),
                property,
                monthly_rent: amount(rent),
                starts_on: Date::today().add_years(from).unwrap().coerce(),
                ends_on: Date::today().add_years(to).unwrap().coerce(),
            }))
            .await
            .unwrap();
        if let Some(paid) = paid {
            _ = service
                .execute(RecordPayment {
                    contract_id: created.id,
                    amount: amount(paid),
                })
                .await
                .unwrap();
        }
        created.id
    }

    fn whole_period() -> Finished {
        Finished {
            start: Date::today().add_years(-3).unwrap(),
            end: Date::today().add_years(3).unwrap(),
        }
    }

    #[tokio::test]
    async fn reports_single_completed_contract() {
        let db = Memory::default();
        let service = Service::new(Config::default(), db.clone());
        // 12 months of `700` = `8400`, paid off fully.
        _ = seed(
            &service,
            &db,
            contract::PropertyKind::House,
            "700",
            (-2, -1),
            Some("8400"),
        )
        .await;

        let rows = service.execute(whole_period()).await.unwrap();

        assert_eq!(
            rows,
            vec![Row {
                property: contract::PropertyKind::House,
                contracts: 1,
                revenue: amount("8400"),
            }],
        );
    }

    #[tokio::test]
    async fn groups_by_property_kind() {
        let db = Memory::default();
        let service = Service::new(Config::default(), db.clone());
        for (property, rent) in [
            (contract::PropertyKind::Apartment, "250"),
            (contract::PropertyKind::House, "700"),
            (contract::PropertyKind::House, "500"),
        ] {
            // 12-month span, so the obligation is `rent * 12`.
            _ = seed(
                &service,
                &db,
                property,
                rent,
                (-2, -1),
                Some("10000"),
            )
            .await;
        }

        let rows = service.execute(whole_period()).await.unwrap();

        assert_eq!(
            rows,
            vec![
                Row {
                    property: contract::PropertyKind::House,
                    contracts: 2,
                    revenue: amount("14400"),
                },
                Row {
                    property: contract::PropertyKind::Apartment,
                    contracts: 1,
                    revenue: amount("3000"),
                },
            ],
        );
    }

    #[tokio::test]
    async fn skips_unfinished_and_out_of_period_contracts() {
        let db = Memory::default();
        let service = Service::new(Config::default(), db.clone());
        // Still active.
        _ = seed(
            &service,
            &db,
            contract::PropertyKind::House,
            "500",
            (-1, 1),
            Some("100"),
        )
        .await;
        // Paid off fully, but started outside of the period.
        _ = seed(
            &service,
            &db,
            contract::PropertyKind::House,
            "500",
            (-5, -4),
            Some("6000"),
        )
        .await;

        let rows = service.execute(whole_period()).await.unwrap();

        assert_eq!(rows, vec![]);
    }
}
