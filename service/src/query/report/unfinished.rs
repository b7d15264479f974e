//! [`Unfinished`] contracts summary definition.

use common::{
    date::InvalidRangeError,
    operations::{By, Select},
    Amount,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Contract, Payment};
use crate::{
    domain::contract,
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] to summarize the expected versus paid amounts of the not yet
/// fully paid [`Contract`]s.
///
/// Driven by the recorded [`Payment`]s, so a [`Contract`] nothing was paid
/// against yet doesn't appear in the output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Unfinished;

/// Row in the output of the [`Unfinished`] [`Query`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Row {
    /// ID of the [`Contract`] this row describes.
    pub contract_id: contract::Id,

    /// Expected total obligation of the [`Contract`].
    pub expected: Amount,

    /// [`Amount`] actually paid against the [`Contract`] so far.
    pub actual: Amount,
}

impl<Db> Query<Unfinished> for Service<Db>
where
    Db: Database<
        Select<By<Vec<read::report::UnfinishedContract>, ()>>,
        Ok = Vec<read::report::UnfinishedContract>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Row>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Unfinished) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let sources = self
            .database()
            .execute(Select(
                By::<Vec<read::report::UnfinishedContract>, _>::new(()),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut rows = sources
            .into_iter()
            .map(|source| {
                Ok(Row {
                    contract_id: source.contract_id,
                    expected: source
                        .expected()
                        .map_err(|e| tracerr::new!(E::InvalidRange(e)))?,
                    actual: source.paid.into(),
                })
            })
            .collect::<Result<Vec<_>, Traced<E>>>()?;
        rows.sort_unstable_by_key(|row| row.contract_id);

        Ok(rows)
    }
}

/// Error of [`Unfinished`] [`Query`] execution.
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

    use super::{Row, Unfinished};

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    async fn seed(
        service: &Service<Memory>,
        db: &Memory,
        years_from_today: (i32, i32),
        payments: &[&str],
    ) -> contract::Id {
        let (from, to) = years_from_today;
        let created = db
            .execute(Insert(contract::New {
                tenant: contract::TenantName::new("Mateo").unwrap(),
                property: contract::PropertyKind::House,
                monthly_rent: amount("500"),
                starts_on: Date::today().add_years(from).unwrap().coerce(),
                ends_on: Date::today().add_years(to).unwrap().coerce(),
            }))
            .await
            .unwrap();
        for &paid in payments {
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

    #[tokio::test]
    async fn reports_expected_versus_paid_by_contract_id() {
        let db = Memory::default();
        let service = Service::new(Config::default(), db.clone());
        // 36 months of `500` = `18000` expected, `10` paid, stays active.
        let active = seed(&service, &db, (-2, 1), &["4", "6"]).await;
        // 12 months of `500` = `6000` expected, `10` paid, overdue.
        let overdue = seed(&service, &db, (-2, -1), &["10"]).await;

        let rows = service.execute(Unfinished).await.unwrap();

        assert_eq!(
            rows,
            vec![
                Row {
                    contract_id: active,
                    expected: amount("18000"),
                    actual: amount("10"),
                },
                Row {
                    contract_id: overdue,
                    expected: amount("6000"),
                    actual: amount("10"),
                },
            ],
        );
    }

    #[tokio::test]
    async fn skips_completed_and_unpaid_contracts() {
        let db = Memory::default();
        let service = Service::new(Config::default(), db.clone());
        // Paid off fully.
        _ = seed(&service, &db, (-2, -1), &["6000"]).await;
        // No payments recorded at all: driven out of the summary.
        _ = seed(&service, &db, (-2, 1), &[]).await;
        let paid_once = seed(&service, &db, (-1, 1), &["250.50"]).await;

        let rows = service.execute(Unfinished).await.unwrap();

        assert_eq!(
            rows,
            vec![Row {
                contract_id: paid_once,
                expected: amount("12000"),
                actual: amount("250.50"),
            }],
        );
    }
}
