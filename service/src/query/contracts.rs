//! [`Query`] collection related to the multiple [`Contract`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Contract,
    infra::{database, Database},
    read::contract::search,
    Service,
};

use super::Query;

/// [`Query`] searching [`Contract`]s matching a [`search::Filter`].
///
/// Returns a snapshot ordered by start date descending (ties keep the
/// insertion order).
#[derive(Clone, Debug)]
pub struct Search(pub search::Filter);

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Contract>, search::Selector>>,
        Ok = Vec<Contract>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(&self, Search(filter): Search) -> Result<Self::Ok, Self::Err> {
        let selector = search::Selector::new(
            filter,
            self.config().case_insensitive_search,
        );

        self.database()
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::wrap!())
    }
}
