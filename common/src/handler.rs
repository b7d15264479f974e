//! [`Handler`] abstractions.

use std::future::Future;

/// Executor of a single operation described by its `Args`.
///
/// Commands, queries and database operations are all [`Handler`]s, differing
/// only in the role they play.
pub trait Handler<Args = ()> {
    /// Type of the value produced by a successful execution.
    type Ok;

    /// Type of the error produced by a failed execution.
    type Err;

    /// Executes this [`Handler`] upon the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
