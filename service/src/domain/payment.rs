//! [`Payment`] definitions.

use common::{unit, Amount, DateOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::Contract;

/// Single remittance recorded against a [`Contract`].
///
/// Created once, never mutated or deleted afterwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the [`Contract`] this [`Payment`] is recorded against.
    pub contract_id: contract::Id,

    /// [`Date`] when this [`Payment`] was recorded.
    ///
    /// [`Date`]: common::Date
    pub paid_on: PayDate,

    /// Paid [`Amount`] (strictly positive).
    pub amount: Amount,
}

/// ID of a [`Payment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(i64);

/// [`Date`] when a [`Payment`] was recorded.
///
/// [`Date`]: common::Date
pub type PayDate = DateOf<(Payment, unit::Creation)>;

/// [`Payment`] to be recorded, before the store assigns its identity.
#[derive(Clone, Copy, Debug)]
pub struct New {
    /// ID of the [`Contract`] the [`Payment`] is recorded against.
    pub contract_id: contract::Id,

    /// [`Date`] when the [`Payment`] is recorded.
    ///
    /// [`Date`]: common::Date
    pub paid_on: PayDate,

    /// Paid [`Amount`] (strictly positive).
    pub amount: Amount,
}
