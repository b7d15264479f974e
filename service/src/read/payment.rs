//! [`Payment`] read model definition.

use common::Amount;
use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::{Contract, Payment};

/// Running total of a [`Contract`]'s recorded [`Payment`]s.
///
/// Zero for a [`Contract`] with no [`Payment`]s yet; never decreases.
#[derive(Clone, Copy, Debug, Default, Eq, From, Into, Ord, PartialEq, PartialOrd)]
pub struct Total(Amount);
