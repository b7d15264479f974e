//! Report read models definitions.

use common::{date::InvalidRangeError, Amount};

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::{Contract, Payment};

use super::payment::Total;

/// Source row of the finished-contracts summary: a single
/// [`Status::Completed`] [`Contract`].
///
/// [`Status::Completed`]: contract::Status::Completed
#[derive(Clone, Copy, Debug)]
pub struct FinishedContract {
    /// Kind of the rented property.
    pub property: contract::PropertyKind,

    /// Rent paid monthly under the [`Contract`].
    pub monthly_rent: Amount,

    /// Start of the [`Contract`] span.
    pub starts_on: contract::StartDate,

    /// End of the [`Contract`] span.
    pub ends_on: contract::EndDate,
}

impl FinishedContract {
    /// Returns the revenue of the [`Contract`]: its full total obligation.
    ///
    /// # Errors
    ///
    /// With an [`InvalidRangeError`] if the [`Contract`] span is not
    /// positive.
    pub fn revenue(&self) -> Result<Amount, InvalidRangeError> {
        Ok(self.monthly_rent * self.starts_on.month_span(self.ends_on)?)
    }
}

/// Source row of the unfinished-contracts summary: [`Payment`] totals of a
/// single non-[`Status::Completed`] [`Contract`].
///
/// Produced by grouping [`Payment`]s by their owning [`Contract`], so a
/// [`Contract`] with no [`Payment`]s at all yields no row.
///
/// [`Status::Completed`]: contract::Status::Completed
#[derive(Clone, Copy, Debug)]
pub struct UnfinishedContract {
    /// ID of the [`Contract`].
    pub contract_id: contract::Id,

    /// Rent paid monthly under the [`Contract`].
    pub monthly_rent: Amount,

    /// Start of the [`Contract`] span.
    pub starts_on: contract::StartDate,

    /// End of the [`Contract`] span.
    pub ends_on: contract::EndDate,

    /// [`Total`] of the [`Payment`]s recorded against the [`Contract`].
    pub paid: Total,
}

impl UnfinishedContract {
    /// Returns the expected total obligation of the [`Contract`].
    ///
    /// # Errors
    ///
    /// With an [`InvalidRangeError`] if the [`Contract`] span is not
    /// positive.
    pub fn expected(&self) -> Result<Amount, InvalidRangeError> {
        Ok(self.monthly_rent * self.starts_on.month_span(self.ends_on)?)
    }
}
