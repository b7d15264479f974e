//! [`Contract`] definitions.

use common::{
    date::InvalidRangeError, define_kind, unit, Amount, Date, DateOf,
};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Rental agreement about a property, with a fixed monthly rent and a date
/// span.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// Name of the tenant renting the property.
    pub tenant: TenantName,

    /// Kind of the rented property.
    pub property: PropertyKind,

    /// Rent to be paid monthly.
    pub monthly_rent: Amount,

    /// [`Date`] when the rent span starts.
    pub starts_on: StartDate,

    /// [`Date`] when the rent span ends (strictly after [`starts_on`]).
    ///
    /// [`starts_on`]: Contract::starts_on
    pub ends_on: EndDate,

    /// Current [`Status`] of this [`Contract`].
    pub status: Status,
}

impl Contract {
    /// Returns the number of whole calendar months in this [`Contract`]'s
    /// span.
    ///
    /// # Errors
    ///
    /// With an [`InvalidRangeError`] if the span is not positive.
    pub fn span(&self) -> Result<u32, InvalidRangeError> {
        self.starts_on.month_span(self.ends_on)
    }

    /// Returns the total obligation of this [`Contract`]: its monthly rent
    /// multiplied by the whole months of its span.
    ///
    /// # Errors
    ///
    /// With an [`InvalidRangeError`] if the span is not positive.
    pub fn total(&self) -> Result<Amount, InvalidRangeError> {
        Ok(self.monthly_rent * self.span()?)
    }

    /// Derives the [`Status`] this [`Contract`] transitions into, given the
    /// provided `paid`-to-date total and `today`'s [`Date`].
    ///
    /// The decision is a pure function of its arguments: once the paid total
    /// reaches the total obligation the [`Contract`] is [`Status::Completed`];
    /// otherwise it's [`Status::Overdue`] when `today` is strictly after the
    /// span end; otherwise the current [`Status`] is kept. Re-running the
    /// decision with the same inputs always yields the same [`Status`].
    ///
    /// # Errors
    ///
    /// With an [`InvalidRangeError`] if the span is not positive.
    pub fn next_status(
        &self,
        paid: Amount,
        today: Date,
    ) -> Result<Status, InvalidRangeError> {
        Ok(if paid >= self.total()? {
            Status::Completed
        } else if today.coerce() > self.ends_on {
            Status::Overdue
        } else {
            self.status
        })
    }
}

/// ID of a [`Contract`].
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

/// Name of the tenant in a [`Contract`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct TenantName(String);

impl TenantName {
    /// Creates a new [`TenantName`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`TenantName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`TenantName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 80
    }
}

impl FromStr for TenantName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TenantName`")
    }
}

define_kind! {
    #[doc = "Kind of a rented property."]
    enum PropertyKind {
        #[doc = "A standalone house."]
        House = 1,

        #[doc = "An apartment."]
        Apartment = 2,

        #[doc = "An office space."]
        Office = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Contract`], derived from its payment history."]
    enum Status {
        #[doc = "The [`Contract`] is being paid off."]
        Active = 1,

        #[doc = "The [`Contract`] is paid off fully (terminal)."]
        Completed = 2,

        #[doc = "The [`Contract`] span ended before it was paid off."]
        Overdue = 3,
    }
}

/// [`Date`] when a [`Contract`] span starts.
pub type StartDate = DateOf<(Contract, unit::Start)>;

/// [`Date`] when a [`Contract`] span ends.
pub type EndDate = DateOf<(Contract, unit::End)>;

/// [`Contract`] to be created, before the store assigns its identity.
///
/// The initial [`Status::Active`] is assigned by the store on creation.
#[derive(Clone, Debug)]
pub struct New {
    /// Name of the tenant renting the property.
    pub tenant: TenantName,

    /// Kind of the rented property.
    pub property: PropertyKind,

    /// Rent to be paid monthly.
    pub monthly_rent: Amount,

    /// [`Date`] when the rent span starts.
    pub starts_on: StartDate,

    /// [`Date`] when the rent span ends.
    pub ends_on: EndDate,
}

/// Change of a [`Contract`]'s [`Status`] to be persisted.
#[derive(Clone, Copy, Debug)]
pub struct StatusChange {
    /// ID of the [`Contract`] to change the [`Status`] of.
    pub contract_id: Id,

    /// [`Status`] to persist.
    pub status: Status,
}

#[cfg(test)]
mod spec {
    use common::{Amount, Date};

    use super::{Contract, Id, PropertyKind, Status, TenantName};

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn contract(rent: &str, starts_on: &str, ends_on: &str) -> Contract {
        Contract {
            id: Id::from(1),
            tenant: TenantName::new("Mateo").unwrap(),
            property: PropertyKind::House,
            monthly_rent: amount(rent),
            starts_on: date(starts_on).coerce(),
            ends_on: date(ends_on).coerce(),
            status: Status::Active,
        }
    }

    #[test]
    fn total_is_rent_by_whole_months() {
        assert_eq!(
            contract("500", "2022-06-01", "2025-06-01").total().unwrap(),
            amount("18000"),
        );
        assert_eq!(
            contract("700.50", "2024-01-15", "2024-03-15").total().unwrap(),
            amount("1401"),
        );
        assert_eq!(
            contract("500", "2024-01-31", "2024-02-28").total().unwrap(),
            Amount::ZERO,
        );
    }

    #[test]
    fn total_requires_positive_span() {
        assert!(contract("500", "2024-06-01", "2024-06-01").total().is_err());
        assert!(contract("500", "2024-06-01", "2023-06-01").total().is_err());
    }

    #[test]
    fn next_status_completes_on_reaching_total() {
        let c = contract("500", "2022-06-01", "2025-06-01");

        assert_eq!(
            c.next_status(amount("18000"), date("2024-06-15")).unwrap(),
            Status::Completed,
        );
        assert_eq!(
            c.next_status(amount("20000"), date("2024-06-15")).unwrap(),
            Status::Completed,
        );
        // Even past the span end, full payment completes.
        assert_eq!(
            c.next_status(amount("18000"), date("2026-01-01")).unwrap(),
            Status::Completed,
        );
    }

    #[test]
    fn next_status_overdues_past_span_end() {
        let c = contract("500", "2022-06-01", "2023-06-01");

        assert_eq!(
            c.next_status(amount("100"), date("2023-06-02")).unwrap(),
            Status::Overdue,
        );
        // The span end day itself is not overdue yet.
        assert_eq!(
            c.next_status(amount("100"), date("2023-06-01")).unwrap(),
            Status::Active,
        );
    }

    #[test]
    fn next_status_keeps_current_otherwise() {
        let c = contract("500", "2022-06-01", "2025-06-01");

        assert_eq!(
            c.next_status(amount("100"), date("2024-06-15")).unwrap(),
            Status::Active,
        );

        let overdue = Contract {
            status: Status::Overdue,
            ..contract("500", "2022-06-01", "2025-06-01")
        };
        assert_eq!(
            overdue.next_status(amount("100"), date("2024-06-15")).unwrap(),
            Status::Overdue,
        );
    }

    #[test]
    fn next_status_is_idempotent() {
        let c = contract("500", "2022-06-01", "2023-06-01");

        for (paid, today) in [
            (amount("100"), date("2023-06-02")),
            (amount("6000"), date("2023-06-02")),
            (amount("100"), date("2022-12-01")),
        ] {
            let first = c.next_status(paid, today).unwrap();
            let second = c.next_status(paid, today).unwrap();
            assert_eq!(first, second);
        }
    }
}
