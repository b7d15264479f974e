//! [`Contract`] read model definition.

#[cfg(doc)]
use crate::domain::Contract;

pub mod search {
    //! [`Contract`]s search definitions.

    use common::Amount;

    use crate::domain::{contract, Contract};

    /// Filter for searching [`Contract`]s.
    ///
    /// Only the [`tenant_contains`] field is mandatory (and the empty string
    /// matches every [`Contract`]); each other refinement is applied only
    /// when present.
    ///
    /// [`tenant_contains`]: Filter::tenant_contains
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Substring of the tenant name to search for.
        pub tenant_contains: String,

        /// Exact [`contract::PropertyKind`] to search for.
        pub property: Option<contract::PropertyKind>,

        /// Lower inclusive bound of the [`Contract`] start date.
        pub starts_from: Option<contract::StartDate>,

        /// Upper inclusive bound of the [`Contract`] start date.
        ///
        /// Ignored unless [`starts_from`] is present.
        ///
        /// [`starts_from`]: Filter::starts_from
        pub starts_to: Option<contract::StartDate>,

        /// Lower inclusive bound of the [`Contract`] monthly rent.
        pub rent_from: Option<Amount>,

        /// Upper inclusive bound of the [`Contract`] monthly rent.
        ///
        /// Ignored unless [`rent_from`] is present.
        ///
        /// [`rent_from`]: Filter::rent_from
        pub rent_to: Option<Amount>,
    }

    /// Predicate clause over a [`Contract`].
    pub type Clause<'a> = Box<dyn Fn(&Contract) -> bool + Send + Sync + 'a>;

    /// [`Filter`] assembled into predicate [`Clause`]s over [`Contract`]s.
    #[derive(Clone, Debug)]
    pub struct Selector {
        /// [`Filter`] to assemble the [`Clause`]s from.
        filter: Filter,

        /// Indicator whether the tenant-name match is case-insensitive.
        case_insensitive: bool,
    }

    impl Selector {
        /// Creates a new [`Selector`] out of the provided [`Filter`].
        #[must_use]
        pub fn new(filter: Filter, case_insensitive: bool) -> Self {
            Self {
                filter,
                case_insensitive,
            }
        }

        /// Assembles the predicate [`Clause`]s of this [`Selector`], one per
        /// enabled refinement, to be combined via logical AND.
        ///
        /// An upper bound without its lower one disables the whole
        /// refinement rather than failing.
        #[must_use]
        pub fn clauses(&self) -> Vec<Clause<'_>> {
            let Filter {
                tenant_contains,
                property,
                starts_from,
                starts_to,
                rent_from,
                rent_to,
            } = &self.filter;

            let mut clauses: Vec<Clause<'_>> = Vec::new();

            if self.case_insensitive {
                let pattern = tenant_contains.to_lowercase();
                clauses.push(Box::new(move |c: &Contract| {
                    AsRef::<str>::as_ref(&c.tenant)
                        .to_lowercase()
                        .contains(&pattern)
                }));
            } else {
                clauses.push(Box::new(move |c: &Contract| {
                    AsRef::<str>::as_ref(&c.tenant)
                        .contains(tenant_contains.as_str())
                }));
            }

            if let Some(property) = *property {
                clauses.push(Box::new(move |c: &Contract| {
                    c.property == property
                }));
            }

            if let Some(from) = *starts_from {
                if let Some(to) = *starts_to {
                    clauses.push(Box::new(move |c: &Contract| {
                        (from..=to).contains(&c.starts_on)
                    }));
                } else {
                    clauses.push(Box::new(move |c: &Contract| {
                        c.starts_on >= from
                    }));
                }
            }

            if let Some(from) = *rent_from {
                if let Some(to) = *rent_to {
                    clauses.push(Box::new(move |c: &Contract| {
                        (from..=to).contains(&c.monthly_rent)
                    }));
                } else {
                    clauses.push(Box::new(move |c: &Contract| {
                        c.monthly_rent >= from
                    }));
                }
            }

            clauses
        }

        /// Checks whether the provided [`Contract`] matches every [`Clause`]
        /// of this [`Selector`].
        #[must_use]
        pub fn matches(&self, contract: &Contract) -> bool {
            self.clauses().iter().all(|is_match| is_match(contract))
        }
    }

}
