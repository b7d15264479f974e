//! [`Database`] operations of the [`Memory`] database.
//!
//! [`Database`]: crate::infra::Database
//! [`Memory`]: super::Memory

mod contract;
mod payment;
mod report;
