//! Domain definitions.

pub mod contract;
pub mod payment;

pub use self::{contract::Contract, payment::Payment};
