//! [`Amount`]-related definitions.

use std::{fmt, iter, ops, str::FromStr};

use rust_decimal::Decimal;

/// Monetary amount carrying exactly 2 fractional digits.
///
/// Construction rounds to the 2nd digit; arithmetic preserves the scale.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Amount(Decimal);

impl Amount {
    /// [`Amount`] of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Amount`] from the provided [`Decimal`], rounding it to
    /// 2 fractional digits.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Indicates whether this [`Amount`] is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Indicates whether this [`Amount`] is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Amount {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Self::new)
            .map_err(|_| "invalid amount")
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl ops::Mul<u32> for Amount {
    type Output = Self;

    fn mul(self, months: u32) -> Self::Output {
        Self(self.0 * Decimal::from(months))
    }
}

impl iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}
