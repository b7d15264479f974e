//! Calendar date utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData, str};

use derive_more::{Debug, Display, Error};
use time::{format_description::FormatItem, macros::format_description};

/// Format of a [`Date`] textual representation.
const FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date (no time-of-day component).
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] representing the current date in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc().date(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// # Errors
    ///
    /// If the components don't form a valid calendar date.
    pub fn from_calendar(
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<Self, time::error::ComponentRange> {
        let month = time::Month::try_from(month)?;
        time::Date::from_calendar_date(year, month, day).map(|inner| Self {
            inner,
            _of: PhantomData,
        })
    }

    /// Returns the number of whole calendar months between this [`Date`] and
    /// the `end` one.
    ///
    /// The count is the calendar month difference, corrected down by one when
    /// the `end` day-of-month hasn't reached this [`Date`]'s yet (so
    /// `2024-01-31` to `2024-02-28` spans 0 whole months). Spans shorter than
    /// one month yield 0.
    ///
    /// # Errors
    ///
    /// With an [`InvalidRangeError`] if the `end` [`Date`] is not strictly
    /// after this one.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn month_span<ToOf: ?Sized>(
        self,
        end: DateOf<ToOf>,
    ) -> Result<u32, InvalidRangeError> {
        if end.inner <= self.inner {
            return Err(InvalidRangeError {
                start: self.coerce(),
                end: end.coerce(),
            });
        }

        let months = (end.inner.year() - self.inner.year()) * 12
            + (i32::from(u8::from(end.inner.month()))
                - i32::from(u8::from(self.inner.month())))
            - i32::from(end.inner.day() < self.inner.day());

        Ok(u32::try_from(months).expect("non-negative"))
    }

    /// Returns this [`Date`] moved by the provided number of calendar months
    /// (negative to move back), clamping the day-of-month to the length of
    /// the resulting month.
    ///
    /// [`None`] is returned if the resulting date is out of range.
    #[must_use]
    pub fn add_months(self, months: i32) -> Option<Self> {
        let zero_based = (i32::from(u8::from(self.inner.month())) - 1)
            .checked_add(months)?;
        let year = self.inner.year().checked_add(zero_based.div_euclid(12))?;
        let month = time::Month::try_from(
            u8::try_from(zero_based.rem_euclid(12) + 1).ok()?,
        )
        .ok()?;
        let last_valid_day = (28..=31).rev().find(|&d| {
            time::Date::from_calendar_date(year, month, d).is_ok()
        })?;
        let day = self.inner.day().min(last_valid_day);

        time::Date::from_calendar_date(year, month, day)
            .ok()
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }

    /// Returns this [`Date`] moved by the provided number of calendar years
    /// (negative to move back).
    ///
    /// [`None`] is returned if the resulting date is out of range.
    #[must_use]
    pub fn add_years(self, years: i32) -> Option<Self> {
        self.add_months(years.checked_mul(12)?)
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of a [`Date`] range whose end is not strictly after its start.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("date range end ({end}) is not after its start ({start})")]
pub struct InvalidRangeError {
    /// Start of the range.
    pub start: Date,

    /// End of the range.
    pub end: Date,
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("cannot parse `Date`: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner
            .format(FORMAT)
            .map_err(|_| fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}

impl<Of: ?Sized> str::FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, FORMAT)
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
            .map_err(ParseError)
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn month_span_counts_whole_months() {
        assert_eq!(
            date("2024-01-15").month_span(date("2024-03-15")).unwrap(),
            2,
        );
        assert_eq!(
            date("2024-01-15").month_span(date("2024-03-14")).unwrap(),
            1,
        );
        assert_eq!(
            date("2024-01-15").month_span(date("2024-03-16")).unwrap(),
            2,
        );
        assert_eq!(
            date("2022-11-30").month_span(date("2023-02-28")).unwrap(),
            2,
        );
        assert_eq!(
            date("2024-01-31").month_span(date("2024-02-28")).unwrap(),
            0,
        );
        assert_eq!(
            date("2024-01-01").month_span(date("2024-01-20")).unwrap(),
            0,
        );
        assert_eq!(
            date("2022-06-01").month_span(date("2025-06-01")).unwrap(),
            36,
        );
    }

    #[test]
    fn month_span_matches_added_months() {
        let start = date("2023-05-17");
        for n in 1..=48 {
            let end = start.add_months(i32::try_from(n).unwrap()).unwrap();
            assert_eq!(start.month_span(end).unwrap(), n);
        }
    }

    #[test]
    fn month_span_rejects_non_positive_ranges() {
        assert!(date("2024-03-15").month_span(date("2024-03-15")).is_err());
        assert!(date("2024-03-15").month_span(date("2024-01-15")).is_err());
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(date("2024-01-31").add_months(1).unwrap(), date("2024-02-29"));
        assert_eq!(date("2023-01-31").add_months(1).unwrap(), date("2023-02-28"));
        assert_eq!(date("2024-11-30").add_months(3).unwrap(), date("2025-02-28"));
        assert_eq!(date("2024-03-31").add_months(-1).unwrap(), date("2024-02-29"));
    }

    #[test]
    fn add_years_moves_whole_years() {
        assert_eq!(date("2024-06-15").add_years(2).unwrap(), date("2026-06-15"));
        assert_eq!(date("2024-06-15").add_years(-3).unwrap(), date("2021-06-15"));
        assert_eq!(date("2024-02-29").add_years(1).unwrap(), date("2025-02-28"));
    }

    #[test]
    fn parses_and_displays() {
        assert_eq!(date("2024-01-15").to_string(), "2024-01-15");
        assert!("2024-13-01".parse::<Date>().is_err());
        assert!("not-a-date".parse::<Date>().is_err());
    }

    #[test]
    fn builds_from_calendar_components() {
        assert_eq!(
            Date::from_calendar(2024, 1, 15).unwrap(),
            date("2024-01-15"),
        );
        assert!(Date::from_calendar(2024, 13, 1).is_err());
        assert!(Date::from_calendar(2023, 2, 29).is_err());
    }
}
