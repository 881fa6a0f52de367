//! `CalendarDate` — a validated year/month/day triple.
//!
//! A `CalendarDate` is either a real proleptic Gregorian date or *invalid*.
//! Construction never fails: the literal triple is normalised (months roll
//! into years, days roll into months) and the result is kept only if it maps
//! back onto the same triple, so `2020-14-01` and `2020-01-32` are invalid
//! rather than silently becoming `2021-02-01` and `2020-02-01`.
//!
//! Invalid dates are still queryable. Every field reads as zero, the packed
//! encoding is `-1`, the day of the week is `None`, and an invalid date is
//! neither a weekday nor a weekend. All invalid dates compare equal.
//!
//! # Packed encoding
//! `YYYYMMDD = year * 10000 + month * 100 + day`, e.g. `20200220`. Supported
//! years are [`MIN_YEAR`]..=[`MAX_YEAR`] so that every valid date packs into an
//! `i32` and unpacks to the same date.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use mh_core::errors::{Error, Result};
use mh_core::fail;

use crate::weekday::Weekday;

/// First supported year.
pub const MIN_YEAR: i32 = 1;

/// Last supported year.
pub const MAX_YEAR: i32 = 9999;

/// A calendar date, or the invalid sentinel.
///
/// Ordering follows the packed encoding, so the invalid date sorts before
/// every valid one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "i32", into = "i32")
)]
pub struct CalendarDate(Option<NaiveDate>);

impl CalendarDate {
    /// The invalid date. Same as `CalendarDate::default()`.
    pub const INVALID: CalendarDate = CalendarDate(None);

    /// Packed value of an invalid date.
    pub const INVALID_PACKED: i32 = -1;

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12) and day-of-month.
    ///
    /// Returns an invalid date if the triple does not survive normalisation
    /// unchanged or the year is outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        match normalize(year, month, day) {
            Some(d)
                if d.year() == year && d.month() as i32 == month && d.day() as i32 == day =>
            {
                Self::from(d)
            }
            _ => Self::INVALID,
        }
    }

    /// Create a date from a packed `YYYYMMDD` integer.
    pub fn from_packed(yyyymmdd: i32) -> Self {
        Self::new(yyyymmdd / 10000, yyyymmdd / 100 % 100, yyyymmdd % 100)
    }

    /// Create a date from year, month and day, rolling overflowing fields
    /// into the next larger unit instead of rejecting them.
    ///
    /// `normalized(2020, 14, 1)` is 2021-02-01 and `normalized(2020, 3, 0)` is
    /// 2020-02-29. Still invalid if the result leaves the supported years.
    pub fn normalized(year: i32, month: i32, day: i32) -> Self {
        normalize(year, month, day).map_or(Self::INVALID, Self::from)
    }

    /// Like [`CalendarDate::new`] but returns an error instead of an invalid
    /// date.
    pub fn try_new(year: i32, month: i32, day: i32) -> Result<Self> {
        let date = Self::new(year, month, day);
        if !date.is_valid() {
            fail!(
                "{year:04}-{month:02}-{day:02} is not a date in years {MIN_YEAR}..={MAX_YEAR}"
            );
        }
        Ok(date)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return `true` unless this is the invalid date.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Return the year, or 0 if invalid.
    pub fn year(&self) -> i32 {
        self.0.map_or(0, |d| d.year())
    }

    /// Return the month (1–12), or 0 if invalid.
    pub fn month(&self) -> i32 {
        self.0.map_or(0, |d| d.month() as i32)
    }

    /// Return the day of the month (1–31), or 0 if invalid.
    pub fn day(&self) -> i32 {
        self.0.map_or(0, |d| d.day() as i32)
    }

    /// Return the packed `YYYYMMDD` value, or [`Self::INVALID_PACKED`].
    pub fn to_packed(&self) -> i32 {
        match self.0 {
            Some(d) => d.year() * 10000 + d.month() as i32 * 100 + d.day() as i32,
            None => Self::INVALID_PACKED,
        }
    }

    /// Return the day of the week, or `None` if invalid.
    pub fn day_of_week(&self) -> Option<Weekday> {
        self.0.map(|d| Weekday::from(d.weekday()))
    }

    /// Return the day of the week as 0 (Sunday) … 6 (Saturday), or
    /// [`Weekday::NOT_APPLICABLE`] if invalid.
    pub fn day_of_week_number(&self) -> i32 {
        self.day_of_week()
            .map_or(Weekday::NOT_APPLICABLE, |w| w.number())
    }

    /// Monday to Friday. Always `false` for an invalid date.
    pub fn is_weekday(&self) -> bool {
        self.day_of_week().is_some_and(|w| w.is_weekday())
    }

    /// Saturday or Sunday. Always `false` for an invalid date.
    pub fn is_weekend(&self) -> bool {
        self.day_of_week().is_some_and(|w| w.is_weekend())
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Return the following calendar day.
    ///
    /// The invalid date, and the day after [`MAX_YEAR`]-12-31, are invalid.
    pub fn next_day(&self) -> Self {
        self.0
            .and_then(|d| d.succ_opt())
            .map_or(Self::INVALID, Self::from)
    }

    /// Return the preceding calendar day.
    pub fn previous_day(&self) -> Self {
        self.0
            .and_then(|d| d.pred_opt())
            .map_or(Self::INVALID, Self::from)
    }

    /// Iterate over this date and every following day while the dates stay
    /// valid. Empty if `self` is invalid.
    pub fn iter_days(&self) -> impl Iterator<Item = CalendarDate> {
        let first = Some(*self).filter(CalendarDate::is_valid);
        std::iter::successors(first, |d| Some(d.next_day()).filter(CalendarDate::is_valid))
    }

    /// Iterate over this date and every preceding day while the dates stay
    /// valid. Empty if `self` is invalid.
    pub fn iter_days_back(&self) -> impl Iterator<Item = CalendarDate> {
        let first = Some(*self).filter(CalendarDate::is_valid);
        std::iter::successors(first, |d| {
            Some(d.previous_day()).filter(CalendarDate::is_valid)
        })
    }
}

/// Roll `month` into the year first, then add `day - 1` days to the first of
/// that month. `None` if the arithmetic leaves chrono's range.
fn normalize(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let y = i32::try_from(months.div_euclid(12)).ok()?;
    let m = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    let offset = i64::from(day) - 1;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<NaiveDate> for CalendarDate {
    fn from(d: NaiveDate) -> Self {
        if (MIN_YEAR..=MAX_YEAR).contains(&d.year()) {
            CalendarDate(Some(d))
        } else {
            Self::INVALID
        }
    }
}

impl From<i32> for CalendarDate {
    fn from(yyyymmdd: i32) -> Self {
        Self::from_packed(yyyymmdd)
    }
}

impl From<(i32, i32, i32)> for CalendarDate {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::new(year, month, day)
    }
}

impl From<&CalendarDate> for CalendarDate {
    fn from(date: &CalendarDate) -> Self {
        *date
    }
}

impl From<CalendarDate> for i32 {
    fn from(date: CalendarDate) -> i32 {
        date.to_packed()
    }
}

impl TryFrom<CalendarDate> for NaiveDate {
    type Error = Error;

    fn try_from(date: CalendarDate) -> Result<NaiveDate> {
        date.0
            .ok_or_else(|| Error::InvalidDate("cannot convert an invalid date".into()))
    }
}

impl PartialEq<i32> for CalendarDate {
    fn eq(&self, other: &i32) -> bool {
        self.to_packed() == *other
    }
}

impl PartialEq<CalendarDate> for i32 {
    fn eq(&self, other: &CalendarDate) -> bool {
        *self == other.to_packed()
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    /// Parse `YYYY-MM-DD` or `YYYYMMDD`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let parse_error = |reason: &str| Error::Parse {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        if !text.is_ascii() {
            return Err(parse_error("expected YYYY-MM-DD or YYYYMMDD"));
        }
        let bytes = text.as_bytes();
        let (y, m, d) = match bytes.len() {
            8 => (&text[0..4], &text[4..6], &text[6..8]),
            10 if bytes[4] == b'-' && bytes[7] == b'-' => {
                (&text[0..4], &text[5..7], &text[8..10])
            }
            _ => return Err(parse_error("expected YYYY-MM-DD or YYYYMMDD")),
        };
        let field = |digits: &str| -> Result<i32> {
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(parse_error("date fields must be decimal digits"));
            }
            digits
                .parse()
                .map_err(|e: std::num::ParseIntError| parse_error(&e.to_string()))
        };
        Self::try_new(field(y)?, field(m)?, field(d)?)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(d) => write!(f, "{:04}-{:02}-{:02}", d.year(), d.month(), d.day()),
            None => write!(f, "invalid date"),
        }
    }
}

impl std::fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(d) => write!(f, "CalendarDate({:04}-{:02}-{:02})", d.year(), d.month(), d.day()),
            None => write!(f, "CalendarDate(invalid)"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
