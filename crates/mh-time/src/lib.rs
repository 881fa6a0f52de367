//! # mh-time
//!
//! Calendar dates, market-holiday rules, and the holiday / trading-day
//! calendars built on them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `HolidayCalendar` and `TradingDayCalendar`.
pub mod calendar;

/// `CalendarDate` type.
pub mod date;

/// `Month` numbering for the holiday rules.
pub mod month;

/// `HolidayRules` trait, rule shapes, and concrete rule sets.
pub mod rules;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{HolidayCalendar, TradingDayCalendar};
pub use date::{CalendarDate, MAX_YEAR, MIN_YEAR};
pub use month::Month;
pub use rules::{HolidayRules, NoHolidays, UsMarketHolidays};
pub use weekday::Weekday;
