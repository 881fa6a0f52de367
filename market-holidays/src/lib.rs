//! # market-holidays
//!
//! Decide whether a calendar date is a market holiday or a trading day, with
//! optional precomputed year ranges for constant-time lookups.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates.
//!
//! ## Quick start
//!
//! ```rust
//! use market_holidays::prelude::*;
//!
//! let holidays = HolidayCalendar::with_cache(2000, 2040);
//! assert!(holidays.is_market_holiday(20200410)); // Good Friday
//!
//! let trading = TradingDayCalendar::new();
//! assert!(!trading.is_trading_day((2020, 7, 3))); // Independence Day observed
//! assert!(trading.is_trading_day(CalendarDate::new(2020, 7, 2)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions.
pub use mh_core as core;

/// Dates, holiday rules, and calendars.
pub use mh_time as time;

/// The types most callers need.
pub mod prelude {
    pub use mh_core::{Error, Result};
    pub use mh_time::{
        CalendarDate, HolidayCalendar, HolidayRules, Month, NoHolidays, TradingDayCalendar,
        UsMarketHolidays, Weekday,
    };
}
