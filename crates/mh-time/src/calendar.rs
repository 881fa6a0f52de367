//! Holiday and trading-day calendars.
//!
//! Both calendars wrap a [`HolidayRules`] implementation and can precompute
//! their answers for a range of years. Within a cached range a query is a
//! set lookup and never consults the rules; outside it the rules are
//! evaluated directly and nothing is memoised.
//!
//! Caching is the only mutating operation. Build or re-cache a calendar
//! before sharing it between threads; after that every query takes `&self`.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::date::{CalendarDate, MIN_YEAR};
use crate::rules::{HolidayRules, UsMarketHolidays};

/// Packed dates that satisfy a predicate for every day of
/// `start_year..=end_year`. Empty when `start_year > end_year`.
#[derive(Debug, Clone)]
struct CachedRange {
    start_year: i32,
    end_year: i32,
    dates: HashSet<i32>,
}

impl CachedRange {
    fn empty() -> Self {
        Self {
            start_year: 0,
            end_year: -1,
            dates: HashSet::new(),
        }
    }

    /// Replace the cached range and its contents.
    fn fill(
        &mut self,
        start_year: i32,
        end_year: i32,
        mut predicate: impl FnMut(&CalendarDate) -> bool,
    ) {
        self.start_year = start_year;
        self.end_year = end_year;
        self.dates.clear();
        if start_year > end_year {
            trace!(start_year, end_year, "empty year range, calendar is uncached");
            return;
        }
        // Years before MIN_YEAR hold no valid dates, so there is nothing to store.
        let first = CalendarDate::new(start_year.max(MIN_YEAR), 1, 1);
        for date in first.iter_days().take_while(|d| d.year() <= end_year) {
            if predicate(&date) {
                self.dates.insert(date.to_packed());
            }
        }
    }

    /// Invalid dates are never covered; they read as year 0.
    fn covers(&self, date: &CalendarDate) -> bool {
        date.is_valid() && (self.start_year..=self.end_year).contains(&date.year())
    }

    /// `Some(answer)` if the date's year is cached, `None` otherwise.
    fn lookup(&self, date: &CalendarDate) -> Option<bool> {
        self.covers(date)
            .then(|| self.dates.contains(&date.to_packed()))
    }

    fn range(&self) -> Option<(i32, i32)> {
        (self.start_year <= self.end_year).then_some((self.start_year, self.end_year))
    }
}

// ── HolidayCalendar ───────────────────────────────────────────────────────────

/// Answers "is this date a market holiday?" for a [`HolidayRules`] set,
/// optionally from a precomputed year range.
#[derive(Debug, Clone)]
pub struct HolidayCalendar<R = UsMarketHolidays> {
    rules: R,
    cache: CachedRange,
}

impl HolidayCalendar<UsMarketHolidays> {
    /// Uncached calendar of US market holidays.
    pub fn new() -> Self {
        Self::with_rules(UsMarketHolidays)
    }

    /// US market holiday calendar with every holiday from January 1 of
    /// `start_year` through December 31 of `end_year` precomputed.
    pub fn with_cache(start_year: i32, end_year: i32) -> Self {
        Self::with_rules_cached(UsMarketHolidays, start_year, end_year)
    }
}

impl<R: HolidayRules + Default> Default for HolidayCalendar<R> {
    fn default() -> Self {
        Self::with_rules(R::default())
    }
}

impl<R: HolidayRules> HolidayCalendar<R> {
    /// Uncached calendar over `rules`.
    pub fn with_rules(rules: R) -> Self {
        Self {
            rules,
            cache: CachedRange::empty(),
        }
    }

    /// Calendar over `rules` with `start_year..=end_year` precomputed.
    pub fn with_rules_cached(rules: R, start_year: i32, end_year: i32) -> Self {
        let mut calendar = Self::with_rules(rules);
        calendar.cache(start_year, end_year);
        calendar
    }

    /// Precompute every holiday from January 1 of `start_year` through
    /// December 31 of `end_year`, replacing any previously cached range.
    ///
    /// A reversed range (`start_year > end_year`) leaves the calendar uncached.
    pub fn cache(&mut self, start_year: i32, end_year: i32) {
        let rules = &self.rules;
        self.cache
            .fill(start_year, end_year, |date| rules.is_market_holiday(date));
        debug!(
            rules = self.rules.name(),
            start_year,
            end_year,
            holidays = self.cache.dates.len(),
            "cached market holidays"
        );
    }

    /// Return `true` if `date` is a market holiday.
    ///
    /// Accepts a [`CalendarDate`], a packed `YYYYMMDD` integer or a
    /// `(year, month, day)` tuple.
    pub fn is_market_holiday(&self, date: impl Into<CalendarDate>) -> bool {
        let date = date.into();
        self.cache
            .lookup(&date)
            .unwrap_or_else(|| self.rules.is_market_holiday(&date))
    }

    /// Every market holiday in `from..=to`, in calendar order.
    pub fn holidays_between(
        &self,
        from: impl Into<CalendarDate>,
        to: impl Into<CalendarDate>,
    ) -> Vec<CalendarDate> {
        let to = to.into();
        from.into()
            .iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.is_market_holiday(d))
            .collect()
    }

    /// Return `true` if queries for `date` are answered from the cache.
    pub fn is_cached(&self, date: &CalendarDate) -> bool {
        self.cache.covers(date)
    }

    /// The cached `(start_year, end_year)`, or `None` if uncached.
    pub fn cached_range(&self) -> Option<(i32, i32)> {
        self.cache.range()
    }

    /// Number of cached holidays.
    pub fn cached_len(&self) -> usize {
        self.cache.dates.len()
    }

    /// The underlying holiday rules.
    pub fn rules(&self) -> &R {
        &self.rules
    }
}

// ── TradingDayCalendar ────────────────────────────────────────────────────────

/// Answers "is this date a trading day?" (neither a weekend nor a market
/// holiday) for a [`HolidayRules`] set, optionally from a precomputed year
/// range.
#[derive(Debug, Clone)]
pub struct TradingDayCalendar<R = UsMarketHolidays> {
    rules: R,
    cache: CachedRange,
}

/// Trading-day predicate evaluated straight from the rules.
fn is_trading_day_uncached<R: HolidayRules>(rules: &R, date: &CalendarDate) -> bool {
    !(rules.is_market_holiday(date) || date.is_weekend())
}

impl TradingDayCalendar<UsMarketHolidays> {
    /// Uncached calendar of US trading days.
    pub fn new() -> Self {
        Self::with_rules(UsMarketHolidays)
    }

    /// US trading-day calendar with every trading day from January 1 of
    /// `start_year` through December 31 of `end_year` precomputed.
    pub fn with_cache(start_year: i32, end_year: i32) -> Self {
        Self::with_rules_cached(UsMarketHolidays, start_year, end_year)
    }
}

impl<R: HolidayRules + Default> Default for TradingDayCalendar<R> {
    fn default() -> Self {
        Self::with_rules(R::default())
    }
}

impl<R: HolidayRules> TradingDayCalendar<R> {
    /// Uncached calendar over `rules`.
    pub fn with_rules(rules: R) -> Self {
        Self {
            rules,
            cache: CachedRange::empty(),
        }
    }

    /// Calendar over `rules` with `start_year..=end_year` precomputed.
    pub fn with_rules_cached(rules: R, start_year: i32, end_year: i32) -> Self {
        let mut calendar = Self::with_rules(rules);
        calendar.cache(start_year, end_year);
        calendar
    }

    /// Precompute every trading day from January 1 of `start_year` through
    /// December 31 of `end_year`, replacing any previously cached range.
    pub fn cache(&mut self, start_year: i32, end_year: i32) {
        let rules = &self.rules;
        self.cache
            .fill(start_year, end_year, |date| is_trading_day_uncached(rules, date));
        debug!(
            rules = self.rules.name(),
            start_year,
            end_year,
            trading_days = self.cache.dates.len(),
            "cached trading days"
        );
    }

    /// Return `true` if `date` is a trading day.
    ///
    /// Accepts a [`CalendarDate`], a packed `YYYYMMDD` integer or a
    /// `(year, month, day)` tuple. An invalid date is neither a holiday nor
    /// a weekend, so it reads as a trading day; check
    /// [`CalendarDate::is_valid`] first where that matters.
    pub fn is_trading_day(&self, date: impl Into<CalendarDate>) -> bool {
        let date = date.into();
        self.cache
            .lookup(&date)
            .unwrap_or_else(|| is_trading_day_uncached(&self.rules, &date))
    }

    /// First trading day strictly after `date`.
    ///
    /// `None` if `date` is invalid or no trading day exists before the end of
    /// the supported years.
    pub fn next_trading_day(&self, date: impl Into<CalendarDate>) -> Option<CalendarDate> {
        date.into()
            .next_day()
            .iter_days()
            .find(|d| self.is_trading_day(d))
    }

    /// Last trading day strictly before `date`.
    pub fn previous_trading_day(&self, date: impl Into<CalendarDate>) -> Option<CalendarDate> {
        date.into()
            .previous_day()
            .iter_days_back()
            .find(|d| self.is_trading_day(d))
    }

    /// Count trading days after `from` up to and including `to`.
    ///
    /// Negative if `to` is before `from`; 0 if either date is invalid.
    pub fn trading_days_between(
        &self,
        from: impl Into<CalendarDate>,
        to: impl Into<CalendarDate>,
    ) -> i32 {
        let (from, to) = (from.into(), to.into());
        if !from.is_valid() || !to.is_valid() || from == to {
            return 0;
        }
        let (sign, start, end) = if to > from { (1, from, to) } else { (-1, to, from) };
        let count = start
            .next_day()
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_trading_day(d))
            .count();
        sign * count as i32
    }

    /// Return `true` if queries for `date` are answered from the cache.
    pub fn is_cached(&self, date: &CalendarDate) -> bool {
        self.cache.covers(date)
    }

    /// The cached `(start_year, end_year)`, or `None` if uncached.
    pub fn cached_range(&self) -> Option<(i32, i32)> {
        self.cache.range()
    }

    /// Number of cached trading days.
    pub fn cached_len(&self) -> usize {
        self.cache.dates.len()
    }

    /// The underlying holiday rules.
    pub fn rules(&self) -> &R {
        &self.rules
    }
}
