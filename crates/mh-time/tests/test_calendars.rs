//! Tests for `HolidayCalendar` and `TradingDayCalendar`: cached, partially
//! cached and uncached calendars must agree with the rules everywhere.

use mh_time::{
    CalendarDate, HolidayCalendar, HolidayRules, NoHolidays, TradingDayCalendar, UsMarketHolidays,
};

fn sweep(from: i32, to: i32) -> impl Iterator<Item = CalendarDate> {
    CalendarDate::new(from, 1, 1)
        .iter_days()
        .take_while(move |d| d.year() <= to)
}

// ─── HolidayCalendar ──────────────────────────────────────────────────────────

fn check_holiday_calendar(calendar: &HolidayCalendar) {
    for date in sweep(2000, 2040) {
        assert_eq!(
            calendar.is_market_holiday(date),
            UsMarketHolidays.is_market_holiday(&date),
            "{date}"
        );
    }
}

#[test]
fn holiday_calendar_with_cache() {
    check_holiday_calendar(&HolidayCalendar::with_cache(2000, 2040));
}

#[test]
fn holiday_calendar_partial_cache() {
    check_holiday_calendar(&HolidayCalendar::with_cache(2010, 2020));
}

#[test]
fn holiday_calendar_no_cache() {
    check_holiday_calendar(&HolidayCalendar::new());
}

#[test]
fn cached_and_uncached_agree() {
    let cached = HolidayCalendar::with_cache(2000, 2040);
    let uncached = HolidayCalendar::new();
    for date in sweep(2000, 2040) {
        assert_eq!(
            cached.is_market_holiday(date),
            uncached.is_market_holiday(date),
            "{date}"
        );
        assert_eq!(
            cached.is_market_holiday(date.to_packed()),
            cached.is_market_holiday((date.year(), date.month(), date.day())),
        );
    }
}

/// Rules that change their mind after caching, to observe the cache contract.
#[derive(Debug, Default)]
struct Flipping(std::sync::atomic::AtomicBool);

impl HolidayRules for Flipping {
    fn name(&self) -> &str {
        "Flipping"
    }

    fn is_market_holiday(&self, date: &CalendarDate) -> bool {
        let flipped = self.0.load(std::sync::atomic::Ordering::Relaxed);
        date.is_valid() && (date.day() == 1) != flipped
    }
}

#[test]
fn cache_is_authoritative_within_range() {
    let calendar = HolidayCalendar::with_rules_cached(Flipping::default(), 2020, 2020);
    calendar
        .rules()
        .0
        .store(true, std::sync::atomic::Ordering::Relaxed);
    // Cached year still answers as the rules did at cache time
    assert!(calendar.is_market_holiday(20200301));
    assert!(!calendar.is_market_holiday(20200302));
    // Uncached year sees the new behaviour
    assert!(!calendar.is_market_holiday(20210301));
    assert!(calendar.is_market_holiday(20210302));
}

// ─── TradingDayCalendar ───────────────────────────────────────────────────────

fn check_trading_calendar(calendar: &TradingDayCalendar) {
    for date in sweep(2000, 2040) {
        let expected = !UsMarketHolidays.is_market_holiday(&date) && !date.is_weekend();
        assert_eq!(calendar.is_trading_day(date), expected, "{date}");
    }
}

#[test]
fn trading_calendar_with_cache() {
    check_trading_calendar(&TradingDayCalendar::with_cache(2000, 2040));
}

#[test]
fn trading_calendar_partial_cache() {
    check_trading_calendar(&TradingDayCalendar::with_cache(2010, 2020));
}

#[test]
fn trading_calendar_no_cache() {
    check_trading_calendar(&TradingDayCalendar::new());
}

#[test]
fn trading_calendar_weekends_only() {
    let calendar = TradingDayCalendar::with_rules_cached(NoHolidays, 2020, 2020);
    for date in sweep(2019, 2021) {
        assert_eq!(calendar.is_trading_day(date), date.is_weekday(), "{date}");
    }
}

#[test]
fn next_trading_day_skips_holidays_and_weekends() {
    let calendar = TradingDayCalendar::with_cache(2020, 2021);
    // Fri 2020-07-03 is Independence Day observed
    assert_eq!(
        calendar.next_trading_day(20200702),
        Some(CalendarDate::new(2020, 7, 6))
    );
    // Christmas Eve 2021 observed, then the weekend
    assert_eq!(
        calendar.next_trading_day(20211223),
        Some(CalendarDate::new(2021, 12, 27))
    );
    assert_eq!(
        calendar.previous_trading_day(20210104),
        Some(CalendarDate::new(2020, 12, 31))
    );
}

#[test]
fn trading_days_per_year() {
    let calendar = TradingDayCalendar::with_cache(2018, 2024);
    // 2022 has no New Year's holiday (Jan 1 is a Saturday)
    for (year, expected) in [(2019, 252), (2020, 253), (2021, 252), (2022, 252), (2023, 251)] {
        let count = sweep(year, year)
            .filter(|d| calendar.is_trading_day(d))
            .count();
        assert_eq!(count, expected, "{year}");
    }
}

#[test]
fn trading_days_between_matches_counting() {
    let calendar = TradingDayCalendar::new();
    assert_eq!(calendar.trading_days_between(20191231, 20201231), 253);
    assert_eq!(calendar.trading_days_between(20201231, 20191231), -253);
}

#[test]
fn holidays_between_over_cache_boundary() {
    let calendar = HolidayCalendar::with_cache(2020, 2020);
    let listed: Vec<i32> = calendar
        .holidays_between(20201101, 20210131)
        .iter()
        .map(CalendarDate::to_packed)
        .collect();
    assert_eq!(listed, vec![20201126, 20201225, 20210101, 20210118]);
}

#[test]
fn invalid_dates_use_the_trading_day_rule() {
    for packed in [20201401, 20200230, -1] {
        let date = CalendarDate::from_packed(packed);
        let expected = !(UsMarketHolidays.is_market_holiday(&date) || date.is_weekend());
        assert!(expected, "{packed}");
        assert_eq!(TradingDayCalendar::new().is_trading_day(packed), expected, "{packed}");
        assert_eq!(
            TradingDayCalendar::with_cache(2018, 2024).is_trading_day(packed),
            expected,
            "{packed}"
        );
        assert!(!HolidayCalendar::with_cache(2018, 2024).is_market_holiday(packed));
    }
}
