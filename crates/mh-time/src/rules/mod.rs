//! Holiday rules: the `HolidayRules` trait and the date-shifting rule shapes
//! that concrete rule sets are built from.
//!
//! A rule set is a pure predicate over [`CalendarDate`]. It holds no state,
//! so [`HolidayCalendar`](crate::calendar::HolidayCalendar) and
//! [`TradingDayCalendar`](crate::calendar::TradingDayCalendar) work with any
//! implementation, including a boxed trait object.

use std::sync::Arc;

use crate::date::CalendarDate;
use crate::weekday::Weekday;

/// United States market holidays.
pub mod united_states;

pub use united_states::UsMarketHolidays;

/// A set of market-holiday rules.
pub trait HolidayRules: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"US Market"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a market holiday. Invalid dates are never
    /// holidays.
    fn is_market_holiday(&self, date: &CalendarDate) -> bool;
}

impl<R: HolidayRules + ?Sized> HolidayRules for &R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_market_holiday(&self, date: &CalendarDate) -> bool {
        (**self).is_market_holiday(date)
    }
}

impl<R: HolidayRules + ?Sized> HolidayRules for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_market_holiday(&self, date: &CalendarDate) -> bool {
        (**self).is_market_holiday(date)
    }
}

impl<R: HolidayRules + ?Sized> HolidayRules for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_market_holiday(&self, date: &CalendarDate) -> bool {
        (**self).is_market_holiday(date)
    }
}

/// A rule set with no holidays at all.
///
/// With a [`TradingDayCalendar`](crate::calendar::TradingDayCalendar) this
/// leaves weekends as the only non-trading days.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayRules for NoHolidays {
    fn name(&self) -> &str {
        "No Holidays"
    }

    fn is_market_holiday(&self, _date: &CalendarDate) -> bool {
        false
    }
}

// ── Rule shapes ───────────────────────────────────────────────────────────────

/// First `weekday` on or after `floor_day` of the given month.
///
/// With a floor of 15 this is the third such weekday of the month, with a
/// floor of 22 the fourth, and with a floor of 25 in a 31-day month the last.
/// Invalid if the floor date itself is invalid.
pub fn weekday_on_or_after(
    year: i32,
    month: i32,
    floor_day: i32,
    weekday: Weekday,
) -> CalendarDate {
    let Some(floor) = CalendarDate::new(year, month, floor_day).day_of_week() else {
        return CalendarDate::INVALID;
    };
    CalendarDate::new(year, month, floor_day + floor.days_until(weekday))
}

/// The weekday on which a fixed-date holiday is observed: a Saturday holiday
/// moves back to Friday and a Sunday holiday moves forward to Monday.
///
/// The shift may cross a month boundary (a Saturday the 1st is observed on
/// the last day of the previous month).
pub fn weekend_observed(year: i32, month: i32, day: i32) -> CalendarDate {
    let date = CalendarDate::new(year, month, day);
    match date.day_of_week() {
        Some(Weekday::Saturday) => date.previous_day(),
        Some(Weekday::Sunday) => date.next_day(),
        _ => date,
    }
}

/// Good Friday: the Friday before Easter Sunday (Gregorian computus).
///
/// Every step uses truncating integer division. The year, month and day are
/// computed directly, without going through Easter Sunday.
pub fn good_friday(year: i32) -> CalendarDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let i = c / 4;
    let k = c % 4;
    let g = (8 * b + 13) / 25;
    let h = (19 * a + b - d - g + 15) % 30;
    let l = (2 * e + 2 * i - k + 32 - h) % 7;
    let m = (a + 11 * h + 19 * l) / 433;
    let days_to_good_friday = h + l - 7 * m - 2;
    let month = (days_to_good_friday + 90) / 25;
    let day = (days_to_good_friday + 33 * month + 19) % 32;
    CalendarDate::new(year, month, day)
}

/// Easter Sunday, two days after [`good_friday`].
pub fn easter_sunday(year: i32) -> CalendarDate {
    good_friday(year).next_day().next_day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_monday() {
        // January 2020: the 15th is a Wednesday, third Monday is the 20th
        assert_eq!(weekday_on_or_after(2020, 1, 15, Weekday::Monday), 20200120);
        // January 2024: the 15th is itself a Monday
        assert_eq!(weekday_on_or_after(2024, 1, 15, Weekday::Monday), 20240115);
    }

    #[test]
    fn fourth_thursday() {
        assert_eq!(weekday_on_or_after(2020, 11, 22, Weekday::Thursday), 20201126);
        assert_eq!(weekday_on_or_after(2018, 11, 22, Weekday::Thursday), 20181122);
    }

    #[test]
    fn invalid_floor() {
        assert!(!weekday_on_or_after(2020, 2, 30, Weekday::Monday).is_valid());
        assert!(!weekday_on_or_after(0, 1, 15, Weekday::Monday).is_valid());
    }

    #[test]
    fn observance_shift() {
        assert_eq!(weekend_observed(2020, 7, 4), 20200703); // Saturday
        assert_eq!(weekend_observed(2021, 7, 4), 20210705); // Sunday
        assert_eq!(weekend_observed(2019, 7, 4), 20190704); // Thursday
        assert_eq!(weekend_observed(2022, 1, 1), 20211231); // Saturday, crosses year
    }

    #[test]
    fn good_friday_known_years() {
        assert_eq!(good_friday(2019), 20190419);
        assert_eq!(good_friday(2020), 20200410);
        assert_eq!(good_friday(2021), 20210402);
        assert_eq!(good_friday(2024), 20240329);
        // Earliest possible Easter (March 22) in 2285
        assert_eq!(good_friday(2285), 22850320);
        // Latest possible Easter (April 25) in 2038
        assert_eq!(good_friday(2038), 20380423);
    }

    #[test]
    fn easter_is_a_sunday() {
        for year in 1900..2100 {
            let easter = easter_sunday(year);
            assert_eq!(easter.day_of_week(), Some(Weekday::Sunday), "{easter}");
            assert_eq!(good_friday(year).day_of_week(), Some(Weekday::Friday));
        }
    }

    #[test]
    fn no_holidays() {
        let rules = NoHolidays;
        assert!(!rules.is_market_holiday(&CalendarDate::new(2020, 12, 25)));
        assert_eq!(rules.name(), "No Holidays");
    }

    #[test]
    fn trait_objects_forward() {
        let boxed: Box<dyn HolidayRules> = Box::new(UsMarketHolidays);
        let shared: Arc<dyn HolidayRules> = Arc::new(UsMarketHolidays);
        let christmas = CalendarDate::new(2020, 12, 25);
        assert!(boxed.is_market_holiday(&christmas));
        assert!(shared.is_market_holiday(&christmas));
        assert!((&UsMarketHolidays).is_market_holiday(&christmas));
        assert_eq!(boxed.name(), UsMarketHolidays.name());
    }
}
