//! United States market holidays (modern NYSE observance).

use super::{
    good_friday as computus_good_friday, weekday_on_or_after, weekend_observed, HolidayRules,
};
use crate::date::CalendarDate;
use crate::month::Month;
use crate::weekday::Weekday;

/// United States — modern stock-market holidays.
///
/// Holidays:
/// * New Year's Day (Jan 1; if Sun → Mon; if Sat → no holiday)
/// * Martin Luther King Jr. Day (3rd Mon in Jan)
/// * Presidents' Day (3rd Mon in Feb)
/// * Good Friday (Friday before Easter Sunday)
/// * Memorial Day (last Mon in May)
/// * Independence Day (Jul 4; if Sun → Mon; if Sat → Fri)
/// * Labor Day (1st Mon in Sep)
/// * Thanksgiving Day (4th Thu in Nov)
/// * Christmas Day (Dec 25; if Sun → Mon; if Sat → Fri)
///
/// The rules describe present-day observance and are applied to every year
/// alike. Markets did not always close on these days (MLK Day only from
/// 1998, for instance), one-off closings are not modelled, and Juneteenth is
/// not part of this rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsMarketHolidays;

impl HolidayRules for UsMarketHolidays {
    fn name(&self) -> &str {
        "US Market"
    }

    fn is_market_holiday(&self, date: &CalendarDate) -> bool {
        let year = date.year();
        match Month::from_number(date.month()) {
            Some(Month::January) => {
                Self::new_years_day(year).is_some_and(|d| d == *date)
                    || *date == Self::martin_luther_king_day(year)
            }
            Some(Month::February) => *date == Self::presidents_day(year),
            // Good Friday falls anywhere from March 20 to April 23
            Some(Month::March | Month::April) => *date == Self::good_friday(year),
            Some(Month::May) => *date == Self::memorial_day(year),
            Some(Month::July) => *date == Self::independence_day(year),
            Some(Month::September) => *date == Self::labor_day(year),
            Some(Month::November) => *date == Self::thanksgiving(year),
            Some(Month::December) => *date == Self::christmas(year),
            _ => false,
        }
    }
}

impl UsMarketHolidays {
    /// Observed New Year's Day: January 1, or January 2 when the 1st is a
    /// Sunday.
    ///
    /// `None` when January 1 is a Saturday. The market stays open on the
    /// preceding December 31 and there is no observed holiday that year.
    pub fn new_years_day(year: i32) -> Option<CalendarDate> {
        let jan1 = CalendarDate::new(year, Month::January.number(), 1);
        match jan1.day_of_week()? {
            Weekday::Saturday => None,
            Weekday::Sunday => Some(jan1.next_day()),
            _ => Some(jan1),
        }
    }

    /// Third Monday in January (15th–21st).
    pub fn martin_luther_king_day(year: i32) -> CalendarDate {
        weekday_on_or_after(year, Month::January.number(), 15, Weekday::Monday)
    }

    /// Third Monday in February (15th–21st).
    pub fn presidents_day(year: i32) -> CalendarDate {
        weekday_on_or_after(year, Month::February.number(), 15, Weekday::Monday)
    }

    /// Friday before Easter Sunday.
    pub fn good_friday(year: i32) -> CalendarDate {
        computus_good_friday(year)
    }

    /// Last Monday in May (25th–31st).
    pub fn memorial_day(year: i32) -> CalendarDate {
        weekday_on_or_after(year, Month::May.number(), 25, Weekday::Monday)
    }

    /// July 4, shifted off weekends.
    pub fn independence_day(year: i32) -> CalendarDate {
        weekend_observed(year, Month::July.number(), 4)
    }

    /// First Monday in September (1st–7th).
    pub fn labor_day(year: i32) -> CalendarDate {
        weekday_on_or_after(year, Month::September.number(), 1, Weekday::Monday)
    }

    /// Fourth Thursday in November (22nd–28th).
    pub fn thanksgiving(year: i32) -> CalendarDate {
        weekday_on_or_after(year, Month::November.number(), 22, Weekday::Thursday)
    }

    /// December 25, shifted off weekends.
    pub fn christmas(year: i32) -> CalendarDate {
        weekend_observed(year, Month::December.number(), 25)
    }

    /// Every observed holiday of `year`, in calendar order.
    pub fn holidays_in_year(year: i32) -> Vec<CalendarDate> {
        let mut holidays: Vec<CalendarDate> = Self::new_years_day(year).into_iter().collect();
        holidays.extend([
            Self::martin_luther_king_day(year),
            Self::presidents_day(year),
            Self::good_friday(year),
            Self::memorial_day(year),
            Self::independence_day(year),
            Self::labor_day(year),
            Self::thanksgiving(year),
            Self::christmas(year),
        ]);
        holidays.retain(CalendarDate::is_valid);
        holidays
    }
}
