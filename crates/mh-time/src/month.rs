//! Month numbers used by the holiday rules.

/// Month of the year, numbered as in a packed `YYYYMMDD` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The month numbered `n`, or `None` outside `1..=12` (an invalid
    /// date's month reads as `0`).
    pub fn from_number(n: i32) -> Option<Self> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// 1-based month number.
    pub fn number(self) -> i32 {
        self as i32
    }
}
