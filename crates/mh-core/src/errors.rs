//! Error types for market-holidays.
//!
//! Holiday and trading-day queries never fail: an impossible date is a value
//! (see `CalendarDate::is_valid`), not an error. The error type below is only
//! produced by the *strict* conversions, such as parsing a date from text or
//! turning a `CalendarDate` into a `chrono::NaiveDate`. The `fail!` macro is
//! shorthand for returning an invalid-date error early.

use thiserror::Error;

/// The top-level error type used throughout market-holidays.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A year/month/day triple that does not name a real calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Text that could not be parsed as a date.
    #[error("cannot parse date from {input:?}: {reason}")]
    Parse {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Shorthand `Result` type used throughout market-holidays.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidDate(...))` immediately.
///
/// # Example
/// ```
/// use mh_core::{fail, errors::Error};
/// fn never_valid() -> mh_core::errors::Result<()> {
///     fail!("2021-02-29 does not exist");
/// }
/// assert_eq!(
///     never_valid(),
///     Err(Error::InvalidDate("2021-02-29 does not exist".into()))
/// );
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::InvalidDate(format!($($msg)*)))
    };
}
