//! # mh-core
//!
//! Error definitions shared by the market-holidays crates.
//!
//! Date and calendar queries are infallible; the [`Error`] type here is only
//! returned by strict conversions (parsing, `try_new`, conversion into
//! `chrono` types).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `fail!` macro.
pub mod errors;

pub use errors::{Error, Result};
