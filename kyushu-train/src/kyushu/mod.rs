//! JR Kyushu reservation site client.
//!
//! Fetches stations and holidays from the site's JSON endpoints, and runs
//! route searches whose results pages are handed to [`crate::extract`].

mod client;
mod error;
pub mod form;
pub mod page;
mod types;

pub use client::{ClientConfig, DEFAULT_BASE_URL, KyushuClient};
pub use error::KyushuError;
pub use types::{HolidayEntry, SuggestedStation, convert_holidays, convert_stations};
