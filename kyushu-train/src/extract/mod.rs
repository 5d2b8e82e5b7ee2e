//! Journey extraction from route search results pages.
//!
//! Extraction runs in three stages over one parsed document:
//!
//! 1. [`markup`] copies raw text out of each journey block
//! 2. [`interpret`] turns that text into dates, times, prices and classes
//! 3. [`assemble`] builds legs and fares and validates them into journeys
//!
//! # Examples
//!
//! ```
//! use kyushu_train::extract::{DateContext, JourneyAssembler};
//! use scraper::Html;
//!
//! let document = Html::parse_document("<html><body>no results</body></html>");
//! let assembly = JourneyAssembler::new(DateContext::today()).assemble(&document);
//! assert!(assembly.journeys().is_empty());
//! ```

pub mod assemble;
pub mod interpret;
pub mod markup;

pub use assemble::{Assembly, BlockError, DroppedBlock, JourneyAssembler};
pub use interpret::{DateContext, InterpretError};
pub use markup::{ResultsPage, extract_page};
