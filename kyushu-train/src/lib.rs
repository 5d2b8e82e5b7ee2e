//! JR Kyushu train journey search.
//!
//! Builds validated route searches for the JR Kyushu reservation site and
//! turns its HTML results pages into journeys: ordered, linked train legs
//! with the fares on offer for each.

pub mod domain;
pub mod extract;
pub mod kyushu;
pub mod output;
