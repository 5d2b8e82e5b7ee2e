//! Station types.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Code used for leg endpoints when the results page carries no real code.
pub const PLACEHOLDER_CODE: &str = "0000";

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code {code:?}: must contain only English letters and digits")]
pub struct InvalidStationCode {
    code: String,
}

/// A station code as used by the reservation site (e.g. `00F00B261279`).
///
/// Codes are non-empty ASCII alphanumeric strings. This type guarantees
/// that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use kyushu_train::domain::StationCode;
///
/// let code = StationCode::parse("00F00B261279").unwrap();
/// assert_eq!(code.as_str(), "00F00B261279");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("00F-00").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStationCode { code: s.to_string() });
        }
        Ok(StationCode(s.to_string()))
    }

    /// The code used when the page does not carry a real one.
    pub fn placeholder() -> Self {
        StationCode(PLACEHOLDER_CODE.to_string())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the placeholder code.
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_CODE
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named station. Two stations are equal iff name and code both match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    name: String,
    code: StationCode,
}

impl Station {
    /// Creates a station, validating the code.
    pub fn new(name: impl Into<String>, code: &str) -> Result<Self, InvalidStationCode> {
        Ok(Self {
            name: name.into(),
            code: StationCode::parse(code)?,
        })
    }

    /// Creates a station from an already validated code.
    pub fn with_code(name: impl Into<String>, code: StationCode) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }

    /// Creates a station carrying the placeholder code.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::with_code(name, StationCode::placeholder())
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the station code.
    pub fn code(&self) -> &StationCode {
        &self.code
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

static KANJI_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{Han}々〆ヵヶ]+$").expect("valid keyword pattern"));

/// Error returned when a station search keyword is not kanji-only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("station keyword {0:?} must contain only Japanese kanji characters")]
pub struct InvalidStationKeyword(String);

/// A keyword for the station suggest endpoint.
///
/// The site only matches on kanji, so romaji and kana are rejected up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationKeyword(String);

impl StationKeyword {
    /// Parse a keyword, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationKeyword> {
        let trimmed = s.trim();
        if !KANJI_KEYWORD.is_match(trimmed) {
            return Err(InvalidStationKeyword(s.to_string()));
        }
        Ok(StationKeyword(trimmed.to_string()))
    }

    /// Returns the keyword as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
