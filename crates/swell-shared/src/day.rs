//! Calendar-day keys.
//!
//! A `DayKey` is the canonical identifier for one calendar day, rendered as
//! `YYYY-MM-DD`. "Today" is always taken in UTC so that streaks do not shift
//! when the device timezone changes.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SwellError;

const DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Today's key (UTC).
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Build a key from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn parse(s: &str) -> Result<Self, SwellError> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
            .map(Self)
            .map_err(|_| SwellError::InvalidDay(s.to_string()))
    }

    /// The previous calendar day.
    pub fn prev(&self) -> Option<Self> {
        self.0.checked_sub_days(Days::new(1)).map(Self)
    }

    /// The next calendar day.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_days(Days::new(1)).map(Self)
    }

    /// True when `self` is exactly one day after `earlier`.
    pub fn follows(&self, earlier: DayKey) -> bool {
        earlier.next() == Some(*self)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = SwellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DayKey {
    type Error = SwellError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_roundtrip() {
        let key = DayKey::parse("2024-03-09").unwrap();
        assert_eq!(key.to_string(), "2024-03-09");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            DayKey::parse("09/03/2024"),
            Err(SwellError::InvalidDay(_))
        ));
        assert!(DayKey::parse("2024-02-30").is_err());
    }

    #[test]
    fn test_prev_crosses_month_and_year() {
        let key = DayKey::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(key.prev().unwrap().to_string(), "2023-12-31");

        let leap = DayKey::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(leap.prev().unwrap().to_string(), "2024-02-29");
    }

    #[test]
    fn test_follows() {
        let a = DayKey::from_ymd(2024, 5, 31).unwrap();
        let b = DayKey::from_ymd(2024, 6, 1).unwrap();
        assert!(b.follows(a));
        assert!(!a.follows(b));
        assert!(!a.follows(a));
    }

    #[test]
    fn test_serde_as_string() {
        let key = DayKey::from_ymd(2025, 6, 15).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DayKey>("\"tomorrow\"").is_err());
    }
}
