//! Ordered bounds for `min` / `max` checks.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

/// A bound that form values can be ordered against: a number, or a point in
/// time given as an ISO 8601 date or RFC 3339 timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparable {
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Comparable {
    /// Parse `YYYY-MM-DD` or an RFC 3339 timestamp (normalized to UTC).
    pub fn parse_date(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::Date(date));
        }
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self::DateTime(dt.naive_utc()))
    }

    /// Order `value` relative to this bound.
    ///
    /// `None` when the two are not comparable: numbers compare with numbers
    /// and numeric strings, dates with date strings.
    pub fn compare(&self, value: &Value) -> Option<Ordering> {
        match self {
            Self::Number(bound) => {
                let n = match value {
                    Value::Number(n) => n.as_f64()?,
                    Value::String(s) => s.trim().parse::<f64>().ok()?,
                    _ => return None,
                };
                n.partial_cmp(bound)
            }
            Self::Date(_) | Self::DateTime(_) => {
                let Value::String(s) = value else {
                    return None;
                };
                let instant = Self::parse_date(s)?.instant()?;
                Some(instant.cmp(&self.instant()?))
            }
        }
    }

    fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Number(_) => None,
            Self::Date(date) => date.and_hms_opt(0, 0, 0),
            Self::DateTime(dt) => Some(*dt),
        }
    }
}

impl fmt::Display for Comparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
        }
    }
}

impl From<f64> for Comparable {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Comparable {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<NaiveDate> for Comparable {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ComparableSpec {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Comparable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ComparableSpec::deserialize(deserializer)? {
            ComparableSpec::Number(n) => Ok(Self::Number(n)),
            ComparableSpec::Text(s) => Self::parse_date(&s).ok_or_else(|| {
                serde::de::Error::custom(format!("expected a number or ISO 8601 date, got '{s}'"))
            }),
        }
    }
}
