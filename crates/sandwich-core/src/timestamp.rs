//! Lenient timestamp parsing for request bodies and query strings.
//!
//! Accepts RFC 3339 (`2025-03-01T12:00:00Z`), naive date-times
//! (`2025-03-01T12:00:00`, `2025-03-01 12:00:00.5`) read as UTC, and bare
//! dates (`2025-03-01`) read as UTC midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp in any of the accepted forms.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// The half-open UTC range `[midnight, next midnight)` covering `date`.
#[must_use]
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + TimeDelta::days(1))
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp, a naive date-time, or YYYY-MM-DD")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_timestamp(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

struct OptionalTimestampVisitor;

impl<'de> Visitor<'de> for OptionalTimestampVisitor {
    type Value = Option<DateTime<Utc>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an optional timestamp")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_str(TimestampVisitor).map(Some)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.is_empty() {
            return Ok(None);
        }
        TimestampVisitor.visit_str(v).map(Some)
    }
}

/// `deserialize_with` helper for `Option<DateTime<Utc>>` fields.
///
/// Pair with `#[serde(default)]` so an absent field is `None`.
pub fn optional<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    d.deserialize_option(OptionalTimestampVisitor)
}

/// `deserialize_with` helper for update fields where `null` clears the value.
///
/// Absent means `None`, `null` means `Some(None)`.
pub fn nullable<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error> {
    optional(d).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "optional")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn accepts_every_form() {
        let rfc = parse_timestamp("2025-03-01T12:30:00+02:00").unwrap();
        assert_eq!(rfc.hour(), 10);

        let naive = parse_timestamp("2025-03-01T12:30:00.123456").unwrap();
        assert_eq!(naive.minute(), 30);

        let spaced = parse_timestamp("2025-03-01 08:00:00").unwrap();
        assert_eq!(spaced.hour(), 8);

        let day = parse_timestamp("2025-03-01").unwrap();
        assert_eq!((day.day(), day.hour()), (1, 0));

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn day_bounds_span_one_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(end - start, TimeDelta::days(1));
        assert_eq!(start.date_naive(), date);
    }

    #[test]
    fn optional_field_forms() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert!(absent.at.is_none());
        let null: Probe = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(null.at.is_none());
        let set: Probe = serde_json::from_str(r#"{"at": "2025-03-01"}"#).unwrap();
        assert!(set.at.is_some());
        assert!(serde_json::from_str::<Probe>(r#"{"at": "soon"}"#).is_err());
    }
}
