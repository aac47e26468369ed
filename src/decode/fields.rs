//! Per-field coercion rules
//!
//! Each parser takes the raw cell and returns `Ok(None)` for an empty value,
//! `Ok(Some(_))` for a well-formed one, or `Err(reason)` when the value does
//! not fit the field. Callers attach the field identity to the reason.

use crate::schema::TimestampFormat;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Layout of `TimestampFormat::SpaceSeparated`
const SPACE_SEPARATED_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Trailing CIDR prefix length, e.g. `/32`
static CIDR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<addr>.+)/\d{1,3}$").expect("valid CIDR regex"));

/// IPv4 address (or bracketed IPv6 address) followed by a zero port
static ZERO_PORT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<v4>\d{1,3}(?:\.\d{1,3}){3})|\[(?P<v6>[0-9A-Fa-f:.]+)\]):0$")
        .expect("valid port regex")
});

pub(crate) type FieldResult<T> = std::result::Result<Option<T>, String>;

/// Free text
pub(crate) fn text(raw: &str) -> FieldResult<String> {
    Ok(non_empty(raw).map(str::to_string))
}

/// Timestamp in a fixed layout; a mismatch is an error, never a default
pub(crate) fn timestamp(raw: &str, format: TimestampFormat) -> FieldResult<DateTime<Utc>> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };

    let parsed = match format {
        TimestampFormat::Rfc3339 => DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| format!("not an RFC 3339 timestamp: {raw:?} ({e})")),
        TimestampFormat::SpaceSeparated => NaiveDateTime::parse_from_str(raw, SPACE_SEPARATED_LAYOUT)
            .map(|ts| ts.and_utc())
            .map_err(|e| format!("not a 'YYYY-MM-DD HH:MM:SS' timestamp: {raw:?} ({e})")),
    }?;

    Ok(Some(parsed))
}

/// Base-10 integer
pub(crate) fn integer(raw: &str) -> FieldResult<i64> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| format!("not an integer: {raw:?}"))
}

/// Strict boolean literal: `1`, `t`, `T`, `true`, `True`, `TRUE` and the
/// matching `0`, `f`, `F`, `false`, `False`, `FALSE`
pub(crate) fn boolean(raw: &str) -> FieldResult<bool> {
    match raw {
        "" => Ok(None),
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(Some(true)),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(Some(false)),
        other => Err(format!("not a boolean literal: {other:?}")),
    }
}

/// Single text value carried by a list-typed field. Commas are not split.
pub(crate) fn single(raw: &str) -> FieldResult<Vec<String>> {
    Ok(non_empty(raw).map(|raw| vec![raw.to_string()]))
}

/// Comma-delimited list. Empty segments are kept; nothing is trimmed.
pub(crate) fn list(raw: &str) -> FieldResult<Vec<String>> {
    Ok(non_empty(raw).map(|raw| raw.split(',').map(str::to_string).collect()))
}

/// Public IP address with a trailing `/prefix` and `:0` port removed.
///
/// Values that do not look like an address with those suffixes are passed
/// through unchanged.
pub(crate) fn public_ip(raw: &str) -> FieldResult<String> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    Ok(Some(normalize_public_ip(raw)))
}

fn normalize_public_ip(raw: &str) -> String {
    let without_cidr = CIDR_SUFFIX
        .captures(raw)
        .and_then(|caps| caps.name("addr"))
        .map_or(raw, |m| m.as_str());

    match ZERO_PORT_SUFFIX.captures(without_cidr) {
        Some(caps) => caps
            .name("v4")
            .or_else(|| caps.name("v6"))
            .map_or(without_cidr, |m| m.as_str())
            .to_string(),
        None => without_cidr.to_string(),
    }
}

fn non_empty(raw: &str) -> Option<&str> {
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};
    use test_case::test_case;

    #[test]
    fn test_empty_is_absent_for_every_kind() {
        assert_eq!(text("").unwrap(), None);
        assert_eq!(integer("").unwrap(), None);
        assert_eq!(boolean("").unwrap(), None);
        assert_eq!(list("").unwrap(), None);
        assert_eq!(public_ip("").unwrap(), None);
        assert_eq!(timestamp("", TimestampFormat::Rfc3339).unwrap(), None);
        assert_eq!(timestamp("", TimestampFormat::SpaceSeparated).unwrap(), None);
    }

    #[test]
    fn test_rfc3339_nanosecond_timestamp() {
        let ts = timestamp("2021-04-01T10:15:30.123456789Z", TimestampFormat::Rfc3339)
            .unwrap()
            .unwrap();
        assert_eq!(ts.year(), 2021);
        assert_eq!(ts.nanosecond(), 123_456_789);
    }

    #[test]
    fn test_rfc3339_offset_is_converted_to_utc() {
        let ts = timestamp("2021-04-01T12:00:00+02:00", TimestampFormat::Rfc3339)
            .unwrap()
            .unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2021, 4, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_space_separated_timestamp() {
        let ts = timestamp("2020-12-31 23:59:58", TimestampFormat::SpaceSeparated)
            .unwrap()
            .unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 58).unwrap());
    }

    #[test]
    fn test_timestamp_format_is_not_interchangeable() {
        assert!(timestamp("2020-12-31 23:59:58", TimestampFormat::Rfc3339).is_err());
        assert!(timestamp("2020-12-31T23:59:58Z", TimestampFormat::SpaceSeparated).is_err());
    }

    #[test_case("123" => Some(123))]
    #[test_case("0" => Some(0))]
    #[test_case("-7" => Some(-7))]
    fn test_integer_ok(raw: &str) -> Option<i64> {
        integer(raw).unwrap()
    }

    #[test_case("12.5")]
    #[test_case("abc")]
    #[test_case(" 12")]
    fn test_integer_rejects(raw: &str) {
        let reason = integer(raw).unwrap_err();
        assert!(reason.starts_with("not an integer"));
    }

    #[test_case("true" => Some(true))]
    #[test_case("TRUE" => Some(true))]
    #[test_case("False" => Some(false))]
    #[test_case("1" => Some(true))]
    #[test_case("t" => Some(true))]
    #[test_case("T" => Some(true))]
    #[test_case("0" => Some(false))]
    #[test_case("f" => Some(false))]
    #[test_case("F" => Some(false))]
    fn test_boolean_ok(raw: &str) -> Option<bool> {
        boolean(raw).unwrap()
    }

    #[test_case("yes")]
    #[test_case("2")]
    #[test_case("tRuE")]
    #[test_case("y")]
    fn test_boolean_rejects(raw: &str) {
        assert!(boolean(raw).is_err());
    }

    #[test]
    fn test_list_keeps_empty_segments_without_trimming() {
        let items = list("a, b,,c,").unwrap().unwrap();
        assert_eq!(items, vec!["a", " b", "", "c", ""]);
    }

    #[test]
    fn test_single_keeps_commas() {
        assert_eq!(single("").unwrap(), None);
        assert_eq!(single("Backup, 2021").unwrap(), Some(vec!["Backup, 2021".to_string()]));
    }

    #[test_case("a" => 1)]
    #[test_case("," => 2)]
    #[test_case("x,y,z" => 3)]
    fn test_list_has_separator_count_plus_one(raw: &str) -> usize {
        list(raw).unwrap().unwrap().len()
    }

    #[test_case("203.0.113.5" => "203.0.113.5" ; "plain")]
    #[test_case("203.0.113.5/32" => "203.0.113.5" ; "cidr")]
    #[test_case("203.0.113.5:0" => "203.0.113.5" ; "zero port")]
    #[test_case("203.0.113.5:0/32" => "203.0.113.5" ; "zero port and cidr")]
    #[test_case("203.0.113.5:8080" => "203.0.113.5:8080" ; "real port kept")]
    #[test_case("[2001:db8::1]:0" => "2001:db8::1" ; "bracketed v6")]
    #[test_case("2001:db8::0" => "2001:db8::0" ; "v6 ending in zero")]
    #[test_case("not-an-ip" => "not-an-ip" ; "passthrough")]
    fn test_public_ip_normalization(raw: &str) -> String {
        public_ip(raw).unwrap().unwrap()
    }
}
