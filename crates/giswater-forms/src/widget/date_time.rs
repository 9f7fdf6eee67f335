//! Date and time values.
//!
//! Date-time controls work on a combined `"<date>T<time>"` string. The
//! renderer splits it into a date part and a time part, and the binding layer
//! recombines them when either part changes. Fractional seconds are dropped
//! on split, so split followed by combine is idempotent.

use chrono::{NaiveDate, NaiveTime};

use crate::document::PropertyValue;

/// Splits `"YYYY-MM-DDTHH:MM:SS[.fff]"` into date and time.
///
/// A space separator is accepted as well. A value without a time part gives
/// an empty time.
pub fn split_date_time(value: &str) -> (String, String) {
    let value = value.trim();
    let (date, time) = match value.split_once(['T', ' ']) {
        Some((date, time)) => (date, time),
        None => (value, ""),
    };
    let time = match time.split_once('.') {
        Some((whole, _fraction)) => whole,
        None => time,
    };
    (date.to_string(), time.to_string())
}

/// Combines a date and a time part.
///
/// No date gives an empty value, no time gives the bare date.
pub fn combine_date_time(date: &str, time: &str) -> String {
    match (date.is_empty(), time.is_empty()) {
        (true, _) => String::new(),
        (false, true) => date.to_string(),
        (false, false) => format!("{date}T{time}"),
    }
}

/// Formats a Qt `<date>` struct (`year`, `month`, `day`) as `YYYY-MM-DD`.
///
/// Returns `None` for a missing field or a date that does not exist.
pub fn format_qt_date(value: &PropertyValue) -> Option<String> {
    let year = i32::try_from(value.field_i64("year")?).ok()?;
    let month = u32::try_from(value.field_i64("month")?).ok()?;
    let day = u32::try_from(value.field_i64("day")?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Formats a Qt `<time>` struct (`hour`, `minute`, `second`) as `HH:MM:SS`.
pub fn format_qt_time(value: &PropertyValue) -> Option<String> {
    let hour = u32::try_from(value.field_i64("hour")?).ok()?;
    let minute = u32::try_from(value.field_i64("minute")?).ok()?;
    let second = u32::try_from(value.field_i64("second").unwrap_or(0)).ok()?;
    NaiveTime::from_hms_opt(hour, minute, second).map(|time| time.format("%H:%M:%S").to_string())
}

/// Formats a Qt `<datetime>` struct as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_qt_date_time(value: &PropertyValue) -> Option<String> {
    let date = format_qt_date(value)?;
    let time = format_qt_time(value).unwrap_or_else(|| "00:00:00".to_string());
    Some(combine_date_time(&date, &time))
}

/// Reads a date bound property, falling back to `default` when absent or
/// invalid.
pub(crate) fn date_bound(value: Option<&PropertyValue>, default: &str, widget: &str) -> String {
    let Some(value) = value else {
        return default.to_string();
    };
    match format_qt_date(value) {
        Some(date) => date,
        None => {
            tracing::warn!(
                target: "giswater_forms::render",
                widget,
                ?value,
                "invalid date bound, using default"
            );
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn date(year: &str, month: &str, day: &str) -> PropertyValue {
        PropertyValue::Struct(BTreeMap::from([
            ("year".to_string(), PropertyValue::Text(year.into())),
            ("month".to_string(), PropertyValue::Text(month.into())),
            ("day".to_string(), PropertyValue::Text(day.into())),
        ]))
    }

    #[test]
    fn test_split_strips_fraction() {
        assert_eq!(
            split_date_time("2024-03-01T14:30:00.000"),
            ("2024-03-01".to_string(), "14:30:00".to_string())
        );
        assert_eq!(
            split_date_time("2024-03-01 14:30:00"),
            ("2024-03-01".to_string(), "14:30:00".to_string())
        );
        assert_eq!(
            split_date_time("2024-03-01"),
            ("2024-03-01".to_string(), String::new())
        );
        assert_eq!(split_date_time(""), (String::new(), String::new()));
    }

    #[test]
    fn test_split_combine_is_idempotent() {
        let (d, t) = split_date_time("2024-03-01T14:30:00.000");
        let once = combine_date_time(&d, &t);
        assert_eq!(once, "2024-03-01T14:30:00");
        let (d, t) = split_date_time(&once);
        assert_eq!(combine_date_time(&d, &t), once);
    }

    #[test]
    fn test_combine_without_parts() {
        assert_eq!(combine_date_time("", "10:00:00"), "");
        assert_eq!(combine_date_time("2024-01-02", ""), "2024-01-02");
    }

    #[test]
    fn test_format_qt_date_pads() {
        assert_eq!(format_qt_date(&date("2024", "3", "1")), Some("2024-03-01".into()));
        assert_eq!(format_qt_date(&date("2023", "2", "30")), None);
    }

    #[test]
    fn test_date_bound_fallback() {
        assert_eq!(date_bound(None, "1900-01-01", "d"), "1900-01-01");
        assert_eq!(
            date_bound(Some(&date("2023", "13", "1")), "9999-12-31", "d"),
            "9999-12-31"
        );
        assert_eq!(
            date_bound(Some(&date("2000", "1", "1")), "1900-01-01", "d"),
            "2000-01-01"
        );
    }

    #[test]
    fn test_format_qt_date_time() {
        let mut fields = BTreeMap::from([
            ("year".to_string(), PropertyValue::Text("2024".into())),
            ("month".to_string(), PropertyValue::Text("12".into())),
            ("day".to_string(), PropertyValue::Text("24".into())),
            ("hour".to_string(), PropertyValue::Text("8".into())),
            ("minute".to_string(), PropertyValue::Text("5".into())),
        ]);
        assert_eq!(
            format_qt_date_time(&PropertyValue::Struct(fields.clone())),
            Some("2024-12-24T08:05:00".into())
        );
        fields.remove("hour");
        assert_eq!(
            format_qt_date_time(&PropertyValue::Struct(fields)),
            Some("2024-12-24T00:00:00".into())
        );
    }
}
