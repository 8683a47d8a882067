use chrono::{NaiveDate, NaiveTime};
use cronos_core::enums::TaskStatus;

/// Parse a status identifier (`todo`, `in-progress`, `done`).
pub fn parse_status(raw: &str) -> anyhow::Result<TaskStatus> {
    TaskStatus::from_identifier(raw.trim()).ok_or_else(|| {
        anyhow::anyhow!("invalid status '{raw}': expected todo, in-progress or done")
    })
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid date '{raw}' (expected YYYY-MM-DD): {error}"))
}

/// Minute precision only: times are stored as `HH:MM`.
pub fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|error| anyhow::anyhow!("invalid time '{raw}' (expected HH:MM): {error}"))
}

/// An update argument for a nullable field: absent leaves the field alone,
/// an empty value clears it.
pub fn clearable<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> anyhow::Result<T>,
) -> anyhow::Result<Option<Option<T>>> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(Some(None)),
        Some(value) => Ok(Some(Some(parse(value)?))),
    }
}

/// A non-blank optional value.
pub fn optional<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> anyhow::Result<T>,
) -> anyhow::Result<Option<T>> {
    Ok(clearable(raw, parse)?.flatten())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_status_identifiers() {
        assert_eq!(parse_status("in-progress").unwrap(), TaskStatus::InProgress);
        let err = parse_status("in_progress").unwrap_err();
        assert!(err.to_string().contains("invalid status 'in_progress'"));
    }

    #[test]
    fn time_is_minute_precision() {
        assert_eq!(parse_time(" 09:30 ").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        let err = parse_time("09:30:15").unwrap_err();
        assert!(err.to_string().contains("expected HH:MM"));
        assert!(parse_time("9.30").is_err());
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(parse_date("2025-02-30").is_err());
        assert_eq!(parse_date("2025-03-14").unwrap(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn empty_value_clears() {
        assert_eq!(clearable(None, parse_date).unwrap(), None);
        assert_eq!(clearable(Some(" "), parse_date).unwrap(), Some(None));
        assert_eq!(
            clearable(Some("2025-01-02"), parse_date).unwrap(),
            Some(NaiveDate::from_ymd_opt(2025, 1, 2))
        );
        assert_eq!(optional(Some(""), parse_date).unwrap(), None);
    }
}
