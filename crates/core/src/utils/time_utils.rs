use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{Error, Result, ValidationError};

/// Accepted layouts for user-supplied transaction dates, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a transaction date typed by a user.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, a bare `YYYY-MM-DD`
/// (midnight) or an RFC 3339 timestamp (converted to its UTC wall time).
pub fn parse_datetime_input(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "transaction_date".to_string(),
        )));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc())
        .map_err(|_| {
            Error::invalid_input(format!(
                "Invalid date '{}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
                trimmed
            ))
        })
}

/// Parses an optional `YYYY-MM-DD` query bound.
pub fn parse_date_opt(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(NaiveDate::parse_from_str(v, DATE_FORMAT)?)),
        None => Ok(None),
    }
}
