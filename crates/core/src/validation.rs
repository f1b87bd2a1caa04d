//! Input validation utilities.
//!
//! Everything that arrives from an external caller is checked here before it reaches the store.
//! Enum fields are already closed by their Rust types (serde rejects unknown variants), so this
//! module covers the remaining free-form fields: required text, calendar dates, clock times and
//! numeric ranges.

use crate::constants::{DATE_KEY_FORMAT, EVENT_TIME_FORMAT};
use crate::{CrmError, CrmResult};
use chrono::{NaiveDate, NaiveTime};
use medcrm_types::{EmailAddress, NonEmptyText};
use std::fmt::Display;
use std::ops::RangeInclusive;

/// Implemented by every input type accepted from outside the store.
pub trait Validate {
    /// Checks the value, returning `CrmError::InvalidInput` describing the first violation.
    fn validate(&self) -> CrmResult<()>;
}

/// Rejects empty or whitespace-only text.
pub fn require_text(field: &str, value: &str) -> CrmResult<()> {
    NonEmptyText::new(value)
        .map(|_| ())
        .map_err(|_| CrmError::InvalidInput(format!("{} cannot be empty", field)))
}

/// Parses a calendar date in canonical `YYYY-MM-DD` form.
///
/// The month and day must be zero-padded; `2025-3-5` is rejected even though it names a real
/// date, because date keys are compared as strings elsewhere.
pub fn parse_date(field: &str, value: &str) -> CrmResult<NaiveDate> {
    let invalid = || {
        CrmError::InvalidInput(format!(
            "{} must be a date in YYYY-MM-DD form, got '{}'",
            field, value
        ))
    };

    if value.len() != 10 {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_KEY_FORMAT).to_string() != value {
        return Err(invalid());
    }
    Ok(date)
}

pub fn validate_date(field: &str, value: &str) -> CrmResult<()> {
    parse_date(field, value).map(|_| ())
}

/// Validates a 24-hour `HH:MM` clock time.
pub fn validate_time(field: &str, value: &str) -> CrmResult<()> {
    let ok = value.len() == 5 && NaiveTime::parse_from_str(value, EVENT_TIME_FORMAT).is_ok();
    if !ok {
        return Err(CrmError::InvalidInput(format!(
            "{} must be a time in HH:MM form, got '{}'",
            field, value
        )));
    }
    Ok(())
}

pub fn validate_range<T>(field: &str, value: T, range: RangeInclusive<T>) -> CrmResult<()>
where
    T: PartialOrd + Display,
{
    if !range.contains(&value) {
        return Err(CrmError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            field,
            range.start(),
            range.end(),
            value
        )));
    }
    Ok(())
}

pub fn validate_email(field: &str, value: &str) -> CrmResult<()> {
    EmailAddress::new(value)
        .map(|_| ())
        .map_err(|e| CrmError::InvalidInput(format!("{}: {}", field, e)))
}

/// Applies `check` only when the optional field is present.
pub fn if_present<T>(value: &Option<T>, check: impl FnOnce(&T) -> CrmResult<()>) -> CrmResult<()> {
    match value {
        Some(v) => check(v),
        None => Ok(()),
    }
}

/// Runs `check` on a clearable patch value only when it sets a new value.
pub fn if_set<T>(value: &Option<Option<T>>, check: impl FnOnce(&T) -> CrmResult<()>) -> CrmResult<()> {
    match value {
        Some(Some(v)) => check(v),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("name", "Jane").is_ok());
        let err = require_text("name", "  ").unwrap_err();
        assert!(err.to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_parse_date_requires_zero_padding() {
        assert!(parse_date("date", "2025-03-05").is_ok());
        assert!(parse_date("date", "2025-3-5").is_err());
        assert!(parse_date("date", "2025-02-30").is_err());
        assert!(parse_date("date", "05/03/2025").is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("time", "09:30").is_ok());
        assert!(validate_time("time", "9:30").is_err());
        assert!(validate_time("time", "24:00").is_err());
    }

    #[test]
    fn test_validate_range_reports_bounds() {
        assert!(validate_range("age", 40u32, 0..=150).is_ok());
        let err = validate_range("age", 151u32, 0..=150).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: age must be between 0 and 150, got 151"
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "g.house@hospital.com").is_ok());
        assert!(validate_email("email", "house").is_err());
        assert!(validate_email("email", "@hospital.com").is_err());
        assert!(validate_email("email", "a@b@c.com").is_err());
        assert!(validate_email("email", "a@localhost").is_err());
    }
}
