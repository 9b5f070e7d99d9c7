//! Input validation utilities.

use crate::error::{OperationError, OperationResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

static PHONE_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]{6,20}$").ok());

/// Trim a required text field, rejecting blank values and control characters.
pub fn required_text(field: &str, value: &str, max_len: usize) -> OperationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OperationError::validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(OperationError::validation(format!(
            "{field} must be at most {max_len} characters long"
        )));
    }
    if trimmed.chars().any(|c| matches!(c, '\n' | '\r' | '\t' | '\0')) {
        return Err(OperationError::validation(format!(
            "{field} contains invalid characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Optional text: blank collapses to `None`.
pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> OperationResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => required_text(field, text, max_len).map(Some),
    }
}

/// Validate email format, returning the trimmed address
pub fn email(value: &str) -> OperationResult<String> {
    let trimmed = value.trim();
    if trimmed.len() > 255 {
        return Err(OperationError::validation("email too long"));
    }
    let valid = EMAIL_REGEX
        .as_ref()
        .map(|regex| regex.is_match(trimmed))
        .unwrap_or(false);
    if !valid {
        return Err(OperationError::validation(format!(
            "'{trimmed}' is not a valid email address"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn phone(value: &str) -> OperationResult<String> {
    let trimmed = value.trim();
    let valid = PHONE_REGEX
        .as_ref()
        .map(|regex| regex.is_match(trimmed))
        .unwrap_or(false);
    if !valid {
        return Err(OperationError::validation(format!(
            "'{trimmed}' is not a valid phone number"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn optional_phone(value: Option<&str>) -> OperationResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(number) => phone(number).map(Some),
    }
}

pub fn positive(field: &str, value: i64) -> OperationResult<i64> {
    if value <= 0 {
        return Err(OperationError::validation(format!(
            "{field} must be greater than zero, got {value}"
        )));
    }
    Ok(value)
}

pub fn non_negative(field: &str, value: i64) -> OperationResult<i64> {
    if value < 0 {
        return Err(OperationError::validation(format!(
            "{field} cannot be negative, got {value}"
        )));
    }
    Ok(value)
}

pub fn star_rating(value: i64) -> OperationResult<i64> {
    if !(1..=5).contains(&value) {
        return Err(OperationError::validation(format!(
            "star_rating must be between 1 and 5, got {value}"
        )));
    }
    Ok(value)
}

/// `from` must not come after `to`.
pub fn date_range(from: NaiveDate, to: NaiveDate) -> OperationResult<()> {
    if from > to {
        return Err(OperationError::validation(format!(
            "from {from} is after to {to}"
        )));
    }
    Ok(())
}

/// A stay needs at least one night.
pub fn stay_dates(check_in: NaiveDate, check_out: NaiveDate) -> OperationResult<()> {
    if check_out <= check_in {
        return Err(OperationError::validation(format!(
            "check_out {check_out} must be after check_in {check_in}"
        )));
    }
    Ok(())
}
