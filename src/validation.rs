// ✅ Validation - form input checks before a record is built
// Name must be non-blank, dates must be real DD/MM/YYYY calendar dates

use crate::record::CollaboratorRecord;
use chrono::NaiveDate;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The field '{field}' is required.")]
    EmptyField { field: &'static str },

    #[error("Invalid {field} '{value}'. Use the format DD/MM/YYYY.")]
    InvalidDate { field: &'static str, value: String },
}

pub const FIELD_NAME: &str = "name";
pub const FIELD_BIRTH_DATE: &str = "birth date";
pub const FIELD_PAYMENT_DATE: &str = "payment date";

/// Parse a strict `DD/MM/YYYY` date.
///
/// Shape is checked first (two digits, slash, two digits, slash, four digits),
/// then the calendar: `31/02/2024` and `29/02/2023` are rejected.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }

    let all_digits = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .all(|(_, b)| b.is_ascii_digit());
    if !all_digits {
        return None;
    }

    let day: u32 = text[0..2].parse().ok()?;
    let month: u32 = text[3..5].parse().ok()?;
    let year: i32 = text[6..10].parse().ok()?;
    if year < 1 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn validate_date(text: &str) -> bool {
    parse_date(text).is_some()
}

pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field: FIELD_NAME });
    }
    Ok(trimmed.to_string())
}

fn check_date(field: &'static str, text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if validate_date(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidDate {
            field,
            value: trimmed.to_string(),
        })
    }
}

/// Build a record from raw form input, reporting the first failing field.
pub fn validate_record(
    name: &str,
    birth_date: &str,
    payment_date: &str,
    paid: bool,
) -> Result<CollaboratorRecord, ValidationError> {
    build_record(name, birth_date, payment_date, paid).map_err(|err| {
        debug!("event=validation_rejected reason=\"{}\"", err);
        err
    })
}

fn build_record(
    name: &str,
    birth_date: &str,
    payment_date: &str,
    paid: bool,
) -> Result<CollaboratorRecord, ValidationError> {
    Ok(CollaboratorRecord {
        name: validate_name(name)?,
        birth_date: check_date(FIELD_BIRTH_DATE, birth_date)?,
        payment_date: check_date(FIELD_PAYMENT_DATE, payment_date)?,
        paid,
    })
}
