//! Input Module
//!
//! Turns raw user text into typed, normalized values before it reaches the
//! roster or catalog. The stores themselves trust their arguments; checking
//! format and ranges is done here, by the caller.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::record::Grade;

/// Why a piece of user input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid name {0:?}. Name must contain only alphabets and spaces.")]
    InvalidName(String),

    #[error("Invalid number {0:?}. Must contain only digits.")]
    NotANumber(String),

    #[error("Invalid roll number {value}. Roll number must be between {min} and {max}.")]
    RollNumberOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Invalid grade {0:?}. Grade must be one of: A, B, C, D, E, F")]
    InvalidGrade(String),

    #[error("Invalid publication year {value}. Publication year must not be after {max}.")]
    YearTooLate { value: i32, max: i32 },

    #[error("Title must not be empty")]
    EmptyTitle,
}

/// Person name: letters and spaces only, first letter upper-cased and the
/// rest lower-cased ("jANE doe" → "Jane doe")
pub fn parse_name(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed.chars().any(|c| c.is_alphabetic())
        && trimmed.chars().all(|c| c.is_alphabetic() || c == ' ');

    if !valid {
        return Err(InputError::InvalidName(raw.to_string()));
    }

    Ok(capitalize(trimmed))
}

/// Roll number for a new student; must fall inside `range`
pub fn parse_roll_number(raw: &str, range: &RangeInclusive<u32>) -> Result<u32, InputError> {
    let value = parse_lookup_key(raw)?;
    if !range.contains(&value) {
        return Err(InputError::RollNumberOutOfRange {
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(value)
}

/// Roll number to search for or update; any non-negative integer.
/// A single leading `+` is accepted ("+5" is 5), a `-` is not.
pub fn parse_lookup_key(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::NotANumber(raw.to_string()));
    }
    digits
        .parse()
        .map_err(|_| InputError::NotANumber(raw.to_string()))
}

/// Grade letter, case-insensitive
pub fn parse_grade(raw: &str) -> Result<Grade, InputError> {
    raw.parse::<Grade>()
        .map_err(|_| InputError::InvalidGrade(raw.to_string()))
}

/// Publication year no later than `max`
pub fn parse_publication_year(raw: &str, max: i32) -> Result<i32, InputError> {
    let value: i32 = raw
        .trim()
        .parse()
        .map_err(|_| InputError::NotANumber(raw.to_string()))?;
    if value > max {
        return Err(InputError::YearTooLate { value, max });
    }
    Ok(value)
}

/// Book title; anything non-blank, surrounding whitespace removed
pub fn parse_title(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
