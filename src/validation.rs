//! Validation of single answers from the collector.
//!
//! [`validate`] is a pure function from raw input text to a typed value; the
//! retry loop around it lives with the caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Input format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest accepted amount, one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field cannot be empty. Please try again.")]
    Empty,
    #[error("Please enter a valid number.")]
    NotANumber,
    #[error("Please enter an amount of zero or more.")]
    Negative,
    #[error("Please enter an amount no larger than $1,000,000,000,000.00.")]
    TooLarge,
    #[error("Please enter a percentage between 0 and 100.")]
    OutOfRange,
    #[error("Please enter a valid date in YYYY-MM-DD format.")]
    InvalidDate,
    #[error("Please add at least one item!")]
    NoItems,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Any non-empty text
    Text,
    /// A non-negative amount of money
    Amount,
    /// A percentage between 0 and 100 inclusive
    Percentage,
    /// A calendar date in `YYYY-MM-DD` form
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Decimal(Decimal),
    Date(NaiveDate),
}

/// Validate one answer. Surrounding whitespace is ignored.
pub fn validate(input: &str, kind: FieldKind) -> Result<FieldValue, ValidationError> {
    match kind {
        FieldKind::Text => parse_text(input).map(FieldValue::Text),
        FieldKind::Amount => parse_amount(input).map(FieldValue::Decimal),
        FieldKind::Percentage => parse_percentage(input).map(FieldValue::Decimal),
        FieldKind::Date => parse_date(input).map(FieldValue::Date),
    }
}

fn non_empty(input: &str) -> Result<&str, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        Err(ValidationError::Empty)
    } else {
        Ok(input)
    }
}

/// Parse a number, allowing a leading `$` and comma digit grouping.
fn parse_decimal(input: &str) -> Result<Decimal, ValidationError> {
    let digits: String = input
        .strip_prefix('$')
        .unwrap_or(input)
        .chars()
        .filter(|&c| c != ',')
        .collect();
    Decimal::from_str(&digits)
        .or_else(|_| Decimal::from_scientific(&digits))
        .map_err(|_| ValidationError::NotANumber)
}

pub fn parse_text(input: &str) -> Result<String, ValidationError> {
    non_empty(input).map(ToString::to_string)
}

pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let value = parse_decimal(non_empty(input)?)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative);
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::TooLarge);
    }
    Ok(value)
}

pub fn parse_percentage(input: &str) -> Result<Decimal, ValidationError> {
    let input = non_empty(input)?;
    let value = parse_decimal(input.strip_suffix('%').unwrap_or(input).trim_end())?;
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange);
    }
    Ok(value)
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(non_empty(input)?, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate)
}
