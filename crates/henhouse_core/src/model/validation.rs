//! Input validation errors shared by all domain records.
//!
//! # Responsibility
//! - Describe why a record or request was rejected before any write.
//!
//! # Invariants
//! - Every variant is detected before the store is touched.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Domain-level rejection of malformed or out-of-range input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Chicken weight must be a positive finite number of kilograms.
    NonPositiveWeight(f64),
    /// Chicken age is counted in whole months starting at 1.
    ZeroAge,
    /// Cage identifiers start at 1.
    ZeroCageId,
    /// Breed label is empty after trimming.
    EmptyBreed,
    /// Employee name is empty after trimming.
    EmptyFullName,
    /// Passport text does not match `DDDD DDDDDD`.
    InvalidPassportFormat,
    /// Another employee already holds this passport number.
    DuplicatePassport,
    /// Salary must be a positive finite number.
    NonPositiveSalary(f64),
    /// A collection event must carry at least one egg.
    ZeroEggCount,
    /// Egg price must be finite and not negative.
    InvalidEggPrice(f64),
    /// Range start is after range end.
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
    /// Date text is not `YYYY-MM-DD`.
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveWeight(value) => {
                write!(f, "weight must be greater than 0, got {value}")
            }
            Self::ZeroAge => write!(f, "age must be at least 1 month"),
            Self::ZeroCageId => write!(f, "cage id must be at least 1"),
            Self::EmptyBreed => write!(f, "breed cannot be empty"),
            Self::EmptyFullName => write!(f, "full name cannot be empty"),
            Self::InvalidPassportFormat => {
                write!(f, "passport data must match the `DDDD DDDDDD` format")
            }
            Self::DuplicatePassport => write!(f, "passport data is already registered"),
            Self::NonPositiveSalary(value) => {
                write!(f, "salary must be greater than 0, got {value}")
            }
            Self::ZeroEggCount => write!(f, "egg count must be at least 1"),
            Self::InvalidEggPrice(value) => {
                write!(f, "egg price must be a finite non-negative number, got {value}")
            }
            Self::InvertedDateRange { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for ValidationError {}
