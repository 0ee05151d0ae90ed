//! Employee domain model.
//!
//! # Responsibility
//! - Define staff records and their cage assignments.
//!
//! # Invariants
//! - `cages` is a set: duplicates from input collapse, order is ascending.
//! - `salary > 0`; every cage id is `>= 1`.
//! - Passport format is checked at the service boundary, not here.

use super::validation::ValidationError;
use super::CageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier for an employee record.
pub type EmployeeId = Uuid;

/// Mutable employee fields as supplied by callers on create/update.
///
/// `cages` may contain duplicates; they are collapsed on conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeFields {
    pub full_name: String,
    pub passport_data: String,
    pub salary: f64,
    #[serde(default)]
    pub cages: Vec<CageId>,
}

impl EmployeeFields {
    /// Checks name, salary and cage ids.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.full_name, self.salary, self.cages.contains(&0))
    }
}

/// Persisted employee record with its full cage assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    pub passport_data: String,
    pub salary: f64,
    pub cages: BTreeSet<CageId>,
}

impl Employee {
    pub fn new(fields: EmployeeFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Builds an employee with a caller-provided id, replacing the cage set.
    pub fn with_id(id: EmployeeId, fields: EmployeeFields) -> Self {
        Self {
            id,
            full_name: fields.full_name.trim().to_string(),
            passport_data: fields.passport_data.trim().to_string(),
            salary: fields.salary,
            cages: fields.cages.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.full_name, self.salary, self.cages.contains(&0))
    }
}

fn check_fields(full_name: &str, salary: f64, has_zero_cage: bool) -> Result<(), ValidationError> {
    if full_name.trim().is_empty() {
        return Err(ValidationError::EmptyFullName);
    }
    if !(salary.is_finite() && salary > 0.0) {
        return Err(ValidationError::NonPositiveSalary(salary));
    }
    if has_zero_cage {
        return Err(ValidationError::ZeroCageId);
    }
    Ok(())
}
