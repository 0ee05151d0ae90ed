//! Employee use-case service.
//!
//! # Responsibility
//! - Provide the boundary CRUD entry points for employees.
//! - Enforce input-shape checks (passport format) at this edge so the
//!   domain model and the aggregation engine stay format-agnostic.
//!
//! # Invariants
//! - Cage lists are deduplicated before storage and fully replaced on update.
//! - A rejected create/update leaves the store untouched.

use super::error::{ServiceError, ServiceResult};
use super::log_outcome;
use crate::model::employee::{Employee, EmployeeFields, EmployeeId};
use crate::model::validation::ValidationError;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::error::EntityKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;

static PASSPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4} \d{6}$").expect("valid passport regex"));

/// Use-case service wrapper for employee CRUD operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all employees with their cage sets; empty when there are none.
    pub fn list_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.repo.list_employees()?)
    }

    pub fn get_employee(&self, id: EmployeeId) -> ServiceResult<Employee> {
        self.repo
            .get_employee(id)?
            .ok_or(ServiceError::NotFound {
                entity: EntityKind::Employee,
                id,
            })
    }

    pub fn create_employee(&self, fields: EmployeeFields) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        let result = self.create_employee_inner(fields);
        log_outcome("employee_create", started_at, &result);
        result
    }

    fn create_employee_inner(&self, fields: EmployeeFields) -> ServiceResult<Employee> {
        validate_employee_fields(&fields)?;
        let employee = Employee::new(fields);
        self.repo.create_employee(&employee)?;
        Ok(employee)
    }

    /// Replaces name, passport, salary and the whole cage set.
    pub fn update_employee(
        &self,
        id: EmployeeId,
        fields: EmployeeFields,
    ) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        let result = self.update_employee_inner(id, fields);
        log_outcome("employee_update", started_at, &result);
        result
    }

    fn update_employee_inner(
        &self,
        id: EmployeeId,
        fields: EmployeeFields,
    ) -> ServiceResult<Employee> {
        validate_employee_fields(&fields)?;
        let employee = Employee::with_id(id, fields);
        self.repo.update_employee(&employee)?;
        Ok(employee)
    }

    pub fn delete_employee(&self, id: EmployeeId) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_employee(id).map_err(ServiceError::from);
        log_outcome("employee_delete", started_at, &result);
        result
    }
}

/// Returns whether `value` matches the `DDDD DDDDDD` passport shape.
pub fn is_valid_passport(value: &str) -> bool {
    PASSPORT_RE.is_match(value.trim())
}

fn validate_employee_fields(fields: &EmployeeFields) -> Result<(), ValidationError> {
    if !is_valid_passport(&fields.passport_data) {
        return Err(ValidationError::InvalidPassportFormat);
    }
    fields.validate()
}
