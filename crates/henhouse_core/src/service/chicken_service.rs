//! Chicken use-case service.
//!
//! # Responsibility
//! - Provide the boundary CRUD entry points for chickens.
//! - Validate caller input before any write reaches the repository.
//!
//! # Invariants
//! - A rejected create/update leaves the store untouched.
//! - Service layer remains storage-agnostic.

use super::error::{ServiceError, ServiceResult};
use super::log_outcome;
use crate::model::chicken::{Chicken, ChickenFields, ChickenId};
use crate::repo::chicken_repo::ChickenRepository;
use crate::repo::error::EntityKind;
use std::time::Instant;

/// Use-case service wrapper for chicken CRUD operations.
pub struct ChickenService<R: ChickenRepository> {
    repo: R,
}

impl<R: ChickenRepository> ChickenService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all chickens in insertion order; empty when there are none.
    pub fn list_chickens(&self) -> ServiceResult<Vec<Chicken>> {
        Ok(self.repo.list_chickens()?)
    }

    /// Gets one chicken or fails with `NotFound`.
    pub fn get_chicken(&self, id: ChickenId) -> ServiceResult<Chicken> {
        self.repo
            .get_chicken(id)?
            .ok_or(ServiceError::NotFound {
                entity: EntityKind::Chicken,
                id,
            })
    }

    /// Validates `fields` and stores a new chicken with a fresh id.
    pub fn create_chicken(&self, fields: ChickenFields) -> ServiceResult<Chicken> {
        let started_at = Instant::now();
        let result = self.create_chicken_inner(fields);
        log_outcome("chicken_create", started_at, &result);
        result
    }

    fn create_chicken_inner(&self, fields: ChickenFields) -> ServiceResult<Chicken> {
        fields.validate()?;
        let chicken = Chicken::new(fields);
        self.repo.create_chicken(&chicken)?;
        Ok(chicken)
    }

    /// Replaces every mutable field of an existing chicken.
    pub fn update_chicken(&self, id: ChickenId, fields: ChickenFields) -> ServiceResult<Chicken> {
        let started_at = Instant::now();
        let result = self.update_chicken_inner(id, fields);
        log_outcome("chicken_update", started_at, &result);
        result
    }

    fn update_chicken_inner(&self, id: ChickenId, fields: ChickenFields) -> ServiceResult<Chicken> {
        fields.validate()?;
        let chicken = Chicken::with_id(id, fields);
        self.repo.update_chicken(&chicken)?;
        Ok(chicken)
    }

    /// Removes a chicken permanently. Collection history is kept.
    pub fn delete_chicken(&self, id: ChickenId) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_chicken(id).map_err(ServiceError::from);
        log_outcome("chicken_delete", started_at, &result);
        result
    }
}
