//! Egg-collection and pricing use-case services.
//!
//! # Responsibility
//! - Append dated collection events to the log after boundary checks.
//! - Manage the egg price used to value collections.
//!
//! # Invariants
//! - A referenced chicken/employee must exist when the event is recorded.
//! - Events are never rewritten; a wrong entry is deleted and re-recorded.

use super::error::{ServiceError, ServiceResult};
use super::log_outcome;
use crate::model::date_range::DateRange;
use crate::model::egg_collection::{CollectionId, EggCollection, EggCollectionFields};
use crate::repo::chicken_repo::ChickenRepository;
use crate::repo::collection_repo::EggCollectionRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::error::EntityKind;
use crate::repo::settings_repo::{validate_egg_price, SettingsRepository};
use std::time::Instant;

/// Use-case service for the egg-collection event log.
pub struct EggCollectionService<L, C, E>
where
    L: EggCollectionRepository,
    C: ChickenRepository,
    E: EmployeeRepository,
{
    collections: L,
    chickens: C,
    employees: E,
}

impl<L, C, E> EggCollectionService<L, C, E>
where
    L: EggCollectionRepository,
    C: ChickenRepository,
    E: EmployeeRepository,
{
    pub fn new(collections: L, chickens: C, employees: E) -> Self {
        Self {
            collections,
            chickens,
            employees,
        }
    }

    /// Records one collection event.
    ///
    /// # Errors
    /// - `Validation` for a zero cage id or zero egg count.
    /// - `NotFound` when the referenced chicken or employee does not exist.
    pub fn record_collection(&self, fields: EggCollectionFields) -> ServiceResult<EggCollection> {
        let started_at = Instant::now();
        let result = self.record_collection_inner(fields);
        log_outcome("collection_record", started_at, &result);
        result
    }

    fn record_collection_inner(&self, fields: EggCollectionFields) -> ServiceResult<EggCollection> {
        fields.validate()?;

        if let Some(chicken_id) = fields.chicken_id {
            if self.chickens.get_chicken(chicken_id)?.is_none() {
                return Err(ServiceError::NotFound {
                    entity: EntityKind::Chicken,
                    id: chicken_id,
                });
            }
        }
        if let Some(employee_id) = fields.employee_id {
            if self.employees.get_employee(employee_id)?.is_none() {
                return Err(ServiceError::NotFound {
                    entity: EntityKind::Employee,
                    id: employee_id,
                });
            }
        }

        let collection = EggCollection::new(fields);
        self.collections.record_collection(&collection)?;
        Ok(collection)
    }

    /// Lists events inside the inclusive range, oldest first.
    pub fn list_collections(&self, range: &DateRange) -> ServiceResult<Vec<EggCollection>> {
        Ok(self.collections.list_collections(range)?)
    }

    pub fn get_collection(&self, id: CollectionId) -> ServiceResult<EggCollection> {
        self.collections
            .get_collection(id)?
            .ok_or(ServiceError::NotFound {
                entity: EntityKind::EggCollection,
                id,
            })
    }

    pub fn delete_collection(&self, id: CollectionId) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self
            .collections
            .delete_collection(id)
            .map_err(ServiceError::from);
        log_outcome("collection_delete", started_at, &result);
        result
    }
}

/// Use-case service for the egg price setting.
pub struct PricingService<S: SettingsRepository> {
    settings: S,
}

impl<S: SettingsRepository> PricingService<S> {
    pub fn new(settings: S) -> Self {
        Self { settings }
    }

    pub fn egg_price(&self) -> ServiceResult<f64> {
        Ok(self.settings.egg_price()?)
    }

    /// Stores a new egg price; negative or non-finite values are rejected.
    pub fn set_egg_price(&self, price: f64) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = validate_egg_price(price)
            .map_err(ServiceError::from)
            .and_then(|()| self.settings.set_egg_price(price).map_err(ServiceError::from));
        log_outcome("egg_price_set", started_at, &result);
        result
    }
}
