//! Dated egg-collection events.
//!
//! # Responsibility
//! - Record how many eggs were gathered from a cage on a given day, and by whom.
//!
//! # Invariants
//! - Events are additive facts; they are never derived from `egg_per_month`.
//! - `egg_count >= 1` and `cage_id >= 1`.
//! - Attribution to an employee is by `employee_id`, not by cage membership.

use super::chicken::ChickenId;
use super::employee::EmployeeId;
use super::validation::ValidationError;
use super::CageId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a collection event.
pub type CollectionId = Uuid;

/// Caller-supplied fields for recording one collection event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggCollectionFields {
    pub collected_on: NaiveDate,
    pub cage_id: CageId,
    #[serde(default)]
    pub chicken_id: Option<ChickenId>,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    pub egg_count: u32,
}

impl EggCollectionFields {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cage_id == 0 {
            return Err(ValidationError::ZeroCageId);
        }
        if self.egg_count == 0 {
            return Err(ValidationError::ZeroEggCount);
        }
        Ok(())
    }
}

/// Persisted collection event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggCollection {
    pub id: CollectionId,
    pub collected_on: NaiveDate,
    pub cage_id: CageId,
    pub chicken_id: Option<ChickenId>,
    pub employee_id: Option<EmployeeId>,
    pub egg_count: u32,
}

impl EggCollection {
    pub fn new(fields: EggCollectionFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            collected_on: fields.collected_on,
            cage_id: fields.cage_id,
            chicken_id: fields.chicken_id,
            employee_id: fields.employee_id,
            egg_count: fields.egg_count,
        }
    }

    /// Returns the caller-supplied part of this event.
    pub fn fields(&self) -> EggCollectionFields {
        EggCollectionFields {
            collected_on: self.collected_on,
            cage_id: self.cage_id,
            chicken_id: self.chicken_id,
            employee_id: self.employee_id,
            egg_count: self.egg_count,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fields().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{EggCollection, EggCollectionFields};
    use crate::model::validation::ValidationError;
    use chrono::NaiveDate;

    fn fields(cage_id: u32, egg_count: u32) -> EggCollectionFields {
        EggCollectionFields {
            collected_on: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            cage_id,
            chicken_id: None,
            employee_id: None,
            egg_count,
        }
    }

    #[test]
    fn stored_event_round_trips_its_fields() {
        let input = fields(3, 7);
        let event = EggCollection::new(input.clone());
        assert_eq!(event.fields(), input);
        assert!(event.validate().is_ok());
    }

    #[test]
    fn stored_event_validates_like_its_fields() {
        let mut event = EggCollection::new(fields(3, 7));
        event.egg_count = 0;
        assert_eq!(event.validate(), Err(ValidationError::ZeroEggCount));

        event.egg_count = 1;
        event.cage_id = 0;
        assert_eq!(event.validate(), Err(ValidationError::ZeroCageId));
    }
}
