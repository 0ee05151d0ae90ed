//! Chicken domain model.
//!
//! # Responsibility
//! - Define the per-animal record used by CRUD and reporting.
//! - Validate field ranges before persistence.
//!
//! # Invariants
//! - `id` is assigned once and never reused.
//! - `weight > 0`, `age >= 1`, `cage_id >= 1`, `breed` is non-empty.

use super::validation::ValidationError;
use super::CageId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a chicken record.
pub type ChickenId = Uuid;

/// Mutable chicken fields as supplied by callers on create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChickenFields {
    pub cage_id: CageId,
    /// Kilograms.
    pub weight: f64,
    /// Months.
    pub age: u32,
    pub egg_per_month: u32,
    pub breed: String,
}

impl ChickenFields {
    /// Checks every field range without touching storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cage_id == 0 {
            return Err(ValidationError::ZeroCageId);
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ValidationError::NonPositiveWeight(self.weight));
        }
        if self.age == 0 {
            return Err(ValidationError::ZeroAge);
        }
        if self.breed.trim().is_empty() {
            return Err(ValidationError::EmptyBreed);
        }
        Ok(())
    }
}

/// Persisted chicken record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chicken {
    pub id: ChickenId,
    pub cage_id: CageId,
    pub weight: f64,
    pub age: u32,
    pub egg_per_month: u32,
    pub breed: String,
}

impl Chicken {
    /// Builds a chicken with a freshly generated id.
    pub fn new(fields: ChickenFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Builds a chicken with a caller-provided id.
    ///
    /// The breed label is trimmed; no other normalization happens here.
    pub fn with_id(id: ChickenId, fields: ChickenFields) -> Self {
        Self {
            id,
            cage_id: fields.cage_id,
            weight: fields.weight,
            age: fields.age,
            egg_per_month: fields.egg_per_month,
            breed: fields.breed.trim().to_string(),
        }
    }

    /// Returns the mutable part of this record.
    pub fn fields(&self) -> ChickenFields {
        ChickenFields {
            cage_id: self.cage_id,
            weight: self.weight,
            age: self.age,
            egg_per_month: self.egg_per_month,
            breed: self.breed.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fields().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{Chicken, ChickenFields};
    use crate::model::validation::ValidationError;

    fn fields() -> ChickenFields {
        ChickenFields {
            cage_id: 3,
            weight: 2.4,
            age: 12,
            egg_per_month: 25,
            breed: "  Leghorn ".to_string(),
        }
    }

    #[test]
    fn new_trims_breed_and_assigns_id() {
        let chicken = Chicken::new(fields());
        assert_eq!(chicken.breed, "Leghorn");
        assert!(!chicken.id.is_nil());
        assert!(chicken.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let mut input = fields();
        input.weight = -1.0;
        assert_eq!(input.validate(), Err(ValidationError::NonPositiveWeight(-1.0)));

        let mut input = fields();
        input.weight = f64::NAN;
        assert!(matches!(
            input.validate(),
            Err(ValidationError::NonPositiveWeight(_))
        ));

        let mut input = fields();
        input.age = 0;
        assert_eq!(input.validate(), Err(ValidationError::ZeroAge));

        let mut input = fields();
        input.cage_id = 0;
        assert_eq!(input.validate(), Err(ValidationError::ZeroCageId));

        let mut input = fields();
        input.breed = "   ".to_string();
        assert_eq!(input.validate(), Err(ValidationError::EmptyBreed));
    }

    #[test]
    fn zero_eggs_is_a_valid_record() {
        let mut input = fields();
        input.egg_per_month = 0;
        assert!(input.validate().is_ok());
    }
}
