//! Domain model for the poultry record store.
//!
//! # Responsibility
//! - Define canonical records for chickens, employees and egg collections.
//! - Provide field-range validation used before every write.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - Employee-to-chicken links are value joins on cage id, never stored edges.

pub mod chicken;
pub mod date_range;
pub mod egg_collection;
pub mod employee;
pub mod validation;

/// Physical cage identifier. Several chickens may share one cage.
pub type CageId = u32;
