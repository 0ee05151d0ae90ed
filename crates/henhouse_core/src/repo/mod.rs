//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define record-store contracts for chickens, employees, egg collections
//!   and pricing settings.
//! - Isolate SQLite query details from service/report orchestration.
//!
//! # Invariants
//! - Repository writes validate records before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod chicken_repo;
pub mod collection_repo;
pub mod employee_repo;
pub mod error;
pub mod settings_repo;
