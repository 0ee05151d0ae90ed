//! Reporting computations.
//!
//! # Responsibility
//! - Hold the pure aggregation engine used by the report service.
//!
//! # Invariants
//! - Nothing in this module performs I/O.

pub mod aggregate;
