//! Core domain and reporting logic for henhouse.
//! This crate is the single source of truth for record invariants and
//! report semantics.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::chicken::{Chicken, ChickenFields, ChickenId};
pub use model::date_range::DateRange;
pub use model::egg_collection::{CollectionId, EggCollection, EggCollectionFields};
pub use model::employee::{Employee, EmployeeFields, EmployeeId};
pub use model::validation::ValidationError;
pub use model::CageId;
pub use report::aggregate::{CageEggTotal, WorkloadTier};
pub use repo::chicken_repo::{ChickenRepository, SqliteChickenRepository};
pub use repo::collection_repo::{EggCollectionRepository, SqliteEggCollectionRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::error::{EntityKind, RepoError, RepoResult};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository, DEFAULT_EGG_PRICE};
pub use service::chicken_service::ChickenService;
pub use service::collection_service::{EggCollectionService, PricingService};
pub use service::employee_service::EmployeeService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::report_service::{
    EggStats, EmployeeEggStat, EmployeeWorkload, MostProductiveChicken, ProductivitySummary,
    ReportService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
