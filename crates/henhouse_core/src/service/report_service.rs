//! Report use-case service.
//!
//! # Responsibility
//! - Fetch fresh records for each request and hand them to the aggregation
//!   engine.
//! - Assemble report payloads, adding zero-safe percentages and costs.
//!
//! # Invariants
//! - Every operation is read-only and keeps no state between calls, so
//!   reports are safe to retry and to run side by side.
//! - "No data" yields zero values or empty sequences, never an error.
//! - The employee/chicken link is recomputed per request from cage ids.

use super::error::{ServiceError, ServiceResult};
use super::log_outcome;
use crate::model::chicken::{Chicken, ChickenId};
use crate::model::date_range::DateRange;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::CageId;
use crate::report::aggregate::{self, CageEggTotal, WorkloadTier};
use crate::repo::chicken_repo::ChickenRepository;
use crate::repo::collection_repo::EggCollectionRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::error::EntityKind;
use crate::repo::settings_repo::SettingsRepository;
use serde::Serialize;
use std::time::Instant;

/// Egg totals and value over a date range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EggStats {
    pub total_eggs: u64,
    pub total_cost: f64,
    /// `total_cost / total_eggs`, `0` when nothing was collected.
    pub price_per_egg: f64,
}

/// One employee's share of collected eggs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeEggStat {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub egg_count: u64,
    pub percent_of_total: f64,
}

/// Display summary for the top-producing chicken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MostProductiveChicken {
    pub chicken_id: ChickenId,
    pub cage_number: CageId,
    pub egg_per_month: u32,
}

/// Chickens an employee serves, with the workload class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeWorkload {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub chicken_count: usize,
    pub tier: WorkloadTier,
}

/// Headline flock numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductivitySummary {
    pub chicken_count: usize,
    pub employee_count: usize,
    pub average_egg_production: f64,
    pub low_productivity_count: usize,
}

/// Read-only report facade over the record store.
pub struct ReportService<C, E, L, S>
where
    C: ChickenRepository,
    E: EmployeeRepository,
    L: EggCollectionRepository,
    S: SettingsRepository,
{
    chickens: C,
    employees: E,
    collections: L,
    settings: S,
}

impl<C, E, L, S> ReportService<C, E, L, S>
where
    C: ChickenRepository,
    E: EmployeeRepository,
    L: EggCollectionRepository,
    S: SettingsRepository,
{
    pub fn new(chickens: C, employees: E, collections: L, settings: S) -> Self {
        Self {
            chickens,
            employees,
            collections,
            settings,
        }
    }

    /// Total eggs collected in `range` and their value at the stored price.
    pub fn egg_stats(&self, range: &DateRange) -> ServiceResult<EggStats> {
        let started_at = Instant::now();
        let result = self.egg_stats_inner(range);
        log_outcome("report_egg_stats", started_at, &result);
        result
    }

    fn egg_stats_inner(&self, range: &DateRange) -> ServiceResult<EggStats> {
        let events = self.collections.list_collections(range)?;
        let egg_price = self.settings.egg_price()?;

        let total_eggs = aggregate::total_eggs(&events);
        let total_cost = total_eggs as f64 * egg_price;
        Ok(EggStats {
            total_eggs,
            total_cost,
            price_per_egg: aggregate::price_per_egg(total_cost, total_eggs),
        })
    }

    /// Per-employee egg counts in `range` with their percentage of the total.
    ///
    /// Every employee is listed, including those with no attributed events.
    pub fn employee_egg_stats(&self, range: &DateRange) -> ServiceResult<Vec<EmployeeEggStat>> {
        let started_at = Instant::now();
        let result = self.employee_egg_stats_inner(range);
        log_outcome("report_employee_egg_stats", started_at, &result);
        result
    }

    fn employee_egg_stats_inner(&self, range: &DateRange) -> ServiceResult<Vec<EmployeeEggStat>> {
        let employees = self.employees.list_employees()?;
        let events = self.collections.list_collections(range)?;

        let counts = aggregate::employee_egg_counts(&employees, &events);
        let total: u64 = counts.iter().map(|count| count.egg_count).sum();
        Ok(counts
            .into_iter()
            .map(|count| EmployeeEggStat {
                percent_of_total: aggregate::share_percent(count.egg_count, total),
                employee_id: count.employee_id,
                employee_name: count.employee_name,
                egg_count: count.egg_count,
            })
            .collect())
    }

    /// Egg count and share for one employee in `range`.
    ///
    /// The share is taken against the same total as
    /// [`Self::employee_egg_stats`], so both reports agree.
    ///
    /// # Errors
    /// - `NotFound` when no employee has `id`.
    pub fn employee_egg_count(
        &self,
        id: EmployeeId,
        range: &DateRange,
    ) -> ServiceResult<EmployeeEggStat> {
        let started_at = Instant::now();
        let result = self.employee_egg_count_inner(id, range);
        log_outcome("report_employee_egg_count", started_at, &result);
        result
    }

    fn employee_egg_count_inner(
        &self,
        id: EmployeeId,
        range: &DateRange,
    ) -> ServiceResult<EmployeeEggStat> {
        let employee = self.require_employee(id)?;
        let employees = self.employees.list_employees()?;
        let events = self.collections.list_collections(range)?;

        let total: u64 = aggregate::employee_egg_counts(&employees, &events)
            .iter()
            .map(|count| count.egg_count)
            .sum();
        let count = aggregate::employee_egg_counts(std::slice::from_ref(&employee), &events)
            .into_iter()
            .next()
            .ok_or_else(|| employee_not_found(id))?;

        Ok(EmployeeEggStat {
            percent_of_total: aggregate::share_percent(count.egg_count, total),
            employee_id: count.employee_id,
            employee_name: count.employee_name,
            egg_count: count.egg_count,
        })
    }

    /// Top producer by `egg_per_month`, or `None` when there are no chickens.
    pub fn most_productive_chicken(&self) -> ServiceResult<Option<MostProductiveChicken>> {
        let started_at = Instant::now();
        let result = self.chickens.list_chickens().map_err(ServiceError::from).map(|chickens| {
            aggregate::most_productive_chicken(&chickens).map(|chicken| MostProductiveChicken {
                chicken_id: chicken.id,
                cage_number: chicken.cage_id,
                egg_per_month: chicken.egg_per_month,
            })
        });
        log_outcome("report_most_productive", started_at, &result);
        result
    }

    /// Chickens laying strictly below the flock average, in listing order.
    pub fn low_productivity_chickens(&self) -> ServiceResult<Vec<Chicken>> {
        let started_at = Instant::now();
        let result = self.chickens.list_chickens().map_err(ServiceError::from).map(|chickens| {
            aggregate::low_productivity_chickens(&chickens)
                .into_iter()
                .cloned()
                .collect()
        });
        log_outcome("report_low_productivity", started_at, &result);
        result
    }

    /// Chickens served per employee, with the workload tier attached.
    pub fn employee_chicken_counts(&self) -> ServiceResult<Vec<EmployeeWorkload>> {
        let started_at = Instant::now();
        let result = self.employee_chicken_counts_inner();
        log_outcome("report_employee_chicken_counts", started_at, &result);
        result
    }

    fn employee_chicken_counts_inner(&self) -> ServiceResult<Vec<EmployeeWorkload>> {
        let employees = self.employees.list_employees()?;
        let chickens = self.chickens.list_chickens()?;

        Ok(aggregate::employee_chicken_counts(&employees, &chickens)
            .into_iter()
            .map(|count| EmployeeWorkload {
                tier: aggregate::workload_tier(count.chicken_count),
                employee_id: count.employee_id,
                employee_name: count.employee_name,
                chicken_count: count.chicken_count,
            })
            .collect())
    }

    /// Chickens served by one employee, with the workload tier.
    ///
    /// # Errors
    /// - `NotFound` when no employee has `id`.
    pub fn employee_chicken_count(&self, id: EmployeeId) -> ServiceResult<EmployeeWorkload> {
        let started_at = Instant::now();
        let result = self.employee_chicken_count_inner(id);
        log_outcome("report_employee_chicken_count", started_at, &result);
        result
    }

    fn employee_chicken_count_inner(&self, id: EmployeeId) -> ServiceResult<EmployeeWorkload> {
        let employee = self.require_employee(id)?;
        let chickens = self.chickens.list_chickens()?;

        aggregate::employee_chicken_counts(std::slice::from_ref(&employee), &chickens)
            .into_iter()
            .next()
            .map(|count| EmployeeWorkload {
                tier: aggregate::workload_tier(count.chicken_count),
                employee_id: count.employee_id,
                employee_name: count.employee_name,
                chicken_count: count.chicken_count,
            })
            .ok_or_else(|| employee_not_found(id))
    }

    /// Mean `egg_per_month` for chickens of exactly this weight and age.
    pub fn average_eggs_for(&self, weight: f64, age: u32) -> ServiceResult<f64> {
        let started_at = Instant::now();
        let result = self
            .chickens
            .list_chickens()
            .map_err(ServiceError::from)
            .map(|chickens| aggregate::average_egg_production_for(&chickens, weight, age));
        log_outcome("report_average_eggs", started_at, &result);
        result
    }

    /// Flock size, staff size, mean production and low-producer count.
    pub fn productivity_summary(&self) -> ServiceResult<ProductivitySummary> {
        let started_at = Instant::now();
        let result = self.productivity_summary_inner();
        log_outcome("report_summary", started_at, &result);
        result
    }

    fn productivity_summary_inner(&self) -> ServiceResult<ProductivitySummary> {
        let chickens = self.chickens.list_chickens()?;
        let employees = self.employees.list_employees()?;
        Ok(ProductivitySummary {
            chicken_count: chickens.len(),
            employee_count: employees.len(),
            average_egg_production: aggregate::average_egg_production(&chickens),
            low_productivity_count: aggregate::low_productivity_chickens(&chickens).len(),
        })
    }

    /// Cage with the most eggs collected in `range`.
    pub fn busiest_cage(&self, range: &DateRange) -> ServiceResult<Option<CageEggTotal>> {
        let started_at = Instant::now();
        let result = self
            .collections
            .list_collections(range)
            .map_err(ServiceError::from)
            .map(|events| aggregate::most_productive_cage(&events));
        log_outcome("report_busiest_cage", started_at, &result);
        result
    }

    fn require_employee(&self, id: EmployeeId) -> ServiceResult<Employee> {
        self.employees
            .get_employee(id)?
            .ok_or_else(|| employee_not_found(id))
    }
}

fn employee_not_found(id: EmployeeId) -> ServiceError {
    ServiceError::NotFound {
        entity: EntityKind::Employee,
        id,
    }
}
