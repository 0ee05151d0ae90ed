//! Pure aggregation functions over fetched records.
//!
//! # Responsibility
//! - Compute averages, outliers, rankings and workload classes from
//!   in-memory slices.
//!
//! # Invariants
//! - No I/O and no shared state; every function is deterministic in its input.
//! - Empty input is a valid "no data" state and yields zero/empty/`None`,
//!   never an error.
//! - Results are unrounded; rounding belongs to the presentation side.

use crate::model::chicken::Chicken;
use crate::model::egg_collection::EggCollection;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::CageId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Highest chicken count classified as [`WorkloadTier::Low`].
pub const LOW_WORKLOAD_MAX: usize = 2;
/// Highest chicken count classified as [`WorkloadTier::Medium`].
pub const MEDIUM_WORKLOAD_MAX: usize = 4;

/// How many chickens an employee is responsible for, in four steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadTier {
    None,
    Low,
    Medium,
    High,
}

/// Eggs attributed to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeEggCount {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub egg_count: u64,
}

/// Chickens served by one employee through their cage assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeChickenCount {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub chicken_count: usize,
}

/// Eggs collected from one cage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CageEggTotal {
    pub cage_id: CageId,
    pub egg_count: u64,
}

/// Arithmetic mean of `egg_per_month`; `0.0` for no chickens.
pub fn average_egg_production(chickens: &[Chicken]) -> f64 {
    if chickens.is_empty() {
        return 0.0;
    }
    let total: u64 = chickens
        .iter()
        .map(|chicken| u64::from(chicken.egg_per_month))
        .sum();
    total as f64 / chickens.len() as f64
}

/// Mean `egg_per_month` over chickens with exactly this weight and age.
pub fn average_egg_production_for(chickens: &[Chicken], weight: f64, age: u32) -> f64 {
    let (total, count) = chickens
        .iter()
        .filter(|chicken| chicken.weight == weight && chicken.age == age)
        .fold((0u64, 0usize), |(total, count), chicken| {
            (total + u64::from(chicken.egg_per_month), count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

/// Chicken with the highest `egg_per_month`; the first one wins a tie.
pub fn most_productive_chicken(chickens: &[Chicken]) -> Option<&Chicken> {
    let mut best: Option<&Chicken> = None;
    for chicken in chickens {
        match best {
            Some(current) if chicken.egg_per_month <= current.egg_per_month => {}
            _ => best = Some(chicken),
        }
    }
    best
}

/// Chickens strictly below the mean of the same input, in input order.
pub fn low_productivity_chickens(chickens: &[Chicken]) -> Vec<&Chicken> {
    let average = average_egg_production(chickens);
    chickens
        .iter()
        .filter(|chicken| f64::from(chicken.egg_per_month) < average)
        .collect()
}

/// Sums event egg counts per employee, attributing by `employee_id`.
///
/// Every employee appears in the output, in input order, with `0` when no
/// event names them. Events are expected to be range-filtered already.
pub fn employee_egg_counts(
    employees: &[Employee],
    events: &[EggCollection],
) -> Vec<EmployeeEggCount> {
    let mut totals: HashMap<EmployeeId, u64> = HashMap::new();
    for event in events {
        if let Some(employee_id) = event.employee_id {
            *totals.entry(employee_id).or_default() += u64::from(event.egg_count);
        }
    }

    employees
        .iter()
        .map(|employee| EmployeeEggCount {
            employee_id: employee.id,
            employee_name: employee.full_name.clone(),
            egg_count: totals.get(&employee.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Counts chickens whose cage is in each employee's cage set.
///
/// Two chickens sharing a cage count twice; a cage listed twice for one
/// employee does not, because the cage set is deduplicated.
pub fn employee_chicken_counts(
    employees: &[Employee],
    chickens: &[Chicken],
) -> Vec<EmployeeChickenCount> {
    let per_cage = chickens_per_cage(chickens);

    employees
        .iter()
        .map(|employee| EmployeeChickenCount {
            employee_id: employee.id,
            employee_name: employee.full_name.clone(),
            chicken_count: employee
                .cages
                .iter()
                .map(|cage_id| per_cage.get(cage_id).copied().unwrap_or(0))
                .sum(),
        })
        .collect()
}

/// `0 -> None`, `1..=2 -> Low`, `3..=4 -> Medium`, `5.. -> High`.
pub fn workload_tier(chicken_count: usize) -> WorkloadTier {
    match chicken_count {
        0 => WorkloadTier::None,
        count if count <= LOW_WORKLOAD_MAX => WorkloadTier::Low,
        count if count <= MEDIUM_WORKLOAD_MAX => WorkloadTier::Medium,
        _ => WorkloadTier::High,
    }
}

/// `part / total * 100`, or `0.0` when `total` is zero.
pub fn share_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// `total_cost / total_eggs`, or `0.0` when no eggs were collected.
pub fn price_per_egg(total_cost: f64, total_eggs: u64) -> f64 {
    if total_eggs == 0 {
        return 0.0;
    }
    total_cost / total_eggs as f64
}

/// Sum of egg counts over all events.
pub fn total_eggs(events: &[EggCollection]) -> u64 {
    events.iter().map(|event| u64::from(event.egg_count)).sum()
}

/// Cage with the most collected eggs; the lowest cage id wins a tie.
pub fn most_productive_cage(events: &[EggCollection]) -> Option<CageEggTotal> {
    let mut per_cage: BTreeMap<CageId, u64> = BTreeMap::new();
    for event in events {
        *per_cage.entry(event.cage_id).or_default() += u64::from(event.egg_count);
    }

    let mut best: Option<CageEggTotal> = None;
    for (cage_id, egg_count) in per_cage {
        match best {
            Some(current) if egg_count <= current.egg_count => {}
            _ => best = Some(CageEggTotal { cage_id, egg_count }),
        }
    }
    best
}

fn chickens_per_cage(chickens: &[Chicken]) -> HashMap<CageId, usize> {
    let mut per_cage = HashMap::new();
    for chicken in chickens {
        *per_cage.entry(chicken.cage_id).or_insert(0) += 1;
    }
    per_cage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chicken::ChickenFields;
    use crate::model::egg_collection::EggCollectionFields;
    use crate::model::employee::EmployeeFields;
    use chrono::NaiveDate;

    fn chicken(cage_id: CageId, egg_per_month: u32) -> Chicken {
        Chicken::new(ChickenFields {
            cage_id,
            weight: 2.5,
            age: 10,
            egg_per_month,
            breed: "Leghorn".to_string(),
        })
    }

    fn employee(name: &str, cages: Vec<CageId>) -> Employee {
        Employee::new(EmployeeFields {
            full_name: name.to_string(),
            passport_data: "1234 567890".to_string(),
            salary: 30_000.0,
            cages,
        })
    }

    fn event(cage_id: CageId, employee_id: Option<EmployeeId>, egg_count: u32) -> EggCollection {
        EggCollection::new(EggCollectionFields {
            collected_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            cage_id,
            chicken_id: None,
            employee_id,
            egg_count,
        })
    }

    fn flock(eggs: &[u32]) -> Vec<Chicken> {
        eggs.iter()
            .enumerate()
            .map(|(index, eggs)| chicken(index as CageId + 1, *eggs))
            .collect()
    }

    #[test]
    fn average_low_and_most_productive_for_small_flock() {
        let chickens = flock(&[10, 30, 20]);

        assert_eq!(average_egg_production(&chickens), 20.0);

        let low = low_productivity_chickens(&chickens);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].egg_per_month, 10);

        let best = most_productive_chicken(&chickens).unwrap();
        assert_eq!(best.egg_per_month, 30);
        assert_eq!(best.id, chickens[1].id);
    }

    #[test]
    fn empty_flock_is_no_data_not_an_error() {
        assert_eq!(average_egg_production(&[]), 0.0);
        assert!(most_productive_chicken(&[]).is_none());
        assert!(low_productivity_chickens(&[]).is_empty());
    }

    #[test]
    fn singleton_is_its_own_best_and_never_low() {
        let chickens = flock(&[7]);
        assert_eq!(most_productive_chicken(&chickens).unwrap().id, chickens[0].id);
        assert!(low_productivity_chickens(&chickens).is_empty());
    }

    #[test]
    fn average_lies_between_min_and_max() {
        let samples: [&[u32]; 5] = [&[0], &[1, 2], &[5, 5, 5], &[0, 100, 3, 41], &[9, 1, 8, 2, 7]];
        for eggs in samples {
            let chickens = flock(eggs);
            let average = average_egg_production(&chickens);
            let min = f64::from(*eggs.iter().min().unwrap());
            let max = f64::from(*eggs.iter().max().unwrap());
            assert!(min <= average && average <= max, "{eggs:?} -> {average}");
        }
    }

    #[test]
    fn low_productivity_never_includes_chickens_at_or_above_average() {
        let samples: [&[u32]; 4] = [&[3, 3, 3], &[1, 2, 3, 4], &[0, 0, 10], &[12, 11, 30, 29]];
        for eggs in samples {
            let chickens = flock(eggs);
            let average = average_egg_production(&chickens);
            let low = low_productivity_chickens(&chickens);
            assert!(low
                .iter()
                .all(|chicken| f64::from(chicken.egg_per_month) < average));
            let expected = eggs.iter().filter(|e| f64::from(**e) < average).count();
            assert_eq!(low.len(), expected);
        }
    }

    #[test]
    fn low_productivity_preserves_input_order() {
        let chickens = flock(&[1, 50, 3, 2]);
        let low = low_productivity_chickens(&chickens)
            .into_iter()
            .map(|chicken| chicken.egg_per_month)
            .collect::<Vec<_>>();
        assert_eq!(low, vec![1, 3, 2]);
    }

    #[test]
    fn most_productive_tie_goes_to_first_in_input_order() {
        let chickens = flock(&[4, 9, 9, 1]);
        assert_eq!(most_productive_chicken(&chickens).unwrap().id, chickens[1].id);
    }

    #[test]
    fn weight_and_age_cohort_average() {
        let mut chickens = flock(&[10, 20, 90]);
        chickens[2].weight = 3.1;
        assert_eq!(average_egg_production_for(&chickens, 2.5, 10), 15.0);
        assert_eq!(average_egg_production_for(&chickens, 2.5, 11), 0.0);
    }

    #[test]
    fn chicken_counts_follow_cage_membership() {
        let worker = employee("Ivan", vec![4, 5]);
        let chickens = vec![chicken(4, 1), chicken(4, 2), chicken(5, 3), chicken(6, 4)];

        let counts = employee_chicken_counts(&[worker.clone()], &chickens);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].employee_id, worker.id);
        assert_eq!(counts[0].chicken_count, 3);
    }

    #[test]
    fn chicken_counts_ignore_duplicate_cage_ids() {
        let chickens = vec![chicken(4, 1), chicken(4, 2), chicken(5, 3)];
        let plain = employee("Plain", vec![4, 5]);
        let doubled = employee("Doubled", vec![4, 4, 5, 5, 4]);

        let counts = employee_chicken_counts(&[plain, doubled], &chickens);
        assert_eq!(counts[0].chicken_count, counts[1].chicken_count);
        assert_eq!(counts[1].chicken_count, 3);
    }

    #[test]
    fn chicken_count_total_is_bounded_by_cage_pairs() {
        let chickens = vec![chicken(1, 1), chicken(2, 1), chicken(2, 1), chicken(3, 1)];
        let employees = vec![
            employee("A", vec![1, 2]),
            employee("B", vec![2, 3, 3]),
            employee("C", vec![]),
        ];

        let counts = employee_chicken_counts(&employees, &chickens);
        let total: usize = counts.iter().map(|count| count.chicken_count).sum();
        let bound: usize = employees
            .iter()
            .flat_map(|employee| employee.cages.iter())
            .map(|cage_id| chickens.iter().filter(|c| c.cage_id == *cage_id).count())
            .sum();
        assert!(total <= bound);
        assert_eq!(counts[2].chicken_count, 0);
    }

    #[test]
    fn workload_tier_steps() {
        let cases = [
            (0, WorkloadTier::None),
            (1, WorkloadTier::Low),
            (2, WorkloadTier::Low),
            (3, WorkloadTier::Medium),
            (4, WorkloadTier::Medium),
            (5, WorkloadTier::High),
            (100, WorkloadTier::High),
        ];
        for (count, tier) in cases {
            assert_eq!(workload_tier(count), tier, "count={count}");
        }
    }

    #[test]
    fn egg_counts_attribute_by_employee_identity() {
        let first = employee("First", vec![1]);
        let second = employee("Second", vec![1]);
        let events = vec![
            event(1, Some(first.id), 4),
            event(2, Some(first.id), 6),
            event(1, None, 50),
        ];

        let counts = employee_egg_counts(&[first.clone(), second.clone()], &events);
        assert_eq!(counts[0].egg_count, 10);
        assert_eq!(counts[1].employee_id, second.id);
        assert_eq!(counts[1].egg_count, 0);
    }

    #[test]
    fn share_and_price_are_zero_safe() {
        assert_eq!(share_percent(0, 0), 0.0);
        assert_eq!(share_percent(1, 4), 25.0);
        assert_eq!(price_per_egg(0.0, 0), 0.0);
        assert_eq!(price_per_egg(50.0, 5), 10.0);
    }

    #[test]
    fn most_productive_cage_breaks_ties_by_lowest_id() {
        assert!(most_productive_cage(&[]).is_none());

        let events = vec![event(7, None, 5), event(3, None, 2), event(3, None, 3), event(9, None, 1)];
        let best = most_productive_cage(&events).unwrap();
        assert_eq!(best, CageEggTotal { cage_id: 3, egg_count: 5 });
        assert_eq!(total_eggs(&events), 11);
    }
}
