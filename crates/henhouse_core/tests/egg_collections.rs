use chrono::NaiveDate;
use henhouse_core::db::open_db_in_memory;
use henhouse_core::{
    ChickenFields, ChickenService, DateRange, EggCollectionFields, EggCollectionService,
    EmployeeFields, EmployeeService, EntityKind, PricingService, ServiceError,
    SqliteChickenRepository, SqliteEggCollectionRepository, SqliteEmployeeRepository,
    SqliteSettingsRepository, ValidationError, DEFAULT_EGG_PRICE,
};
use rusqlite::Connection;
use uuid::Uuid;

type CollectionService<'conn> = EggCollectionService<
    SqliteEggCollectionRepository<'conn>,
    SqliteChickenRepository<'conn>,
    SqliteEmployeeRepository<'conn>,
>;

fn collection_service(conn: &Connection) -> CollectionService<'_> {
    EggCollectionService::new(
        SqliteEggCollectionRepository::new(conn),
        SqliteChickenRepository::new(conn),
        SqliteEmployeeRepository::new(conn),
    )
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn collection(day: u32, cage_id: u32, egg_count: u32) -> EggCollectionFields {
    EggCollectionFields {
        collected_on: date(day),
        cage_id,
        chicken_id: None,
        employee_id: None,
        egg_count,
    }
}

#[test]
fn range_listing_is_inclusive_and_ordered_by_date() {
    let conn = open_db_in_memory().unwrap();
    let service = collection_service(&conn);

    service.record_collection(collection(20, 1, 3)).unwrap();
    service.record_collection(collection(1, 1, 2)).unwrap();
    service.record_collection(collection(10, 2, 5)).unwrap();
    service.record_collection(collection(31, 2, 7)).unwrap();

    let range = DateRange::new(date(1), date(20)).unwrap();
    let listed = service.list_collections(&range).unwrap();
    let days = listed
        .iter()
        .map(|event| event.collected_on)
        .collect::<Vec<_>>();
    assert_eq!(days, vec![date(1), date(10), date(20)]);

    let empty = DateRange::day(date(15));
    assert!(service.list_collections(&empty).unwrap().is_empty());
}

#[test]
fn attributed_collection_requires_existing_records() {
    let conn = open_db_in_memory().unwrap();
    let service = collection_service(&conn);

    let mut unknown_employee = collection(1, 1, 1);
    unknown_employee.employee_id = Some(Uuid::new_v4());
    let err = service.record_collection(unknown_employee).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { entity: EntityKind::Employee, .. }
    ));

    let mut unknown_chicken = collection(1, 1, 1);
    unknown_chicken.chicken_id = Some(Uuid::new_v4());
    let err = service.record_collection(unknown_chicken).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { entity: EntityKind::Chicken, .. }
    ));

    let chicken = ChickenService::new(SqliteChickenRepository::new(&conn))
        .create_chicken(ChickenFields {
            cage_id: 1,
            weight: 2.0,
            age: 8,
            egg_per_month: 20,
            breed: "Sussex".to_string(),
        })
        .unwrap();
    let employee = EmployeeService::new(SqliteEmployeeRepository::new(&conn))
        .create_employee(EmployeeFields {
            full_name: "Oleg Ivanov".to_string(),
            passport_data: "4321 098765".to_string(),
            salary: 30_000.0,
            cages: vec![1],
        })
        .unwrap();

    let mut attributed = collection(2, 1, 4);
    attributed.chicken_id = Some(chicken.id);
    attributed.employee_id = Some(employee.id);
    let recorded = service.record_collection(attributed).unwrap();

    let loaded = service.get_collection(recorded.id).unwrap();
    assert_eq!(loaded, recorded);
    assert_eq!(loaded.employee_id, Some(employee.id));
}

#[test]
fn history_survives_deleting_the_collector() {
    let conn = open_db_in_memory().unwrap();
    let employees = EmployeeService::new(SqliteEmployeeRepository::new(&conn));
    let employee = employees
        .create_employee(EmployeeFields {
            full_name: "Oleg Ivanov".to_string(),
            passport_data: "4321 098765".to_string(),
            salary: 30_000.0,
            cages: vec![],
        })
        .unwrap();

    let service = collection_service(&conn);
    let mut event = collection(5, 3, 6);
    event.employee_id = Some(employee.id);
    service.record_collection(event).unwrap();

    employees.delete_employee(employee.id).unwrap();

    let listed = service.list_collections(&DateRange::day(date(5))).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].employee_id, Some(employee.id));
}

#[test]
fn zero_egg_events_and_missing_deletes_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = collection_service(&conn);

    let err = service.record_collection(collection(1, 1, 0)).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::ZeroEggCount)));

    let recorded = service.record_collection(collection(1, 1, 2)).unwrap();
    service.delete_collection(recorded.id).unwrap();
    let err = service.delete_collection(recorded.id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { entity: EntityKind::EggCollection, .. }
    ));
}

#[test]
fn egg_price_defaults_and_can_be_changed() {
    let conn = open_db_in_memory().unwrap();
    let pricing = PricingService::new(SqliteSettingsRepository::new(&conn));

    assert_eq!(pricing.egg_price().unwrap(), DEFAULT_EGG_PRICE);

    pricing.set_egg_price(12.5).unwrap();
    assert_eq!(pricing.egg_price().unwrap(), 12.5);

    pricing.set_egg_price(0.0).unwrap();
    assert_eq!(pricing.egg_price().unwrap(), 0.0);

    let err = pricing.set_egg_price(-1.0).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidEggPrice(_))
    ));
    assert_eq!(pricing.egg_price().unwrap(), 0.0);
}
