use henhouse_core::db::open_db_in_memory;
use henhouse_core::{
    Chicken, ChickenFields, ChickenRepository, ChickenService, EntityKind, RepoError,
    ServiceError, SqliteChickenRepository, ValidationError,
};
use uuid::Uuid;

fn fields(cage_id: u32, egg_per_month: u32) -> ChickenFields {
    ChickenFields {
        cage_id,
        weight: 2.8,
        age: 15,
        egg_per_month,
        breed: "New Hampshire".to_string(),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = ChickenService::new(SqliteChickenRepository::new(&conn));

    let created = service.create_chicken(fields(6, 28)).unwrap();
    let loaded = service.get_chicken(created.id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.cage_id, 6);
    assert_eq!(loaded.weight, 2.8);
    assert_eq!(loaded.breed, "New Hampshire");
}

#[test]
fn list_returns_insertion_order_and_empty_when_no_data() {
    let conn = open_db_in_memory().unwrap();
    let service = ChickenService::new(SqliteChickenRepository::new(&conn));
    assert!(service.list_chickens().unwrap().is_empty());

    let first = service.create_chicken(fields(1, 10)).unwrap();
    let second = service.create_chicken(fields(1, 30)).unwrap();
    let third = service.create_chicken(fields(2, 20)).unwrap();

    let ids = service
        .list_chickens()
        .unwrap()
        .into_iter()
        .map(|chicken| chicken.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[test]
fn negative_weight_is_rejected_and_store_is_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = ChickenService::new(SqliteChickenRepository::new(&conn));
    service.create_chicken(fields(1, 10)).unwrap();

    let mut invalid = fields(1, 10);
    invalid.weight = -1.0;
    let err = service.create_chicken(invalid).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NonPositiveWeight(_))
    ));
    assert_eq!(service.list_chickens().unwrap().len(), 1);
}

#[test]
fn update_replaces_fields_in_place() {
    let conn = open_db_in_memory().unwrap();
    let service = ChickenService::new(SqliteChickenRepository::new(&conn));
    let created = service.create_chicken(fields(6, 28)).unwrap();

    let mut changed = fields(7, 32);
    changed.weight = 3.0;
    changed.age = 16;
    changed.breed = "New Hampshire Updated".to_string();
    let updated = service.update_chicken(created.id, changed).unwrap();

    assert_eq!(updated.id, created.id);
    let loaded = service.get_chicken(created.id).unwrap();
    assert_eq!(loaded.cage_id, 7);
    assert_eq!(loaded.egg_per_month, 32);
    assert_eq!(loaded.age, 16);
    assert_eq!(loaded.breed, "New Hampshire Updated");
}

#[test]
fn invalid_update_leaves_record_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = ChickenService::new(SqliteChickenRepository::new(&conn));
    let created = service.create_chicken(fields(6, 28)).unwrap();

    let mut invalid = fields(6, 40);
    invalid.age = 0;
    let err = service.update_chicken(created.id, invalid).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::ZeroAge)));

    assert_eq!(service.get_chicken(created.id).unwrap(), created);
}

#[test]
fn update_and_delete_missing_chicken_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ChickenService::new(SqliteChickenRepository::new(&conn));
    let missing = Uuid::new_v4();

    let update_err = service.update_chicken(missing, fields(1, 1)).unwrap_err();
    assert!(matches!(
        update_err,
        ServiceError::NotFound { entity: EntityKind::Chicken, id } if id == missing
    ));

    let delete_err = service.delete_chicken(missing).unwrap_err();
    assert!(matches!(delete_err, ServiceError::NotFound { .. }));

    let get_err = service.get_chicken(missing).unwrap_err();
    assert_eq!(get_err.code(), "not_found");
}

#[test]
fn delete_removes_the_record() {
    let conn = open_db_in_memory().unwrap();
    let service = ChickenService::new(SqliteChickenRepository::new(&conn));
    let created = service.create_chicken(fields(3, 12)).unwrap();

    service.delete_chicken(created.id).unwrap();

    assert!(service.list_chickens().unwrap().is_empty());
    let err = service.delete_chicken(created.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn repository_rejects_invalid_records_directly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChickenRepository::new(&conn);

    let mut chicken = Chicken::new(fields(2, 5));
    chicken.breed = String::new();
    let err = repo.create_chicken(&chicken).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::EmptyBreed)));
    assert!(repo.get_chicken(chicken.id).unwrap().is_none());
}

#[test]
fn corrupt_row_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO chickens (uuid, cage_id, weight, age, egg_per_month, breed)
         VALUES ('not-a-uuid', 1, 2.0, 3, 4, 'Orpington');",
        [],
    )
    .unwrap();

    let repo = SqliteChickenRepository::new(&conn);
    let err = repo.list_chickens().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
