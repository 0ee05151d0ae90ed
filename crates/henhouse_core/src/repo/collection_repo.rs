//! Egg-collection event log repository.
//!
//! # Responsibility
//! - Append and query dated egg-collection events.
//!
//! # Invariants
//! - Dates are stored as `YYYY-MM-DD` text so lexical order equals date order.
//! - Range queries are inclusive on both ends.
//! - Events outlive the chicken/employee records they reference.

use super::error::{parse_uuid, EntityKind, RepoError, RepoResult};
use crate::model::date_range::{format_date, parse_date, DateRange};
use crate::model::egg_collection::{CollectionId, EggCollection};
use rusqlite::{params, Connection, Row};

const COLLECTION_SELECT_SQL: &str = "SELECT
    uuid,
    collected_on,
    cage_id,
    chicken_uuid,
    employee_uuid,
    egg_count
FROM egg_collections";

/// Repository interface for the egg-collection event log.
pub trait EggCollectionRepository {
    fn record_collection(&self, collection: &EggCollection) -> RepoResult<CollectionId>;
    fn get_collection(&self, id: CollectionId) -> RepoResult<Option<EggCollection>>;
    /// Events with `collected_on` inside `range`, oldest first.
    fn list_collections(&self, range: &DateRange) -> RepoResult<Vec<EggCollection>>;
    fn delete_collection(&self, id: CollectionId) -> RepoResult<()>;
}

/// SQLite-backed egg-collection repository.
pub struct SqliteEggCollectionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEggCollectionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EggCollectionRepository for SqliteEggCollectionRepository<'_> {
    fn record_collection(&self, collection: &EggCollection) -> RepoResult<CollectionId> {
        collection.validate()?;

        self.conn.execute(
            "INSERT INTO egg_collections (
                uuid,
                collected_on,
                cage_id,
                chicken_uuid,
                employee_uuid,
                egg_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                collection.id.to_string(),
                format_date(collection.collected_on),
                collection.cage_id,
                collection.chicken_id.map(|id| id.to_string()),
                collection.employee_id.map(|id| id.to_string()),
                collection.egg_count,
            ],
        )?;

        Ok(collection.id)
    }

    fn get_collection(&self, id: CollectionId) -> RepoResult<Option<EggCollection>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COLLECTION_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_collection_row(row)?));
        }

        Ok(None)
    }

    fn list_collections(&self, range: &DateRange) -> RepoResult<Vec<EggCollection>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COLLECTION_SELECT_SQL}
             WHERE collected_on BETWEEN ?1 AND ?2
             ORDER BY collected_on ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query(params![
            format_date(range.start()),
            format_date(range.end())
        ])?;
        let mut collections = Vec::new();

        while let Some(row) = rows.next()? {
            collections.push(parse_collection_row(row)?);
        }

        Ok(collections)
    }

    fn delete_collection(&self, id: CollectionId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM egg_collections WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::EggCollection,
                id,
            });
        }

        Ok(())
    }
}

fn parse_collection_row(row: &Row<'_>) -> RepoResult<EggCollection> {
    let uuid_text: String = row.get("uuid")?;
    let date_text: String = row.get("collected_on")?;
    let collected_on = parse_date(&date_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in egg_collections.collected_on"
        ))
    })?;

    let chicken_id = match row.get::<_, Option<String>>("chicken_uuid")? {
        Some(value) => Some(parse_uuid(&value, "egg_collections.chicken_uuid")?),
        None => None,
    };
    let employee_id = match row.get::<_, Option<String>>("employee_uuid")? {
        Some(value) => Some(parse_uuid(&value, "egg_collections.employee_uuid")?),
        None => None,
    };

    let collection = EggCollection {
        id: parse_uuid(&uuid_text, "egg_collections.uuid")?,
        collected_on,
        cage_id: row.get("cage_id")?,
        chicken_id,
        employee_id,
        egg_count: row.get("egg_count")?,
    };
    collection.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "egg collection `{uuid_text}` violates invariants: {err}"
        ))
    })?;
    Ok(collection)
}
