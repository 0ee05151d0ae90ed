//! Chicken repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `chickens` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Chicken::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Listing order is insertion order, so report tie-breaks are stable.

use super::error::{parse_uuid, EntityKind, RepoError, RepoResult};
use crate::model::chicken::{Chicken, ChickenId};
use rusqlite::{params, Connection, Row};

const CHICKEN_SELECT_SQL: &str = "SELECT
    uuid,
    cage_id,
    weight,
    age,
    egg_per_month,
    breed
FROM chickens";

/// Repository interface for chicken CRUD operations.
pub trait ChickenRepository {
    fn create_chicken(&self, chicken: &Chicken) -> RepoResult<ChickenId>;
    fn update_chicken(&self, chicken: &Chicken) -> RepoResult<()>;
    fn get_chicken(&self, id: ChickenId) -> RepoResult<Option<Chicken>>;
    fn list_chickens(&self) -> RepoResult<Vec<Chicken>>;
    fn delete_chicken(&self, id: ChickenId) -> RepoResult<()>;
}

/// SQLite-backed chicken repository.
pub struct SqliteChickenRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChickenRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ChickenRepository for SqliteChickenRepository<'_> {
    fn create_chicken(&self, chicken: &Chicken) -> RepoResult<ChickenId> {
        chicken.validate()?;

        self.conn.execute(
            "INSERT INTO chickens (
                uuid,
                cage_id,
                weight,
                age,
                egg_per_month,
                breed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                chicken.id.to_string(),
                chicken.cage_id,
                chicken.weight,
                chicken.age,
                chicken.egg_per_month,
                chicken.breed.as_str(),
            ],
        )?;

        Ok(chicken.id)
    }

    fn update_chicken(&self, chicken: &Chicken) -> RepoResult<()> {
        chicken.validate()?;

        let changed = self.conn.execute(
            "UPDATE chickens
             SET
                cage_id = ?1,
                weight = ?2,
                age = ?3,
                egg_per_month = ?4,
                breed = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                chicken.cage_id,
                chicken.weight,
                chicken.age,
                chicken.egg_per_month,
                chicken.breed.as_str(),
                chicken.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Chicken,
                id: chicken.id,
            });
        }

        Ok(())
    }

    fn get_chicken(&self, id: ChickenId) -> RepoResult<Option<Chicken>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHICKEN_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_chicken_row(row)?));
        }

        Ok(None)
    }

    fn list_chickens(&self) -> RepoResult<Vec<Chicken>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHICKEN_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut chickens = Vec::new();

        while let Some(row) = rows.next()? {
            chickens.push(parse_chicken_row(row)?);
        }

        Ok(chickens)
    }

    fn delete_chicken(&self, id: ChickenId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM chickens WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Chicken,
                id,
            });
        }

        Ok(())
    }
}

fn parse_chicken_row(row: &Row<'_>) -> RepoResult<Chicken> {
    let uuid_text: String = row.get("uuid")?;
    let chicken = Chicken {
        id: parse_uuid(&uuid_text, "chickens.uuid")?,
        cage_id: row.get("cage_id")?,
        weight: row.get("weight")?,
        age: row.get("age")?,
        egg_per_month: row.get("egg_per_month")?,
        breed: row.get("breed")?,
    };
    chicken.validate().map_err(|err| {
        RepoError::InvalidData(format!("chicken `{uuid_text}` violates invariants: {err}"))
    })?;
    Ok(chicken)
}
