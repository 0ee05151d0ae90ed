//! Key/value business settings stored alongside the records.
//!
//! Currently holds the egg price used to value collections.

use super::error::{RepoError, RepoResult};
use crate::model::validation::ValidationError;
use rusqlite::{params, Connection, OptionalExtension};

/// Price per egg used when no value has been stored yet.
pub const DEFAULT_EGG_PRICE: f64 = 10.0;

const EGG_PRICE_KEY: &str = "egg_price";

/// Repository interface for pricing settings.
pub trait SettingsRepository {
    /// Returns the stored egg price, or [`DEFAULT_EGG_PRICE`] when unset.
    fn egg_price(&self) -> RepoResult<f64>;
    fn set_egg_price(&self, price: f64) -> RepoResult<()>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn egg_price(&self) -> RepoResult<f64> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1;",
                [EGG_PRICE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            Some(text) => parse_price(&text),
            None => Ok(DEFAULT_EGG_PRICE),
        }
    }

    fn set_egg_price(&self, price: f64) -> RepoResult<()> {
        validate_egg_price(price)?;

        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![EGG_PRICE_KEY, price.to_string()],
        )?;
        Ok(())
    }
}

/// Accepts finite, non-negative prices.
pub fn validate_egg_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidEggPrice(price))
    }
}

fn parse_price(text: &str) -> RepoResult<f64> {
    let price = text.trim().parse::<f64>().map_err(|_| {
        RepoError::InvalidData(format!("invalid egg price `{text}` in settings.value"))
    })?;
    validate_egg_price(price).map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(price)
}
