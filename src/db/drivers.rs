//! Driver repository.

use crate::domain::{Driver, DriverId};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

/// Repository for driver records.
#[derive(Debug, Clone)]
pub struct DriverRepository {
    pool: SqlitePool,
}

impl DriverRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        DriverRepository { pool }
    }

    /// Insert a driver row.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert(&self, driver: &Driver) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO drivers (driver_id, name, created_at) VALUES (?, ?, ?)")
            .bind(driver.driver_id.as_str())
            .bind(&driver.name)
            .bind(driver.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetch a driver by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get(&self, driver_id: &DriverId) -> Result<Option<Driver>, sqlx::Error> {
        let row = sqlx::query("SELECT driver_id, name, created_at FROM drivers WHERE driver_id = ?")
            .bind(driver_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| {
            let created_at: String = r.get("created_at");
            Driver {
                driver_id: DriverId::new(r.get("driver_id")),
                name: r.get("name"),
                created_at: DateTime::parse_from_rfc3339(&created_at)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or_default(),
            }
        }))
    }

    /// Existence check used by the tips read path.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn exists(&self, driver_id: &DriverId) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM drivers WHERE driver_id = ?")
            .bind(driver_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}
