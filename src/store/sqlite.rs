//! SQLite-backed aggregate store.
//!
//! Totals persist as integer ten-thousandths of a currency unit so the
//! whole increment is one upsert statement and the addition happens in
//! SQL on exact integers. `created_at` is absent from the conflict update
//! set, which gives first-write-wins semantics at the statement level.

use super::{AggregateStore, StoreError};
use crate::domain::{AggregationKey, Decimal, DriverId, TipAggregate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

/// Fractional digits carried by the persisted integer column.
const LEDGER_SCALE: u32 = 4;

/// Production aggregate store over a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteAggregateStore {
    pool: SqlitePool,
}

impl SqliteAggregateStore {
    /// Create a store backed by the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteAggregateStore { pool }
    }
}

#[async_trait]
impl AggregateStore for SqliteAggregateStore {
    async fn increment(
        &self,
        driver_id: &DriverId,
        key: &AggregationKey,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let delta = to_scaled(amount)?;
        let now_str = now.to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO tip_aggregates (
                partition_key, aggregation_key, total_amount_e4, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(partition_key, aggregation_key) DO UPDATE SET
                total_amount_e4 = total_amount_e4 + excluded.total_amount_e4,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(partition_key(driver_id))
        .bind(key.as_str())
        .bind(delta)
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn get(
        &self,
        driver_id: &DriverId,
        key: &AggregationKey,
    ) -> Result<Option<TipAggregate>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT total_amount_e4, created_at, updated_at
            FROM tip_aggregates
            WHERE partition_key = ? AND aggregation_key = ?
            "#,
        )
        .bind(partition_key(driver_id))
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|r| {
            let total: i64 = r.get("total_amount_e4");
            let created_at: String = r.get("created_at");
            let updated_at: String = r.get("updated_at");
            Ok(TipAggregate {
                driver_id: driver_id.clone(),
                aggregation_key: key.clone(),
                total_amount: from_scaled(total),
                created_at: parse_row_time(&created_at)?,
                updated_at: parse_row_time(&updated_at)?,
            })
        })
        .transpose()
    }
}

/// Partition identity of a driver's aggregates.
fn partition_key(driver_id: &DriverId) -> String {
    format!("DRIVER#{}", driver_id.as_str())
}

fn to_scaled(amount: Decimal) -> Result<i64, StoreError> {
    let scaled = amount.inner() * rust_decimal::Decimal::from(10i64.pow(LEDGER_SCALE));
    if !scaled.fract().is_zero() {
        return Err(StoreError::Rejected(format!(
            "amount {} has more than {} fractional digits",
            amount, LEDGER_SCALE
        )));
    }
    scaled.to_i64().ok_or_else(|| {
        StoreError::Rejected(format!("amount {} overflows the ledger column", amount))
    })
}

fn from_scaled(total: i64) -> Decimal {
    Decimal::new(rust_decimal::Decimal::new(total, LEDGER_SCALE).normalize())
}

fn parse_row_time(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Unavailable(format!("corrupt timestamp {:?}: {}", s, e)))
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.message().contains("database or disk is full") => {
            StoreError::Rejected(db.message().to_string())
        }
        _ => StoreError::Unavailable(err.to_string()),
    }
}
