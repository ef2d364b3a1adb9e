//! In-memory aggregate store for tests.

use super::{AggregateStore, StoreError};
use crate::domain::{AggregationKey, Decimal, DriverId, TipAggregate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

/// Map-backed store. The map mutex serializes increments, simulating the
/// same no-lost-updates guarantee the SQLite upsert provides.
#[derive(Debug, Default)]
pub struct InMemoryAggregateStore {
    rows: Mutex<HashMap<(DriverId, AggregationKey), TipAggregate>>,
}

impl InMemoryAggregateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AggregateStore for InMemoryAggregateStore {
    async fn increment(
        &self,
        driver_id: &DriverId,
        key: &AggregationKey,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        match rows.entry((driver_id.clone(), key.clone())) {
            Entry::Occupied(mut entry) => {
                let aggregate = entry.get_mut();
                aggregate.total_amount = aggregate.total_amount + amount;
                aggregate.updated_at = now;
            }
            Entry::Vacant(entry) => {
                entry.insert(TipAggregate {
                    driver_id: driver_id.clone(),
                    aggregation_key: key.clone(),
                    total_amount: amount,
                    created_at: now,
                    updated_at: now,
                });
            }
        }
        Ok(())
    }

    async fn get(
        &self,
        driver_id: &DriverId,
        key: &AggregationKey,
    ) -> Result<Option<TipAggregate>, StoreError> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.get(&(driver_id.clone(), key.clone())).cloned())
    }
}
