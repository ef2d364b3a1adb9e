//! Aggregate store abstraction: durable, concurrency-safe tip counters.

use crate::domain::{AggregationKey, Decimal, DriverId, TipAggregate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryAggregateStore;
pub use sqlite::SqliteAggregateStore;

/// Keyed counter storage with an atomic add-and-create primitive.
///
/// All cross-caller correctness in the system rests on `increment`:
/// implementations must tolerate unbounded concurrent callers on the same
/// key without lost updates, with no coordination between callers.
#[async_trait]
pub trait AggregateStore: Send + Sync + fmt::Debug {
    /// Atomically add `amount` to the `(driver_id, key)` counter, treating
    /// an absent row as zero.
    ///
    /// Sets `updated_at = now` on every call; sets `created_at = now` only
    /// when this call creates the row (first write wins, never
    /// overwritten afterwards).
    async fn increment(
        &self,
        driver_id: &DriverId,
        key: &AggregationKey,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Point lookup; `None` means no tip has landed in that bucket yet.
    async fn get(
        &self,
        driver_id: &DriverId,
        key: &AggregationKey,
    ) -> Result<Option<TipAggregate>, StoreError>;
}

/// Failures surfaced by an aggregate store.
///
/// Both variants are retryable by the external delivery mechanism; the
/// distinction is whether the caller should back off first.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Transient infrastructure failure; retry the unit of work.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The medium refused the write (capacity, throttling); back off and
    /// retry.
    #[error("store rejected write: {0}")]
    Rejected(String),
}
